/// The visible data-space rectangle plus the grid spacing used for layout.
///
/// Invariant (enforced by `Graph::set_viewport`/`set_grid_size`, which are
/// the only mutation paths): `x_min < x_max`, `y_min < y_max`,
/// `grid_size > 0`, all finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
  pub x_min: f64,
  pub x_max: f64,
  pub y_min: f64,
  pub y_max: f64,
  pub grid_size: f64,
}

impl Default for Viewport {
  fn default() -> Self {
    Self {
      x_min: -10.0,
      x_max: 10.0,
      y_min: -5.0,
      y_max: 5.0,
      grid_size: 1.0,
    }
  }
}

/// The drawing surface in pixel coordinates: origin plus extent, with y
/// growing upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBounds {
  pub x: f64,
  pub y: f64,
  pub width: f64,
  pub height: f64,
}

impl PixelBounds {
  pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }
}

/// Map a data-space point into pixel space.
///
/// Affine per axis: `pixel = origin + (value - min) / (max - min) * extent`.
pub fn to_screen(
  point: (f64, f64),
  viewport: &Viewport,
  bounds: &PixelBounds,
) -> (f64, f64) {
  let (x, y) = point;
  (
    bounds.x + (x - viewport.x_min) / (viewport.x_max - viewport.x_min) * bounds.width,
    bounds.y + (y - viewport.y_min) / (viewport.y_max - viewport.y_min) * bounds.height,
  )
}

/// Map a pixel-space point back into data space. Exact inverse of
/// `to_screen` modulo floating-point rounding.
pub fn to_data(
  point: (f64, f64),
  viewport: &Viewport,
  bounds: &PixelBounds,
) -> (f64, f64) {
  let (px, py) = point;
  (
    viewport.x_min + (px - bounds.x) / bounds.width * (viewport.x_max - viewport.x_min),
    viewport.y_min + (py - bounds.y) / bounds.height * (viewport.y_max - viewport.y_min),
  )
}
