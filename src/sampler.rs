use crate::evaluator::evaluate;
use crate::graph::ParameterSet;
use crate::syntax::Expr;
use crate::viewport::{to_screen, PixelBounds, Viewport};

/// An ordered sequence of pixel-space points drawn as connected segments.
pub type Polyline = Vec<(f64, f64)>;

/// Reference sampling density: 1000 samples over the default width-20
/// domain keeps the trigonometric templates smooth.
pub const SAMPLES_PER_CURVE: usize = 1000;

/// Sample a function over the viewport's x range and produce one polyline
/// per contiguous run of drawable samples.
///
/// A sample is drawable when evaluation succeeds and the value lies inside
/// the viewport's y range; anything else (domain error, NaN/infinity,
/// off-screen value) closes the polyline in progress, so curves break at
/// asymptotes instead of joining across them. Runs shorter than two points
/// are discarded — an isolated valid sample is not drawn.
pub fn sample_function(
  expr: &Expr,
  params: &ParameterSet,
  viewport: &Viewport,
  bounds: &PixelBounds,
) -> Vec<Polyline> {
  sample_function_n(expr, params, viewport, bounds, SAMPLES_PER_CURVE)
}

/// `sample_function` with an explicit sample count, for callers that want
/// to scale density with their surface width.
pub fn sample_function_n(
  expr: &Expr,
  params: &ParameterSet,
  viewport: &Viewport,
  bounds: &PixelBounds,
  samples: usize,
) -> Vec<Polyline> {
  let mut polylines: Vec<Polyline> = Vec::new();
  let mut current: Polyline = Vec::new();
  if samples < 2 {
    return polylines;
  }

  let step = (viewport.x_max - viewport.x_min) / (samples - 1) as f64;
  for i in 0..samples {
    let x = viewport.x_min + step * i as f64;
    match evaluate(expr, x, params) {
      Ok(y) if y >= viewport.y_min && y <= viewport.y_max => {
        current.push(to_screen((x, y), viewport, bounds));
      }
      _ => {
        if current.len() > 1 {
          polylines.push(std::mem::take(&mut current));
        } else {
          current.clear();
        }
      }
    }
  }
  if current.len() > 1 {
    polylines.push(current);
  }
  polylines
}
