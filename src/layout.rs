use crate::viewport::{to_screen, PixelBounds, Viewport};

/// One gridline/tick position on an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
  /// Data-space value, always a multiple of the grid size.
  pub value: f64,
  /// Pixel position along the tick's own axis.
  pub pixel: f64,
  /// Pixel position along the crossing axis where the tick mark sits: on
  /// the axis line when it is visible, else inset 10 px from the surface
  /// edge.
  pub anchor: f64,
  /// Label text, or `None` for ticks within 0.01 of the origin (their
  /// label would overlap the origin marker).
  pub label: Option<String>,
}

/// Tick positions for both axes plus the axis lines themselves.
///
/// `x_axis` is the pixel y of the data line `y = 0`, present only when that
/// line is inside the viewport; `y_axis` is the pixel x of `x = 0`,
/// likewise.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
  pub x_ticks: Vec<Tick>,
  pub y_ticks: Vec<Tick>,
  pub x_axis: Option<f64>,
  pub y_axis: Option<f64>,
}

/// Format a tick value, dropping the trailing ".0" for whole numbers.
pub fn format_tick(v: f64) -> String {
  if (v - v.round()).abs() < 1e-9 {
    format!("{}", v.round() as i64)
  } else {
    format!("{v:.1}")
  }
}

/// Compute gridline, tick and axis placement for a viewport.
///
/// Ticks sit at every multiple of `grid_size` inside the range, phase-
/// anchored at `floor(min / grid_size) * grid_size`. The viewport invariant
/// (`Graph` never stores an empty range or non-positive grid size) means
/// this cannot fail.
pub fn layout(viewport: &Viewport, bounds: &PixelBounds) -> AxisLayout {
  let x_axis = if viewport.y_min <= 0.0 && 0.0 <= viewport.y_max {
    Some(to_screen((0.0, 0.0), viewport, bounds).1)
  } else {
    None
  };
  let y_axis = if viewport.x_min <= 0.0 && 0.0 <= viewport.x_max {
    Some(to_screen((0.0, 0.0), viewport, bounds).0)
  } else {
    None
  };

  // Ticks anchor to the axis line when visible, else to the surface edge.
  let x_tick_anchor = x_axis.unwrap_or(bounds.y + 10.0);
  let y_tick_anchor = y_axis.unwrap_or(bounds.x + 10.0);

  let x_ticks = tick_values(viewport.x_min, viewport.x_max, viewport.grid_size)
    .into_iter()
    .map(|value| Tick {
      value,
      pixel: to_screen((value, 0.0), viewport, bounds).0,
      anchor: x_tick_anchor,
      label: tick_label(value),
    })
    .collect();
  let y_ticks = tick_values(viewport.y_min, viewport.y_max, viewport.grid_size)
    .into_iter()
    .map(|value| Tick {
      value,
      pixel: to_screen((0.0, value), viewport, bounds).1,
      anchor: y_tick_anchor,
      label: tick_label(value),
    })
    .collect();

  AxisLayout {
    x_ticks,
    y_ticks,
    x_axis,
    y_axis,
  }
}

fn tick_label(value: f64) -> Option<String> {
  if value.abs() > 0.01 {
    Some(format_tick(value))
  } else {
    None
  }
}

fn tick_values(min: f64, max: f64, step: f64) -> Vec<f64> {
  let mut values = Vec::new();
  let start = (min / step).floor() * step;
  let eps = step * 1e-9;
  let mut k = 0u32;
  loop {
    let value = start + f64::from(k) * step;
    if value > max + eps {
      break;
    }
    if value >= min - eps {
      values.push(value);
    }
    k += 1;
  }
  values
}
