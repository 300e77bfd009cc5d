use crate::layout::{layout, AxisLayout};
use crate::sampler::{sample_function, Polyline};
use crate::syntax::Expr;
use crate::viewport::{PixelBounds, Viewport};
use crate::{parse, ConfigError, GraphError, ParseError, ViewportError};

/// Stable handle for a function entity. Ids are monotonic and never reused.
pub type FunctionId = usize;

/// RGBA display color, components in 0..=1.
pub type Rgba = [f32; 4];

/// Default per-function colors, assigned round-robin by id.
pub const COLOR_PALETTE: [Rgba; 8] = [
  [0.9, 0.2, 0.2, 1.0], // red
  [0.1, 0.7, 0.1, 1.0], // green
  [0.1, 0.3, 0.9, 1.0], // blue
  [0.8, 0.1, 0.8, 1.0], // magenta
  [0.9, 0.7, 0.1, 1.0], // yellow
  [0.1, 0.7, 0.7, 1.0], // cyan
  [1.0, 0.5, 0.0, 1.0], // orange
  [0.6, 0.1, 0.9, 1.0], // purple
];

/// Named template formulas offered by the UI layer. These are ordinary
/// expression text — the core gives them no special treatment, but every
/// entry is expected to parse.
pub const TEMPLATES: &[(&str, &str)] = &[
  ("Linear", "a*x + b"),
  ("Quadratic", "a*x**2 + b*x + c"),
  ("Cubic", "a*x**3 + b*x**2 + c*x + 1"),
  ("Sine", "a*sin(b*x + c)"),
  ("Cosine", "a*cos(b*x + c)"),
  ("Tangent", "a*tan(b*x + c)"),
  ("Exponential", "a*exp(b*x)"),
  ("Logarithmic", "a*log(b*x + c)"),
  ("Square Root", "a*sqrt(b*x + c)"),
  ("Absolute", "a*abs(b*x + c)"),
  ("Reciprocal", "a/(b*x + c)"),
  ("Power", "a*x**b"),
  ("Sine Squared", "a*sin(b*x)**2"),
  ("Damped Sine", "a*exp(-b*x)*sin(c*x)"),
  ("Gaussian", "a*exp(-(x-b)**2/c)"),
];

/// The three shared scalar parameters `a`, `b`, `c`, each clamped into a
/// common bounded range.
///
/// Invariant: the bounds are finite with `min ≤ max`, and every stored
/// value lies inside them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
  a: f64,
  b: f64,
  c: f64,
  min: f64,
  max: f64,
}

impl Default for ParameterSet {
  fn default() -> Self {
    Self {
      a: 1.0,
      b: 1.0,
      c: 1.0,
      min: 0.0,
      max: 5.0,
    }
  }
}

impl ParameterSet {
  pub fn a(&self) -> f64 {
    self.a
  }

  pub fn b(&self) -> f64 {
    self.b
  }

  pub fn c(&self) -> f64 {
    self.c
  }

  pub fn bounds(&self) -> (f64, f64) {
    (self.min, self.max)
  }

  /// Update any subset of the parameters. Values are clamped into the
  /// bounds; non-finite values are ignored and the prior value retained.
  pub fn set(&mut self, a: Option<f64>, b: Option<f64>, c: Option<f64>) {
    let (min, max) = (self.min, self.max);
    for (slot, value) in [(&mut self.a, a), (&mut self.b, b), (&mut self.c, c)]
    {
      if let Some(v) = value {
        if v.is_finite() {
          *slot = v.clamp(min, max);
        }
      }
    }
  }

  /// Replace the shared bounds, re-clamping the current values. Rejects
  /// non-finite or inverted bounds without touching anything.
  pub fn set_bounds(&mut self, min: f64, max: f64) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() || min > max {
      return Err(ConfigError::InvalidParameterBounds(min, max));
    }
    self.min = min;
    self.max = max;
    self.a = self.a.clamp(min, max);
    self.b = self.b.clamp(min, max);
    self.c = self.c.clamp(min, max);
    Ok(())
  }
}

/// Outcome of parsing one function's expression text.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
  pub ok: bool,
  pub message: Option<String>,
}

impl Validation {
  fn from_parse(result: &Result<Option<Expr>, ParseError>) -> Self {
    match result {
      Ok(_) => Self {
        ok: true,
        message: None,
      },
      Err(e) => Self {
        ok: false,
        message: Some(e.to_string()),
      },
    }
  }
}

/// One function of `x`: raw text plus its parse state and display color.
///
/// Always in exactly one of two states — `Ok(ast)` (where `None` means an
/// empty, inactive expression) or `Err(parse error)`. Geometry is produced
/// only from the first.
#[derive(Debug, Clone)]
struct FunctionEntity {
  id: FunctionId,
  text: String,
  color: Rgba,
  parsed: Result<Option<Expr>, ParseError>,
}

/// Sampled geometry for one function, in draw order within a `Frame`.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSet {
  pub id: FunctionId,
  pub color: Rgba,
  pub polylines: Vec<Polyline>,
}

/// Everything a renderer needs for one redraw: per-function polylines (in
/// insertion/draw order), the axis layout, and each function's validation
/// state. Ephemeral — recomputed from scratch on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
  pub curves: Vec<CurveSet>,
  pub axes: AxisLayout,
  pub validity: Vec<(FunctionId, Validation)>,
}

/// The graph engine: the ordered function collection, the shared parameter
/// set and the viewport, with demand-driven geometry production.
///
/// Every mutating operation either fully succeeds or leaves prior state
/// untouched; no expression error can affect another function or the shared
/// state.
#[derive(Debug, Clone, Default)]
pub struct Graph {
  functions: Vec<FunctionEntity>,
  next_id: FunctionId,
  params: ParameterSet,
  viewport: Viewport,
}

impl Graph {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn viewport(&self) -> &Viewport {
    &self.viewport
  }

  pub fn parameters(&self) -> &ParameterSet {
    &self.params
  }

  pub fn function_count(&self) -> usize {
    self.functions.len()
  }

  /// Add a function with the given expression text. Without an explicit
  /// color the entity gets the next palette color. The text is parsed
  /// immediately; a parse failure still creates the entity (in its invalid,
  /// non-drawing state) so the caller can surface the message.
  pub fn add_function(&mut self, text: &str, color: Option<Rgba>) -> FunctionId {
    let id = self.next_id;
    self.next_id += 1;
    self.functions.push(FunctionEntity {
      id,
      text: text.to_string(),
      color: color.unwrap_or(COLOR_PALETTE[id % COLOR_PALETTE.len()]),
      parsed: parse(text),
    });
    id
  }

  /// Re-parse a function's expression after an edit. The stored AST is
  /// replaced atomically; on a parse error the entity keeps the new text
  /// together with the error state. Returns the validation outcome for the
  /// caller's error display.
  pub fn update_expression(
    &mut self,
    id: FunctionId,
    text: &str,
  ) -> Result<Validation, GraphError> {
    let entity = self
      .functions
      .iter_mut()
      .find(|f| f.id == id)
      .ok_or(GraphError::UnknownFunction(id))?;
    entity.text = text.to_string();
    entity.parsed = parse(text);
    Ok(Validation::from_parse(&entity.parsed))
  }

  /// Remove a function and, with it, its geometry. Removing an id that does
  /// not exist is a no-op.
  pub fn remove_function(&mut self, id: FunctionId) {
    self.functions.retain(|f| f.id != id);
  }

  pub fn clear_functions(&mut self) {
    self.functions.clear();
  }

  /// Update any subset of the shared parameters (clamped into bounds).
  /// Geometry is recomputed on the next `render`.
  pub fn set_parameters(
    &mut self,
    a: Option<f64>,
    b: Option<f64>,
    c: Option<f64>,
  ) {
    self.params.set(a, b, c);
  }

  pub fn set_parameter_bounds(
    &mut self,
    min: f64,
    max: f64,
  ) -> Result<(), ConfigError> {
    self.params.set_bounds(min, max)
  }

  /// Replace the visible data range. Non-finite values and empty ranges are
  /// rejected, leaving the previous viewport unchanged.
  pub fn set_viewport(
    &mut self,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
  ) -> Result<(), ViewportError> {
    if ![x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite()) {
      return Err(ViewportError::NotFinite);
    }
    if x_min >= x_max {
      return Err(ViewportError::EmptyXRange(x_min, x_max));
    }
    if y_min >= y_max {
      return Err(ViewportError::EmptyYRange(y_min, y_max));
    }
    self.viewport.x_min = x_min;
    self.viewport.x_max = x_max;
    self.viewport.y_min = y_min;
    self.viewport.y_max = y_max;
    Ok(())
  }

  pub fn set_grid_size(&mut self, size: f64) -> Result<(), ConfigError> {
    if !size.is_finite() || size <= 0.0 {
      return Err(ConfigError::NonPositiveGridSize(size));
    }
    self.viewport.grid_size = size;
    Ok(())
  }

  /// Recompute all geometry for the given drawing surface.
  ///
  /// Each function's curves depend only on its own AST plus the shared
  /// parameter set and viewport, both read-only for the duration of the
  /// pass. Inactive (empty) and invalid functions contribute an empty
  /// polyline list but still appear in the frame.
  pub fn render(&self, bounds: &PixelBounds) -> Frame {
    let mut curves = Vec::with_capacity(self.functions.len());
    let mut validity = Vec::with_capacity(self.functions.len());
    for entity in &self.functions {
      let polylines = match &entity.parsed {
        Ok(Some(expr)) => {
          sample_function(expr, &self.params, &self.viewport, bounds)
        }
        _ => Vec::new(),
      };
      curves.push(CurveSet {
        id: entity.id,
        color: entity.color,
        polylines,
      });
      validity.push((entity.id, Validation::from_parse(&entity.parsed)));
    }
    Frame {
      curves,
      axes: layout(&self.viewport, bounds),
      validity,
    }
  }
}
