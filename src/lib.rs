use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod evaluator;
pub mod graph;
pub mod layout;
pub mod sampler;
pub mod syntax;
pub mod viewport;

pub use graph::{
  CurveSet, Frame, FunctionId, Graph, ParameterSet, Rgba, Validation,
  COLOR_PALETTE, TEMPLATES,
};
pub use layout::{AxisLayout, Tick};
pub use sampler::{Polyline, SAMPLES_PER_CURVE};
pub use viewport::{PixelBounds, Viewport};

#[derive(Parser)]
#[grammar = "expression.pest"]
pub struct ExpressionParser;

/// Parse-time failure of a function expression. Both variants are local to
/// one function entity and never affect the rest of the graph.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
  #[error("Syntax error: {0}")]
  Syntax(Box<pest::error::Error<Rule>>),
  #[error("Unknown function or variable: {0}")]
  UnknownName(String),
  #[error("Invalid number: {0}")]
  InvalidNumber(String),
}

/// Runtime evaluation failure at a single `x`. The sampler treats this as
/// "no value here" and breaks the polyline; it is never a function-level
/// error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
  #[error("Division by zero")]
  DivisionByZero,
  #[error("Argument out of domain for {0}")]
  OutOfDomain(syntax::MathFn),
  #[error("Result is not a finite number")]
  NonFinite,
}

/// Rejected viewport change. The previous viewport is always retained.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ViewportError {
  #[error("Viewport bounds must be finite numbers")]
  NotFinite,
  #[error("Empty x range: {0} must be less than {1}")]
  EmptyXRange(f64, f64),
  #[error("Empty y range: {0} must be less than {1}")]
  EmptyYRange(f64, f64),
}

/// Rejected configuration change. The previous configuration is retained.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
  #[error("Grid size must be positive, got {0}")]
  NonPositiveGridSize(f64),
  #[error("Invalid parameter bounds: {0}..{1}")]
  InvalidParameterBounds(f64, f64),
}

/// An operation addressed a function entity that does not exist.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
  #[error("No function with id {0}")]
  UnknownFunction(usize),
}

/// Parse an expression into its validated AST.
///
/// Returns `Ok(None)` for empty (or all-whitespace) text: the function is
/// valid but inactive and contributes no curve. Everything the grammar does
/// not expose is rejected here, so the evaluator can never be reached by an
/// unvetted construct.
pub fn parse(input: &str) -> Result<Option<syntax::Expr>, ParseError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  let pairs = ExpressionParser::parse(Rule::Input, trimmed)
    .map_err(|e| ParseError::Syntax(Box::new(e)))?;
  syntax::lower(pairs).map(Some)
}
