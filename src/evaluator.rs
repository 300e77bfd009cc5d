use crate::graph::ParameterSet;
use crate::syntax::{BinaryOperator, Constant, Expr, MathFn, Var};
use crate::DomainError;

/// Evaluate a parsed expression at `x` under the given parameter binding.
///
/// Domain failures (division by zero, `log` of a non-positive number, and so
/// on) come back as `DomainError` for that single sample. A NaN or infinite
/// result is also a `DomainError`, regardless of which operation produced
/// it. The walk borrows the AST and allocates nothing; sampling calls this
/// up to ~1000 times per function per redraw.
pub fn evaluate(
  expr: &Expr,
  x: f64,
  params: &ParameterSet,
) -> Result<f64, DomainError> {
  let value = eval_node(expr, x, params)?;
  if value.is_finite() {
    Ok(value)
  } else {
    Err(DomainError::NonFinite)
  }
}

fn eval_node(
  expr: &Expr,
  x: f64,
  params: &ParameterSet,
) -> Result<f64, DomainError> {
  match expr {
    Expr::Number(n) => Ok(*n),
    Expr::Constant(Constant::Pi) => Ok(std::f64::consts::PI),
    Expr::Constant(Constant::E) => Ok(std::f64::consts::E),
    Expr::Variable(Var::X) => Ok(x),
    Expr::Variable(Var::A) => Ok(params.a()),
    Expr::Variable(Var::B) => Ok(params.b()),
    Expr::Variable(Var::C) => Ok(params.c()),
    Expr::Negate(operand) => Ok(-eval_node(operand, x, params)?),
    Expr::BinaryOp { op, left, right } => {
      let lhs = eval_node(left, x, params)?;
      let rhs = eval_node(right, x, params)?;
      match op {
        BinaryOperator::Plus => Ok(lhs + rhs),
        BinaryOperator::Minus => Ok(lhs - rhs),
        BinaryOperator::Times => Ok(lhs * rhs),
        BinaryOperator::Divide => {
          if rhs == 0.0 {
            Err(DomainError::DivisionByZero)
          } else {
            Ok(lhs / rhs)
          }
        }
        BinaryOperator::Power => Ok(lhs.powf(rhs)),
      }
    }
    Expr::Call { func, arg } => {
      let v = eval_node(arg, x, params)?;
      apply(*func, v)
    }
  }
}

fn apply(func: MathFn, v: f64) -> Result<f64, DomainError> {
  let out_of_domain = DomainError::OutOfDomain(func);
  match func {
    MathFn::Sin => Ok(v.sin()),
    MathFn::Cos => Ok(v.cos()),
    MathFn::Tan => Ok(v.tan()),
    MathFn::Asin => {
      if v.abs() > 1.0 {
        Err(out_of_domain)
      } else {
        Ok(v.asin())
      }
    }
    MathFn::Acos => {
      if v.abs() > 1.0 {
        Err(out_of_domain)
      } else {
        Ok(v.acos())
      }
    }
    MathFn::Atan => Ok(v.atan()),
    MathFn::Sinh => Ok(v.sinh()),
    MathFn::Cosh => Ok(v.cosh()),
    MathFn::Tanh => Ok(v.tanh()),
    MathFn::Exp => Ok(v.exp()),
    MathFn::Log => {
      if v <= 0.0 {
        Err(out_of_domain)
      } else {
        Ok(v.ln())
      }
    }
    MathFn::Log10 => {
      if v <= 0.0 {
        Err(out_of_domain)
      } else {
        Ok(v.log10())
      }
    }
    MathFn::Sqrt => {
      if v < 0.0 {
        Err(out_of_domain)
      } else {
        Ok(v.sqrt())
      }
    }
    MathFn::Abs => Ok(v.abs()),
    MathFn::Ceil => Ok(v.ceil()),
    MathFn::Floor => Ok(v.floor()),
    // Half-to-even, matching the evaluator the original expressions were
    // written against.
    MathFn::Round => Ok(v.round_ties_even()),
    MathFn::Factorial => factorial(v),
  }
}

/// `factorial` accepts only non-negative integral arguments. Results above
/// `170!` overflow `f64` and surface as `NonFinite` from the top-level
/// finiteness check.
fn factorial(v: f64) -> Result<f64, DomainError> {
  if v < 0.0 || v.fract() != 0.0 {
    return Err(DomainError::OutOfDomain(MathFn::Factorial));
  }
  if v > 170.0 {
    return Ok(f64::INFINITY);
  }
  let n = v as u32;
  Ok((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
}
