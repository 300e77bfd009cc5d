use pest::iterators::{Pair, Pairs};

use crate::{ParseError, Rule};

/// Structural representation of a parsed function expression.
///
/// This is a closed vocabulary: the only callable things are the `MathFn`
/// variants and the only names are `Variable`/`Constant`. Nothing outside it
/// survives lowering, which is what makes the evaluator a sandbox.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Number(f64),
  Constant(Constant),
  Variable(Var),
  Call {
    func: MathFn,
    arg: Box<Expr>,
  },
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  Negate(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
  Pi,
  E,
}

/// The sample variable and the three shared parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var {
  X,
  A,
  B,
  C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Power,
}

/// The fixed whitelist of callable functions. Each takes exactly one
/// argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFn {
  Sin,
  Cos,
  Tan,
  Asin,
  Acos,
  Atan,
  Sinh,
  Cosh,
  Tanh,
  Exp,
  Log,
  Log10,
  Sqrt,
  Abs,
  Ceil,
  Floor,
  Round,
  Factorial,
}

impl MathFn {
  pub fn from_name(name: &str) -> Option<Self> {
    Some(match name {
      "sin" => Self::Sin,
      "cos" => Self::Cos,
      "tan" => Self::Tan,
      "asin" => Self::Asin,
      "acos" => Self::Acos,
      "atan" => Self::Atan,
      "sinh" => Self::Sinh,
      "cosh" => Self::Cosh,
      "tanh" => Self::Tanh,
      "exp" => Self::Exp,
      "log" => Self::Log,
      "log10" => Self::Log10,
      "sqrt" => Self::Sqrt,
      "abs" => Self::Abs,
      "ceil" => Self::Ceil,
      "floor" => Self::Floor,
      "round" => Self::Round,
      "factorial" => Self::Factorial,
      _ => return None,
    })
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Sin => "sin",
      Self::Cos => "cos",
      Self::Tan => "tan",
      Self::Asin => "asin",
      Self::Acos => "acos",
      Self::Atan => "atan",
      Self::Sinh => "sinh",
      Self::Cosh => "cosh",
      Self::Tanh => "tanh",
      Self::Exp => "exp",
      Self::Log => "log",
      Self::Log10 => "log10",
      Self::Sqrt => "sqrt",
      Self::Abs => "abs",
      Self::Ceil => "ceil",
      Self::Floor => "floor",
      Self::Round => "round",
      Self::Factorial => "factorial",
    }
  }
}

impl std::fmt::Display for MathFn {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

/// Lower the pest parse result for `Rule::Input` into an `Expr`.
///
/// Name resolution happens here: identifiers outside the fixed vocabulary
/// and calls outside the whitelist become `ParseError::UnknownName`, so an
/// unknown name is a parse-time error, not a runtime one.
pub fn lower(mut pairs: Pairs<Rule>) -> Result<Expr, ParseError> {
  let expression = pairs
    .find(|p| p.as_rule() == Rule::Expression)
    .expect("Input always contains an Expression");
  lower_expression(expression)
}

fn lower_expression(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let mut inner = pair.into_inner();
  let first = inner.next().expect("Expression has at least one Term");
  let mut expr = lower_term(first)?;
  // Left-fold the (AddOp ~ Term)* tail
  while let Some(op_pair) = inner.next() {
    let term = inner.next().expect("operator is always followed by a Term");
    let op = match op_pair.as_str() {
      "+" => BinaryOperator::Plus,
      _ => BinaryOperator::Minus,
    };
    expr = Expr::BinaryOp {
      op,
      left: Box::new(expr),
      right: Box::new(lower_term(term)?),
    };
  }
  Ok(expr)
}

fn lower_term(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let mut inner = pair.into_inner();
  let first = inner.next().expect("Term has at least one Unary");
  let mut expr = lower_unary(first)?;
  while let Some(op_pair) = inner.next() {
    let unary = inner.next().expect("operator is always followed by a Unary");
    let op = match op_pair.as_str() {
      "*" => BinaryOperator::Times,
      _ => BinaryOperator::Divide,
    };
    expr = Expr::BinaryOp {
      op,
      left: Box::new(expr),
      right: Box::new(lower_unary(unary)?),
    };
  }
  Ok(expr)
}

fn lower_unary(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let mut negations = 0;
  let mut power = None;
  for p in pair.into_inner() {
    match p.as_rule() {
      Rule::NegOp => negations += 1,
      _ => power = Some(lower_power(p)?),
    }
  }
  let mut expr = power.expect("Unary always ends in a Power");
  for _ in 0..negations {
    expr = Expr::Negate(Box::new(expr));
  }
  Ok(expr)
}

fn lower_power(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let mut inner = pair.into_inner();
  let base = lower_primary(inner.next().expect("Power has a Primary"))?;
  // The optional exponent is a Unary, which makes `**` right-associative.
  match inner.nth(1) {
    Some(exponent) => Ok(Expr::BinaryOp {
      op: BinaryOperator::Power,
      left: Box::new(base),
      right: Box::new(lower_unary(exponent)?),
    }),
    None => Ok(base),
  }
}

fn lower_primary(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let inner = pair
    .into_inner()
    .next()
    .expect("Primary wraps exactly one node");
  match inner.as_rule() {
    Rule::Number => {
      let text = inner.as_str();
      text
        .parse::<f64>()
        .map(Expr::Number)
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
    }
    Rule::Call => {
      let mut parts = inner.into_inner();
      let name = parts.next().expect("Call starts with an Identifier");
      let func = MathFn::from_name(name.as_str())
        .ok_or_else(|| ParseError::UnknownName(name.as_str().to_string()))?;
      let arg = parts.next().expect("Call has an argument Expression");
      Ok(Expr::Call {
        func,
        arg: Box::new(lower_expression(arg)?),
      })
    }
    Rule::Identifier => match inner.as_str() {
      "x" => Ok(Expr::Variable(Var::X)),
      "a" => Ok(Expr::Variable(Var::A)),
      "b" => Ok(Expr::Variable(Var::B)),
      "c" => Ok(Expr::Variable(Var::C)),
      "pi" => Ok(Expr::Constant(Constant::Pi)),
      "e" => Ok(Expr::Constant(Constant::E)),
      other => Err(ParseError::UnknownName(other.to_string())),
    },
    Rule::Expression => lower_expression(inner),
    rule => unreachable!("unexpected rule inside Primary: {rule:?}"),
  }
}
