use graphcalc::evaluator::evaluate;
use graphcalc::syntax::{Expr, MathFn};
use graphcalc::{parse, DomainError, ParameterSet};

fn eval_at(text: &str, x: f64, params: &ParameterSet) -> Result<f64, DomainError> {
  let ast = parse(text).unwrap().unwrap();
  evaluate(&ast, x, params)
}

fn assert_close(actual: f64, expected: f64) {
  assert!(
    (actual - expected).abs() < 1e-9,
    "expected {expected}, got {actual}"
  );
}

#[test]
fn test_arithmetic_precedence() {
  let params = ParameterSet::default();
  assert_close(eval_at("2 + 3 * 4", 0.0, &params).unwrap(), 14.0);
  assert_close(eval_at("(2 + 3) * 4", 0.0, &params).unwrap(), 20.0);
  assert_close(eval_at("2**3**2", 0.0, &params).unwrap(), 512.0);
  assert_close(eval_at("2**-1", 0.0, &params).unwrap(), 0.5);
  assert_close(eval_at("-x**2", 3.0, &params).unwrap(), -9.0);
}

#[test]
fn test_constants() {
  let params = ParameterSet::default();
  assert_close(eval_at("pi", 0.0, &params).unwrap(), std::f64::consts::PI);
  assert_close(eval_at("e", 0.0, &params).unwrap(), std::f64::consts::E);
  assert_close(eval_at("sin(pi)", 0.0, &params).unwrap(), 0.0);
  assert_close(eval_at("log(e)", 0.0, &params).unwrap(), 1.0);
}

#[test]
fn test_parameters_resolve_from_set() {
  let mut params = ParameterSet::default();
  params.set(Some(2.0), Some(3.0), None);
  assert_close(eval_at("a*x + b", 0.0, &params).unwrap(), 3.0);
  assert_close(eval_at("a*x + b", 5.0, &params).unwrap(), 13.0);
  // c keeps its default
  assert_close(eval_at("c", 0.0, &params).unwrap(), 1.0);
}

#[test]
fn test_parameter_clamping() {
  let mut params = ParameterSet::default();
  params.set(Some(10.0), Some(-3.0), None);
  assert_close(params.a(), 5.0);
  assert_close(params.b(), 0.0);
}

#[test]
fn test_non_finite_parameter_values_are_ignored() {
  let mut params = ParameterSet::default();
  params.set(Some(2.0), None, None);
  params.set(Some(f64::NAN), Some(f64::INFINITY), None);
  assert_close(params.a(), 2.0);
  assert_close(params.b(), 1.0);
}

#[test]
fn test_division_by_zero() {
  let params = ParameterSet::default();
  assert_eq!(
    eval_at("1/x", 0.0, &params),
    Err(DomainError::DivisionByZero)
  );
  assert_close(eval_at("1/x", 2.0, &params).unwrap(), 0.5);
}

#[test]
fn test_log_domain() {
  let params = ParameterSet::default();
  assert_eq!(
    eval_at("log(x)", 0.0, &params),
    Err(DomainError::OutOfDomain(MathFn::Log))
  );
  assert_eq!(
    eval_at("log10(x)", -1.0, &params),
    Err(DomainError::OutOfDomain(MathFn::Log10))
  );
  assert_close(eval_at("log10(x)", 100.0, &params).unwrap(), 2.0);
}

#[test]
fn test_sqrt_domain() {
  let params = ParameterSet::default();
  assert_eq!(
    eval_at("sqrt(x)", -4.0, &params),
    Err(DomainError::OutOfDomain(MathFn::Sqrt))
  );
  assert_close(eval_at("sqrt(x)", 9.0, &params).unwrap(), 3.0);
}

#[test]
fn test_inverse_trig_domain() {
  let params = ParameterSet::default();
  assert_eq!(
    eval_at("asin(x)", 2.0, &params),
    Err(DomainError::OutOfDomain(MathFn::Asin))
  );
  assert_eq!(
    eval_at("acos(x)", -1.5, &params),
    Err(DomainError::OutOfDomain(MathFn::Acos))
  );
  assert_close(eval_at("asin(x)", 1.0, &params).unwrap(), std::f64::consts::FRAC_PI_2);
}

#[test]
fn test_factorial() {
  let params = ParameterSet::default();
  assert_close(eval_at("factorial(x)", 5.0, &params).unwrap(), 120.0);
  assert_close(eval_at("factorial(x)", 0.0, &params).unwrap(), 1.0);
  assert_eq!(
    eval_at("factorial(x)", 2.5, &params),
    Err(DomainError::OutOfDomain(MathFn::Factorial))
  );
  assert_eq!(
    eval_at("factorial(x)", -1.0, &params),
    Err(DomainError::OutOfDomain(MathFn::Factorial))
  );
  // 171! overflows f64 and is caught by the finiteness check
  assert_eq!(
    eval_at("factorial(x)", 171.0, &params),
    Err(DomainError::NonFinite)
  );
}

#[test]
fn test_round_is_half_to_even() {
  let params = ParameterSet::default();
  assert_close(eval_at("round(x)", 2.5, &params).unwrap(), 2.0);
  assert_close(eval_at("round(x)", 3.5, &params).unwrap(), 4.0);
  assert_close(eval_at("round(x)", 2.4, &params).unwrap(), 2.0);
}

#[test]
fn test_non_finite_results_are_domain_errors() {
  let params = ParameterSet::default();
  // exp overflow
  assert_eq!(
    eval_at("exp(x)", 1000.0, &params),
    Err(DomainError::NonFinite)
  );
  // 0**-1 goes through powf, not the division check
  assert_eq!(
    eval_at("x**-1", 0.0, &params),
    Err(DomainError::NonFinite)
  );
  // NaN from a fractional power of a negative base
  assert_eq!(
    eval_at("x**0.5", -2.0, &params),
    Err(DomainError::NonFinite)
  );
}

#[test]
fn test_parameter_bounds_reconfiguration() {
  let mut params = ParameterSet::default();
  assert!(params.set_bounds(3.0, 1.0).is_err());
  assert_eq!(params.bounds(), (0.0, 5.0));

  params.set_bounds(0.0, 10.0).unwrap();
  params.set(Some(7.0), None, None);
  assert_close(params.a(), 7.0);

  // shrinking the bounds re-clamps stored values
  params.set_bounds(0.0, 5.0).unwrap();
  assert_close(params.a(), 5.0);
}

#[test]
fn test_evaluation_of_direct_ast() {
  // The evaluator also accepts hand-built trees
  let params = ParameterSet::default();
  let ast = Expr::Call {
    func: MathFn::Abs,
    arg: Box::new(Expr::Number(-3.5)),
  };
  assert_close(evaluate(&ast, 0.0, &params).unwrap(), 3.5);
}
