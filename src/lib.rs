pub mod error;
pub mod eval;
pub mod lex;
pub mod parse;

pub use error::EvalError;
pub use eval::{DEFAULT_MAX_DEPTH, Evaluator};
pub use lex::Lexer;

/// Evaluates `input` as an arithmetic expression.
///
/// Leading and trailing whitespace is ignored. Division by zero yields an
/// infinity or NaN rather than an error.
///
/// ```
/// assert_eq!(arith_eval::evaluate_expression("2**3**2").unwrap(), 512.0);
/// assert!(arith_eval::evaluate_expression("(1 + 2").is_err());
/// ```
pub fn evaluate_expression(input: &str) -> Result<f64, EvalError> {
    Evaluator::new(None, input).evaluate_all()
}
