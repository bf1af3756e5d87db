//! Expression evaluation
//!
//! Parses a finished "operand operator operand" buffer, computes it with
//! ordinary `f64` arithmetic and formats the result for display. Every
//! failure ends up as the [`ERROR_TOKEN`]; the session stays usable.

use crate::types::{CalcError, Operator, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// Display value for any failed evaluation
pub const ERROR_TOKEN: &str = "ERR";

lazy_static! {
    /// First operand: optional sign, digits, optional fraction, optional signed exponent.
    static ref FIRST_OPERAND: Regex = Regex::new(
        r"^-?[0-9]+(?:\.[0-9]*)?(?:e[-+]?[0-9]+)?"
    ).unwrap();

    /// Second operand: the same literal at the end, directly after an operator symbol.
    static ref SECOND_OPERAND: Regex = Regex::new(
        r"[-+*/](-?[0-9]+(?:\.[0-9]*)?(?:e[-+]?[0-9]+)?)$"
    ).unwrap();

    /// A buffer that is exactly one literal.
    static ref LONE_NUMBER: Regex = Regex::new(
        r"^-?[0-9]+(?:\.[0-9]*)?(?:e[-+]?[0-9]+)?$"
    ).unwrap();
}

/// A parsed two-operand expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpression {
    pub lhs: f64,
    pub operator: Operator,
    pub rhs: f64,
}

impl BinaryExpression {
    /// Compute the expression, rejecting infinities and NaN
    pub fn compute(&self) -> Result<f64> {
        let value = self.operator.apply(self.lhs, self.rhs);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFiniteResult)
        }
    }
}

/// Check whether `text` is one complete numeric literal
pub fn is_number(text: &str) -> bool {
    LONE_NUMBER.is_match(text)
}

/// Parse `text` into its operands and operator
pub fn parse(text: &str) -> Result<BinaryExpression> {
    let malformed = || CalcError::MalformedExpression(text.to_string());

    let lhs = FIRST_OPERAND
        .find(text)
        .ok_or_else(malformed)?
        .as_str();
    let rhs = SECOND_OPERAND
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(malformed)?
        .as_str();
    let operator = find_operator(text).ok_or_else(malformed)?;

    Ok(BinaryExpression {
        lhs: lhs.parse().map_err(|_| malformed())?,
        operator,
        rhs: rhs.parse().map_err(|_| malformed())?,
    })
}

/// The first operator symbol directly preceded by a digit or a dot
///
/// A leading `-` or the `-` of an exponent is never preceded by either, so
/// only the binary operator qualifies.
fn find_operator(text: &str) -> Option<Operator> {
    let mut previous: Option<char> = None;
    for c in text.chars() {
        if let Some(op) = Operator::from_symbol(c) {
            if matches!(previous, Some(p) if p.is_ascii_digit() || p == '.') {
                return Some(op);
            }
        }
        previous = Some(c);
    }
    None
}

/// Format a finite result for the display
///
/// Integral values print without a fraction. Very large and very small
/// magnitudes switch to exponent notation, which the number recognizer can
/// read back.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 as well
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}

/// Evaluate a two-operand expression to its display string
///
/// Total over all inputs: malformed text and non-finite results return
/// [`ERROR_TOKEN`].
pub fn evaluate(text: &str) -> String {
    match parse(text).and_then(|expression| expression.compute()) {
        Ok(value) => {
            let result = format_number(value);
            log::debug!("Evaluated {:?} = {}", text, result);
            result
        }
        Err(e) => {
            log::debug!("Evaluation of {:?} failed: {}", text, e);
            ERROR_TOKEN.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(evaluate("11-10"), "1");
        assert_eq!(evaluate("-10*-10"), "100");
        assert_eq!(evaluate("99/33"), "3");
        assert_eq!(evaluate("-12.34+-15.43"), "-27.77");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("1/0"), ERROR_TOKEN);
        assert_eq!(evaluate("0/0"), ERROR_TOKEN);
        assert_eq!(
            parse("1/0").unwrap().compute(),
            Err(CalcError::NonFiniteResult)
        );
    }

    #[test]
    fn test_overflow() {
        assert_eq!(evaluate("1e308*10"), ERROR_TOKEN);
    }

    #[test]
    fn test_exponent_minus_is_not_operator() {
        let expr = parse("1e-5+2").unwrap();
        assert_eq!(expr.operator, Operator::Add);
        assert_eq!(expr.lhs, 1e-5);
        assert_eq!(expr.rhs, 2.0);
        assert_eq!(evaluate("5e-1-1"), "-0.5");
    }

    #[test]
    fn test_leading_sign_is_not_operator() {
        let expr = parse("-3--4").unwrap();
        assert_eq!(expr.lhs, -3.0);
        assert_eq!(expr.operator, Operator::Subtract);
        assert_eq!(expr.rhs, -4.0);
        assert_eq!(evaluate("-3--4"), "1");
    }

    #[test]
    fn test_trailing_dot_operands() {
        assert_eq!(evaluate("2.+3."), "5");
        assert_eq!(evaluate("1.5e2/3"), "50");
    }

    #[test]
    fn test_malformed_input() {
        for text in ["", "3", "ERR", "+", "1+", "e5*2", "ERR+1"] {
            assert_eq!(evaluate(text), ERROR_TOKEN, "{:?}", text);
        }
        assert!(matches!(parse("7"), Err(CalcError::MalformedExpression(_))));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1e21), "1e21");
        assert_eq!(format_number(5e-8), "5e-8");
        assert_eq!(format_number(123456789.0), "123456789");
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("3"));
        assert!(is_number("-27.77"));
        assert!(is_number("1e21"));
        assert!(is_number("1.5e-7"));
        assert!(!is_number("ERR"));
        assert!(!is_number(""));
        assert!(!is_number("1+2"));
        assert!(!is_number("-"));
    }
}
