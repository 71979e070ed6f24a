//! Range bound checks.
//!
//! Bounds are numeric literals kept as text. Integer ranges take whole
//! numbers only; double ranges require an explicit decimal part so the
//! precision is visible in the model.

use efs_diagnostic::{Diagnostic, ErrorCode};
use efs_lexer::TokenKind;

use crate::{Precision, RangeDef};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Number {
    value: f64,
    has_decimal: bool,
}

/// Read a bound as the lexer sees it: an optional `-` then one integer or
/// float literal.
fn parse_number(text: &str) -> Option<Number> {
    let tokens = efs_lexer::lex(text.trim());
    let mut kinds = tokens.kinds().peekable();
    let negative = kinds.next_if_eq(&&TokenKind::Minus).is_some();
    let has_decimal = match (kinds.next(), kinds.next()) {
        (Some(TokenKind::Int(_) | TokenKind::LargeInt(_)), Some(TokenKind::Eof)) => false,
        (Some(TokenKind::Float(_)), Some(TokenKind::Eof)) => true,
        _ => return None,
    };
    let digits = text.trim().trim_start_matches('-').trim_start();
    let magnitude: f64 = digits.parse().ok()?;
    Some(Number {
        value: if negative { -magnitude } else { magnitude },
        has_decimal,
    })
}

/// Check one bound; returns its value when it is usable for comparisons.
fn check_bound(
    range_name: &str,
    precision: Precision,
    bound: &str,
    text: &str,
    out: &mut Vec<Diagnostic>,
) -> Option<f64> {
    let Some(number) = parse_number(text) else {
        out.push(
            Diagnostic::error(ErrorCode::E4001)
                .with_message(format!("Cannot parse {bound} value {text} of range {range_name}")),
        );
        return None;
    };

    match (precision, number.has_decimal) {
        (Precision::Integer, true) => out.push(Diagnostic::error(ErrorCode::E4002).with_message(
            format!("Invalid {bound} value {text} for integer range: must be an integer"),
        )),
        (Precision::Double, false) => out.push(Diagnostic::error(ErrorCode::E4003).with_message(
            format!("Invalid {bound} value {text} for double range: must have a decimal part"),
        )),
        _ => {}
    }
    Some(number.value)
}

/// Check the bounds of the range `name`.
pub fn check_range(name: &str, range: &RangeDef) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let min = check_bound(name, range.precision, "minimum", &range.min_value, &mut out);
    let max = check_bound(name, range.precision, "maximum", &range.max_value, &mut out);
    let default = range
        .default_value
        .as_deref()
        .and_then(|default| check_bound(name, range.precision, "default", default, &mut out));

    let (Some(min), Some(max)) = (min, max) else {
        return out;
    };
    if min > max {
        out.push(Diagnostic::error(ErrorCode::E4004).with_message(format!(
            "Minimum value {} of range {name} exceeds its maximum value {}",
            range.min_value, range.max_value
        )));
    } else if let Some(default) = default.filter(|d| !(min..=max).contains(d)) {
        out.push(Diagnostic::warning(ErrorCode::E4005).with_message(format!(
            "Default value {default} of range {name} lies outside {}..{}",
            range.min_value, range.max_value
        )));
    }
    out
}

#[cfg(test)]
mod tests;
