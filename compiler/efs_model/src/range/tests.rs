use pretty_assertions::assert_eq;

use super::*;

fn range(precision: Precision, min: &str, max: &str, default: Option<&str>) -> RangeDef {
    RangeDef {
        precision,
        min_value: min.to_string(),
        max_value: max.to_string(),
        default_value: default.map(str::to_string),
    }
}

fn messages(name: &str, range: &RangeDef) -> Vec<String> {
    check_range(name, range)
        .into_iter()
        .map(|d| d.message)
        .collect()
}

#[test]
fn test_valid_ranges() {
    assert!(check_range("R", &range(Precision::Integer, "-5", "10", Some("0"))).is_empty());
    assert!(check_range("R", &range(Precision::Double, "0.0", "1.5", None)).is_empty());
    assert!(check_range("R", &range(Precision::Double, "-1.0", "-0.5", None)).is_empty());
}

#[test]
fn test_integer_range_rejects_decimal_bound() {
    assert_eq!(
        messages("R", &range(Precision::Integer, "0.5", "10", None)),
        ["Invalid minimum value 0.5 for integer range: must be an integer"]
    );
}

#[test]
fn test_double_range_requires_decimal_part() {
    assert_eq!(
        messages("R", &range(Precision::Double, "0.0", "100", None)),
        ["Invalid maximum value 100 for double range: must have a decimal part"]
    );
}

#[test]
fn test_unparsable_bound() {
    let diagnostics = check_range("R", &range(Precision::Integer, "A", "10", Some("1 2")));
    let codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E4001, ErrorCode::E4001]);
    assert_eq!(
        diagnostics[0].message,
        "Cannot parse minimum value A of range R"
    );
    assert_eq!(
        diagnostics[1].message,
        "Cannot parse default value 1 2 of range R"
    );
}

#[test]
fn test_minimum_above_maximum() {
    assert_eq!(
        messages("R", &range(Precision::Integer, "10", "-10", None)),
        ["Minimum value 10 of range R exceeds its maximum value -10"]
    );
}

#[test]
fn test_integer_bounds_beyond_i64() {
    assert!(check_range(
        "R",
        &range(Precision::Integer, "-99999999999999999999", "99999999999999999999", None)
    )
    .is_empty());
}

#[test]
fn test_bounds_are_trimmed() {
    assert!(check_range("R", &range(Precision::Integer, " 1 ", "2", None)).is_empty());
}

#[test]
fn test_default_outside_bounds_is_a_warning() {
    let diagnostics = check_range("R", &range(Precision::Integer, "0", "10", Some("11")));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E4005);
    assert!(!diagnostics[0].is_error());
    assert_eq!(diagnostics[0].message, "Default value 11 of range R lies outside 0..10");
}
