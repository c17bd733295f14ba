//! Conversions from stored raw values to the types the accessors hand out.

use serde_json::Value;

use crate::constants::{FALSE_LITERALS, TRUE_LITERALS};
use crate::num::format_number;
use crate::{Error, Result};

pub fn parse_bool(input: &str) -> Result<bool> {
    if TRUE_LITERALS
        .iter()
        .any(|literal| literal.eq_ignore_ascii_case(input))
    {
        return Ok(true);
    }
    if FALSE_LITERALS
        .iter()
        .any(|literal| literal.eq_ignore_ascii_case(input))
    {
        return Ok(false);
    }
    Err(Error::conversion(input, "bool"))
}

pub fn parse_int(input: &str) -> Result<i32> {
    input
        .parse::<i32>()
        .map_err(|_| Error::conversion(input, "int"))
}

pub fn parse_int64(input: &str) -> Result<i64> {
    input
        .parse::<i64>()
        .map_err(|_| Error::conversion(input, "int64"))
}

pub fn parse_float(input: &str) -> Result<f64> {
    input
        .parse::<f64>()
        .map_err(|_| Error::conversion(input, "float"))
}

pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => format_number(number),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub fn value_to_bool(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => parse_bool(text),
        Value::Number(number) => match number.as_f64() {
            Some(v) if v == 1.0 => Ok(true),
            Some(v) if v == 0.0 => Ok(false),
            _ => Err(Error::conversion(format_number(number), "bool")),
        },
        other => Err(Error::conversion(value_to_string(other), "bool")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    #[rstest::rstest]
    #[case("1")]
    #[case("t")]
    #[case("T")]
    #[case("true")]
    #[case("TRUE")]
    #[case("True")]
    #[case("yes")]
    #[case("Y")]
    #[case("on")]
    #[case("ON")]
    fn true_family(#[case] literal: &str) {
        assert!(parse_bool(literal).unwrap());
    }

    #[rstest::rstest]
    #[case("0")]
    #[case("f")]
    #[case("F")]
    #[case("false")]
    #[case("FALSE")]
    #[case("no")]
    #[case("N")]
    #[case("off")]
    #[case("Off")]
    fn false_family(#[case] literal: &str) {
        assert!(!parse_bool(literal).unwrap());
    }

    #[rstest::rstest]
    #[case("maybe")]
    #[case("")]
    #[case("2")]
    #[case(" true")]
    fn rejects_other_literals(#[case] literal: &str) {
        let err = parse_bool(literal).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
    }

    #[rstest::rstest]
    fn numeric_parsers_report_literal() {
        assert_eq!(parse_int("+5").unwrap(), 5);
        assert_eq!(parse_int64("-9000000000").unwrap(), -9_000_000_000);
        assert_eq!(parse_float("3.1415").unwrap(), 3.1415);
        let err = parse_int("").unwrap_err();
        assert!(matches!(err, Error::Conversion { ref literal, target: "int" } if literal.is_empty()));
        assert!(parse_int("9000000000").is_err());
        assert!(parse_float("abc").is_err());
    }

    #[rstest::rstest]
    #[case(json!(null), "")]
    #[case(json!(true), "true")]
    #[case(json!(8080), "8080")]
    #[case(json!(0.25), "0.25")]
    #[case(json!("text"), "text")]
    #[case(json!([1, "a"]), "[1,\"a\"]")]
    #[case(json!({"a": 1}), "{\"a\":1}")]
    fn stringifies_values(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value_to_string(&value), expected);
    }

    #[rstest::rstest]
    fn bools_from_values() {
        assert!(value_to_bool(&json!(true)).unwrap());
        assert!(value_to_bool(&json!("on")).unwrap());
        assert!(value_to_bool(&json!(1)).unwrap());
        assert!(!value_to_bool(&json!(0)).unwrap());
        assert!(value_to_bool(&json!(2)).is_err());
        assert!(value_to_bool(&json!(null)).is_err());
    }
}
