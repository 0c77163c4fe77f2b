//! Set description parsing
//!
//! Tokens are validated in input order. Each token is checked for width
//! before its characters are inspected.

use super::{SetError, SetResult, SetSpec};
use crate::model::{BitVector, MAX_WIDTH};
use serde_json::Value;

/// Parse a `|`-separated set description such as `"00|10|11"`
pub fn parse_str(input: &str) -> SetResult<SetSpec> {
    let tokens: Vec<&str> = input.split('|').collect();

    let first = match tokens.first() {
        Some(first) if !first.is_empty() => *first,
        _ => return Err(SetError::EmptySet),
    };

    let width = first.chars().count();
    if width > MAX_WIDTH {
        return Err(SetError::WidthTooLarge {
            width,
            max: MAX_WIDTH,
        });
    }

    let mut elements = Vec::with_capacity(tokens.len());
    for token in &tokens {
        if token.chars().count() != width {
            return Err(SetError::WidthMismatch {
                element: token.to_string(),
                first: first.to_string(),
            });
        }
        elements.push(parse_token(token)?);
    }

    Ok(SetSpec::from_elements(width, elements))
}

/// Parse a dynamically-typed input; only JSON strings are supported
pub fn parse_value(value: &Value) -> SetResult<SetSpec> {
    match value {
        Value::String(s) => parse_str(s),
        other => Err(SetError::UnsupportedInputType(json_type_name(other).to_string())),
    }
}

fn parse_token(token: &str) -> SetResult<BitVector> {
    let bits = token
        .chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(SetError::InvalidCharacter(other)),
        })
        .collect::<SetResult<Vec<bool>>>()?;

    Ok(BitVector::from_bools(&bits))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn elements(input: &str) -> Vec<Vec<u8>> {
        parse_str(input)
            .unwrap()
            .elements()
            .iter()
            .map(|e| e.bits().to_vec())
            .collect()
    }

    #[test]
    fn test_one_variable_sets() {
        assert_eq!(elements("1"), vec![vec![1]]);
        assert_eq!(elements("0"), vec![vec![0]]);
        assert_eq!(elements("0|1"), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_two_variable_sets() {
        // equality
        assert_eq!(elements("00|11"), vec![vec![0, 0], vec![1, 1]]);
        // and
        assert_eq!(elements("11"), vec![vec![1, 1]]);
        // or
        assert_eq!(elements("01|10|11"), vec![vec![0, 1], vec![1, 0], vec![1, 1]]);
        // not equal
        assert_eq!(elements("01|10"), vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn test_three_variable_sets() {
        // xor(a, b)
        assert_eq!(
            elements("110|101|011"),
            vec![vec![1, 1, 0], vec![1, 0, 1], vec![0, 1, 1]]
        );
    }

    #[test]
    fn test_empty_set() {
        let err = parse_str("").unwrap_err();
        assert_eq!(err, SetError::EmptySet);
        assert_eq!(err.to_string(), "boolean set input cannot be empty");

        assert_eq!(parse_str("|01").unwrap_err(), SetError::EmptySet);
    }

    #[test]
    fn test_width_mismatch() {
        let err = parse_str("01|1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "boolean set requires all elements have the same number of bits: \
             element '1' doesn't match first element '01'"
        );

        // trailing separator yields an empty token
        assert!(matches!(
            parse_str("01|").unwrap_err(),
            SetError::WidthMismatch { .. }
        ));
    }

    #[test]
    fn test_invalid_character() {
        let err = parse_str("a").unwrap_err();
        assert_eq!(err, SetError::InvalidCharacter('a'));
        assert_eq!(err.to_string(), "boolean set element contains invalid character 'a'");
    }

    #[test]
    fn test_width_checked_before_characters() {
        assert!(matches!(
            parse_str("01|x").unwrap_err(),
            SetError::WidthMismatch { .. }
        ));
        assert_eq!(parse_str("01|0x").unwrap_err(), SetError::InvalidCharacter('x'));
    }

    #[test]
    fn test_unsupported_input_type() {
        let err = parse_value(&json!(123)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "boolean set currently does not support input type int"
        );

        assert_eq!(
            parse_value(&json!(["01"])).unwrap_err(),
            SetError::UnsupportedInputType("array".to_string())
        );
        assert!(parse_value(&json!("01|10")).is_ok());
    }

    #[test]
    fn test_width_too_large() {
        let wide = "0".repeat(MAX_WIDTH + 1);
        assert!(matches!(
            parse_str(&wide).unwrap_err(),
            SetError::WidthTooLarge { .. }
        ));
        assert!(parse_str(&"1".repeat(MAX_WIDTH)).is_ok());
    }
}
