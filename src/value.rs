//! Value Helpers
//!
//! Arguments and results are plain JSON values. These helpers give them the
//! loose semantics catalog code expects: truthiness, numeric equality across
//! integer and float representations, and checked arithmetic.

use std::cmp::Ordering;

use serde_json::{Map, Number, Value};

use crate::fault::Fault;

/// Short type name used in fault messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Truthiness: empty containers, zero, null and false are falsy
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Equality that treats `4` and `4.0` as the same number, recursively
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(i), Some(j)) => i == j,
            _ => x.as_f64() == y.as_f64(),
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| loose_eq(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).map(|w| loose_eq(v, w)).unwrap_or(false))
        }
        _ => a == b,
    }
}

pub fn as_i64(value: &Value) -> Result<i64, Fault> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| {
            Fault::type_error(format!("expected an integer, got {}", n))
        }),
        Value::Bool(b) => Ok(*b as i64),
        other => Err(Fault::type_error(format!("expected an integer, got {}", type_name(other)))),
    }
}

pub fn as_f64(value: &Value) -> Result<f64, Fault> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Fault::type_error(format!("unsupported number {}", n))),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(Fault::type_error(format!("expected a number, got {}", type_name(other)))),
    }
}

pub fn as_str(value: &Value) -> Result<&str, Fault> {
    value
        .as_str()
        .ok_or_else(|| Fault::type_error(format!("expected a str, got {}", type_name(value))))
}

pub fn as_array(value: &Value) -> Result<&Vec<Value>, Fault> {
    value
        .as_array()
        .ok_or_else(|| Fault::type_error(format!("expected a list, got {}", type_name(value))))
}

pub fn as_object(value: &Value) -> Result<&Map<String, Value>, Fault> {
    value
        .as_object()
        .ok_or_else(|| Fault::type_error(format!("expected a dict, got {}", type_name(value))))
}

fn float(f: f64) -> Result<Value, Fault> {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| Fault::Value(format!("{} is not a finite number", f)))
}

/// Remainder with the sign of the divisor, over integers when both sides are
pub fn modulo(a: &Value, b: &Value) -> Result<Value, Fault> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if y == 0 {
            return Err(Fault::ZeroDivision("integer division or modulo by zero".into()));
        }
        let r = x.checked_rem(y).ok_or_else(|| Fault::Value("modulo overflow".into()))?;
        let r = if r != 0 && (r < 0) != (y < 0) { r + y } else { r };
        return Ok(Value::from(r));
    }
    let (x, y) = (as_f64(a)?, as_f64(b)?);
    if y == 0.0 {
        return Err(Fault::ZeroDivision("float modulo".into()));
    }
    let r = x % y;
    float(if r != 0.0 && (r < 0.0) != (y < 0.0) { r + y } else { r })
}

/// Membership: element of a list, substring of a str, key of a dict
pub fn contains(container: &Value, item: &Value) -> Result<bool, Fault> {
    match container {
        Value::Array(items) => Ok(items.iter().any(|v| loose_eq(v, item))),
        Value::String(s) => Ok(s.contains(as_str(item)?)),
        Value::Object(map) => Ok(item.as_str().map(|k| map.contains_key(k)).unwrap_or(false)),
        other => Err(Fault::type_error(format!(
            "argument of type '{}' is not iterable",
            type_name(other)
        ))),
    }
}

/// Elements of an iterable value; strings iterate over their characters
pub fn elements(value: &Value) -> Result<Vec<Value>, Fault> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        Value::String(s) => Ok(s.chars().map(|c| Value::String(c.to_string())).collect()),
        Value::Object(map) => Ok(map.keys().cloned().map(Value::String).collect()),
        other => Err(Fault::type_error(format!("'{}' object is not iterable", type_name(other)))),
    }
}

/// Ordering between two numbers, two strings or two lists of comparable values
pub fn compare(a: &Value, b: &Value) -> Result<Ordering, Fault> {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => as_f64(a)?
            .partial_cmp(&as_f64(b)?)
            .ok_or_else(|| Fault::Value("unordered numbers".into())),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y) {
                let ordering = compare(l, r)?;
                if ordering != Ordering::Equal {
                    return Ok(ordering);
                }
            }
            Ok(x.len().cmp(&y.len()))
        }
        _ => Err(Fault::type_error(format!(
            "'<' not supported between instances of '{}' and '{}'",
            type_name(a),
            type_name(b)
        ))),
    }
}

/// Text a value contributes when interpolated: strings unquoted, everything else as JSON
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Display form used in assertion messages
pub fn repr(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_elements_keep_insertion_order() {
        let keys = elements(&json!({"s": 1, "a": 2, "d": 3})).unwrap();
        assert_eq!(keys, vec![json!("s"), json!("a"), json!("d")]);
    }

    #[test]
    fn test_truthy() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(3)));
        assert!(truthy(&json!([0])));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!({})));
        assert!(!truthy(&Value::Null));
    }

    #[test]
    fn test_loose_eq_numbers() {
        assert!(loose_eq(&json!(4), &json!(4.0)));
        assert!(loose_eq(&json!([1, [2.0]]), &json!([1.0, [2]])));
        assert!(!loose_eq(&json!(4), &json!("4")));
        assert!(loose_eq(&json!({"a": 1}), &json!({"a": 1.0})));
    }

    #[test]
    fn test_modulo_sign_follows_divisor() {
        assert_eq!(modulo(&json!(-3), &json!(2)).unwrap(), json!(1));
        assert_eq!(modulo(&json!(7), &json!(-3)).unwrap(), json!(-2));
        assert_eq!(modulo(&json!(9), &json!(3)).unwrap(), json!(0));
        assert!(loose_eq(&modulo(&json!(3.0), &json!(2)).unwrap(), &json!(1)));
        assert!(matches!(modulo(&json!(1), &json!(0)), Err(Fault::ZeroDivision(_))));
    }

    #[test]
    fn test_contains() {
        assert!(contains(&json!([1, 2, 3]), &json!(2.0)).unwrap());
        assert!(contains(&json!("haystack"), &json!("st")).unwrap());
        assert!(!contains(&json!({"a": 1}), &json!("b")).unwrap());
        assert!(contains(&json!(5), &json!(5)).is_err());
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(&json!(1), &json!(2.5)).unwrap(), Ordering::Less);
        assert_eq!(compare(&json!("b"), &json!("a")).unwrap(), Ordering::Greater);
        assert_eq!(compare(&json!([1, "a"]), &json!([1, "a"])).unwrap(), Ordering::Equal);
        assert!(compare(&json!(1), &json!("1")).is_err());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&json!("x")), "x");
        assert_eq!(to_text(&json!(3)), "3");
        assert_eq!(to_text(&json!([1])), "[1]");
    }

    #[test]
    fn test_elements_of_string() {
        assert_eq!(elements(&json!("ab")).unwrap(), vec![json!("a"), json!("b")]);
    }
}
