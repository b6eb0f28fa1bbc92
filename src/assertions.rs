//! Assertion Library
//!
//! Predicate checks for specification bodies. Each returns
//! `Err(Fault::Assertion)` when its condition does not hold, so a
//! specification reads as a sequence of `?`-terminated assertions.

use serde_json::Value;

use crate::fault::{Fault, Outcome};
use crate::value::{self, loose_eq, repr, truthy};

const PLACES: i32 = 7;

fn check(condition: bool, message: impl FnOnce() -> String) -> Outcome {
    if condition {
        Ok(())
    } else {
        Err(Fault::assertion(message()))
    }
}

pub fn assert_true(value: &Value) -> Outcome {
    check(truthy(value), || format!("{} is not true", repr(value)))
}

pub fn assert_false(value: &Value) -> Outcome {
    check(!truthy(value), || format!("{} is not false", repr(value)))
}

pub fn assert_equal(actual: &Value, expected: &Value) -> Outcome {
    check(loose_eq(actual, expected), || {
        format!("{} != {}", repr(actual), repr(expected))
    })
}

pub fn assert_not_equal(actual: &Value, unexpected: &Value) -> Outcome {
    check(!loose_eq(actual, unexpected), || {
        format!("{} == {}", repr(actual), repr(unexpected))
    })
}

pub fn assert_is_none(value: &Value) -> Outcome {
    check(value.is_null(), || format!("{} is not null", repr(value)))
}

pub fn assert_is_not_none(value: &Value) -> Outcome {
    check(!value.is_null(), || "unexpectedly null".to_string())
}

pub fn assert_in(item: &Value, container: &Value) -> Outcome {
    let found = value::contains(container, item)?;
    check(found, || format!("{} not found in {}", repr(item), repr(container)))
}

pub fn assert_not_in(item: &Value, container: &Value) -> Outcome {
    let found = value::contains(container, item)?;
    check(!found, || format!("{} unexpectedly found in {}", repr(item), repr(container)))
}

/// Value type check by short name: `"int"`, `"float"`, `"str"`, `"list"`, `"dict"`, `"bool"`, `"null"`
pub fn assert_type(value: &Value, expected: &str) -> Outcome {
    let actual = value::type_name(value);
    let matches = actual == expected || (expected == "number" && value.is_number());
    check(matches, || format!("{} is a {}, not a {}", repr(value), actual, expected))
}

fn rounded_difference(a: &Value, b: &Value) -> Result<f64, Fault> {
    let scale = 10f64.powi(PLACES);
    Ok(((value::as_f64(a)? - value::as_f64(b)?) * scale).round() / scale)
}

/// Equal after rounding the difference to seven decimal places
pub fn assert_almost_equal(a: &Value, b: &Value) -> Outcome {
    let difference = rounded_difference(a, b)?;
    check(difference == 0.0, || {
        format!("{} != {} within {} places", repr(a), repr(b), PLACES)
    })
}

pub fn assert_not_almost_equal(a: &Value, b: &Value) -> Outcome {
    let difference = rounded_difference(a, b)?;
    check(difference != 0.0, || {
        format!("{} == {} within {} places", repr(a), repr(b), PLACES)
    })
}

/// Shallow element-wise equality of two iterables, whatever their container type.
///
/// A string and the list of its characters compare equal; so do a dict and
/// the list of its keys. Lengths must agree.
pub fn assert_equal_iters(a: &Value, b: &Value) -> Outcome {
    let (left, right) = (value::elements(a)?, value::elements(b)?);
    check(
        left.len() == right.len() && left.iter().zip(&right).all(|(l, r)| loose_eq(l, r)),
        || format!("iterables differ: {} != {}", repr(a), repr(b)),
    )
}

/// Like [`assert_equal_iters`], recursively, regardless of nesting structure
pub fn assert_deep_equal_iters(a: &Value, b: &Value) -> Outcome {
    deep_equal(a, b).map_err(|detail| {
        Fault::assertion(format!("nested iterables differ ({}): {} != {}", detail, repr(a), repr(b)))
    })
}

fn deep_equal(a: &Value, b: &Value) -> Result<(), String> {
    let iterable = |v: &Value| match v {
        Value::Array(_) | Value::Object(_) => true,
        Value::String(s) => s.chars().count() != 1,
        _ => false,
    };
    if !iterable(a) {
        return if loose_eq(a, b) {
            Ok(())
        } else {
            Err(format!("{} != {}", repr(a), repr(b)))
        };
    }
    let left = value::elements(a).map_err(|e| e.to_string())?;
    let right = value::elements(b).map_err(|e| e.to_string())?;
    if left.len() != right.len() {
        return Err(format!("lengths {} and {}", left.len(), right.len()));
    }
    left.iter().zip(&right).try_for_each(|(l, r)| deep_equal(l, r))
}

/// Fail unless `run` returns a fault
pub fn assert_raises<T>(run: impl FnOnce() -> Result<T, Fault>) -> Outcome {
    match run() {
        Err(_) => Ok(()),
        Ok(_) => Err(Fault::assertion("no fault was raised")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truth_assertions() {
        assert!(assert_true(&json!(1)).is_ok());
        assert!(assert_true(&json!([])).is_err());
        assert!(assert_false(&Value::Null).is_ok());
        assert_eq!(
            assert_false(&json!(true)).unwrap_err(),
            Fault::assertion("true is not false")
        );
    }

    #[test]
    fn test_equality_is_numeric() {
        assert!(assert_equal(&json!(4.0), &json!(4)).is_ok());
        assert!(assert_not_equal(&json!(4), &json!("4")).is_ok());
        assert!(assert_equal(&json!([1, 2]), &json!([2, 1])).is_err());
    }

    #[test]
    fn test_membership() {
        assert!(assert_in(&json!(2), &json!([1, 2, 3])).is_ok());
        assert!(assert_in(&json!("ell"), &json!("hello")).is_ok());
        assert!(assert_not_in(&json!("z"), &json!({"a": 1})).is_ok());
        assert!(matches!(assert_in(&json!(1), &json!(5)), Err(Fault::Type(_))));
    }

    #[test]
    fn test_almost_equal() {
        assert!(assert_almost_equal(&json!(0.1 + 0.2), &json!(0.3)).is_ok());
        assert!(assert_not_almost_equal(&json!(0.3001), &json!(0.3)).is_ok());
        assert!(assert_almost_equal(&json!(1), &json!(1.1)).is_err());
    }

    #[test]
    fn test_equal_iters_ignores_container_kind() {
        assert!(assert_equal_iters(&json!("ab"), &json!(["a", "b"])).is_ok());
        assert!(assert_equal_iters(&json!([1, 2]), &json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_deep_equal_iters() {
        let a = json!(["ab", "cd", 1, [[[2]]]]);
        let b = json!([["a", "b"], "cd", 1.0, [[[2]]]]);
        assert!(assert_deep_equal_iters(&a, &b).is_ok());
        assert!(assert_deep_equal_iters(&json!([[1, 2]]), &json!([[1, 3]])).is_err());
        assert!(assert_deep_equal_iters(&json!([[1]]), &json!([[1], [2]])).is_err());
    }

    #[test]
    fn test_raises() {
        assert!(assert_raises(|| Err::<(), _>(Fault::type_error("bad"))).is_ok());
        assert!(assert_raises(|| Ok::<_, Fault>(json!(1))).is_err());
    }

    #[test]
    fn test_type() {
        assert!(assert_type(&json!(1), "int").is_ok());
        assert!(assert_type(&json!(1.5), "number").is_ok());
        assert!(assert_type(&json!("x"), "list").is_err());
    }
}
