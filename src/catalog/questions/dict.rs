//! Dictionary questions

use serde_json::{json, Map, Value};

use crate::assertions::{assert_equal, assert_equal_iters};
use crate::fault::Outcome;
use crate::subject::Subject;
use crate::unit::SourceFile;
use crate::{args, question};

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("dict.rs"));

/// Every two-letter lowercase string, "aa" to "zz", in sorted order
fn letter_pairs() -> Vec<String> {
    let letters = || ('a'..='z').map(String::from);
    letters()
        .flat_map(|first| letters().map(move |second| format!("{}{}", first, second)))
        .collect()
}

/// Return the items of a dict as a list of [key, value] pairs sorted by key.
fn sort_dict_items_by_key(func: &dyn Subject) -> Outcome {
    assert_equal(
        &func.call(args![json!({"a": 0, "s": 1, "d": 2, "f": 3})])?,
        &json!([["a", 0], ["d", 2], ["f", 3], ["s", 1]]),
    )?;

    let pairs = letter_pairs();
    let original: Map<String, Value> = pairs
        .iter()
        .rev()
        .enumerate()
        .map(|(i, key)| (key.clone(), json!(i)))
        .collect();
    let keys: Vec<Value> = match func.call(args![original])? {
        Value::Array(items) => items.into_iter().map(|item| item[0].clone()).collect(),
        other => vec![other],
    };
    assert_equal_iters(&json!(keys), &json!(pairs))
}

/// Return the items of a dict as a list of [key, value] pairs sorted by value.
fn sort_dict_items_by_value(func: &dyn Subject) -> Outcome {
    assert_equal(
        &func.call(args![json!({"0": "d", "1": "c", "2": "b", "3": "a"})])?,
        &json!([["3", "a"], ["2", "b"], ["1", "c"], ["0", "d"]]),
    )?;
    assert_equal(
        &func.call(args![json!({"x": 3, "y": 1, "z": 2.5})])?,
        &json!([["y", 1], ["z", 2.5], ["x", 3]]),
    )?;

    let pairs = letter_pairs();
    let original: Map<String, Value> = pairs
        .iter()
        .rev()
        .enumerate()
        .map(|(i, value)| (format!("key{:03}", i), json!(value)))
        .collect();
    let values: Vec<Value> = match func.call(args![original])? {
        Value::Array(items) => items.into_iter().map(|item| item[1].clone()).collect(),
        other => vec![other],
    };
    assert_equal_iters(&json!(values), &json!(pairs))
}

/// Group the integers of a list into a dict keyed by "even" and "odd",
/// keeping their original order within each group.
fn group_by_parity(func: &dyn Subject) -> Outcome {
    assert_equal(
        &func.call(args![[-1, 0, 1, 3, 6, 8, 9, 2]])?,
        &json!({"even": [0, 6, 8, 2], "odd": [-1, 1, 3, 9]}),
    )?;
    assert_equal(&func.call(args![[2, 4]])?, &json!({"even": [2, 4]}))?;
    assert_equal(&func.call(args![Value::Array(vec![])])?, &json!({}))
}

question! { pub static SORT_DICT_ITEMS_BY_KEY = sort_dict_items_by_key in SOURCE; }
question! { pub static SORT_DICT_ITEMS_BY_VALUE = sort_dict_items_by_value in SOURCE; }
question! { pub static GROUP_BY_PARITY = group_by_parity in SOURCE; }
