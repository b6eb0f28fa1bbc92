//! List questions

use serde_json::{json, Value};

use crate::assertions::{assert_deep_equal_iters, assert_equal, assert_equal_iters, assert_false, assert_true};
use crate::fault::Outcome;
use crate::subject::Subject;
use crate::unit::SourceFile;
use crate::{args, question};

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("list.rs"));

/// Swap/exchange/invert the rows and columns in a list of lists
/// (nested list, 2D list/array, two dimensional list, table, matrix).
fn transpose(func: &dyn Subject) -> Outcome {
    assert_deep_equal_iters(
        &func.call(args![[[1, 2],
                          [3, 4]]])?,
        &json!([[1, 3],
                [2, 4]]),
    )?;

    assert_deep_equal_iters(
        &func.call(args![[[1, 2, 3],
                          [4, 5, 6],
                          [7, 8, 9]]])?,
        &json!([[1, 4, 7],
                [2, 5, 8],
                [3, 6, 9]]),
    )?;

    // Doesn't have to be a square
    assert_deep_equal_iters(
        &func.call(args![[[1, 2, 3],
                          [4, 5, 6]]])?,
        &json!([[1, 4],
                [2, 5],
                [3, 6]]),
    )?;

    // 200 rows, 100 columns
    let rows: Vec<Vec<u32>> = (0..200).map(|_| (0..100).collect()).collect();
    let columns: Vec<Vec<u32>> = (0..100).map(|i| vec![i; 200]).collect();
    assert_deep_equal_iters(&func.call(args![rows])?, &json!(columns))
}

/// Flatten (merge) a list of lists (nested list) into a single list.
/// Only perform a shallow merge; sublists may be different lengths.
fn flatten_2d_list(func: &dyn Subject) -> Outcome {
    assert_equal_iters(&func.call(args![[[1]]])?, &json!([1]))?;
    assert_equal_iters(&func.call(args![[[1, 2], [3, 4]]])?, &json!([1, 2, 3, 4]))?;
    assert_equal_iters(&func.call(args![json!([[0], [1, 2], [3, 4, 5]])])?, &json!([0, 1, 2, 3, 4, 5]))?;
    assert_equal_iters(&func.call(args![json!([])])?, &json!([]))?;

    let singletons: Vec<[u32; 1]> = (0..10000).map(|i| [i]).collect();
    let expected: Vec<u32> = (0..10000).collect();
    assert_equal_iters(&func.call(args![singletons])?, &json!(expected))?;

    // [[0], [1, 2], [3, 4, 5], ..., [..., count - 1]]
    let mut before = Vec::new();
    let mut count = 0u32;
    for i in 1..100 {
        before.push((count..count + i).collect::<Vec<_>>());
        count += i;
    }
    let expected: Vec<u32> = (0..count).collect();
    assert_equal_iters(&func.call(args![before])?, &json!(expected))
}

/// Flatten a 2D list into an actual list, with exactly the same elements and types.
fn flatten_2d_list_to_list(func: &dyn Subject) -> Outcome {
    FLATTEN_2D_LIST.check(func)?;
    assert_equal(&func.call(args![[[1, 2], [3, 4]]])?, &json!([1, 2, 3, 4]))
}

/// Returns true if the first container holds every element of the second
/// (is superset, includes all items, contains all elements).
fn contains_all(func: &dyn Subject) -> Outcome {
    assert_true(&func.call(args![[1, 2, 3], [1, 2]])?)?;
    assert_false(&func.call(args![[1, 2, 3], [2, 4]])?)?;
    assert_true(&func.call(args!["hello", "leh"])?)?;
    assert_false(&func.call(args!["hello", "hex"])?)?;
    assert_true(&func.call(args![[1, 2], Value::Array(vec![])])?)?;
    assert_false(&func.call(args![Value::Array(vec![]), [1]])?)
}

/// Returns true if every element of the first collection is in the second
/// (is subset, all items are included in).
fn is_subset_of(func: &dyn Subject) -> Outcome {
    assert_true(&func.call(args![[1, 2], [1, 2, 3]])?)?;
    assert_false(&func.call(args![[2, 4], [1, 2, 3]])?)?;
    assert_true(&func.call(args![Value::Array(vec![]), [1]])?)?;
    assert_false(&func.call(args![[1], Value::Array(vec![])])?)
}

question! { pub static TRANSPOSE = transpose in SOURCE; }
question! { pub static FLATTEN_2D_LIST = flatten_2d_list in SOURCE; }
question! { pub static FLATTEN_2D_LIST_TO_LIST = flatten_2d_list_to_list in SOURCE; }
question! { pub static CONTAINS_ALL = contains_all in SOURCE; }
question! { pub static IS_SUBSET_OF = is_subset_of in SOURCE; }
