//! Arithmetic questions

use serde_json::json;

use crate::assertions::{assert_equal, assert_false, assert_true};
use crate::fault::Outcome;
use crate::subject::Subject;
use crate::unit::SourceFile;
use crate::{args, question};

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("math.rs"));

/// Returns true if the first number is divisible by the second, otherwise false.
fn is_divisible_by(func: &dyn Subject) -> Outcome {
    assert_true(&func.call(args![4, 2])?)?;
    assert_true(&func.call(args![6, 2])?)?;
    assert_true(&func.call(args![6, 3])?)?;
    assert_true(&func.call(args![9, 3])?)?;
    assert_false(&func.call(args![4, 3])?)?;
    assert_false(&func.call(args![9, 2])?)?;

    for x in 0..20 {
        assert_true(&func.call(args![x, 1])?)?;
    }
    for x in 1..7 {
        assert_true(&func.call(args![120, x])?)?;
    }
    assert_false(&func.call(args![120, 7])?)
}

/// Returns true if the number is even, otherwise false.
fn is_even(func: &dyn Subject) -> Outcome {
    assert_true(&func.call(args![2])?)?;
    assert_false(&func.call(args![3])?)?;
    assert_true(&func.call(args![4])?)?;

    assert_true(&func.call(args![2.0])?)?;
    assert_false(&func.call(args![3.0])?)?;
    assert_true(&func.call(args![4.0])?)?;

    let mut even = true;
    for i in -100..100 {
        assert_equal(&func.call(args![i])?, &json!(even))?;
        even = !even;
    }
    Ok(())
}

/// Greatest common divisor (highest common factor) of two integers.
/// The gcd of zero and n is n.
fn greatest_common_divisor(func: &dyn Subject) -> Outcome {
    assert_equal(&func.call(args![12, 18])?, &json!(6))?;
    assert_equal(&func.call(args![18, 12])?, &json!(6))?;
    assert_equal(&func.call(args![17, 5])?, &json!(1))?;
    assert_equal(&func.call(args![0, 5])?, &json!(5))?;
    assert_equal(&func.call(args![7, 0])?, &json!(7))?;
    assert_equal(&func.call(args![1071, 462])?, &json!(21))
}

/// Least common multiple (lowest common denominator) of two integers.
/// Zero if either integer is zero.
fn least_common_multiple(func: &dyn Subject) -> Outcome {
    assert_equal(&func.call(args![4, 6])?, &json!(12))?;
    assert_equal(&func.call(args![3, 5])?, &json!(15))?;
    assert_equal(&func.call(args![21, 6])?, &json!(42))?;
    assert_equal(&func.call(args![0, 5])?, &json!(0))
}

question! { pub static IS_DIVISIBLE_BY = is_divisible_by in SOURCE; }
question! { pub static IS_EVEN = is_even in SOURCE; }
question! { pub static GREATEST_COMMON_DIVISOR = greatest_common_divisor in SOURCE; }
question! { pub static LEAST_COMMON_MULTIPLE = least_common_multiple in SOURCE; }
