//! Calendar questions

use serde_json::json;

use crate::assertions::{assert_equal, assert_raises};
use crate::fault::Outcome;
use crate::subject::Subject;
use crate::unit::SourceFile;
use crate::{args, question};

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("calendar.rs"));

/// Number of days from the first ISO date (YYYY-MM-DD) to the second,
/// negative when the second comes first. Leap years count.
fn days_between(func: &dyn Subject) -> Outcome {
    assert_equal(&func.call(args!["2024-01-01", "2024-03-01"])?, &json!(60))?;
    assert_equal(&func.call(args!["2023-01-01", "2023-03-01"])?, &json!(59))?;
    assert_equal(&func.call(args!["2023-12-31", "2024-01-01"])?, &json!(1))?;
    assert_equal(&func.call(args!["2024-03-01", "2024-01-01"])?, &json!(-60))?;
    assert_equal(&func.call(args!["1999-07-14", "1999-07-14"])?, &json!(0))?;
    assert_equal(&func.call(args!["1900-01-01", "2000-01-01"])?, &json!(36524))?;
    assert_raises(|| func.call(args!["2023-02-30", "2023-03-01"]))
}

question! { pub static DAYS_BETWEEN = days_between in SOURCE; }
