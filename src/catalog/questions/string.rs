//! String questions

use serde_json::{json, Value};

use crate::assertions::assert_equal;
use crate::fault::Outcome;
use crate::subject::Subject;
use crate::unit::SourceFile;
use crate::{args, question};

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("string.rs"));

/// Given a format string with `{}` placeholders and a list of arguments, format the string
/// but output an empty string for arguments that are null instead of the string 'null'.
fn format_without_nones(func: &dyn Subject) -> Outcome {
    assert_equal(
        &func.call(args!["{}a{}b{}c{}", json!([1, null, 2, null])])?,
        &json!("1ab2c"),
    )?;
    assert_equal(&func.call(args!["{} and {}", ["x", "y"]])?, &json!("x and y"))?;
    assert_equal(&func.call(args!["no placeholders", Value::Array(vec![])])?, &json!("no placeholders"))
}

question! { pub static FORMAT_WITHOUT_NONES = format_without_nones in SOURCE; }
