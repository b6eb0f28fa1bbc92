//! String answers

use regex::{Captures, Regex};
use serde_json::{json, Value};

use crate::catalog::questions::string as q;
use crate::catalog::{Catalog, CatalogError};
use crate::fault::{Fallible, Fault};
use crate::unit::SourceFile;
use crate::value::{as_array, as_str, to_text};
use crate::answer;

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("string.rs"));

fn format_without_nones(format_string: &Value, args: &Value) -> Fallible {
    let mut args = as_array(args)?.iter();
    let mut pieces = as_str(format_string)?.split("{}");
    let mut formatted = pieces.next().unwrap_or_default().to_string();
    for piece in pieces {
        match args.next() {
            Some(Value::Null) => {}
            Some(arg) => formatted.push_str(&to_text(arg)),
            None => return Err(Fault::Value("Replacement index out of range".into())),
        }
        formatted.push_str(piece);
    }
    Ok(json!(formatted))
}

fn format_without_nones_using_regex(format_string: &Value, args: &Value) -> Fallible {
    let placeholder = Regex::new(r"\{\}").map_err(|e| Fault::Value(e.to_string()))?;
    let mut args = as_array(args)?.iter();
    let mut exhausted = false;
    let formatted = placeholder.replace_all(as_str(format_string)?, |_: &Captures| match args.next() {
        Some(Value::Null) => String::new(),
        Some(arg) => to_text(arg),
        None => {
            exhausted = true;
            String::new()
        }
    });
    if exhausted {
        return Err(Fault::Value("Replacement index out of range".into()));
    }
    Ok(json!(formatted))
}

answer! { pub static FORMAT_WITHOUT_NONES = format_without_nones(format_string, args) in SOURCE; }
answer! {
    pub static FORMAT_WITHOUT_NONES_USING_REGEX =
        format_without_nones_using_regex(format_string, args) in SOURCE;
}

pub fn register(catalog: &mut Catalog) -> Result<(), CatalogError> {
    catalog.add_answer(&FORMAT_WITHOUT_NONES, &[&q::FORMAT_WITHOUT_NONES])?;
    catalog.add_answer(&FORMAT_WITHOUT_NONES_USING_REGEX, &[&q::FORMAT_WITHOUT_NONES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Candidate;

    #[test]
    fn test_answers_pass_their_questions() {
        assert!(q::FORMAT_WITHOUT_NONES.check(&FORMAT_WITHOUT_NONES).is_ok());
        assert!(q::FORMAT_WITHOUT_NONES.check(&FORMAT_WITHOUT_NONES_USING_REGEX).is_ok());
    }

    #[test]
    fn test_too_few_arguments() {
        let call = |answer: &Candidate| answer.call(&[json!("{} {}"), json!([1])]);
        assert!(matches!(call(&FORMAT_WITHOUT_NONES), Err(Fault::Value(_))));
        assert!(matches!(call(&FORMAT_WITHOUT_NONES_USING_REGEX), Err(Fault::Value(_))));
    }
}
