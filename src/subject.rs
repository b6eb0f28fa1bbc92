//! Subject Module
//!
//! The calling convention between a specification and the thing it tests.

use serde_json::Value;

use crate::fault::Fallible;

/// Arguments of one call: positional values plus keyword pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub positional: Vec<Value>,
    pub keywords: Vec<(String, Value)>,
}

impl Args {
    pub fn positional(values: Vec<Value>) -> Self {
        Self {
            positional: values,
            keywords: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Args::positional(values)
    }
}

/// Anything a specification can exercise
pub trait Subject {
    fn call(&self, args: Args) -> Fallible;
}

impl<F> Subject for F
where
    F: Fn(Args) -> Fallible,
{
    fn call(&self, args: Args) -> Fallible {
        self(args)
    }
}

/// Build [`Args`] from serializable positional values and optional keywords.
///
/// ```
/// use funcfinder::args;
/// let plain = args![4, 2];
/// assert_eq!(plain.len(), 2);
/// let keyed = args![4; by = 2];
/// assert!(keyed.has_keywords());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::default()
    };
    ($($value:expr),* ; $($key:ident = $kw:expr),+ $(,)?) => {
        $crate::Args {
            positional: vec![$(::serde_json::json!($value)),*],
            keywords: vec![$((stringify!($key).to_string(), ::serde_json::json!($kw))),+],
        }
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::positional(vec![$(::serde_json::json!($value)),+])
    };
}
