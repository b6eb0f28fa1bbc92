//! Catalog Entries
//!
//! Specifications (questions) and candidates (answers) are `'static` values
//! declared next to the plain functions they wrap. Calling either one goes
//! through the tracer so call-graph disclosure sees it.

use std::fmt;

use serde_json::Value;

use crate::fault::{Fallible, Fault, Outcome};
use crate::introspect::tracer;
use crate::subject::{Args, Subject};
use crate::unit::CodeUnit;

/// Signature of a specification body
pub type SpecFn = fn(&dyn Subject) -> Outcome;

/// Signature of a candidate body after positional unpacking
pub type CandidateFn = fn(&[Value]) -> Fallible;

/// A behavioral contract: exercises a subject through assertions
pub struct Specification {
    unit: &'static CodeUnit,
    body: SpecFn,
}

impl Specification {
    pub const fn new(unit: &'static CodeUnit, body: SpecFn) -> Self {
        Self { unit, body }
    }

    pub fn name(&self) -> &'static str {
        self.unit.name()
    }

    pub fn unit(&self) -> &'static CodeUnit {
        self.unit
    }

    /// Documentation comment attached to the definition
    pub fn doc(&self) -> String {
        crate::introspect::doc_comment(self.unit)
    }

    /// Run the specification against a subject
    pub fn check(&self, subject: &dyn Subject) -> Outcome {
        tracer::enter(self.unit);
        (self.body)(subject)
    }
}

impl fmt::Debug for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification").field("name", &self.name()).finish()
    }
}

/// A callable offered as an implementation of one or more specifications
pub struct Candidate {
    unit: &'static CodeUnit,
    arity: usize,
    body: CandidateFn,
}

impl Candidate {
    pub const fn new(unit: &'static CodeUnit, arity: usize, body: CandidateFn) -> Self {
        Self { unit, arity, body }
    }

    pub fn name(&self) -> &'static str {
        self.unit.name()
    }

    pub fn unit(&self) -> &'static CodeUnit {
        self.unit
    }

    /// Declared positional parameter count
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invoke with positional arguments
    pub fn call(&self, args: &[Value]) -> Fallible {
        tracer::enter(self.unit);
        if args.len() != self.arity {
            return Err(Fault::arity(self.name(), self.arity, args.len()));
        }
        (self.body)(args)
    }
}

impl Subject for Candidate {
    fn call(&self, args: Args) -> Fallible {
        if let Some((key, _)) = args.keywords.first() {
            return Err(Fault::type_error(format!(
                "{}() got an unexpected keyword argument '{}'",
                self.name(),
                key
            )));
        }
        Candidate::call(self, &args.positional)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name())
            .field("arity", &self.arity)
            .finish()
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! count_params {
    ($($param:ident)*) => {
        <[&str]>::len(&[$(stringify!($param)),*])
    };
}

/// Declare a specification static wrapping a `fn(&dyn Subject) -> Outcome`.
///
/// The function's doc comment becomes the specification's documentation.
#[macro_export]
macro_rules! question {
    ($(#[$meta:meta])* $vis:vis static $name:ident = $func:ident in $source:path;) => {
        $(#[$meta])*
        $vis static $name: $crate::Specification = {
            static UNIT: $crate::CodeUnit =
                $crate::CodeUnit::new(stringify!($func), $crate::Origin::Specifications, &$source);
            $crate::Specification::new(&UNIT, $func)
        };
    };
}

/// Declare a candidate static wrapping a function of `&Value` parameters.
///
/// The parameter list fixes the declared arity.
#[macro_export]
macro_rules! answer {
    ($(#[$meta:meta])* $vis:vis static $name:ident = $func:ident($($param:ident),*) in $source:path;) => {
        $crate::answer! {
            $(#[$meta])* $vis static $name = $func($($param),*) in $source as $crate::Origin::BuildingBlocks;
        }
    };
    ($(#[$meta:meta])* $vis:vis static $name:ident = $func:ident($($param:ident),*) in $source:path as $origin:expr;) => {
        $(#[$meta])*
        $vis static $name: $crate::Candidate = {
            fn unpack(args: &[$crate::Value]) -> $crate::Fallible {
                match args {
                    [$($param),*] => $func($($param),*),
                    _ => Err($crate::Fault::arity(
                        stringify!($func),
                        $crate::count_params!($($param)*),
                        args.len(),
                    )),
                }
            }
            static UNIT: $crate::CodeUnit = $crate::CodeUnit::new(stringify!($func), $origin, &$source);
            $crate::Candidate::new(&UNIT, $crate::count_params!($($param)*), unpack)
        };
    };
}
