//! Arity Probe
//!
//! A throwaway subject that tells us how many positional arguments a
//! specification passes to whatever it tests.

use std::cell::Cell;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::guarded;
use crate::catalog::Specification;
use crate::fault::{Fallible, Fault};
use crate::subject::{Args, Subject};

/// The specification never called its subject
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to find the number of arguments the answer must have{}", describe_cause(.cause))]
pub struct ArityDiscoveryFailure {
    pub specification: String,
    /// What the specification raised, if anything
    pub cause: Option<Fault>,
}

fn describe_cause(cause: &Option<Fault>) -> String {
    match cause {
        Some(fault) => format!(": {}", fault),
        None => ". Did you call the given function?".to_string(),
    }
}

/// Records the positional count of its first call, and whether any call used keywords
#[derive(Debug, Default)]
pub struct ArityProbe {
    seen: Cell<Option<usize>>,
    keywords: Cell<bool>,
}

impl ArityProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Option<usize> {
        self.seen.get()
    }

    pub fn saw_keywords(&self) -> bool {
        self.keywords.get()
    }
}

impl Subject for ArityProbe {
    fn call(&self, args: Args) -> Fallible {
        if self.seen.get().is_none() {
            self.seen.set(Some(args.len()));
        }
        if args.has_keywords() {
            self.keywords.set(true);
        }
        Ok(Value::Null)
    }
}

/// How a specification calls its subject, as seen by one probe run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallShape {
    /// Positional arguments of the first call
    pub arity: usize,
    /// Some call passed keyword arguments
    pub keywords: bool,
}

/// Number of positional arguments `spec` passes to its subject
pub fn discover_arity(spec: &Specification) -> Result<usize, ArityDiscoveryFailure> {
    discover_call_shape(spec).map(|shape| shape.arity)
}

/// Arity plus keyword usage, from a single run of `spec` against a probe
pub fn discover_call_shape(spec: &Specification) -> Result<CallShape, ArityDiscoveryFailure> {
    let probe = ArityProbe::new();
    let outcome = guarded(|| spec.check(&probe));

    match (probe.recorded(), outcome) {
        (Some(arity), _) => {
            debug!("Specification {} passes {} positional argument(s)", spec.name(), arity);
            Ok(CallShape {
                arity,
                keywords: probe.saw_keywords(),
            })
        }
        (None, outcome) => {
            let failure = ArityDiscoveryFailure {
                specification: spec.name().to_string(),
                cause: outcome.err(),
            };
            warn!("{}: {}", spec.name(), failure);
            Err(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::assertions::assert_true;
    use crate::fault::Outcome;
    use crate::unit::SourceFile;

    static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("probe.rs"));

    fn nullary(subject: &dyn Subject) -> Outcome {
        assert_true(&subject.call(args![])?)
    }

    fn unary(subject: &dyn Subject) -> Outcome {
        assert_true(&subject.call(args![1])?)
    }

    fn binary(subject: &dyn Subject) -> Outcome {
        assert_true(&subject.call(args![4, 2])?)?;
        assert_true(&subject.call(args![6, 3])?)
    }

    fn ternary(subject: &dyn Subject) -> Outcome {
        assert_true(&subject.call(args![1, 2, 3])?)
    }

    fn quaternary(subject: &dyn Subject) -> Outcome {
        assert_true(&subject.call(args![1, 2, 3, 4])?)
    }

    fn quinary(subject: &dyn Subject) -> Outcome {
        assert_true(&subject.call(args![1, 2, 3, 4, 5])?)
    }

    fn keyword_only(subject: &dyn Subject) -> Outcome {
        subject.call(args![10; divisor = 2])?;
        Ok(())
    }

    fn never_calls(_subject: &dyn Subject) -> Outcome {
        Ok(())
    }

    fn fails_before_calling(_subject: &dyn Subject) -> Outcome {
        Err(Fault::assertion("broken setup"))
    }

    fn panics_before_calling(_subject: &dyn Subject) -> Outcome {
        panic!("setup exploded")
    }

    crate::question! { static NULLARY = nullary in SOURCE; }
    crate::question! { static UNARY = unary in SOURCE; }
    crate::question! { static BINARY = binary in SOURCE; }
    crate::question! { static TERNARY = ternary in SOURCE; }
    crate::question! { static QUATERNARY = quaternary in SOURCE; }
    crate::question! { static QUINARY = quinary in SOURCE; }
    crate::question! { static KEYWORD_ONLY = keyword_only in SOURCE; }
    crate::question! { static NEVER_CALLS = never_calls in SOURCE; }
    crate::question! { static FAILS_BEFORE_CALLING = fails_before_calling in SOURCE; }
    crate::question! { static PANICS_BEFORE_CALLING = panics_before_calling in SOURCE; }

    #[test]
    fn test_discovers_arities_zero_to_five() {
        let specs = [&NULLARY, &UNARY, &BINARY, &TERNARY, &QUATERNARY, &QUINARY];
        for (expected, spec) in specs.into_iter().enumerate() {
            assert_eq!(discover_arity(spec).unwrap(), expected, "{}", spec.name());
        }
    }

    #[test]
    fn test_assertion_failure_after_probe_is_ignored() {
        // the probe returns null, so assert_true fails, but the count is already known
        assert_eq!(discover_arity(&BINARY).unwrap(), 2);
    }

    #[test]
    fn test_keywords_are_not_counted() {
        assert_eq!(discover_arity(&KEYWORD_ONLY).unwrap(), 1);
    }

    #[test]
    fn test_never_called_without_fault() {
        let failure = discover_arity(&NEVER_CALLS).unwrap_err();
        assert_eq!(failure.cause, None);
        assert!(failure.to_string().contains("Did you call the given function?"));
    }

    #[test]
    fn test_never_called_surfaces_fault() {
        let failure = discover_arity(&FAILS_BEFORE_CALLING).unwrap_err();
        assert_eq!(failure.cause, Some(Fault::assertion("broken setup")));
    }

    #[test]
    fn test_panic_is_contained() {
        let failure = discover_arity(&PANICS_BEFORE_CALLING).unwrap_err();
        assert_eq!(failure.cause, Some(Fault::Panicked("setup exploded".into())));
    }

    #[test]
    fn test_keyword_use_is_recorded() {
        let shape = discover_call_shape(&KEYWORD_ONLY).unwrap();
        assert_eq!(shape, CallShape { arity: 1, keywords: true });
        assert!(!discover_call_shape(&BINARY).unwrap().keywords);
    }

    #[test]
    fn test_probe_records_first_call_only() {
        let probe = ArityProbe::new();
        probe.call(args![1, 2]).unwrap();
        probe.call(args![1]).unwrap();
        assert_eq!(probe.recorded(), Some(2));
    }
}
