//! Permutation Trial
//!
//! A candidate dressed up as a subject: arguments arrive in the order the
//! specification uses and leave in the order the candidate declares.

use std::cell::Cell;
use std::fmt;

use super::permutation::Permutation;
use crate::catalog::Candidate;
use crate::fault::{Fallible, Fault};
use crate::subject::{Args, Subject};

/// One candidate paired with one argument permutation
pub struct Trial {
    candidate: &'static Candidate,
    permutation: Permutation,
    violation: Cell<Option<Fault>>,
}

impl Trial {
    pub fn new(candidate: &'static Candidate, permutation: Permutation) -> Self {
        Self {
            candidate,
            permutation,
            violation: Cell::new(None),
        }
    }

    /// The candidate called as declared
    pub fn identity(candidate: &'static Candidate) -> Self {
        Self::new(candidate, Permutation::identity(candidate.arity()))
    }

    pub fn candidate(&self) -> &'static Candidate {
        self.candidate
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// First calling-convention violation this trial rejected, if any.
    ///
    /// Latched so a specification that swallows the fault cannot hide it.
    pub fn violation(&self) -> Option<Fault> {
        let fault = self.violation.take();
        self.violation.set(fault.clone());
        fault
    }

    fn reject(&self, fault: Fault) -> Fallible {
        let first = self.violation.take().unwrap_or_else(|| fault.clone());
        self.violation.set(Some(first));
        Err(fault)
    }
}

impl Subject for Trial {
    fn call(&self, args: Args) -> Fallible {
        if args.has_keywords() {
            return self.reject(Fault::ForbiddenKwargs);
        }
        if args.len() != self.permutation.len() {
            return self.reject(Fault::WrongArgCount {
                expected: self.permutation.len(),
                got: args.len(),
            });
        }
        let reordered = self.permutation.apply(&args.positional);
        self.candidate.call(&reordered)
    }
}

impl fmt::Display for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.permutation.is_identity() {
            write!(f, "{}", self.candidate.name())
        } else {
            write!(f, "{}{}", self.candidate.name(), self.permutation)
        }
    }
}

impl fmt::Debug for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trial")
            .field("candidate", &self.candidate.name())
            .field("permutation", &self.permutation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::unit::{Origin, SourceFile};
    use crate::value::as_i64;
    use serde_json::{json, Value};

    static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("trial.rs"));

    fn minus(a: &Value, b: &Value) -> Fallible {
        Ok(json!(as_i64(a)? - as_i64(b)?))
    }

    crate::answer! { static MINUS = minus(a, b) in SOURCE as Origin::Other; }

    #[test]
    fn test_identity_passes_through() {
        let trial = Trial::identity(&MINUS);
        assert_eq!(trial.call(args![10, 3]).unwrap(), json!(7));
        assert_eq!(trial.violation(), None);
    }

    #[test]
    fn test_swapped_reorders() {
        let trial = Trial::new(&MINUS, Permutation::new(vec![1, 0]).unwrap());
        assert_eq!(trial.call(args![10, 3]).unwrap(), json!(-7));
        assert_eq!(trial.to_string(), "minus(1, 0)");
    }

    #[test]
    fn test_keywords_rejected_and_latched() {
        let trial = Trial::identity(&MINUS);
        assert_eq!(trial.call(args![10; b = 3]).unwrap_err(), Fault::ForbiddenKwargs);
        // a later violation does not replace the first one
        let _ = trial.call(args![1, 2, 3]);
        assert_eq!(trial.violation(), Some(Fault::ForbiddenKwargs));
    }

    #[test]
    fn test_wrong_count_rejected() {
        let trial = Trial::identity(&MINUS);
        let fault = trial.call(args![1, 2, 3]).unwrap_err();
        assert_eq!(fault, Fault::WrongArgCount { expected: 2, got: 3 });
        assert!(trial.violation().is_some());
    }

    #[test]
    fn test_candidate_fault_propagates_unchanged() {
        let trial = Trial::identity(&MINUS);
        let fault = trial.call(args!["x", 1]).unwrap_err();
        assert!(matches!(fault, Fault::Type(_)));
        assert_eq!(trial.violation(), None);
    }
}
