//! Matching Engine
//!
//! Arity discovery, argument permutations and the candidate search that
//! ties them together.

use std::panic::{self, AssertUnwindSafe};

use crate::fault::{Fault, Outcome};

pub mod matcher;
pub mod permutation;
pub mod probe;
pub mod trial;

pub use matcher::{Match, MatchError, Matcher};
pub use permutation::{Permutation, Permutations};
pub use probe::{discover_arity, discover_call_shape, ArityDiscoveryFailure, ArityProbe, CallShape};
pub use trial::Trial;

/// Run a specification body, turning a panic into a fault
pub(crate) fn guarded<F>(run: F) -> Outcome
where
    F: FnOnce() -> Outcome,
{
    panic::catch_unwind(AssertUnwindSafe(run)).unwrap_or_else(|payload| Err(Fault::from_panic(payload)))
}
