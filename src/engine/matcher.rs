//! Matching Engine
//!
//! Brute-force search over candidates and argument orders. The first
//! permutation that satisfies the specification wins for each candidate.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::permutation::Permutation;
use super::probe::{discover_call_shape, ArityDiscoveryFailure};
use super::trial::Trial;
use super::guarded;
use crate::catalog::{Candidate, Catalog, Specification};
use crate::fault::Fault;

/// Why a search stopped without results
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error(transparent)]
    ArityDiscovery(#[from] ArityDiscoveryFailure),

    #[error("You cannot ask for a function with keyword arguments.")]
    ForbiddenKwargs,

    #[error("The function you ask for must always have the same number of arguments.")]
    WrongArgCount,
}

impl MatchError {
    fn from_violation(fault: &Fault) -> Option<Self> {
        match fault {
            Fault::ForbiddenKwargs => Some(MatchError::ForbiddenKwargs),
            Fault::WrongArgCount { .. } => Some(MatchError::WrongArgCount),
            _ => None,
        }
    }
}

/// A candidate together with the argument order that satisfied the specification
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    #[serde(serialize_with = "serialize_candidate")]
    pub candidate: &'static Candidate,
    pub permutation: Permutation,
}

fn serialize_candidate<S: serde::Serializer>(
    candidate: &&'static Candidate,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(candidate.name())
}

impl Match {
    /// A fresh trial reproducing this match
    pub fn trial(&self) -> Trial {
        Trial::new(self.candidate, self.permutation.clone())
    }
}

/// Searches a fixed list of candidates, in order
pub struct Matcher {
    candidates: Vec<&'static Candidate>,
}

impl Matcher {
    /// Search every answer of the catalog in registration order
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_candidates(catalog.answers().collect())
    }

    pub fn with_candidates(candidates: Vec<&'static Candidate>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[&'static Candidate] {
        &self.candidates
    }

    /// Every candidate that satisfies `spec`, with the argument order that made it pass
    pub fn find(&self, spec: &Specification) -> Result<Vec<Match>, MatchError> {
        let shape = discover_call_shape(spec)?;
        if shape.keywords {
            warn!("Search for {} aborted: it calls its subject with keywords", spec.name());
            return Err(MatchError::ForbiddenKwargs);
        }
        let arity = shape.arity;
        let mut matches = Vec::new();

        for &candidate in self.candidates.iter().filter(|c| c.arity() == arity) {
            for permutation in Permutation::all(arity) {
                let trial = Trial::new(candidate, permutation);
                let outcome = guarded(|| spec.check(&trial));

                let violation = trial
                    .violation()
                    .or_else(|| outcome.as_ref().err().filter(|f| f.is_abort_signal()).cloned());
                if let Some(abort) = violation.as_ref().and_then(MatchError::from_violation) {
                    warn!("Search for {} aborted by {}: {}", spec.name(), trial, abort);
                    return Err(abort);
                }

                match outcome {
                    Ok(()) => {
                        info!("{} satisfies {}", trial, spec.name());
                        matches.push(Match {
                            candidate,
                            permutation: trial.permutation().clone(),
                        });
                        break;
                    }
                    Err(fault) => debug!("{} rejected for {}: {}", trial, spec.name(), fault),
                }
            }
        }

        if matches.is_empty() {
            info!("No candidate satisfies {}", spec.name());
        }
        Ok(matches)
    }
}
