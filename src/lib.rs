//! funcfinder
//!
//! Finds the functions in a curated catalog that satisfy a behavioral test,
//! whatever order they take their parameters in, and explains each match:
//! - Arity discovery with a throwaway probe
//! - Brute-force search over candidates and argument permutations
//! - Call-graph tracing of the code a match runs through
//! - Minimal source display with deduplicated dependencies
//! - Adaptive benchmarking of competing answers

pub mod assertions;
pub mod bench;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod fault;
pub mod introspect;
pub mod report;
pub mod search;
pub mod subject;
pub mod unit;
pub mod value;

// Re-exports for convenience and for the declaration macros
pub use catalog::{Candidate, Catalog, CatalogError, Specification};
pub use config::Config;
pub use engine::{discover_arity, Match, MatchError, Matcher, Permutation, Trial};
pub use fault::{Fallible, Fault, Outcome};
pub use report::{Session, ShowReport};
pub use serde_json::Value;
pub use subject::{Args, Subject};
pub use unit::{CodeUnit, Origin, SourceFile};
