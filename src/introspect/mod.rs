//! Introspection Module
//!
//! Explains a match: which code it ran through and what that code looks like.

pub mod dedup;
pub mod source;
pub mod tracer;

pub use dedup::{filter_new, strip_whitespace, ShownSources};
pub use source::{definition, doc_comment, extract_source, Definition, SourceError};
pub use tracer::{trace_dependencies, Activation};
