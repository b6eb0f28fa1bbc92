//! Question Search
//!
//! Case-insensitive keyword lookup over question names and documentation.

use crate::catalog::{Catalog, Specification};

/// Questions whose name and documentation contain every term
pub fn search_questions<S: AsRef<str>>(catalog: &Catalog, terms: &[S]) -> Vec<&'static Specification> {
    let terms: Vec<String> = terms
        .iter()
        .flat_map(|term| term.as_ref().split_whitespace().map(str::to_lowercase).collect::<Vec<_>>())
        .collect();

    catalog
        .questions()
        .filter(|spec| {
            let haystack = format!("{}\n{}", spec.name(), spec.doc()).to_lowercase();
            terms.iter().all(|term| haystack.contains(term.as_str()))
        })
        .collect()
}
