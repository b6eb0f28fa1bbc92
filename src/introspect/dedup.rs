//! Dependency Deduplicator
//!
//! Keeps dependency listings short: a dependency whose source is already on
//! screen, or is nested inside something on screen, is not shown again.

use std::collections::HashSet;

use regex::Regex;
use tracing::warn;

use super::source::extract_source;
use crate::unit::CodeUnit;

/// Sources already displayed in one session, raw and whitespace-stripped
#[derive(Debug, Default, Clone)]
pub struct ShownSources {
    raw: HashSet<String>,
    stripped: Vec<String>,
}

impl ShownSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a displayed source. Returns false if it was already known.
    pub fn insert(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        let stripped = strip_whitespace(&source);
        if !self.raw.insert(source) {
            return false;
        }
        self.stripped.push(stripped);
        true
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Equal to, or a contiguous part of, something already shown
    pub fn covers(&self, source: &str) -> bool {
        if self.raw.contains(source) {
            return true;
        }
        let needle = strip_whitespace(source);
        self.stripped.iter().any(|shown| shown.contains(&needle))
    }
}

/// Remove every whitespace character
pub fn strip_whitespace(text: &str) -> String {
    thread_local! {
        static WHITESPACE: Regex = Regex::new(r"\s+").expect("static pattern");
    }
    WHITESPACE.with(|re| re.replace_all(text, "").into_owned())
}

/// Dependencies whose source is not already covered by `shown`, in input order
pub fn filter_new(
    dependencies: &[&'static CodeUnit],
    shown: &ShownSources,
) -> Vec<(&'static CodeUnit, String)> {
    dependencies
        .iter()
        .filter_map(|unit| match extract_source(unit, None) {
            Ok(source) => Some((*unit, source)),
            Err(e) => {
                warn!("Skipping dependency {}: {}", unit, e);
                None
            }
        })
        .filter(|(_, source)| !shown.covers(source))
        .collect()
}
