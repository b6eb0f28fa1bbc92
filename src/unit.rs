//! Code Units
//!
//! A code unit is one named definition in a catalog source file. Units are
//! `'static` and compared by address, so two units that share a name in
//! different files never collide.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Which collection a unit of code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Reusable building blocks (the answers collection)
    BuildingBlocks,
    /// Specifications (the questions collection)
    Specifications,
    /// Anything else: tests, ad-hoc callables
    Other,
}

/// A source file embedded at compile time
#[derive(Debug)]
pub struct SourceFile {
    path: &'static str,
    text: &'static str,
}

impl SourceFile {
    /// Pair a path (usually `file!()`) with its text (usually `include_str!`)
    pub const fn new(path: &'static str, text: &'static str) -> Self {
        Self { path, text }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Aggregation files (`mod.rs`, `lib.rs`) only wire a collection together
    pub fn is_entry(&self) -> bool {
        let name = self.path.rsplit(['/', '\\']).next().unwrap_or(self.path);
        name == "mod.rs" || name == "lib.rs"
    }
}

/// Identity and provenance of one definition
#[derive(Debug)]
pub struct CodeUnit {
    name: &'static str,
    origin: Origin,
    source: &'static SourceFile,
}

impl CodeUnit {
    pub const fn new(name: &'static str, origin: Origin, source: &'static SourceFile) -> Self {
        Self { name, origin, source }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn source(&self) -> &'static SourceFile {
        self.source
    }
}

impl fmt::Display for CodeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.source.path)
    }
}

/// Identity handle over a `'static` unit: equality and hashing use the address
#[derive(Debug, Clone, Copy)]
pub struct UnitRef(pub &'static CodeUnit);

impl PartialEq for UnitRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for UnitRef {}

impl Hash for UnitRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.0, state)
    }
}
