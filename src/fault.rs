//! Fault Module
//!
//! The error raised by subjects, candidates and assertions while a
//! specification is being exercised.

use serde_json::Value;
use thiserror::Error;

/// Result of calling a subject or a candidate
pub type Fallible = Result<Value, Fault>;

/// Result of running a specification or an assertion
pub type Outcome = Result<(), Fault>;

/// Everything that can go wrong inside one invocation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
    #[error("AssertionError: {0}")]
    Assertion(String),

    #[error("TypeError: {0}")]
    Type(String),

    #[error("ValueError: {0}")]
    Value(String),

    #[error("ZeroDivisionError: {0}")]
    ZeroDivision(String),

    /// Reordering is undefined over keyword calling conventions
    #[error("You cannot ask for a function with keyword arguments.")]
    ForbiddenKwargs,

    #[error("The function you ask for must always have the same number of arguments (expected {expected}, got {got}).")]
    WrongArgCount { expected: usize, got: usize },

    /// An optional facility the code depends on was not compiled in
    #[error("UnavailableFacility: {0} is not available in this build")]
    Unavailable(String),

    #[error("Panic: {0}")]
    Panicked(String),
}

impl Fault {
    pub fn assertion(message: impl Into<String>) -> Self {
        Fault::Assertion(message.into())
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Fault::Type(message.into())
    }

    /// A callable received the wrong number of positional arguments
    pub fn arity(name: &str, expected: usize, got: usize) -> Self {
        Fault::Type(format!(
            "{}() takes exactly {} argument{} ({} given)",
            name,
            expected,
            if expected == 1 { "" } else { "s" },
            got
        ))
    }

    /// Signals that make continuing a search meaningless
    pub fn is_abort_signal(&self) -> bool {
        matches!(self, Fault::ForbiddenKwargs | Fault::WrongArgCount { .. })
    }

    /// Expected environment conditions that need no fault trace
    pub fn is_environmental(&self) -> bool {
        matches!(self, Fault::Unavailable(_))
    }

    /// Convert a caught panic payload into a fault
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Fault::Panicked(message)
    }
}
