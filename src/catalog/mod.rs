//! Catalog Module
//!
//! The registry of questions (specifications) and answers (candidates),
//! plus the bundled sample collections.

mod entry;
pub mod answers;
pub mod questions;

pub use entry::{Candidate, CandidateFn, SpecFn, Specification};

use std::collections::HashMap;
use std::ptr;

use thiserror::Error;
use tracing::{debug, info};

/// Registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("a {kind} named {name} is already registered")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{answer} declares that it solves {question}, which is not in the catalog")]
    UnknownQuestion { answer: String, question: String },
}

/// Questions and answers in registration order, with declared solutions
#[derive(Debug, Default)]
pub struct Catalog {
    questions: Vec<&'static Specification>,
    answers: Vec<&'static Candidate>,
    solutions: HashMap<&'static str, Vec<&'static Candidate>>,
    solved: HashMap<&'static str, Vec<&'static Specification>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a question
    pub fn add_question(&mut self, spec: &'static Specification) -> Result<(), CatalogError> {
        if self.question(spec.name()).is_some() {
            return Err(CatalogError::DuplicateName {
                kind: "question",
                name: spec.name().to_string(),
            });
        }
        debug!("Registered question {}", spec.name());
        self.questions.push(spec);
        Ok(())
    }

    /// Register an answer together with the questions it declares to solve.
    ///
    /// Each declared question's solution list grows by one, in registration order.
    pub fn add_answer(
        &mut self,
        candidate: &'static Candidate,
        solves: &[&'static Specification],
    ) -> Result<(), CatalogError> {
        if self.answer(candidate.name()).is_some() {
            return Err(CatalogError::DuplicateName {
                kind: "answer",
                name: candidate.name().to_string(),
            });
        }
        if let Some(unknown) = solves.iter().find(|spec| !self.contains_question(spec)) {
            return Err(CatalogError::UnknownQuestion {
                answer: candidate.name().to_string(),
                question: unknown.name().to_string(),
            });
        }

        for spec in solves {
            self.solutions.entry(spec.name()).or_default().push(candidate);
        }
        self.solved.insert(candidate.name(), solves.to_vec());
        self.answers.push(candidate);
        debug!("Registered answer {} solving {} question(s)", candidate.name(), solves.len());
        Ok(())
    }

    fn contains_question(&self, spec: &Specification) -> bool {
        self.questions.iter().any(|q| ptr::eq(*q, spec))
    }

    pub fn question(&self, name: &str) -> Option<&'static Specification> {
        self.questions.iter().copied().find(|q| q.name() == name)
    }

    pub fn answer(&self, name: &str) -> Option<&'static Candidate> {
        self.answers.iter().copied().find(|a| a.name() == name)
    }

    pub fn questions(&self) -> impl Iterator<Item = &'static Specification> + '_ {
        self.questions.iter().copied()
    }

    pub fn answers(&self) -> impl Iterator<Item = &'static Candidate> + '_ {
        self.answers.iter().copied()
    }

    /// Answers that declared they solve `spec`
    pub fn answers_for(&self, spec: &Specification) -> &[&'static Candidate] {
        self.solutions.get(spec.name()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Questions `candidate` declared it solves
    pub fn solved_by(&self, candidate: &Candidate) -> &[&'static Specification] {
        self.solved.get(candidate.name()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.questions.len() + self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The bundled catalog: every sample question, then every sample answer
pub fn load() -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    questions::register(&mut catalog)?;
    answers::register(&mut catalog)?;
    info!(
        "Loaded catalog with {} questions and {} answers",
        catalog.questions.len(),
        catalog.answers.len()
    );
    Ok(catalog)
}
