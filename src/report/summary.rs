//! Machine-readable session summary

use serde::Serialize;

use crate::bench::Timing;
use crate::config::Config;
use crate::engine::Match;

/// How one declared answer fared against its question
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    pub answer: &'static str,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
}

/// Everything a session reported, in the order it was found
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShowReport {
    pub question: Option<&'static str>,
    pub answers: Vec<AnswerOutcome>,
    pub matches: Vec<Match>,
    pub timings: Vec<Timing>,
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
    pub config: Option<Config>,
}

impl ShowReport {
    pub fn passed(&self) -> impl Iterator<Item = &AnswerOutcome> {
        self.answers.iter().filter(|outcome| outcome.passed)
    }
}
