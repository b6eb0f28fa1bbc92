//! Report Module
//!
//! Text reports for people and a serializable summary for tools.

mod session;
mod summary;

pub use session::Session;
pub use summary::{AnswerOutcome, ShowReport};
