//! Shared error types for the engine crate.

use thiserror::Error;

use assess_core::evaluate::EvaluateError;
use assess_core::model::{Competency, QuestionId};

/// Errors emitted by an `AssessmentSession`.
///
/// Running out of questions is not an error: `next_question` signals that
/// by returning `None`.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SessionError {
    /// Question retrieval or submission before any competency was selected.
    #[error("no competencies selected")]
    NoCompetenciesSelected,

    #[error("competency not present in question bank: {0}")]
    UnknownCompetency(Competency),

    /// The selection cannot change once questions were issued; `reset` first.
    #[error("competency selection cannot change after questions were issued")]
    AlreadyStarted,

    /// The id was never issued in this session, or was already scored.
    #[error("question not found or already answered: {0}")]
    QuestionNotFound(QuestionId),

    #[error(transparent)]
    Evaluate(#[from] EvaluateError),
}
