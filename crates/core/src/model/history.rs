use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::ids::{Competency, QuestionId};
use crate::model::question::Answer;

/// Audit record of a single scored answer.
///
/// The history is append-only and exists for reporting; the engine never
/// reads it back to make decisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub competency: Competency,
    pub answer: Answer,
    pub is_correct: bool,
    pub credited_points: f64,
    pub answered_at: DateTime<Utc>,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(
        question_id: QuestionId,
        competency: Competency,
        answer: Answer,
        is_correct: bool,
        credited_points: f64,
        answered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            question_id,
            competency,
            answer,
            is_correct,
            credited_points,
            answered_at,
        }
    }
}
