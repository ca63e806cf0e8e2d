use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{Competency, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised while constructing a question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question points must be positive")]
    ZeroPoints,

    #[error("multiple-choice question needs at least two options, got {0}")]
    TooFewOptions(usize),

    #[error("correct answer {answer:?} is not among the options")]
    CorrectNotAnOption { answer: String },

    #[error("free-text minimum length must be positive")]
    ZeroMinLength,
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tier of a question, tracked independently per competency.
///
/// Tiers are totally ordered: `Beginner < Intermediate < Expert`. All tier
/// transitions move one step at a time and saturate at the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    /// All tiers in ascending order.
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Expert,
    ];

    /// One tier up, saturating at `Expert`.
    #[must_use]
    pub fn advance(self) -> Self {
        match self {
            Difficulty::Beginner => Difficulty::Intermediate,
            Difficulty::Intermediate | Difficulty::Expert => Difficulty::Expert,
        }
    }

    /// One tier down, saturating at `Beginner`.
    #[must_use]
    pub fn regress(self) -> Self {
        match self {
            Difficulty::Expert => Difficulty::Intermediate,
            Difficulty::Intermediate | Difficulty::Beginner => Difficulty::Beginner,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Expert => "expert",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Type-specific payload of a question.
///
/// The variant decides both how the question is rendered and how answers to
/// it are scored, so the evaluator can branch on it at compile time instead
/// of sniffing the shape of the submitted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one option; scored against the exact correct string.
    MultipleChoice {
        options: Vec<String>,
        correct: String,
    },
    /// Open answer; scored purely by trimmed character length.
    FreeText {
        min_length: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    /// 1-5 self-assessment; always earns proportional credit.
    Rating,
}

impl QuestionKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple_choice",
            QuestionKind::FreeText { .. } => "free_text",
            QuestionKind::Rating => "rating",
        }
    }
}

/// An immutable bank entry.
///
/// Every question belongs to exactly one competency and one difficulty tier;
/// `points` is the maximum score obtainable for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    id: QuestionId,
    competency: Competency,
    difficulty: Difficulty,
    prompt: String,
    points: u32,
    kind: QuestionKind,
}

impl Question {
    /// Build a multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::ZeroPoints`, `TooFewOptions`, or
    /// `CorrectNotAnOption` when the metadata is inconsistent.
    pub fn multiple_choice(
        id: impl Into<QuestionId>,
        competency: impl Into<Competency>,
        difficulty: Difficulty,
        prompt: impl Into<String>,
        points: u32,
        options: Vec<String>,
        correct: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let correct = correct.into();
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        if !options.iter().any(|o| *o == correct) {
            return Err(QuestionError::CorrectNotAnOption { answer: correct });
        }
        Self::build(
            id,
            competency,
            difficulty,
            prompt,
            points,
            QuestionKind::MultipleChoice { options, correct },
        )
    }

    /// Build a free-text question scored by minimum answer length.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::ZeroPoints` or `ZeroMinLength`.
    pub fn free_text(
        id: impl Into<QuestionId>,
        competency: impl Into<Competency>,
        difficulty: Difficulty,
        prompt: impl Into<String>,
        points: u32,
        min_length: usize,
        hint: Option<String>,
    ) -> Result<Self, QuestionError> {
        if min_length == 0 {
            return Err(QuestionError::ZeroMinLength);
        }
        Self::build(
            id,
            competency,
            difficulty,
            prompt,
            points,
            QuestionKind::FreeText { min_length, hint },
        )
    }

    /// Build a 1-5 self-assessment question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::ZeroPoints`.
    pub fn rating(
        id: impl Into<QuestionId>,
        competency: impl Into<Competency>,
        difficulty: Difficulty,
        prompt: impl Into<String>,
        points: u32,
    ) -> Result<Self, QuestionError> {
        Self::build(id, competency, difficulty, prompt, points, QuestionKind::Rating)
    }

    fn build(
        id: impl Into<QuestionId>,
        competency: impl Into<Competency>,
        difficulty: Difficulty,
        prompt: impl Into<String>,
        points: u32,
        kind: QuestionKind,
    ) -> Result<Self, QuestionError> {
        if points == 0 {
            return Err(QuestionError::ZeroPoints);
        }
        Ok(Self {
            id: id.into(),
            competency: competency.into(),
            difficulty,
            prompt: prompt.into(),
            points,
            kind,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn competency(&self) -> &Competency {
        &self.competency
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// A submitted answer, tagged by shape.
///
/// The variant must match the question's `QuestionKind`; the evaluator
/// rejects mismatches instead of coercing between shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// Selected option text for a multiple-choice question.
    Choice(String),
    /// Free-form text for an open question.
    Text(String),
    /// Self-assessment value on the 1-5 scale.
    Rating(u8),
}

impl Answer {
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Answer::Choice(_) => "multiple_choice",
            Answer::Text(_) => "free_text",
            Answer::Rating(_) => "rating",
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_transitions_saturate() {
        assert_eq!(Difficulty::Beginner.advance(), Difficulty::Intermediate);
        assert_eq!(Difficulty::Intermediate.advance(), Difficulty::Expert);
        assert_eq!(Difficulty::Expert.advance(), Difficulty::Expert);

        assert_eq!(Difficulty::Expert.regress(), Difficulty::Intermediate);
        assert_eq!(Difficulty::Intermediate.regress(), Difficulty::Beginner);
        assert_eq!(Difficulty::Beginner.regress(), Difficulty::Beginner);
    }

    #[test]
    fn difficulty_is_ordered() {
        assert!(Difficulty::Beginner < Difficulty::Intermediate);
        assert!(Difficulty::Intermediate < Difficulty::Expert);
    }

    #[test]
    fn multiple_choice_requires_correct_among_options() {
        let err = Question::multiple_choice(
            "q1",
            "javascript",
            Difficulty::Beginner,
            "Which operator assigns a value?",
            10,
            vec!["==".into(), "===".into()],
            "=",
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::CorrectNotAnOption { .. }));
    }

    #[test]
    fn multiple_choice_requires_two_options() {
        let err = Question::multiple_choice(
            "q1",
            "javascript",
            Difficulty::Beginner,
            "Pick the only option",
            10,
            vec!["a".into()],
            "a",
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::TooFewOptions(1)));
    }

    #[test]
    fn zero_points_rejected() {
        let err =
            Question::rating("r1", "communication", Difficulty::Beginner, "Rate yourself", 0)
                .unwrap_err();
        assert!(matches!(err, QuestionError::ZeroPoints));
    }

    #[test]
    fn free_text_requires_positive_min_length() {
        let err = Question::free_text(
            "t1",
            "javascript",
            Difficulty::Expert,
            "Explain the event loop",
            30,
            0,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::ZeroMinLength));
    }

    #[test]
    fn answer_kind_names_match_question_kinds() {
        let q = Question::rating("r1", "communication", Difficulty::Beginner, "Rate", 10).unwrap();
        assert_eq!(q.kind().name(), Answer::Rating(4).kind_name());
    }
}
