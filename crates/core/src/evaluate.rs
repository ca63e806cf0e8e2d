//! Type-specific answer scoring.
//!
//! Pure functions: the caller owns the side effects (track updates and
//! difficulty adaptation) so that evaluation can be tested in isolation.

use thiserror::Error;

use crate::model::{Answer, Question, QuestionKind};

/// Rating answers live on this scale.
pub const RATING_SCALE: u8 = 5;

/// Ratings at or above this value count as a correct self-assessment.
pub const RATING_CORRECT_THRESHOLD: u8 = 4;

/// Fraction of the points granted for any free-text answer that meets the
/// minimum length.
const FREE_TEXT_BASE: f64 = 0.7;

/// Fraction of the points reserved for the length bonus, and the cap on the
/// relative overshoot that earns it.
const FREE_TEXT_BONUS: f64 = 0.3;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaluateError {
    #[error("answer shape {got} does not match question type {expected}")]
    AnswerMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
}

//
// ─── EVALUATION ────────────────────────────────────────────────────────────────
//

/// Verdict for one submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub is_correct: bool,
    pub credited_points: f64,
    pub feedback: String,
}

const FEEDBACK_CORRECT: &str = "Correct. You have a solid grasp of this topic.";
const FEEDBACK_INCORRECT: &str = "Not quite. This topic is worth revisiting.";
const FEEDBACK_RATING: &str = "Self-assessment recorded.";

/// Score an answer against a question.
///
/// - Multiple choice: exact string match earns full points, anything else 0.
/// - Rating (1-5): correct iff the value is at least 4; credit is always
///   proportional (`points x value / 5`), even below the threshold.
/// - Free text: the trimmed answer must reach `min_length` characters.
///   If it does, credit is a 70% base plus a length bonus of up to 30% of
///   the remaining points, capped; if not, credit is 0 and the feedback
///   names the shortfall. No semantic check is performed.
///
/// # Errors
///
/// Returns `EvaluateError::AnswerMismatch` when the answer variant does not
/// match the question type, and `RatingOutOfRange` for ratings outside 1-5.
pub fn evaluate(question: &Question, answer: &Answer) -> Result<Evaluation, EvaluateError> {
    let points = f64::from(question.points());
    match (question.kind(), answer) {
        (QuestionKind::MultipleChoice { correct, .. }, Answer::Choice(given)) => {
            let is_correct = given == correct;
            let feedback = if is_correct {
                FEEDBACK_CORRECT
            } else {
                FEEDBACK_INCORRECT
            };
            Ok(Evaluation {
                is_correct,
                credited_points: if is_correct { points } else { 0.0 },
                feedback: feedback.to_string(),
            })
        }
        (QuestionKind::Rating, Answer::Rating(value)) => {
            if !(1..=RATING_SCALE).contains(value) {
                return Err(EvaluateError::RatingOutOfRange(*value));
            }
            Ok(Evaluation {
                is_correct: *value >= RATING_CORRECT_THRESHOLD,
                credited_points: points * f64::from(*value) / f64::from(RATING_SCALE),
                feedback: FEEDBACK_RATING.to_string(),
            })
        }
        (QuestionKind::FreeText { min_length, .. }, Answer::Text(text)) => {
            let length = text.trim().chars().count();
            if length < *min_length {
                return Ok(Evaluation {
                    is_correct: false,
                    credited_points: 0.0,
                    feedback: format!(
                        "Answer too short: {length} characters, at least {min_length} required."
                    ),
                });
            }
            #[allow(clippy::cast_precision_loss)]
            let overshoot = (length as f64 / *min_length as f64) - 1.0;
            let bonus = points * FREE_TEXT_BONUS * overshoot.min(FREE_TEXT_BONUS);
            Ok(Evaluation {
                is_correct: true,
                credited_points: points * FREE_TEXT_BASE + bonus,
                feedback: FEEDBACK_CORRECT.to_string(),
            })
        }
        (kind, answer) => Err(EvaluateError::AnswerMismatch {
            expected: kind.name(),
            got: answer.kind_name(),
        }),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn choice_question() -> Question {
        Question::multiple_choice(
            "q1",
            "javascript",
            Difficulty::Beginner,
            "Which operator assigns a value?",
            10,
            vec!["=".into(), "==".into(), "===".into()],
            "=",
        )
        .unwrap()
    }

    fn text_question(points: u32, min_length: usize) -> Question {
        Question::free_text(
            "q2",
            "javascript",
            Difficulty::Intermediate,
            "Explain closures",
            points,
            min_length,
            None,
        )
        .unwrap()
    }

    fn rating_question() -> Question {
        Question::rating("q3", "communication", Difficulty::Beginner, "Rate yourself", 10)
            .unwrap()
    }

    #[test]
    fn choice_exact_match_earns_full_points() {
        let eval = evaluate(&choice_question(), &Answer::Choice("=".into())).unwrap();
        assert!(eval.is_correct);
        assert_eq!(eval.credited_points, 10.0);
    }

    #[test]
    fn choice_mismatch_earns_nothing() {
        let eval = evaluate(&choice_question(), &Answer::Choice("==".into())).unwrap();
        assert!(!eval.is_correct);
        assert_eq!(eval.credited_points, 0.0);
    }

    #[test]
    fn rating_below_threshold_still_earns_partial_credit() {
        let eval = evaluate(&rating_question(), &Answer::Rating(3)).unwrap();
        assert!(!eval.is_correct);
        assert!((eval.credited_points - 6.0).abs() < 1e-9);
    }

    #[test]
    fn rating_at_threshold_is_correct() {
        let eval = evaluate(&rating_question(), &Answer::Rating(4)).unwrap();
        assert!(eval.is_correct);
        assert!((eval.credited_points - 8.0).abs() < 1e-9);
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        let err = evaluate(&rating_question(), &Answer::Rating(6)).unwrap_err();
        assert!(matches!(err, EvaluateError::RatingOutOfRange(6)));
        let err = evaluate(&rating_question(), &Answer::Rating(0)).unwrap_err();
        assert!(matches!(err, EvaluateError::RatingOutOfRange(0)));
    }

    #[test]
    fn free_text_at_minimum_earns_base_credit() {
        let q = text_question(20, 15);
        let eval = evaluate(&q, &Answer::Text("a".repeat(15))).unwrap();
        assert!(eval.is_correct);
        assert!((eval.credited_points - 14.0).abs() < 1e-9);
    }

    #[test]
    fn free_text_bonus_is_capped() {
        let q = text_question(20, 15);
        // Double the minimum: overshoot 1.0 is capped at 0.3, so the bonus
        // is 0.3 * 0.3 * 20 = 1.8 on top of the 14.0 base.
        let eval = evaluate(&q, &Answer::Text("a".repeat(30))).unwrap();
        assert!((eval.credited_points - 15.8).abs() < 1e-9);
    }

    #[test]
    fn free_text_partial_bonus_below_cap() {
        let q = text_question(20, 15);
        // 18 chars: overshoot 0.2 -> bonus 0.2 * 0.3 * 20 = 1.2.
        let eval = evaluate(&q, &Answer::Text("a".repeat(18))).unwrap();
        assert!((eval.credited_points - 15.2).abs() < 1e-9);
    }

    #[test]
    fn free_text_shortfall_names_the_missing_length() {
        let q = text_question(20, 15);
        let eval = evaluate(&q, &Answer::Text("  too short  ".into())).unwrap();
        assert!(!eval.is_correct);
        assert_eq!(eval.credited_points, 0.0);
        assert!(eval.feedback.contains("at least 15"));
    }

    #[test]
    fn trimming_applies_before_length_check() {
        let q = text_question(20, 5);
        let eval = evaluate(&q, &Answer::Text("   ab   ".into())).unwrap();
        assert!(!eval.is_correct);
    }

    #[test]
    fn mismatched_answer_shape_is_rejected() {
        let err = evaluate(&choice_question(), &Answer::Rating(3)).unwrap_err();
        assert!(matches!(
            err,
            EvaluateError::AnswerMismatch {
                expected: "multiple_choice",
                got: "rating",
            }
        ));
    }
}
