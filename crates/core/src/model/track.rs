use std::collections::VecDeque;

use crate::model::ids::Competency;
use crate::model::question::Difficulty;

/// Number of most recent answers the difficulty adapter looks at.
pub const ACCURACY_WINDOW: usize = 3;

/// Per-competency progress record for one session.
///
/// Created when the competency is selected, mutated after every presented
/// question and every scored answer, never deleted mid-session. Holds the
/// rolling correctness window that drives difficulty adaptation.
///
/// Invariant: `accumulated_score <= max_possible_score` at all times;
/// `record_answer` clamps to enforce it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetencyTrack {
    competency: Competency,
    difficulty: Difficulty,
    questions_asked: u32,
    answers_recorded: u32,
    correct_answers: u32,
    accumulated_score: f64,
    max_possible_score: u32,
    completed: bool,
    recent: VecDeque<bool>,
}

impl CompetencyTrack {
    /// Creates a fresh track at the given starting tier.
    #[must_use]
    pub fn new(competency: Competency, initial_difficulty: Difficulty) -> Self {
        Self {
            competency,
            difficulty: initial_difficulty,
            questions_asked: 0,
            answers_recorded: 0,
            correct_answers: 0,
            accumulated_score: 0.0,
            max_possible_score: 0,
            completed: false,
            recent: VecDeque::with_capacity(ACCURACY_WINDOW),
        }
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
    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    #[must_use]
    pub fn answers_recorded(&self) -> u32 {
        self.answers_recorded
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn accumulated_score(&self) -> f64 {
        self.accumulated_score
    }

    #[must_use]
    pub fn max_possible_score(&self) -> u32 {
        self.max_possible_score
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the competency exhausted: no unused question remains at any tier.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Set the tier directly. Used by the difficulty adapter only.
    pub(crate) fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Record that a question worth `points` was presented for this competency.
    ///
    /// Raises the achievable maximum; the score itself moves on `record_answer`.
    pub fn note_presented(&mut self, points: u32) {
        self.questions_asked += 1;
        self.max_possible_score += points;
    }

    /// Record a scored answer: counts, credited points, and the rolling window.
    ///
    /// Credited points are clamped so the accumulated score can never exceed
    /// the achievable maximum.
    pub fn record_answer(&mut self, is_correct: bool, credited_points: f64) {
        self.answers_recorded += 1;
        if is_correct {
            self.correct_answers += 1;
        }
        self.accumulated_score = (self.accumulated_score + credited_points.max(0.0))
            .min(f64::from(self.max_possible_score));

        if self.recent.len() == ACCURACY_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(is_correct);
    }

    /// Accuracy over the rolling window, or `None` before the first answer.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn recent_accuracy(&self) -> Option<f64> {
        if self.recent.is_empty() {
            return None;
        }
        let correct = self.recent.iter().filter(|c| **c).count();
        Some(correct as f64 / self.recent.len() as f64)
    }

    /// Credited points rescaled to 0-100 against the questions actually
    /// presented, or 0 when nothing was asked.
    #[must_use]
    pub fn normalized_score(&self) -> f64 {
        if self.questions_asked == 0 || self.max_possible_score == 0 {
            return 0.0;
        }
        (100.0 * self.accumulated_score / f64::from(self.max_possible_score)).min(100.0)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
