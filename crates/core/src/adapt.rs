//! Per-competency difficulty adaptation.
//!
//! Two entry points: [`adapt`] runs after every scored answer and moves the
//! tier based on accuracy over the recent-answer window; [`force_escalate`]
//! is invoked by the scheduler when the current tier has no unused question
//! left. Either way a tier moves at most one step at a time.

use crate::model::{CompetencyTrack, Difficulty};

/// Window accuracy above which the tier advances.
pub const ADVANCE_THRESHOLD: f64 = 0.7;

/// Window accuracy below which the tier regresses.
pub const REGRESS_THRESHOLD: f64 = 0.4;

/// Regression requires at least this many recorded answers.
pub const MIN_ANSWERS_FOR_REGRESS: u32 = 2;

/// Outcome of a forced escalation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedEscalation {
    /// The tier moved up one step; selection should be retried there.
    Advanced(Difficulty),
    /// Already at `Expert`; the competency has nothing left to climb to.
    Exhausted,
}

/// Normal-mode adaptation, run after each evaluated answer.
///
/// Accuracy is computed over the track's rolling window of the most recent
/// answers. Above [`ADVANCE_THRESHOLD`] the tier advances; below
/// [`REGRESS_THRESHOLD`] it regresses, but only once at least
/// [`MIN_ANSWERS_FOR_REGRESS`] answers have been recorded. Saturates at the
/// tier bounds.
pub fn adapt(track: &mut CompetencyTrack) {
    let Some(accuracy) = track.recent_accuracy() else {
        return;
    };

    let current = track.difficulty();
    if accuracy > ADVANCE_THRESHOLD {
        track.set_difficulty(current.advance());
    } else if accuracy < REGRESS_THRESHOLD && track.answers_recorded() >= MIN_ANSWERS_FOR_REGRESS {
        track.set_difficulty(current.regress());
    }
}

/// Forced-mode escalation, invoked only when no question remains at the
/// current tier.
///
/// Advances one step unconditionally; at `Expert` the competency is marked
/// completed instead.
pub fn force_escalate(track: &mut CompetencyTrack) -> ForcedEscalation {
    let current = track.difficulty();
    if current == Difficulty::Expert {
        track.mark_completed();
        return ForcedEscalation::Exhausted;
    }
    let next = current.advance();
    track.set_difficulty(next);
    ForcedEscalation::Advanced(next)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Competency;

    fn track_at(difficulty: Difficulty) -> CompetencyTrack {
        CompetencyTrack::new(Competency::new("javascript"), difficulty)
    }

    fn answer(track: &mut CompetencyTrack, correct: bool) {
        track.note_presented(10);
        track.record_answer(correct, if correct { 10.0 } else { 0.0 });
        adapt(track);
    }

    #[test]
    fn single_correct_answer_advances() {
        let mut t = track_at(Difficulty::Beginner);
        answer(&mut t, true);
        assert_eq!(t.difficulty(), Difficulty::Intermediate);
    }

    #[test]
    fn single_wrong_answer_does_not_regress() {
        // One answer recorded: below the two-answer floor for regression.
        let mut t = track_at(Difficulty::Intermediate);
        answer(&mut t, false);
        assert_eq!(t.difficulty(), Difficulty::Intermediate);
    }

    #[test]
    fn two_wrong_answers_regress_one_step() {
        let mut t = track_at(Difficulty::Expert);
        answer(&mut t, false);
        answer(&mut t, false);
        assert_eq!(t.difficulty(), Difficulty::Intermediate);
    }

    #[test]
    fn regression_saturates_at_beginner() {
        let mut t = track_at(Difficulty::Beginner);
        for _ in 0..4 {
            answer(&mut t, false);
        }
        assert_eq!(t.difficulty(), Difficulty::Beginner);
    }

    #[test]
    fn advancement_saturates_at_expert() {
        let mut t = track_at(Difficulty::Intermediate);
        for _ in 0..4 {
            answer(&mut t, true);
        }
        assert_eq!(t.difficulty(), Difficulty::Expert);
    }

    #[test]
    fn mixed_window_holds_steady() {
        // 2/3 correct = 0.667: neither above 0.7 nor below 0.4.
        let mut t = track_at(Difficulty::Intermediate);
        answer(&mut t, false);
        answer(&mut t, true);
        assert_eq!(t.difficulty(), Difficulty::Intermediate);
        answer(&mut t, true);
        assert_eq!(t.difficulty(), Difficulty::Intermediate);
    }

    #[test]
    fn window_forgets_old_misses() {
        let mut t = track_at(Difficulty::Beginner);
        answer(&mut t, false);
        answer(&mut t, false);
        assert_eq!(t.difficulty(), Difficulty::Beginner);
        // Three straight correct answers push the misses out of the window.
        answer(&mut t, true);
        answer(&mut t, true);
        answer(&mut t, true);
        assert_eq!(t.difficulty(), Difficulty::Intermediate);
    }

    #[test]
    fn forced_escalation_climbs_one_tier() {
        let mut t = track_at(Difficulty::Beginner);
        assert_eq!(
            force_escalate(&mut t),
            ForcedEscalation::Advanced(Difficulty::Intermediate)
        );
        assert_eq!(t.difficulty(), Difficulty::Intermediate);
        assert!(!t.is_completed());
    }

    #[test]
    fn forced_escalation_at_expert_completes() {
        let mut t = track_at(Difficulty::Expert);
        assert_eq!(force_escalate(&mut t), ForcedEscalation::Exhausted);
        assert!(t.is_completed());
        assert_eq!(t.difficulty(), Difficulty::Expert);
    }
}
