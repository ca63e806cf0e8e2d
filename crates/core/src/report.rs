//! Final results aggregation: normalized per-competency scores, proficiency
//! banding, and the overall mean handed to outside collaborators.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{AnswerRecord, Competency, CompetencyTrack, Difficulty, SessionId};

//
// ─── PROFICIENCY ───────────────────────────────────────────────────────────────
//

/// Proficiency band derived from a normalized 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    /// Band thresholds: >=85 expert, >=70 advanced, >=50 intermediate.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            ProficiencyLevel::Expert
        } else if score >= 70.0 {
            ProficiencyLevel::Advanced
        } else if score >= 50.0 {
            ProficiencyLevel::Intermediate
        } else {
            ProficiencyLevel::Beginner
        }
    }

    /// The fixed recommendation attached to each band.
    #[must_use]
    pub fn recommendation(self) -> &'static str {
        match self {
            ProficiencyLevel::Expert => {
                "Deepen your expertise and share it: mentoring and advanced projects."
            }
            ProficiencyLevel::Advanced => {
                "Close the remaining gaps with targeted advanced material."
            }
            ProficiencyLevel::Intermediate => {
                "Consolidate the fundamentals through regular practice."
            }
            ProficiencyLevel::Beginner => {
                "Start with introductory courses covering the basics of this area."
            }
        }
    }
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Final standing of one competency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyReport {
    pub score: f64,
    pub level: ProficiencyLevel,
    pub questions_asked: u32,
    pub correct_answers: u32,
    pub final_difficulty: Difficulty,
    pub recommendation: &'static str,
}

/// The normalized end-of-session report.
///
/// This is the record handed to the persistence and presentation
/// collaborators; the engine itself never reads it back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    pub session_id: SessionId,
    pub overall_score: f64,
    pub total_questions_asked: u32,
    pub total_correct_answers: u32,
    pub per_competency: BTreeMap<Competency, CompetencyReport>,
    pub history: Vec<AnswerRecord>,
}

impl Results {
    /// Aggregate the final report from the session's tracks and audit log.
    ///
    /// Per-competency scores are the tracks' normalized 0-100 scores; the
    /// overall score is the unweighted mean over competencies that were
    /// actually asked at least one question. Competencies with no questions
    /// report a 0 score but are excluded from the mean.
    #[must_use]
    pub fn build<'a, I>(session_id: SessionId, tracks: I, history: Vec<AnswerRecord>) -> Self
    where
        I: IntoIterator<Item = &'a CompetencyTrack>,
    {
        let mut per_competency = BTreeMap::new();
        let mut total_questions_asked = 0;
        let mut total_correct_answers = 0;
        let mut scored_sum = 0.0;
        let mut scored_count = 0_u32;

        for track in tracks {
            let score = track.normalized_score();
            let level = ProficiencyLevel::from_score(score);
            total_questions_asked += track.questions_asked();
            total_correct_answers += track.correct_answers();
            if track.questions_asked() > 0 {
                scored_sum += score;
                scored_count += 1;
            }
            per_competency.insert(
                track.competency().clone(),
                CompetencyReport {
                    score,
                    level,
                    questions_asked: track.questions_asked(),
                    correct_answers: track.correct_answers(),
                    final_difficulty: track.difficulty(),
                    recommendation: level.recommendation(),
                },
            );
        }

        let overall_score = if scored_count == 0 {
            0.0
        } else {
            scored_sum / f64::from(scored_count)
        };

        Self {
            session_id,
            overall_score,
            total_questions_asked,
            total_correct_answers,
            per_competency,
            history,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str, answers: &[(bool, f64, u32)]) -> CompetencyTrack {
        let mut t = CompetencyTrack::new(Competency::new(name), Difficulty::Beginner);
        for (correct, credited, points) in answers {
            t.note_presented(*points);
            t.record_answer(*correct, *credited);
        }
        t
    }

    #[test]
    fn banding_thresholds() {
        assert_eq!(ProficiencyLevel::from_score(100.0), ProficiencyLevel::Expert);
        assert_eq!(ProficiencyLevel::from_score(85.0), ProficiencyLevel::Expert);
        assert_eq!(ProficiencyLevel::from_score(84.9), ProficiencyLevel::Advanced);
        assert_eq!(ProficiencyLevel::from_score(70.0), ProficiencyLevel::Advanced);
        assert_eq!(ProficiencyLevel::from_score(50.0), ProficiencyLevel::Intermediate);
        assert_eq!(ProficiencyLevel::from_score(49.9), ProficiencyLevel::Beginner);
        assert_eq!(ProficiencyLevel::from_score(0.0), ProficiencyLevel::Beginner);
    }

    #[test]
    fn each_band_has_a_distinct_recommendation() {
        let all = [
            ProficiencyLevel::Beginner,
            ProficiencyLevel::Intermediate,
            ProficiencyLevel::Advanced,
            ProficiencyLevel::Expert,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.recommendation(), b.recommendation());
            }
        }
    }

    #[test]
    fn overall_excludes_unasked_competencies() {
        let asked = track("javascript", &[(true, 10.0, 10), (true, 10.0, 10)]);
        let idle = track("python", &[]);

        let results = Results::build(SessionId::generate(), [&asked, &idle], Vec::new());

        assert_eq!(results.overall_score, 100.0);
        let idle_report = &results.per_competency[&Competency::new("python")];
        assert_eq!(idle_report.score, 0.0);
        assert_eq!(idle_report.level, ProficiencyLevel::Beginner);
    }

    #[test]
    fn overall_is_mean_of_asked_competencies() {
        let strong = track("javascript", &[(true, 10.0, 10)]);
        let weak = track("python", &[(false, 0.0, 10), (true, 5.0, 10)]);

        let results = Results::build(SessionId::generate(), [&strong, &weak], Vec::new());

        // 100 and 25 -> mean 62.5.
        assert!((results.overall_score - 62.5).abs() < 1e-9);
        assert_eq!(results.total_questions_asked, 3);
        assert_eq!(results.total_correct_answers, 2);
    }

    #[test]
    fn empty_session_yields_zero_overall() {
        let results = Results::build(SessionId::generate(), [], Vec::new());
        assert_eq!(results.overall_score, 0.0);
        assert!(results.per_competency.is_empty());
    }
}
