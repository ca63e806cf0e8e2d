use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use assess_core::Clock;
use assess_core::adapt::{self, ForcedEscalation};
use assess_core::bank::QuestionBank;
use assess_core::evaluate::{Evaluation, evaluate};
use assess_core::model::{
    Answer, AnswerRecord, Competency, CompetencyTrack, Question, QuestionId, SessionId,
};
use assess_core::report::Results;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::progress::Progress;
use crate::rotation::RotationQueue;
use crate::selection::{SelectionPolicy, UniformRandom};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One test-taker's adaptive assessment run.
///
/// Owns all mutable state between `select_competencies` and `finalize`:
/// the rotation queue, the per-competency tracks, the asked/answered id
/// sets, and the audit history. The question bank is shared and immutable.
///
/// Multi-user deployments create one `AssessmentSession` per concurrent
/// test-taker; nothing here is global.
pub struct AssessmentSession {
    bank: Arc<QuestionBank>,
    config: SessionConfig,
    clock: Clock,
    policy: Box<dyn SelectionPolicy>,

    id: SessionId,
    selected: Vec<Competency>,
    tracks: BTreeMap<Competency, CompetencyTrack>,
    rotation: RotationQueue,
    asked: HashSet<QuestionId>,
    answered: HashSet<QuestionId>,
    question_index: u32,
    history: Vec<AnswerRecord>,
}

impl AssessmentSession {
    /// Create a session over the given bank with default config, the system
    /// clock, and uniform-random question selection.
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            config: SessionConfig::default(),
            clock: Clock::default(),
            policy: Box::new(UniformRandom),
            id: SessionId::generate(),
            selected: Vec::new(),
            tracks: BTreeMap::new(),
            rotation: RotationQueue::new(),
            asked: HashSet::new(),
            answered: HashSet::new(),
            question_index: 0,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the selection policy, e.g. with a deterministic one in tests.
    #[must_use]
    pub fn with_policy(mut self, policy: impl SelectionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    //
    // ─── INBOUND API ───────────────────────────────────────────────────────────
    //

    /// Set the competencies under assessment. Must be called before the
    /// first `next_question`; order is kept, duplicates are dropped.
    ///
    /// # Errors
    ///
    /// - `NoCompetenciesSelected` for an empty selection
    /// - `UnknownCompetency` if the bank has no questions for an entry
    /// - `AlreadyStarted` once questions were issued; `reset` first
    pub fn select_competencies<I, C>(&mut self, competencies: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Competency>,
    {
        if self.question_index > 0 {
            return Err(SessionError::AlreadyStarted);
        }

        let mut ordered = Vec::new();
        let mut seen = HashSet::new();
        for competency in competencies {
            let competency = competency.into();
            if !self.bank.contains_competency(&competency) {
                return Err(SessionError::UnknownCompetency(competency));
            }
            if seen.insert(competency.clone()) {
                ordered.push(competency);
            }
        }
        if ordered.is_empty() {
            return Err(SessionError::NoCompetenciesSelected);
        }

        self.tracks = ordered
            .iter()
            .map(|c| {
                (
                    c.clone(),
                    CompetencyTrack::new(c.clone(), self.config.initial_difficulty()),
                )
            })
            .collect();
        self.rotation.fill(ordered.iter().cloned());
        self.selected = ordered;
        Ok(())
    }

    /// Pick the next question, round-robin across active competencies at
    /// each one's current tier.
    ///
    /// `Ok(None)` is the terminal signal: the cap was reached or every
    /// selected competency is exhausted. When a competency has no unused
    /// question at its current tier but still has some at other tiers, its
    /// tier is force-escalated and selection retried before moving on; when
    /// nothing at all remains for it, it is completed and permanently
    /// removed from the rotation. The search gives up after
    /// `2 x |selected|` rotation attempts.
    ///
    /// # Errors
    ///
    /// Returns `NoCompetenciesSelected` before any selection was made.
    pub fn next_question(&mut self) -> Result<Option<Question>, SessionError> {
        if self.selected.is_empty() {
            return Err(SessionError::NoCompetenciesSelected);
        }
        if self.question_index >= self.config.max_questions() {
            return Ok(None);
        }

        let mut attempts = 2 * self.selected.len();
        while attempts > 0 {
            let Some(competency) = self.rotation.take_turn() else {
                return Ok(None);
            };
            attempts -= 1;

            let Some(track) = self.tracks.get_mut(&competency) else {
                continue;
            };

            loop {
                let candidates =
                    self.bank
                        .eligible(&competency, track.difficulty(), &self.asked);
                if !candidates.is_empty() {
                    let picked = candidates[self.policy.pick(candidates.len())].clone();
                    self.asked.insert(picked.id().clone());
                    track.note_presented(picked.points());
                    self.question_index += 1;
                    self.rotation.requeue(competency);
                    return Ok(Some(picked));
                }

                if self.bank.has_unasked(&competency, &self.asked) {
                    match adapt::force_escalate(track) {
                        // Retry the same competency at the new tier.
                        ForcedEscalation::Advanced(_) => {}
                        ForcedEscalation::Exhausted => break,
                    }
                } else {
                    track.mark_completed();
                    break;
                }
            }
            // Completed competency: not requeued, the rotation moves on.
        }
        Ok(None)
    }

    /// Score an answer, update the owning track, and re-adapt its tier.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` if the id was never issued in this session or
    ///   was already scored; no state changes in that case
    /// - `Evaluate` for shape mismatches or out-of-range ratings, likewise
    ///   without mutation
    pub fn submit_answer(
        &mut self,
        question_id: &QuestionId,
        answer: Answer,
    ) -> Result<Evaluation, SessionError> {
        if self.selected.is_empty() {
            return Err(SessionError::NoCompetenciesSelected);
        }
        if !self.asked.contains(question_id) || self.answered.contains(question_id) {
            return Err(SessionError::QuestionNotFound(question_id.clone()));
        }
        let question = self
            .bank
            .get(question_id)
            .ok_or_else(|| SessionError::QuestionNotFound(question_id.clone()))?;

        let evaluation = evaluate(question, &answer)?;

        let competency = question.competency().clone();
        let track = self
            .tracks
            .get_mut(&competency)
            .ok_or_else(|| SessionError::QuestionNotFound(question_id.clone()))?;
        track.record_answer(evaluation.is_correct, evaluation.credited_points);
        adapt::adapt(track);

        self.answered.insert(question_id.clone());
        self.history.push(AnswerRecord::new(
            question_id.clone(),
            competency,
            answer,
            evaluation.is_correct,
            evaluation.credited_points,
            self.clock.now(),
        ));
        Ok(evaluation)
    }

    /// Progress toward the configured question cap.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.question_index, self.config.max_questions())
    }

    /// Build the normalized final report.
    #[must_use]
    pub fn finalize(&self) -> Results {
        Results::build(self.id, self.tracks.values(), self.history.clone())
    }

    /// Discard all session state and start over with a fresh session id.
    ///
    /// The bank, config, clock, and selection policy are kept; a new
    /// `select_competencies` call is required before the next question.
    pub fn reset(&mut self) {
        self.id = SessionId::generate();
        self.selected.clear();
        self.tracks.clear();
        self.rotation.clear();
        self.asked.clear();
        self.answered.clear();
        self.question_index = 0;
        self.history.clear();
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn selected_competencies(&self) -> &[Competency] {
        &self.selected
    }

    /// Per-competency tracking records, for stats views.
    #[must_use]
    pub fn tracks(&self) -> &BTreeMap<Competency, CompetencyTrack> {
        &self.tracks
    }

    #[must_use]
    pub fn track(&self, competency: &Competency) -> Option<&CompetencyTrack> {
        self.tracks.get(competency)
    }

    /// Append-only audit log of scored answers.
    #[must_use]
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    #[must_use]
    pub fn questions_issued(&self) -> u32 {
        self.question_index
    }
}

impl fmt::Debug for AssessmentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("id", &self.id)
            .field("selected", &self.selected)
            .field("question_index", &self.question_index)
            .field("asked_len", &self.asked.len())
            .field("answered_len", &self.answered.len())
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
