use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::model::{Competency, Difficulty, Question, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Immutable catalog of tagged questions.
///
/// Built once per deployment and shared across sessions; all session state
/// lives outside the bank, so lookups take the caller's set of already-asked
/// ids as a parameter.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_id: HashMap<QuestionId, usize>,
}

impl QuestionBank {
    /// Build a bank from a list of questions.
    ///
    /// # Errors
    ///
    /// Returns `BankError::DuplicateId` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        let mut by_id = HashMap::with_capacity(questions.len());
        for (idx, question) in questions.iter().enumerate() {
            if by_id.insert(question.id().clone(), idx).is_some() {
                return Err(BankError::DuplicateId(question.id().clone()));
            }
        }
        Ok(Self { questions, by_id })
    }

    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.by_id.get(id).map(|idx| &self.questions[*idx])
    }

    /// Questions for the competency at the given tier whose ids are unused.
    #[must_use]
    pub fn eligible(
        &self,
        competency: &Competency,
        difficulty: Difficulty,
        asked: &HashSet<QuestionId>,
    ) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| {
                q.competency() == competency
                    && q.difficulty() == difficulty
                    && !asked.contains(q.id())
            })
            .collect()
    }

    /// True if any unused question remains for the competency at any tier.
    #[must_use]
    pub fn has_unasked(&self, competency: &Competency, asked: &HashSet<QuestionId>) -> bool {
        self.questions
            .iter()
            .any(|q| q.competency() == competency && !asked.contains(q.id()))
    }

    #[must_use]
    pub fn contains_competency(&self, competency: &Competency) -> bool {
        self.questions.iter().any(|q| q.competency() == competency)
    }

    /// Distinct competencies in bank order.
    #[must_use]
    pub fn competencies(&self) -> Vec<Competency> {
        let mut seen = HashSet::new();
        self.questions
            .iter()
            .filter(|q| seen.insert(q.competency().clone()))
            .map(|q| q.competency().clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// A small representative catalog for demos and tests: several
    /// competencies, all three tiers, all three question types.
    ///
    /// # Panics
    ///
    /// Panics only if the static definitions are inconsistent, which a test
    /// guards against.
    #[must_use]
    pub fn sample() -> Self {
        let opts = |xs: &[&str]| xs.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        let questions = vec![
            Question::multiple_choice(
                "js_b_1",
                "javascript",
                Difficulty::Beginner,
                "What is a variable?",
                10,
                opts(&[
                    "A container for storing data",
                    "A function for calculations",
                    "A data type",
                    "A comparison operator",
                ]),
                "A container for storing data",
            ),
            Question::multiple_choice(
                "js_b_2",
                "javascript",
                Difficulty::Beginner,
                "Which operator assigns a value?",
                10,
                opts(&["=", "==", "===", "=>"]),
                "=",
            ),
            Question::multiple_choice(
                "js_b_3",
                "javascript",
                Difficulty::Beginner,
                "How do you print text to the console?",
                10,
                opts(&["console.log()", "print()", "echo()", "alert()"]),
                "console.log()",
            ),
            Question::free_text(
                "js_i_1",
                "javascript",
                Difficulty::Intermediate,
                "What is a closure?",
                20,
                30,
                Some("A function that can access variables of its outer scope".into()),
            ),
            Question::multiple_choice(
                "js_i_2",
                "javascript",
                Difficulty::Intermediate,
                "What does typeof null return?",
                20,
                opts(&["object", "null", "undefined", "number"]),
                "object",
            ),
            Question::free_text(
                "js_e_1",
                "javascript",
                Difficulty::Expert,
                "Explain the event loop",
                30,
                60,
                Some("How asynchronous callbacks get scheduled".into()),
            ),
            Question::multiple_choice(
                "py_b_1",
                "python",
                Difficulty::Beginner,
                "Which type stores a sequence of elements?",
                10,
                opts(&["list", "int", "str", "bool"]),
                "list",
            ),
            Question::multiple_choice(
                "py_b_2",
                "python",
                Difficulty::Beginner,
                "How do you define a function?",
                10,
                opts(&["def f():", "function f():", "fn f():", "func f():"]),
                "def f():",
            ),
            Question::free_text(
                "py_i_1",
                "python",
                Difficulty::Intermediate,
                "What is a list comprehension?",
                20,
                30,
                Some("A compact way to build lists".into()),
            ),
            Question::free_text(
                "py_e_1",
                "python",
                Difficulty::Expert,
                "Explain the GIL",
                30,
                60,
                Some("The synchronization mechanism in CPython".into()),
            ),
            Question::rating(
                "soft_b_1",
                "communication",
                Difficulty::Beginner,
                "Rate your teamwork skills",
                10,
            ),
            Question::free_text(
                "soft_i_1",
                "communication",
                Difficulty::Intermediate,
                "Describe a team conflict you resolved",
                20,
                40,
                Some("Describe your role and the outcome".into()),
            ),
            Question::free_text(
                "soft_e_1",
                "communication",
                Difficulty::Expert,
                "Describe your mentoring experience",
                30,
                40,
                None,
            ),
        ];
        let questions = questions
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .expect("sample bank definitions are valid");
        Self::new(questions).expect("sample bank ids are unique")
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
