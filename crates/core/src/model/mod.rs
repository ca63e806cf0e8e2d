mod history;
mod ids;
mod question;
mod track;

pub use history::AnswerRecord;
pub use ids::{Competency, QuestionId, SessionId};
pub use question::{Answer, Difficulty, Question, QuestionError, QuestionKind};
pub use track::{ACCURACY_WINDOW, CompetencyTrack};
