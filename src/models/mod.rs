pub mod flashcard;
pub mod scheduler;
pub mod session;

pub use flashcard::{CardId, CardValidationError, Flashcard};
pub use scheduler::{Outcome, is_due, record_outcome, select_due};
pub use session::{QuizFeedback, QuizSession, ReviewSession, StudyCalendar, answers_match};
