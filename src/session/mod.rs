mod performance;
mod record;
mod state;

pub use performance::correct_by_subject;
pub use record::{Session, SessionReport};
pub use state::{Action, Feedback, Phase, QuizMachine, Summary, Transition};
