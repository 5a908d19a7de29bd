mod model;
mod shuffle;
mod store;

pub use model::{OptionLabel, Question};
pub use shuffle::{NoShuffle, RandomShuffler, Shuffler};
pub use store::{CsvQuestionStore, InMemorySource, QuestionSource};
