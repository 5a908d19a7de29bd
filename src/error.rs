use std::path::PathBuf;

use thiserror::Error;

use crate::session::Phase;

/// Failures while loading the question file. The quiz never starts after one of these.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("question file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not read question file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed question data: {0}")]
    Malformed(#[from] csv::Error),

    #[error("line {line}: correct answer must be one of a, b, c, d (found {value:?})")]
    InvalidAnswer { line: u64, value: String },

    #[error("question file has no questions")]
    Empty,
}

/// Text that is not one of the option letters A to D.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not an option label (expected A, B, C or D)")]
pub struct ParseLabelError(pub String);

/// Non-fatal rejection of a submit. The user is re-prompted and nothing changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationWarning {
    #[error("Select an option!")]
    NoSelection,

    #[error("Unknown option {0:?}, choose one of A, B, C, D")]
    UnrecognizedOption(String),
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("action `{action}` is not valid while {phase}")]
    InvalidAction { action: &'static str, phase: Phase },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_name() {
        let err = DataLoadError::MissingColumns(vec!["explicacao".into(), "assunto".into()]);
        assert_eq!(err.to_string(), "missing required columns: explicacao, assunto");
    }

    #[test]
    fn invalid_answer_display() {
        let err = DataLoadError::InvalidAnswer {
            line: 4,
            value: "e".into(),
        };
        assert_eq!(
            err.to_string(),
            "line 4: correct answer must be one of a, b, c, d (found \"e\")"
        );
    }

    #[test]
    fn warning_display() {
        assert_eq!(ValidationWarning::NoSelection.to_string(), "Select an option!");
    }

    #[test]
    fn invalid_action_display() {
        let err = QuizError::InvalidAction {
            action: "advance",
            phase: Phase::InProgress(2),
        };
        assert_eq!(
            err.to_string(),
            "action `advance` is not valid while IN_PROGRESS(3)"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QuizError>();
    }
}
