use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::record::{AnswerRecord, Session};
use crate::error::{DataLoadError, QuizError, ValidationWarning};
use crate::question::{OptionLabel, QuestionSource, Shuffler};

/// Where a session stands.
///
/// LOGGED_OUT → IN_PROGRESS(0) → ANSWERED(0) → IN_PROGRESS(1) → … → COMPLETED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    LoggedOut,
    InProgress(usize),
    Answered(usize),
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::LoggedOut => write!(f, "LOGGED_OUT"),
            Phase::InProgress(i) => write!(f, "IN_PROGRESS({})", i + 1),
            Phase::Answered(i) => write!(f, "ANSWERED({})", i + 1),
            Phase::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// User actions the front end feeds into the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start { user: String },
    /// `None` when the user submitted without picking an option.
    Submit(Option<String>),
    Advance,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start { .. } => "start",
            Action::Submit(_) => "submit",
            Action::Advance => "advance",
            Action::Reset => "reset",
        }
    }
}

/// What the user sees right after answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub selected: OptionLabel,
    pub expected: OptionLabel,
    pub explanation: String,
    pub score: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
}

/// Observable result of applying an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Started { total: usize },
    /// Submit refused; the session is untouched.
    Rejected(ValidationWarning),
    Answered(Feedback),
    Next(usize),
    Completed(Summary),
    Reset,
}

/// Applies actions to a [`Session`], loading questions from `S` and ordering them with `R`.
pub struct QuizMachine<S, R> {
    source: S,
    shuffler: R,
    default_user: String,
}

impl<S: QuestionSource, R: Shuffler> QuizMachine<S, R> {
    pub fn new(source: S, shuffler: R) -> Self {
        Self {
            source,
            shuffler,
            default_user: "Guest".to_string(),
        }
    }

    /// Name used when `start` receives a blank one.
    pub fn with_default_user(mut self, user: impl Into<String>) -> Self {
        self.default_user = user.into();
        self
    }

    /// Compute and apply the transition for `action` given the session's current phase.
    ///
    /// - `Start` is only accepted while logged out.
    /// - `Submit` is only accepted while a question is open; an empty or unknown
    ///   selection yields [`Transition::Rejected`] and changes nothing.
    /// - `Advance` is only accepted once the open question was answered.
    /// - `Reset` is always accepted.
    ///
    /// Anything else is a [`QuizError::InvalidAction`] and leaves the session as it was.
    pub fn next(&mut self, session: &mut Session, action: Action) -> Result<Transition, QuizError> {
        let phase = session.phase;
        let transition = match (phase, action) {
            (Phase::LoggedOut, Action::Start { user }) => self.start(session, &user)?,
            (Phase::InProgress(i), Action::Submit(selection)) => {
                Self::submit(session, i, selection.as_deref())
            }
            (Phase::Answered(i), Action::Advance) => Self::advance(session, i),
            (_, Action::Reset) => {
                *session = Session::new();
                Transition::Reset
            }
            (phase, action) => {
                return Err(QuizError::InvalidAction {
                    action: action.name(),
                    phase,
                });
            }
        };

        if session.phase != phase {
            debug!(from = %phase, to = %session.phase, "phase changed");
        }
        Ok(transition)
    }

    fn start(&mut self, session: &mut Session, user: &str) -> Result<Transition, QuizError> {
        let mut questions = self.source.load()?;
        if questions.is_empty() {
            return Err(DataLoadError::Empty.into());
        }
        self.shuffler.shuffle(&mut questions);

        let user = user.trim();
        *session = Session {
            id: Uuid::new_v4().to_string(),
            user: if user.is_empty() {
                self.default_user.clone()
            } else {
                user.to_string()
            },
            questions,
            phase: Phase::InProgress(0),
            score: 0,
            history: Vec::new(),
            started_at: Utc::now(),
        };

        info!(session = %session.id, user = %session.user, total = session.total(), "session started");
        Ok(Transition::Started {
            total: session.total(),
        })
    }

    fn submit(session: &mut Session, index: usize, selection: Option<&str>) -> Transition {
        let raw = match selection.map(str::trim) {
            None | Some("") => return Transition::Rejected(ValidationWarning::NoSelection),
            Some(raw) => raw,
        };
        let Ok(selected) = raw.parse::<OptionLabel>() else {
            return Transition::Rejected(ValidationWarning::UnrecognizedOption(raw.to_string()));
        };

        let question = &session.questions[index];
        let correct = question.is_correct(selected);
        let feedback = Feedback {
            correct,
            selected,
            expected: question.correct,
            explanation: question.explanation.clone(),
            score: session.score + usize::from(correct),
        };
        session.history.push(AnswerRecord {
            question: question.text.clone(),
            correct,
            answered_at: Utc::now(),
            subject: question.subject.clone(),
            selected,
            expected: question.correct,
        });
        session.score = feedback.score;
        session.phase = Phase::Answered(index);

        debug!(index, %selected, correct, score = session.score, "answer recorded");
        Transition::Answered(feedback)
    }

    fn advance(session: &mut Session, index: usize) -> Transition {
        if index + 1 < session.questions.len() {
            session.phase = Phase::InProgress(index + 1);
            Transition::Next(index + 1)
        } else {
            session.phase = Phase::Completed;
            let summary = Summary {
                score: session.score,
                total: session.questions.len(),
            };
            info!(session = %session.id, score = summary.score, total = summary.total, "session completed");
            Transition::Completed(summary)
        }
    }
}
