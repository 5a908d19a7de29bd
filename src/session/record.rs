use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::performance::correct_by_subject;
use super::state::Phase;
use crate::question::{OptionLabel, Question};

/// Log entry appended once per answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub correct: bool,
    pub answered_at: DateTime<Utc>,
    pub subject: String,
    pub selected: OptionLabel,
    pub expected: OptionLabel,
}

/// Mutable state of one run through the quiz.
///
/// Only [`QuizMachine`](super::QuizMachine) mutates it; everything else reads.
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) id: String,
    pub(super) user: String,
    pub(super) questions: Vec<Question>,
    pub(super) phase: Phase,
    pub(super) score: usize,
    pub(super) history: Vec<AnswerRecord>,
    pub(super) started_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh, logged-out session.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user: String::new(),
            questions: Vec::new(),
            phase: Phase::LoggedOut,
            score: 0,
            history: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// Index of the question on screen, if a quiz is running.
    pub fn index(&self) -> Option<usize> {
        match self.phase {
            Phase::InProgress(i) | Phase::Answered(i) => Some(i),
            Phase::LoggedOut | Phase::Completed => None,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.phase, Phase::Answered(_))
    }

    pub fn current(&self) -> Option<&Question> {
        self.index().and_then(|i| self.questions.get(i))
    }

    pub fn is_last(&self) -> bool {
        self.index().is_some_and(|i| i + 1 == self.questions.len())
    }
}

/// Structured summary of a finished (or abandoned) session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: String,
    pub user: String,
    pub phase: Phase,
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub correct_by_subject: BTreeMap<String, usize>,
    pub history: Vec<AnswerRecord>,
}

impl SessionReport {
    pub fn from_session(session: &Session) -> Self {
        let now = Utc::now();
        let duration = now - session.started_at;

        Self {
            session_id: session.id.clone(),
            user: session.user.clone(),
            phase: session.phase,
            score: session.score,
            total: session.questions.len(),
            answered: session.history.len(),
            started_at: session.started_at,
            finished_at: now,
            duration_ms: duration.num_milliseconds(),
            correct_by_subject: correct_by_subject(&session.history),
            history: session.history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_logged_out_and_empty() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::LoggedOut);
        assert_eq!(session.score(), 0);
        assert_eq!(session.total(), 0);
        assert!(session.history().is_empty());
        assert!(session.current().is_none());
        assert!(!session.is_answered());
        assert!(!session.is_last());
    }

    #[test]
    fn sessions_get_distinct_ids() {
        assert_ne!(Session::new().id(), Session::new().id());
    }

    #[test]
    fn report_from_empty_session() {
        let session = Session::new();
        let report = SessionReport::from_session(&session);
        assert_eq!(report.session_id, session.id());
        assert_eq!(report.score, 0);
        assert_eq!(report.total, 0);
        assert!(report.correct_by_subject.is_empty());
        assert!(report.duration_ms >= 0);
    }

    #[test]
    fn report_serializes_to_json() {
        let mut session = Session::new();
        session.user = "Ana".into();
        session.history.push(AnswerRecord {
            question: "2 + 2?".into(),
            correct: true,
            answered_at: Utc::now(),
            subject: "Math".into(),
            selected: OptionLabel::C,
            expected: OptionLabel::C,
        });
        session.score = 1;

        let json = serde_json::to_string(&SessionReport::from_session(&session)).unwrap();
        let back: SessionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user, "Ana");
        assert_eq!(back.answered, 1);
        assert_eq!(back.correct_by_subject.get("Math"), Some(&1));
        assert_eq!(back.history[0].selected, OptionLabel::C);
    }
}
