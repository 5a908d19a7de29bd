use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLabelError;

pub const DEFAULT_SUBJECT: &str = "General";
pub const DEFAULT_DIFFICULTY: &str = "Medium";

/// One of the four option letters of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    /// Position of the option inside [`Question::options`].
    pub fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionLabel::A => write!(f, "A"),
            OptionLabel::B => write!(f, "B"),
            OptionLabel::C => write!(f, "C"),
            OptionLabel::D => write!(f, "D"),
        }
    }
}

impl FromStr for OptionLabel {
    type Err = ParseLabelError;

    /// Single letter, any case, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(OptionLabel::A),
            "b" => Ok(OptionLabel::B),
            "c" => Ok(OptionLabel::C),
            "d" => Ok(OptionLabel::D),
            _ => Err(ParseLabelError(s.trim().to_string())),
        }
    }
}

/// A quiz item. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: [String; 4],
    pub correct: OptionLabel,
    pub explanation: String,
    pub subject: String,
    pub difficulty: String,
}

impl Question {
    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    /// Labeled options in display order.
    pub fn labeled_options(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        OptionLabel::ALL
            .into_iter()
            .map(move |label| (label, self.option(label)))
    }

    pub fn is_correct(&self, selected: OptionLabel) -> bool {
        self.correct == selected
    }
}
