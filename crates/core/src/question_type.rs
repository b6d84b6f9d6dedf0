//! Question type tags.
//!
//! Questions store their type as a free-form text tag. The four tags below
//! are the ones the statistics engine knows how to summarize; any other tag
//! is stored as-is and simply produces no type-specific statistics.

use serde::{Deserialize, Serialize};

/// Free-text answer.
pub const TEXT: &str = "text";

/// Single selection from a list of options.
pub const MULTIPLE_CHOICE: &str = "multiple_choice";

/// Multiple selections from a list of options.
pub const CHECKBOX: &str = "checkbox";

/// Integer rating.
pub const RATING: &str = "rating";

/// A recognized question type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    MultipleChoice,
    Checkbox,
    Rating,
}

impl QuestionType {
    /// Parse a stored type tag. Returns `None` for unrecognized tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            TEXT => Some(Self::Text),
            MULTIPLE_CHOICE => Some(Self::MultipleChoice),
            CHECKBOX => Some(Self::Checkbox),
            RATING => Some(Self::Rating),
            _ => None,
        }
    }

    /// Return the stored tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => TEXT,
            Self::MultipleChoice => MULTIPLE_CHOICE,
            Self::Checkbox => CHECKBOX,
            Self::Rating => RATING,
        }
    }

    /// Whether answers to this type select one of the question's options.
    pub fn uses_options(&self) -> bool {
        matches!(self, Self::MultipleChoice | Self::Checkbox)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
