//! Question and option models and DTOs.

use canvass_core::statistics::{StatsOption, StatsQuestion};
use canvass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A question row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub survey_id: DbId,
    /// Type tag: `text`, `multiple_choice`, `checkbox`, `rating`, or any
    /// other tag stored verbatim.
    pub question_type: String,
    pub question_text: String,
    pub required: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `question_options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionOption {
    pub id: DbId,
    pub question_id: DbId,
    pub option_text: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// A question with its options in display order.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithOptions {
    #[serde(flatten)]
    pub question: Question,
    pub options: Vec<QuestionOption>,
}

impl From<QuestionWithOptions> for StatsQuestion {
    fn from(q: QuestionWithOptions) -> Self {
        Self {
            id: q.question.id,
            question_type: q.question.question_type,
            sort_order: q.question.sort_order,
            options: q
                .options
                .into_iter()
                .map(|o| StatsOption {
                    id: o.id,
                    text: o.option_text,
                    sort_order: o.sort_order,
                })
                .collect(),
        }
    }
}

/// DTO for adding a question to a survey.
///
/// `options` are labels in display order; they get `sort_order` 1..n.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestion {
    pub question_type: String,
    pub question_text: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}
