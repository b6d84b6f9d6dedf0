//! Response and answer models and DTOs.

use canvass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `responses` table: one survey-taking session.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Response {
    pub id: DbId,
    pub survey_id: DbId,
    /// `None` for anonymous respondents.
    pub user_id: Option<String>,
    pub ip_address: String,
    pub user_agent: String,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub is_complete: bool,
}

/// A row from the `answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub response_id: DbId,
    pub question_id: DbId,
    pub answer_text: String,
    pub option_id: Option<DbId>,
    pub rating: Option<i32>,
    pub created_at: Timestamp,
}

/// One submitted answer. Only the field matching the question type is
/// expected to be set.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerInput {
    pub question_id: DbId,
    #[serde(default)]
    pub answer_text: String,
    pub option_id: Option<DbId>,
    pub rating: Option<i32>,
}

/// Who is responding. Filled from the request, not the body.
#[derive(Debug, Clone, Default)]
pub struct RespondentInfo {
    pub user_id: Option<String>,
    pub ip_address: String,
    pub user_agent: String,
}

/// Request body for submitting or completing a response.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub user_id: Option<String>,
    /// When the respondent opened the survey. Clamped to the submission
    /// time; defaults to the submission time when absent.
    pub started_at: Option<Timestamp>,
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

/// Request body for starting a response session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartResponse {
    pub user_id: Option<String>,
}
