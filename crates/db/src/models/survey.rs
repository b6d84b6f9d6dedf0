//! Survey entity model and DTOs.

use canvass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::question::QuestionWithOptions;

/// A survey row from the `surveys` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Survey {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A survey row plus its question count, used by the survey listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SurveySummary {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub question_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A survey with its questions (display order) and their options.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyDetail {
    #[serde(flatten)]
    pub survey: Survey,
    pub questions: Vec<QuestionWithOptions>,
}

/// DTO for creating a new survey. Surveys start active.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSurvey {
    pub title: String,
    pub description: Option<String>,
}

/// DTO for updating an existing survey. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSurvey {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
