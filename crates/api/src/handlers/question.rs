//! Handlers for adding and removing survey questions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use canvass_core::error::CoreError;
use canvass_core::survey::validate_question;
use canvass_core::types::DbId;
use canvass_db::models::question::CreateQuestion;
use canvass_db::repositories::QuestionRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /surveys/{id}/questions
///
/// Appends a question after the survey's current last question. Options are
/// numbered in the order given.
pub async fn create_question(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Json(input): Json<CreateQuestion>,
) -> AppResult<impl IntoResponse> {
    validate_question(&input.question_type, &input.question_text, &input.options)?;

    let created = QuestionRepo::create(&state.pool, survey_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))?;

    tracing::info!(
        survey_id,
        question_id = created.question.id,
        question_type = %created.question.question_type,
        sort_order = created.question.sort_order,
        option_count = created.options.len(),
        "Question created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// DELETE /surveys/{id}/questions/{question_id}
///
/// Removes the question, its options and every answer given to it. The
/// positions of the remaining questions are left untouched.
pub async fn delete_question(
    State(state): State<AppState>,
    Path((survey_id, question_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = QuestionRepo::delete(&state.pool, survey_id, question_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }));
    }

    tracing::info!(survey_id, question_id, "Question deleted");

    Ok(StatusCode::NO_CONTENT)
}
