//! Handlers for survey CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use canvass_core::error::CoreError;
use canvass_core::survey::validate_title;
use canvass_core::types::DbId;
use canvass_db::models::survey::{CreateSurvey, Survey, UpdateSurvey};
use canvass_db::repositories::SurveyRepo;
use canvass_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a survey or fail with 404.
pub async fn ensure_survey_exists(pool: &DbPool, id: DbId) -> AppResult<Survey> {
    SurveyRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))
}

/// GET /surveys
///
/// List all surveys, newest first, with their question counts.
pub async fn list_surveys(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let surveys = SurveyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: surveys }))
}

/// POST /surveys
pub async fn create_survey(
    State(state): State<AppState>,
    Json(input): Json<CreateSurvey>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;

    let survey = SurveyRepo::create(&state.pool, &input).await?;

    tracing::info!(survey_id = survey.id, title = %survey.title, "Survey created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: survey })))
}

/// GET /surveys/{id}
///
/// Survey detail with questions in display order and their options.
pub async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = SurveyRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /surveys/{id}
pub async fn update_survey(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSurvey>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }

    let survey = SurveyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))?;

    tracing::info!(survey_id = id, is_active = survey.is_active, "Survey updated");

    Ok(Json(DataResponse { data: survey }))
}

/// DELETE /surveys/{id}
///
/// Removes the survey together with its questions, options, responses and
/// answers in one transaction.
pub async fn delete_survey(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SurveyRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(survey_id = id, "Survey deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))
    }
}
