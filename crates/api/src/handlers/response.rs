//! Handlers for collecting survey responses.
//!
//! Two flows are supported: a one-shot submit that records a completed
//! response with all answers, and a start/complete pair for clients that
//! open a session when the respondent begins the survey.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use canvass_core::error::CoreError;
use canvass_core::types::DbId;
use canvass_db::models::response::{
    Answer, RespondentInfo, Response, StartResponse, SubmitResponse,
};
use canvass_db::repositories::ResponseRepo;
use canvass_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::survey::ensure_survey_exists;
use crate::middleware::client_info::ClientInfo;
use crate::response::DataResponse;
use crate::state::AppState;

/// A response together with its answers.
#[derive(Debug, Serialize)]
pub struct ResponseWithAnswers {
    #[serde(flatten)]
    pub response: Response,
    pub answers: Vec<Answer>,
}

/// Fail with 404 for unknown surveys and 409 for surveys that no longer
/// accept responses.
async fn ensure_survey_accepts_responses(pool: &DbPool, survey_id: DbId) -> AppResult<()> {
    let survey = ensure_survey_exists(pool, survey_id).await?;
    if !survey.is_active {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Survey {survey_id} is not accepting responses"
        ))));
    }
    Ok(())
}

fn respondent(user_id: Option<String>, client: ClientInfo) -> RespondentInfo {
    RespondentInfo {
        user_id,
        ip_address: client.ip_address,
        user_agent: client.user_agent,
    }
}

async fn load_answers(pool: &DbPool, response: Response) -> AppResult<ResponseWithAnswers> {
    let answers = ResponseRepo::list_answers(pool, response.id).await?;
    Ok(ResponseWithAnswers { response, answers })
}

/// POST /surveys/{id}/responses
///
/// Record a completed response and all of its answers atomically.
pub async fn submit_response(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    client: ClientInfo,
    Json(input): Json<SubmitResponse>,
) -> AppResult<impl IntoResponse> {
    ensure_survey_accepts_responses(&state.pool, survey_id).await?;

    let respondent = respondent(input.user_id, client);
    let response = ResponseRepo::submit(
        &state.pool,
        survey_id,
        &respondent,
        input.started_at,
        &input.answers,
    )
    .await?;

    tracing::info!(
        survey_id,
        response_id = response.id,
        answer_count = input.answers.len(),
        "Response submitted"
    );

    let data = load_answers(&state.pool, response).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// POST /surveys/{id}/responses/start
///
/// Open a response session. It counts towards started responses until it is
/// completed.
pub async fn start_response(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    client: ClientInfo,
    input: Option<Json<StartResponse>>,
) -> AppResult<impl IntoResponse> {
    ensure_survey_accepts_responses(&state.pool, survey_id).await?;

    let user_id = input.and_then(|Json(body)| body.user_id);
    let response =
        ResponseRepo::start(&state.pool, survey_id, &respondent(user_id, client)).await?;

    tracing::info!(survey_id, response_id = response.id, "Response started");

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /surveys/{id}/responses/{response_id}/complete
///
/// Attach the final answers to a started session and mark it complete.
pub async fn complete_response(
    State(state): State<AppState>,
    Path((survey_id, response_id)): Path<(DbId, DbId)>,
    Json(input): Json<SubmitResponse>,
) -> AppResult<impl IntoResponse> {
    let existing = ResponseRepo::find_by_id(&state.pool, survey_id, response_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Response",
            id: response_id,
        }))?;
    if existing.is_complete {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Response {response_id} is already complete"
        ))));
    }

    // A concurrent completion can win between the check and the update.
    let response = ResponseRepo::complete(&state.pool, survey_id, response_id, &input.answers)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Response {response_id} is already complete"
            )))
        })?;

    tracing::info!(
        survey_id,
        response_id,
        answer_count = input.answers.len(),
        "Response completed"
    );

    let data = load_answers(&state.pool, response).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /surveys/{id}/responses/{response_id}
pub async fn get_response(
    State(state): State<AppState>,
    Path((survey_id, response_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let response = ResponseRepo::find_by_id(&state.pool, survey_id, response_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Response",
            id: response_id,
        }))?;

    let data = load_answers(&state.pool, response).await?;
    Ok(Json(DataResponse { data }))
}
