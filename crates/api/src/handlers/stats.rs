use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use canvass_core::types::DbId;

use crate::error::AppResult;
use crate::handlers::survey::ensure_survey_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /surveys/{id}/stats
///
/// Survey-level aggregates plus a breakdown per question. The engine treats
/// an unknown survey as empty, so existence is checked here first.
pub async fn get_survey_stats(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_survey_exists(&state.pool, survey_id).await?;

    let report = state.stats.survey_report(survey_id).await?;

    Ok(Json(DataResponse { data: report }))
}
