//! Route definitions for surveys and everything scoped under a survey.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{question, response, stats, survey};
use crate::state::AppState;

/// Routes mounted at `/surveys`.
///
/// ```text
/// GET    /                                      list_surveys
/// POST   /                                      create_survey
/// GET    /{id}                                  get_survey
/// PUT    /{id}                                  update_survey
/// DELETE /{id}                                  delete_survey
/// POST   /{id}/questions                        create_question
/// DELETE /{id}/questions/{question_id}          delete_question
/// POST   /{id}/responses                        submit_response
/// POST   /{id}/responses/start                  start_response
/// GET    /{id}/responses/{response_id}          get_response
/// POST   /{id}/responses/{response_id}/complete complete_response
/// GET    /{id}/stats                            get_survey_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(survey::list_surveys).post(survey::create_survey))
        .route(
            "/{id}",
            get(survey::get_survey)
                .put(survey::update_survey)
                .delete(survey::delete_survey),
        )
        .route("/{id}/questions", post(question::create_question))
        .route(
            "/{id}/questions/{question_id}",
            delete(question::delete_question),
        )
        .route("/{id}/responses", post(response::submit_response))
        .route("/{id}/responses/start", post(response::start_response))
        .route(
            "/{id}/responses/{response_id}",
            get(response::get_response),
        )
        .route(
            "/{id}/responses/{response_id}/complete",
            post(response::complete_response),
        )
        .route("/{id}/stats", get(stats::get_survey_stats))
}
