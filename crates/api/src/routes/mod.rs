pub mod health;
pub mod survey;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /surveys                                         list, create
/// /surveys/{id}                                    get, update, delete
/// /surveys/{id}/questions                          add question (POST)
/// /surveys/{id}/questions/{question_id}            delete question
/// /surveys/{id}/responses                          submit completed response (POST)
/// /surveys/{id}/responses/start                    start a session (POST)
/// /surveys/{id}/responses/{response_id}            get response with answers
/// /surveys/{id}/responses/{response_id}/complete   complete a session (POST)
/// /surveys/{id}/stats                              survey and question statistics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/surveys", survey::router())
}
