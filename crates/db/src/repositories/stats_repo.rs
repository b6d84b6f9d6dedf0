//! Read-only aggregate queries behind the statistics engine.
//!
//! Every `completed_only` flag restricts the query to rows whose response
//! has `is_complete = TRUE`.

use canvass_core::types::DbId;
use sqlx::PgPool;

/// Provides the counting and sampling queries used for survey statistics.
pub struct StatsRepo;

impl StatsRepo {
    /// Count a survey's responses.
    pub async fn count_responses(
        pool: &PgPool,
        survey_id: DbId,
        completed_only: bool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM responses
             WHERE survey_id = $1 AND (NOT $2 OR is_complete)",
        )
        .bind(survey_id)
        .bind(completed_only)
        .fetch_one(pool)
        .await
    }

    /// Mean completion time in seconds over responses that have a
    /// completion timestamp. `None` when there are none.
    pub async fn average_completion_seconds(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT AVG(EXTRACT(EPOCH FROM (completed_at - started_at)))::FLOAT8
             FROM responses
             WHERE survey_id = $1 AND completed_at IS NOT NULL",
        )
        .bind(survey_id)
        .fetch_one(pool)
        .await
    }

    /// Count answers to a question.
    pub async fn count_answers_for_question(
        pool: &PgPool,
        question_id: DbId,
        completed_only: bool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM answers a
             JOIN responses r ON r.id = a.response_id
             WHERE a.question_id = $1 AND (NOT $2 OR r.is_complete)",
        )
        .bind(question_id)
        .bind(completed_only)
        .fetch_one(pool)
        .await
    }

    /// Count answers selecting an option.
    pub async fn count_answers_for_option(
        pool: &PgPool,
        option_id: DbId,
        completed_only: bool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM answers a
             JOIN responses r ON r.id = a.response_id
             WHERE a.option_id = $1 AND (NOT $2 OR r.is_complete)",
        )
        .bind(option_id)
        .bind(completed_only)
        .fetch_one(pool)
        .await
    }

    /// All non-null ratings given to a question.
    pub async fn list_ratings_for_question(
        pool: &PgPool,
        question_id: DbId,
        completed_only: bool,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT a.rating FROM answers a
             JOIN responses r ON r.id = a.response_id
             WHERE a.question_id = $1 AND a.rating IS NOT NULL AND (NOT $2 OR r.is_complete)
             ORDER BY a.id",
        )
        .bind(question_id)
        .bind(completed_only)
        .fetch_all(pool)
        .await
    }

    /// Up to `limit` non-empty text answers to a question, newest first.
    /// Answers created in the same instant fall back to insertion order,
    /// newest first.
    pub async fn list_recent_text_answers(
        pool: &PgPool,
        question_id: DbId,
        completed_only: bool,
        limit: i64,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT a.answer_text FROM answers a
             JOIN responses r ON r.id = a.response_id
             WHERE a.question_id = $1 AND a.answer_text <> '' AND (NOT $2 OR r.is_complete)
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $3",
        )
        .bind(question_id)
        .bind(completed_only)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
