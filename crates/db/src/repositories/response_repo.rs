//! Repository for the `responses` and `answers` tables.

use canvass_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::response::{Answer, AnswerInput, RespondentInfo, Response};

/// Column list for `responses` queries.
const COLUMNS: &str =
    "id, survey_id, user_id, ip_address, user_agent, started_at, completed_at, is_complete";

/// Column list for `answers` queries.
const ANSWER_COLUMNS: &str =
    "id, response_id, question_id, answer_text, option_id, rating, created_at";

/// Provides write and lookup operations for responses and their answers.
pub struct ResponseRepo;

impl ResponseRepo {
    /// Record a finished response and all its answers atomically.
    ///
    /// `started_at` is when the respondent opened the survey, if the client
    /// reported it; it is capped at the current time. Without it the response
    /// starts and completes at the same instant.
    pub async fn submit(
        pool: &PgPool,
        survey_id: DbId,
        respondent: &RespondentInfo,
        started_at: Option<Timestamp>,
        answers: &[AnswerInput],
    ) -> Result<Response, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO responses
                (survey_id, user_id, ip_address, user_agent, started_at, completed_at, is_complete)
             VALUES ($1, $2, $3, $4, LEAST($5, NOW()), NOW(), TRUE)
             RETURNING {COLUMNS}"
        );
        let response = sqlx::query_as::<_, Response>(&query)
            .bind(survey_id)
            .bind(&respondent.user_id)
            .bind(&respondent.ip_address)
            .bind(&respondent.user_agent)
            .bind(started_at)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_answers(&mut tx, response.id, answers).await?;

        tx.commit().await?;
        Ok(response)
    }

    /// Open a response session without answers. It counts as started but
    /// not complete until [`ResponseRepo::complete`] is called.
    pub async fn start(
        pool: &PgPool,
        survey_id: DbId,
        respondent: &RespondentInfo,
    ) -> Result<Response, sqlx::Error> {
        let query = format!(
            "INSERT INTO responses (survey_id, user_id, ip_address, user_agent)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Response>(&query)
            .bind(survey_id)
            .bind(&respondent.user_id)
            .bind(&respondent.ip_address)
            .bind(&respondent.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Finish a started response: store its answers and mark it complete,
    /// in one transaction.
    ///
    /// Returns `None` if the response does not belong to the survey or is
    /// already complete.
    pub async fn complete(
        pool: &PgPool,
        survey_id: DbId,
        id: DbId,
        answers: &[AnswerInput],
    ) -> Result<Option<Response>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE responses SET is_complete = TRUE, completed_at = GREATEST(NOW(), started_at)
             WHERE id = $1 AND survey_id = $2 AND is_complete = FALSE
             RETURNING {COLUMNS}"
        );
        let response = sqlx::query_as::<_, Response>(&query)
            .bind(id)
            .bind(survey_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(response) = response else {
            return Ok(None);
        };

        Self::insert_answers(&mut tx, response.id, answers).await?;

        tx.commit().await?;
        Ok(Some(response))
    }

    /// Find a response of a survey by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        survey_id: DbId,
        id: DbId,
    ) -> Result<Option<Response>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM responses WHERE id = $1 AND survey_id = $2");
        sqlx::query_as::<_, Response>(&query)
            .bind(id)
            .bind(survey_id)
            .fetch_optional(pool)
            .await
    }

    /// List the answers of a response in insertion order.
    pub async fn list_answers(pool: &PgPool, response_id: DbId) -> Result<Vec<Answer>, sqlx::Error> {
        let query = format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE response_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(response_id)
            .fetch_all(pool)
            .await
    }

    /// Insert answers on an open transaction. The schema rejects unknown
    /// questions and options that belong to a different question with a
    /// foreign key violation, which aborts the caller's transaction.
    async fn insert_answers(
        conn: &mut PgConnection,
        response_id: DbId,
        answers: &[AnswerInput],
    ) -> Result<(), sqlx::Error> {
        for answer in answers {
            sqlx::query(
                "INSERT INTO answers (response_id, question_id, answer_text, option_id, rating)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(response_id)
            .bind(answer.question_id)
            .bind(&answer.answer_text)
            .bind(answer.option_id)
            .bind(answer.rating)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}
