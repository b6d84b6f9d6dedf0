//! Repository for the `questions` and `question_options` tables.

use std::collections::HashMap;

use canvass_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question, QuestionOption, QuestionWithOptions};

/// Column list for `questions` queries.
const COLUMNS: &str = "id, survey_id, question_type, question_text, required, sort_order, \
                       created_at, updated_at";

/// Column list for `question_options` queries.
const OPTION_COLUMNS: &str = "id, question_id, option_text, sort_order, created_at";

/// Provides create/list/delete operations for questions and their options.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Append a question (and its options) to a survey.
    ///
    /// The question gets the next display order for the survey: one past the
    /// highest order ever assigned there, so orders stay strictly increasing
    /// and are not reused after a delete. Options get `sort_order` 1..n in the
    /// given order. Everything commits together.
    ///
    /// Returns `None` if the survey does not exist.
    pub async fn create(
        pool: &PgPool,
        survey_id: DbId,
        input: &CreateQuestion,
    ) -> Result<Option<QuestionWithOptions>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Locks the survey row, serializing concurrent appends.
        let sort_order: Option<i32> = sqlx::query_scalar(
            "UPDATE surveys SET question_order_seq = GREATEST(
                 question_order_seq,
                 (SELECT COALESCE(MAX(sort_order), 0) FROM questions WHERE survey_id = $1)
             ) + 1
             WHERE id = $1
             RETURNING question_order_seq",
        )
        .bind(survey_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(sort_order) = sort_order else {
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO questions (survey_id, question_type, question_text, required, sort_order)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, Question>(&query)
            .bind(survey_id)
            .bind(&input.question_type)
            .bind(&input.question_text)
            .bind(input.required)
            .bind(sort_order)
            .fetch_one(&mut *tx)
            .await?;

        let option_query = format!(
            "INSERT INTO question_options (question_id, option_text, sort_order)
             VALUES ($1, $2, $3)
             RETURNING {OPTION_COLUMNS}"
        );
        let mut options = Vec::with_capacity(input.options.len());
        for (i, text) in input.options.iter().enumerate() {
            let option = sqlx::query_as::<_, QuestionOption>(&option_query)
                .bind(question.id)
                .bind(text)
                .bind(i as i32 + 1)
                .fetch_one(&mut *tx)
                .await?;
            options.push(option);
        }

        tx.commit().await?;
        Ok(Some(QuestionWithOptions { question, options }))
    }

    /// Find a question of a survey by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        survey_id: DbId,
        id: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1 AND survey_id = $2");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(survey_id)
            .fetch_optional(pool)
            .await
    }

    /// List a survey's questions in display order, each with its options in
    /// display order.
    pub async fn list_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<QuestionWithOptions>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions WHERE survey_id = $1 ORDER BY sort_order"
        );
        let questions = sqlx::query_as::<_, Question>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = questions.iter().map(|q| q.id).collect();
        let option_query = format!(
            "SELECT {OPTION_COLUMNS} FROM question_options
             WHERE question_id = ANY($1)
             ORDER BY question_id, sort_order, id"
        );
        let options = sqlx::query_as::<_, QuestionOption>(&option_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_question: HashMap<DbId, Vec<QuestionOption>> = HashMap::new();
        for option in options {
            by_question.entry(option.question_id).or_default().push(option);
        }

        Ok(questions
            .into_iter()
            .map(|question| {
                let options = by_question.remove(&question.id).unwrap_or_default();
                QuestionWithOptions { question, options }
            })
            .collect())
    }

    /// Delete a question with its options and answers in one transaction.
    ///
    /// Returns `false` (deleting nothing) if the question does not belong to
    /// the survey. The freed display order is not handed out again.
    pub async fn delete(pool: &PgPool, survey_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let found: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM questions WHERE id = $1 AND survey_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(survey_id)
        .fetch_optional(&mut *tx)
        .await?;

        if found.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM answers WHERE question_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM question_options WHERE question_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
