//! Repository for the `surveys` table.

use canvass_core::types::DbId;
use sqlx::PgPool;

use crate::models::survey::{CreateSurvey, Survey, SurveyDetail, SurveySummary, UpdateSurvey};
use crate::repositories::QuestionRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, is_active, created_at, updated_at";

/// Provides CRUD operations for surveys.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert a new survey, returning the created row. Surveys start active.
    pub async fn create(pool: &PgPool, input: &CreateSurvey) -> Result<Survey, sqlx::Error> {
        let query = format!(
            "INSERT INTO surveys (title, description)
             VALUES ($1, COALESCE($2, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a survey by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a survey together with its questions and options.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<SurveyDetail>, sqlx::Error> {
        let Some(survey) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let questions = QuestionRepo::list_by_survey(pool, id).await?;
        Ok(Some(SurveyDetail { survey, questions }))
    }

    /// List all surveys, most recently created first, with question counts.
    pub async fn list(pool: &PgPool) -> Result<Vec<SurveySummary>, sqlx::Error> {
        sqlx::query_as::<_, SurveySummary>(
            "SELECT s.id, s.title, s.description, s.is_active,
                    COUNT(q.id) AS question_count,
                    s.created_at, s.updated_at
             FROM surveys s
             LEFT JOIN questions q ON q.survey_id = s.id
             GROUP BY s.id
             ORDER BY s.created_at DESC, s.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Total number of surveys.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM surveys")
            .fetch_one(pool)
            .await
    }

    /// Update a survey. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSurvey,
    ) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!(
            "UPDATE surveys SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a survey and everything hanging off it.
    ///
    /// Runs in one transaction, children before parents: answers, responses,
    /// options, questions, then the survey. If any statement fails the
    /// transaction is dropped uncommitted and nothing is deleted. Returns
    /// `true` if the survey existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let answers = sqlx::query(
            "DELETE FROM answers
             WHERE response_id IN (SELECT id FROM responses WHERE survey_id = $1)
                OR question_id IN (SELECT id FROM questions WHERE survey_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let responses = sqlx::query("DELETE FROM responses WHERE survey_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM question_options
             WHERE question_id IN (SELECT id FROM questions WHERE survey_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let questions = sqlx::query("DELETE FROM questions WHERE survey_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let survey = sqlx::query("DELETE FROM surveys WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = survey.rows_affected() > 0;
        if deleted {
            tracing::info!(
                survey_id = id,
                answers = answers.rows_affected(),
                responses = responses.rows_affected(),
                questions = questions.rows_affected(),
                "Deleted survey"
            );
        }
        Ok(deleted)
    }
}
