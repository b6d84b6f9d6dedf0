//! Postgres-backed [`StatsStore`].

use async_trait::async_trait;
use canvass_core::statistics::{StatsQuestion, StatsStore};
use canvass_core::types::DbId;

use crate::repositories::{QuestionRepo, StatsRepo};
use crate::DbPool;

/// Serves the statistics engine's queries from the connection pool.
#[derive(Debug, Clone)]
pub struct PgStatsStore {
    pool: DbPool,
}

impl PgStatsStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsStore for PgStatsStore {
    type Error = sqlx::Error;

    async fn count_responses(&self, survey_id: DbId, completed_only: bool) -> Result<i64, sqlx::Error> {
        StatsRepo::count_responses(&self.pool, survey_id, completed_only).await
    }

    async fn average_completion_seconds(&self, survey_id: DbId) -> Result<Option<f64>, sqlx::Error> {
        StatsRepo::average_completion_seconds(&self.pool, survey_id).await
    }

    async fn list_questions(&self, survey_id: DbId) -> Result<Vec<StatsQuestion>, sqlx::Error> {
        let questions = QuestionRepo::list_by_survey(&self.pool, survey_id).await?;
        Ok(questions.into_iter().map(StatsQuestion::from).collect())
    }

    async fn count_answers_for_question(
        &self,
        question_id: DbId,
        completed_only: bool,
    ) -> Result<i64, sqlx::Error> {
        StatsRepo::count_answers_for_question(&self.pool, question_id, completed_only).await
    }

    async fn count_answers_for_option(
        &self,
        option_id: DbId,
        completed_only: bool,
    ) -> Result<i64, sqlx::Error> {
        StatsRepo::count_answers_for_option(&self.pool, option_id, completed_only).await
    }

    async fn list_ratings_for_question(
        &self,
        question_id: DbId,
        completed_only: bool,
    ) -> Result<Vec<i32>, sqlx::Error> {
        StatsRepo::list_ratings_for_question(&self.pool, question_id, completed_only).await
    }

    async fn list_recent_text_answers(
        &self,
        question_id: DbId,
        completed_only: bool,
        limit: i64,
    ) -> Result<Vec<String>, sqlx::Error> {
        StatsRepo::list_recent_text_answers(&self.pool, question_id, completed_only, limit).await
    }
}
