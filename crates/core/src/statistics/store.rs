//! Data-access contract the statistics engine reads through.

use async_trait::async_trait;

use crate::types::DbId;

/// An option as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsOption {
    pub id: DbId,
    pub text: String,
    pub sort_order: i32,
}

/// A question with its options, as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsQuestion {
    pub id: DbId,
    /// Stored type tag, e.g. `"rating"`.
    pub question_type: String,
    pub sort_order: i32,
    pub options: Vec<StatsOption>,
}

/// Read-only queries over stored surveys, responses and answers.
///
/// Every `completed_only` flag restricts the query to answers (or responses)
/// whose response has `is_complete = true`. Implementations must not mutate
/// anything. Errors are returned to the engine caller unchanged.
#[async_trait]
pub trait StatsStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Count responses for a survey.
    async fn count_responses(&self, survey_id: DbId, completed_only: bool)
        -> Result<i64, Self::Error>;

    /// Mean of `completed_at - started_at` in seconds over responses with a
    /// completion timestamp. `None` when there are none.
    async fn average_completion_seconds(&self, survey_id: DbId) -> Result<Option<f64>, Self::Error>;

    /// All questions of a survey, with options, in display order.
    async fn list_questions(&self, survey_id: DbId) -> Result<Vec<StatsQuestion>, Self::Error>;

    /// Count answers targeting a question.
    async fn count_answers_for_question(
        &self,
        question_id: DbId,
        completed_only: bool,
    ) -> Result<i64, Self::Error>;

    /// Count answers selecting an option.
    async fn count_answers_for_option(
        &self,
        option_id: DbId,
        completed_only: bool,
    ) -> Result<i64, Self::Error>;

    /// All non-null ratings submitted for a question.
    async fn list_ratings_for_question(
        &self,
        question_id: DbId,
        completed_only: bool,
    ) -> Result<Vec<i32>, Self::Error>;

    /// Up to `limit` non-empty text answers for a question, newest first.
    async fn list_recent_text_answers(
        &self,
        question_id: DbId,
        completed_only: bool,
        limit: i64,
    ) -> Result<Vec<String>, Self::Error>;
}
