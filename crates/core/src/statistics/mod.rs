//! Statistics aggregation engine.
//!
//! [`StatsEngine`] turns a survey's stored responses and answers into
//! [`SurveyStats`] and per-question [`QuestionStats`]. It is stateless and
//! read-only: every call issues a fixed set of queries against its
//! [`StatsStore`] and combines the results in memory. Only completed
//! responses feed the numbers.
//!
//! Per-question work fans out concurrently; the output always follows the
//! questions' display order. Any failed query aborts the whole computation
//! and the store error is returned unchanged.

mod store;
mod summary;

#[cfg(test)]
mod fixture;

use futures::future::try_join_all;

use crate::question_type::QuestionType;
use crate::types::DbId;

pub use store::{StatsOption, StatsQuestion, StatsStore};
pub use summary::{
    build_option_stats, completion_rate, summarize_ratings, OptionStat, QuestionBreakdown,
    QuestionStats, RatingStats, SurveyReport, SurveyStats,
};

/// Number of recent text answers sampled per text question.
pub const DEFAULT_TEXT_SAMPLE_LIMIT: i64 = 10;

/// Computes survey and question statistics from a [`StatsStore`].
#[derive(Debug, Clone)]
pub struct StatsEngine<S> {
    store: S,
    text_sample_limit: i64,
}

impl<S: StatsStore> StatsEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            text_sample_limit: DEFAULT_TEXT_SAMPLE_LIMIT,
        }
    }

    /// Override how many text answers are sampled per text question.
    /// Values below 1 are raised to 1.
    pub fn with_text_sample_limit(mut self, limit: i64) -> Self {
        self.text_sample_limit = limit.max(1);
        self
    }

    pub fn text_sample_limit(&self) -> i64 {
        self.text_sample_limit
    }

    /// Survey-level completion metrics.
    ///
    /// An unknown survey id yields zero counts rather than an error; callers
    /// check existence first.
    pub async fn survey_stats(&self, survey_id: DbId) -> Result<SurveyStats, S::Error> {
        let (total_responses, total_started, average) = futures::try_join!(
            self.store.count_responses(survey_id, true),
            self.store.count_responses(survey_id, false),
            self.store.average_completion_seconds(survey_id),
        )?;

        Ok(SurveyStats {
            survey_id,
            total_responses,
            completion_rate: completion_rate(total_responses, total_started),
            average_time_seconds: average.unwrap_or(0.0),
        })
    }

    /// Statistics for every question of a survey, in display order.
    pub async fn question_stats(&self, survey_id: DbId) -> Result<Vec<QuestionStats>, S::Error> {
        let mut questions = self.store.list_questions(survey_id).await?;
        questions.sort_by_key(|q| q.sort_order);

        let stats = try_join_all(questions.iter().map(|q| self.stats_for_question(q))).await?;

        tracing::debug!(survey_id, question_count = stats.len(), "Computed question statistics");
        Ok(stats)
    }

    /// Survey-level and per-question statistics in one call.
    pub async fn survey_report(&self, survey_id: DbId) -> Result<SurveyReport, S::Error> {
        let (survey, questions) =
            futures::try_join!(self.survey_stats(survey_id), self.question_stats(survey_id))?;
        Ok(SurveyReport { survey, questions })
    }

    async fn stats_for_question(&self, question: &StatsQuestion) -> Result<QuestionStats, S::Error> {
        let (response_count, breakdown) = futures::try_join!(
            self.store.count_answers_for_question(question.id, true),
            self.breakdown_for(question),
        )?;

        Ok(QuestionStats {
            question_id: question.id,
            question_type: question.question_type.clone(),
            response_count,
            breakdown,
        })
    }

    async fn breakdown_for(&self, question: &StatsQuestion) -> Result<QuestionBreakdown, S::Error> {
        let Some(question_type) = QuestionType::from_tag(&question.question_type) else {
            return Ok(QuestionBreakdown::None);
        };

        let breakdown = match question_type {
            QuestionType::MultipleChoice | QuestionType::Checkbox => {
                QuestionBreakdown::OptionStats(self.option_stats(question).await?)
            }
            QuestionType::Rating => {
                let ratings = self
                    .store
                    .list_ratings_for_question(question.id, true)
                    .await?;
                match summarize_ratings(&ratings) {
                    Some(stats) => QuestionBreakdown::RatingStats(stats),
                    None => QuestionBreakdown::None,
                }
            }
            QuestionType::Text => {
                let mut answers = self
                    .store
                    .list_recent_text_answers(question.id, true, self.text_sample_limit)
                    .await?;
                answers.truncate(self.text_sample_limit as usize);
                QuestionBreakdown::TextAnswers(answers)
            }
        };
        Ok(breakdown)
    }

    async fn option_stats(&self, question: &StatsQuestion) -> Result<Vec<OptionStat>, S::Error> {
        let mut options = question.options.clone();
        options.sort_by_key(|o| o.sort_order);

        let counts = try_join_all(
            options
                .iter()
                .map(|o| self.store.count_answers_for_option(o.id, true)),
        )
        .await?;

        Ok(build_option_stats(&options, &counts))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
