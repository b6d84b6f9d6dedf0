//! Aggregate records produced by the statistics engine, plus the pure
//! arithmetic that builds them.
//!
//! Everything here is plain data: the records serialize straight to JSON and
//! the helpers take already-fetched numbers, so they can be tested without a
//! store.

use serde::Serialize;

use crate::types::DbId;

use super::store::StatsOption;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Survey-level completion metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyStats {
    pub survey_id: DbId,
    /// Number of completed responses.
    pub total_responses: i64,
    /// Completed responses as a percentage of all started responses.
    pub completion_rate: f64,
    /// Mean completion time in seconds over completed responses, `0` if none.
    pub average_time_seconds: f64,
}

/// Statistics for one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionStats {
    pub question_id: DbId,
    /// The stored type tag, verbatim (may be an unrecognized tag).
    pub question_type: String,
    /// Answers to this question from completed responses.
    pub response_count: i64,
    pub breakdown: QuestionBreakdown,
}

/// Type-specific statistics attached to a question.
///
/// `None` covers both unrecognized question types and rating questions that
/// have not received a rating yet; `question_type` tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum QuestionBreakdown {
    OptionStats(Vec<OptionStat>),
    RatingStats(RatingStats),
    TextAnswers(Vec<String>),
    None,
}

impl QuestionBreakdown {
    pub fn option_stats(&self) -> Option<&[OptionStat]> {
        match self {
            Self::OptionStats(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn rating_stats(&self) -> Option<&RatingStats> {
        match self {
            Self::RatingStats(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn text_answers(&self) -> Option<&[String]> {
        match self {
            Self::TextAnswers(answers) => Some(answers),
            _ => None,
        }
    }
}

/// Vote count and share for one option of a choice question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionStat {
    pub option_id: DbId,
    pub option_text: String,
    pub count: i64,
    pub percentage: f64,
}

/// Summary of the ratings submitted for a rating question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStats {
    pub average: f64,
    pub min: i32,
    pub max: i32,
    pub count: i64,
}

/// Survey-level and per-question statistics together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyReport {
    pub survey: SurveyStats,
    pub questions: Vec<QuestionStats>,
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// Completed responses as a percentage of started ones. `0.0` when nothing
/// has been started.
pub fn completion_rate(completed: i64, started: i64) -> f64 {
    if started <= 0 {
        return 0.0;
    }
    completed as f64 / started as f64 * 100.0
}

/// Pair each option with its count and compute its share of the total.
///
/// `options` and `counts` are parallel slices. When the total is zero every
/// option gets a percentage of `0.0`.
pub fn build_option_stats(options: &[StatsOption], counts: &[i64]) -> Vec<OptionStat> {
    let total: i64 = counts.iter().sum();

    options
        .iter()
        .zip(counts)
        .map(|(option, &count)| OptionStat {
            option_id: option.id,
            option_text: option.text.clone(),
            count,
            percentage: if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Summarize a set of ratings. Returns `None` for an empty set.
pub fn summarize_ratings(ratings: &[i32]) -> Option<RatingStats> {
    let (&first, rest) = ratings.split_first()?;

    let (sum, min, max) = rest.iter().fold(
        (i64::from(first), first, first),
        |(sum, min, max), &r| (sum + i64::from(r), min.min(r), max.max(r)),
    );

    Some(RatingStats {
        average: sum as f64 / ratings.len() as f64,
        min,
        max,
        count: ratings.len() as i64,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
