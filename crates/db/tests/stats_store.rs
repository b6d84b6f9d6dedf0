//! Statistics engine running against Postgres through `PgStatsStore`.

use canvass_core::statistics::{QuestionBreakdown, StatsEngine, StatsStore};
use canvass_db::models::question::{CreateQuestion, QuestionWithOptions};
use canvass_db::models::response::{AnswerInput, RespondentInfo};
use canvass_db::models::survey::CreateSurvey;
use canvass_db::repositories::{QuestionRepo, ResponseRepo, SurveyRepo};
use canvass_db::PgStatsStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn survey(pool: &PgPool) -> i64 {
    SurveyRepo::create(
        pool,
        &CreateSurvey {
            title: "Stats".to_string(),
            description: Some("fixture".to_string()),
        },
    )
    .await
    .unwrap()
    .id
}

async fn question(pool: &PgPool, survey_id: i64, kind: &str, options: &[&str]) -> QuestionWithOptions {
    QuestionRepo::create(
        pool,
        survey_id,
        &CreateQuestion {
            question_type: kind.to_string(),
            question_text: format!("{kind} question"),
            required: true,
            options: options.iter().map(|s| s.to_string()).collect(),
        },
    )
    .await
    .unwrap()
    .unwrap()
}

fn respondent() -> RespondentInfo {
    RespondentInfo {
        user_id: None,
        ip_address: "10.0.0.1".to_string(),
        user_agent: "stats-test".to_string(),
    }
}

fn answer(question_id: i64) -> AnswerInput {
    AnswerInput {
        question_id,
        answer_text: String::new(),
        option_id: None,
        rating: None,
    }
}

async fn submit(pool: &PgPool, survey_id: i64, answers: Vec<AnswerInput>) {
    ResponseRepo::submit(pool, survey_id, &respondent(), None, &answers)
        .await
        .unwrap();
}

fn engine(pool: &PgPool) -> StatsEngine<PgStatsStore> {
    StatsEngine::new(PgStatsStore::new(pool.clone()))
}

// ---------------------------------------------------------------------------
// Survey level
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completion_rate_three_of_five(pool: PgPool) {
    let s = survey(&pool).await;
    for _ in 0..3 {
        submit(&pool, s, vec![]).await;
    }
    for _ in 0..2 {
        ResponseRepo::start(&pool, s, &respondent()).await.unwrap();
    }

    let stats = engine(&pool).survey_stats(s).await.unwrap();

    assert_eq!(stats.total_responses, 3);
    assert!((stats.completion_rate - 60.0).abs() < 1e-9);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_survey_stats_are_zero(pool: PgPool) {
    let s = survey(&pool).await;

    let stats = engine(&pool).survey_stats(s).await.unwrap();

    assert_eq!(stats.total_responses, 0);
    assert_eq!(stats.completion_rate, 0.0);
    assert_eq!(stats.average_time_seconds, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_survey_yields_zero_counts(pool: PgPool) {
    let stats = engine(&pool).survey_stats(424_242).await.unwrap();
    assert_eq!(stats.survey_id, 424_242);
    assert_eq!(stats.total_responses, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_average_completion_time(pool: PgPool) {
    let s = survey(&pool).await;
    sqlx::query(
        "INSERT INTO responses (survey_id, started_at, completed_at, is_complete) VALUES
            ($1, NOW() - INTERVAL '90 seconds', NOW(), TRUE),
            ($1, NOW() - INTERVAL '30 seconds', NOW(), TRUE),
            ($1, NOW() - INTERVAL '500 seconds', NULL, FALSE)",
    )
    .bind(s)
    .execute(&pool)
    .await
    .unwrap();

    let average = PgStatsStore::new(pool.clone())
        .average_completion_seconds(s)
        .await
        .unwrap()
        .unwrap();

    assert!((average - 60.0).abs() < 1e-6, "average was {average}");
}

// ---------------------------------------------------------------------------
// Question level
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_option_counts_and_percentages(pool: PgPool) {
    let s = survey(&pool).await;
    let q = question(&pool, s, "multiple_choice", &["A", "B"]).await;
    let (a, b) = (q.options[0].id, q.options[1].id);
    for option_id in [a, a, a, b] {
        let mut ans = answer(q.question.id);
        ans.option_id = Some(option_id);
        submit(&pool, s, vec![ans]).await;
    }

    let stats = engine(&pool).question_stats(s).await.unwrap();
    let options = stats[0].breakdown.option_stats().unwrap();

    assert_eq!(stats[0].response_count, 4);
    assert_eq!((options[0].option_text.as_str(), options[0].count), ("A", 3));
    assert!((options[0].percentage - 75.0).abs() < 1e-9);
    assert_eq!((options[1].option_text.as_str(), options[1].count), ("B", 1));
    assert!((options[1].percentage - 25.0).abs() < 1e-9);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_summary_and_absence(pool: PgPool) {
    let s = survey(&pool).await;
    let rated = question(&pool, s, "rating", &[]).await;
    let unrated = question(&pool, s, "rating", &[]).await;
    for rating in [4, 5, 3] {
        let mut ans = answer(rated.question.id);
        ans.rating = Some(rating);
        submit(&pool, s, vec![ans]).await;
    }

    let stats = engine(&pool).question_stats(s).await.unwrap();

    let summary = stats[0].breakdown.rating_stats().unwrap();
    assert_eq!(summary.average, 4.0);
    assert_eq!((summary.min, summary.max, summary.count), (3, 5, 3));

    assert_eq!(stats[1].question_id, unrated.question.id);
    assert_eq!(stats[1].breakdown, QuestionBreakdown::None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_text_samples_newest_ten(pool: PgPool) {
    let s = survey(&pool).await;
    let q = question(&pool, s, "text", &[]).await;
    for i in 0..15 {
        let mut ans = answer(q.question.id);
        ans.answer_text = format!("answer {i}");
        submit(&pool, s, vec![ans]).await;
    }

    let stats = engine(&pool).question_stats(s).await.unwrap();
    let texts = stats[0].breakdown.text_answers().unwrap();

    let expected: Vec<String> = (5..15).rev().map(|i| format!("answer {i}")).collect();
    assert_eq!(texts, expected.as_slice());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unfinished_responses_are_excluded(pool: PgPool) {
    let s = survey(&pool).await;
    let q = question(&pool, s, "text", &[]).await;
    let started = ResponseRepo::start(&pool, s, &respondent()).await.unwrap();
    sqlx::query("INSERT INTO answers (response_id, question_id, answer_text) VALUES ($1, $2, 'draft')")
        .bind(started.id)
        .bind(q.question.id)
        .execute(&pool)
        .await
        .unwrap();

    let stats = engine(&pool).question_stats(s).await.unwrap();

    assert_eq!(stats[0].response_count, 0);
    assert_eq!(stats[0].breakdown, QuestionBreakdown::TextAnswers(vec![]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_questions_reported_in_display_order(pool: PgPool) {
    let s = survey(&pool).await;
    let first = question(&pool, s, "checkbox", &["x", "y"]).await;
    let second = question(&pool, s, "matrix", &[]).await;
    let third = question(&pool, s, "text", &[]).await;

    let stats = engine(&pool).question_stats(s).await.unwrap();
    let ids: Vec<i64> = stats.iter().map(|q| q.question_id).collect();

    assert_eq!(ids, vec![first.question.id, second.question.id, third.question.id]);
    assert_eq!(stats[1].question_type, "matrix");
    assert_eq!(stats[1].breakdown, QuestionBreakdown::None);
}
