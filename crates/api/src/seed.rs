//! Sample survey for fresh installations.

use canvass_core::types::DbId;
use canvass_db::models::question::CreateQuestion;
use canvass_db::models::survey::CreateSurvey;
use canvass_db::repositories::{QuestionRepo, SurveyRepo};
use canvass_db::DbPool;

const SAMPLE_TITLE: &str = "Favorite Programming Languages";
const SAMPLE_DESCRIPTION: &str =
    "A survey to find out which programming languages people like the most.";

const SAMPLE_QUESTIONS: [(&str, [&str; 4]); 3] = [
    (
        "What is your favorite systems programming language?",
        ["Rust", "C++", "Go", "C"],
    ),
    (
        "What is your favorite web backend language?",
        ["Go", "Python", "JavaScript/Node.js", "Rust"],
    ),
    (
        "What is your favorite web frontend framework?",
        ["React", "Vue", "Svelte", "HTMX"],
    ),
];

/// Create the sample survey when the database holds no surveys yet.
///
/// Returns the new survey's id, or `None` when surveys already exist.
pub async fn seed_sample_survey(pool: &DbPool) -> Result<Option<DbId>, sqlx::Error> {
    if SurveyRepo::count(pool).await? > 0 {
        return Ok(None);
    }

    let survey = SurveyRepo::create(
        pool,
        &CreateSurvey {
            title: SAMPLE_TITLE.to_string(),
            description: Some(SAMPLE_DESCRIPTION.to_string()),
        },
    )
    .await?;

    for (prompt, options) in SAMPLE_QUESTIONS {
        let input = CreateQuestion {
            question_type: canvass_core::question_type::MULTIPLE_CHOICE.to_string(),
            question_text: prompt.to_string(),
            required: true,
            options: options.iter().map(|o| o.to_string()).collect(),
        };
        QuestionRepo::create(pool, survey.id, &input).await?;
    }

    tracing::info!(
        survey_id = survey.id,
        question_count = SAMPLE_QUESTIONS.len(),
        "Sample survey created"
    );

    Ok(Some(survey.id))
}
