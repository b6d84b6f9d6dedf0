//! In-memory [`StatsStore`] used by the engine tests.

use async_trait::async_trait;

use crate::types::DbId;

use super::store::{StatsOption, StatsQuestion, StatsStore};

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("fixture store failure in {0}")]
pub struct FixtureError(pub &'static str);

#[derive(Debug)]
struct FixtureResponse {
    id: DbId,
    survey_id: DbId,
    started_at: i64,
    completed_at: Option<i64>,
    is_complete: bool,
}

#[derive(Debug)]
struct FixtureAnswer {
    response_id: DbId,
    question_id: DbId,
    text: String,
    option_id: Option<DbId>,
    rating: Option<i32>,
    created_at: i64,
}

/// Rows kept in plain vectors; timestamps are seconds since an arbitrary epoch.
#[derive(Debug, Default)]
pub struct FixtureStore {
    questions: Vec<(DbId, StatsQuestion)>,
    responses: Vec<FixtureResponse>,
    answers: Vec<FixtureAnswer>,
    next_id: DbId,
    reversed_listing: bool,
    fail_on: Option<&'static str>,
}

impl FixtureStore {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    /// Add a question with the given options; returns the question id.
    pub fn question(&mut self, survey_id: DbId, question_type: &str, options: &[&str]) -> DbId {
        let id = self.next_id();
        let sort_order = self.questions.iter().filter(|(s, _)| *s == survey_id).count() as i32 + 1;
        let options = options
            .iter()
            .enumerate()
            .map(|(i, text)| StatsOption {
                id: self.next_id(),
                text: text.to_string(),
                sort_order: i as i32 + 1,
            })
            .collect();
        self.questions.push((
            survey_id,
            StatsQuestion {
                id,
                question_type: question_type.to_string(),
                sort_order,
                options,
            },
        ));
        id
    }

    pub fn option_id(&self, question_id: DbId, index: usize) -> DbId {
        self.questions
            .iter()
            .find(|(_, q)| q.id == question_id)
            .map(|(_, q)| q.options[index].id)
            .expect("unknown question")
    }

    pub fn complete_response(&mut self, survey_id: DbId, started_at: i64, completed_at: i64) -> DbId {
        let id = self.next_id();
        self.responses.push(FixtureResponse {
            id,
            survey_id,
            started_at,
            completed_at: Some(completed_at),
            is_complete: true,
        });
        id
    }

    pub fn started_response(&mut self, survey_id: DbId, started_at: i64) -> DbId {
        let id = self.next_id();
        self.responses.push(FixtureResponse {
            id,
            survey_id,
            started_at,
            completed_at: None,
            is_complete: false,
        });
        id
    }

    fn answer(&mut self, response_id: DbId, question_id: DbId) -> &mut FixtureAnswer {
        self.answers.push(FixtureAnswer {
            response_id,
            question_id,
            text: String::new(),
            option_id: None,
            rating: None,
            created_at: 0,
        });
        self.answers.last_mut().expect("just pushed")
    }

    pub fn choice_answer(&mut self, response_id: DbId, question_id: DbId, option_id: DbId) {
        self.answer(response_id, question_id).option_id = Some(option_id);
    }

    pub fn rating_answer(&mut self, response_id: DbId, question_id: DbId, rating: i32) {
        self.answer(response_id, question_id).rating = Some(rating);
    }

    pub fn text_answer(&mut self, response_id: DbId, question_id: DbId, text: &str, created_at: i64) {
        let answer = self.answer(response_id, question_id);
        answer.text = text.to_string();
        answer.created_at = created_at;
    }

    /// Hand questions back in reverse display order, to check the engine sorts.
    pub fn reverse_question_listing(&mut self) {
        self.reversed_listing = true;
    }

    /// Make the named query fail.
    pub fn failing_on(mut self, query: &'static str) -> Self {
        self.fail_on = Some(query);
        self
    }

    fn check(&self, query: &'static str) -> Result<(), FixtureError> {
        match self.fail_on {
            Some(q) if q == query => Err(FixtureError(query)),
            _ => Ok(()),
        }
    }

    fn response_complete(&self, response_id: DbId) -> bool {
        self.responses
            .iter()
            .any(|r| r.id == response_id && r.is_complete)
    }

    fn qualifying_answers(
        &self,
        completed_only: bool,
    ) -> impl Iterator<Item = &FixtureAnswer> + '_ {
        self.answers
            .iter()
            .filter(move |a| !completed_only || self.response_complete(a.response_id))
    }
}

#[async_trait]
impl StatsStore for FixtureStore {
    type Error = FixtureError;

    async fn count_responses(&self, survey_id: DbId, completed_only: bool) -> Result<i64, FixtureError> {
        self.check("count_responses")?;
        Ok(self
            .responses
            .iter()
            .filter(|r| r.survey_id == survey_id && (!completed_only || r.is_complete))
            .count() as i64)
    }

    async fn average_completion_seconds(&self, survey_id: DbId) -> Result<Option<f64>, FixtureError> {
        self.check("average_completion_seconds")?;
        let durations: Vec<i64> = self
            .responses
            .iter()
            .filter(|r| r.survey_id == survey_id)
            .filter_map(|r| r.completed_at.map(|c| c - r.started_at))
            .collect();
        if durations.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            durations.iter().sum::<i64>() as f64 / durations.len() as f64,
        ))
    }

    async fn list_questions(&self, survey_id: DbId) -> Result<Vec<StatsQuestion>, FixtureError> {
        self.check("list_questions")?;
        let mut questions: Vec<StatsQuestion> = self
            .questions
            .iter()
            .filter(|(s, _)| *s == survey_id)
            .map(|(_, q)| q.clone())
            .collect();
        if self.reversed_listing {
            questions.reverse();
        }
        Ok(questions)
    }

    async fn count_answers_for_question(
        &self,
        question_id: DbId,
        completed_only: bool,
    ) -> Result<i64, FixtureError> {
        self.check("count_answers_for_question")?;
        Ok(self
            .qualifying_answers(completed_only)
            .filter(|a| a.question_id == question_id)
            .count() as i64)
    }

    async fn count_answers_for_option(
        &self,
        option_id: DbId,
        completed_only: bool,
    ) -> Result<i64, FixtureError> {
        self.check("count_answers_for_option")?;
        Ok(self
            .qualifying_answers(completed_only)
            .filter(|a| a.option_id == Some(option_id))
            .count() as i64)
    }

    async fn list_ratings_for_question(
        &self,
        question_id: DbId,
        completed_only: bool,
    ) -> Result<Vec<i32>, FixtureError> {
        self.check("list_ratings_for_question")?;
        Ok(self
            .qualifying_answers(completed_only)
            .filter(|a| a.question_id == question_id)
            .filter_map(|a| a.rating)
            .collect())
    }

    async fn list_recent_text_answers(
        &self,
        question_id: DbId,
        completed_only: bool,
        limit: i64,
    ) -> Result<Vec<String>, FixtureError> {
        self.check("list_recent_text_answers")?;
        let mut answers: Vec<&FixtureAnswer> = self
            .qualifying_answers(completed_only)
            .filter(|a| a.question_id == question_id && !a.text.is_empty())
            .collect();
        answers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(answers
            .into_iter()
            .take(limit as usize)
            .map(|a| a.text.clone())
            .collect())
    }
}
