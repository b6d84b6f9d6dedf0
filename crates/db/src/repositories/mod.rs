//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod question_repo;
pub mod response_repo;
pub mod stats_repo;
pub mod survey_repo;

pub use question_repo::QuestionRepo;
pub use response_repo::ResponseRepo;
pub use stats_repo::StatsRepo;
pub use survey_repo::SurveyRepo;
