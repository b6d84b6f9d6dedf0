//! Survey and question input validation.
//!
//! Called by the API layer before anything is written. Answer values are not
//! checked against question types here; submission trusts the client form.

use crate::error::CoreError;
use crate::question_type::QuestionType;

/// Maximum length of a survey title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a question prompt, in characters.
pub const MAX_PROMPT_LEN: usize = 1000;

/// Maximum number of options on a single question.
pub const MAX_OPTIONS: usize = 50;

/// Validate a survey title: non-blank and at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title is required".to_string()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate a new question.
///
/// Unrecognized type tags are accepted and stored verbatim. Choice types
/// (`multiple_choice`, `checkbox`) need at least one option, and every option
/// label must be non-blank.
pub fn validate_question(type_tag: &str, prompt: &str, options: &[String]) -> Result<(), CoreError> {
    if type_tag.trim().is_empty() {
        return Err(CoreError::Validation("question type is required".to_string()));
    }
    if prompt.trim().is_empty() {
        return Err(CoreError::Validation("question text is required".to_string()));
    }
    let len = prompt.chars().count();
    if len > MAX_PROMPT_LEN {
        return Err(CoreError::Validation(format!(
            "question text must be at most {MAX_PROMPT_LEN} characters, got {len}"
        )));
    }

    let needs_options = QuestionType::from_tag(type_tag).is_some_and(|t| t.uses_options());
    if needs_options && options.is_empty() {
        return Err(CoreError::Validation(format!(
            "{type_tag} questions need at least one option"
        )));
    }
    if options.len() > MAX_OPTIONS {
        return Err(CoreError::Validation(format!(
            "at most {MAX_OPTIONS} options are allowed, got {}",
            options.len()
        )));
    }
    if let Some(pos) = options.iter().position(|o| o.trim().is_empty()) {
        return Err(CoreError::Validation(format!(
            "option {} must not be blank",
            pos + 1
        )));
    }
    Ok(())
}
