use db::models::problem::ProblemKind;
use db::models::{problem, problem_option};
use serde_json::Value;

use super::submission::{AnswerItem, SubmitError};

/// Canonical comparison form for free-input answers.
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Text form of a submitted free-input value. Non-string scalars compare by
/// their JSON rendering, so a bare `12` matches a stored `"12"`.
fn submitted_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Grades one answer against its problem.
///
/// Pure over already-fetched rows: `options` must hold exactly the option
/// rows of `problem`. Shape mismatches between the answer and the problem
/// variant fail with `SubmitError::Validation`.
pub fn grade(
    problem: &problem::Model,
    options: &[problem_option::Model],
    answer: &AnswerItem,
) -> Result<bool, SubmitError> {
    match problem.kind {
        ProblemKind::Mcq => {
            let option_id = answer.option_id.ok_or_else(|| {
                SubmitError::Validation(format!(
                    "option_id is required for mcq problem {}",
                    problem.id
                ))
            })?;
            let option = options.iter().find(|o| o.id == option_id).ok_or_else(|| {
                SubmitError::Validation(format!(
                    "option_id {} invalid for problem {}",
                    option_id, problem.id
                ))
            })?;
            Ok(option.is_correct)
        }
        ProblemKind::Input => {
            let value = answer.value.as_ref().ok_or_else(|| {
                SubmitError::Validation(format!(
                    "value is required for input problem {}",
                    problem.id
                ))
            })?;
            let expected = problem.answer_text.as_deref().unwrap_or("");
            Ok(normalize(&submitted_text(value)) == normalize(expected))
        }
    }
}
