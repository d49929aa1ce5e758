// src/models/answer.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for submitting the answers to one booth question.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error instead of a body rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(required, length(min = 1, max = 32))]
    pub phone: Option<String>,
    #[serde(alias = "questionId")]
    #[validate(required)]
    pub question_id: Option<i64>,
    #[validate(required)]
    pub answer1: Option<i32>,
    #[validate(required)]
    pub answer2: Option<i32>,
}

/// A submission with every required field present.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub phone: String,
    pub question_id: i64,
    pub answer1: i32,
    pub answer2: i32,
}

impl SubmitAnswerRequest {
    /// Returns `None` when a required field is absent.
    pub fn into_submission(self) -> Option<Submission> {
        Some(Submission {
            name: self.name?.trim().to_string(),
            phone: self.phone?,
            question_id: self.question_id?,
            answer1: self.answer1?,
            answer2: self.answer2?,
        })
    }
}

/// Response body for a submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub correct: bool,
}
