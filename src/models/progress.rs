// src/models/progress.rs

use serde::{Deserialize, Serialize};

use crate::models::{answer_log::AnswerSlot, participant::ParticipantSummary};

/// One catalog question paired with the participant's outcome.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionProgress {
    pub ordinal: usize,
    pub question_id: i64,
    pub work_name: String,
    pub ask: String,
    pub ask2: String,
    pub status: AnswerSlot,
    pub correct: bool,
}

/// Derived progress for a participant. Never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub participant: ParticipantSummary,
    pub questions: Vec<QuestionProgress>,
    pub correct_count: usize,
    pub total_questions: usize,
    pub passed: bool,
}

/// How a phone number in a progress query is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    Exact,
    #[default]
    Suffix,
}

impl MatchMode {
    /// Case-insensitive `exact`/`suffix`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(MatchMode::Exact),
            "suffix" => Some(MatchMode::Suffix),
            _ => None,
        }
    }
}

/// Query parameters for the progress endpoint.
///
/// `match` and `rule` stay raw strings so an unknown value is reported through
/// the JSON error envelope instead of a query rejection.
#[derive(Debug, Deserialize)]
pub struct ProgressParams {
    pub phone: Option<String>,
    #[serde(rename = "match")]
    pub match_mode: Option<String>,
    pub rule: Option<String>,
}
