// src/models/question.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// Represents the 'questions' table in the database.
///
/// Questions are create-only. Their order in the catalog comes from
/// `(created_at, id)` ascending.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// Name of the exhibit (booth) the question belongs to.
    pub work_name: String,

    /// First prompt.
    pub ask: String,

    /// Second prompt.
    pub ask2: String,

    /// Options for the first prompt, stored as a JSON array.
    pub questions1: Json<Vec<String>>,

    /// Options for the second prompt, stored as a JSON array.
    pub questions2: Json<Vec<String>>,

    /// Index of the correct option for the first prompt.
    pub answer1: i32,

    /// Index of the correct option for the second prompt.
    pub answer2: i32,

    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Both parts must match. There is no partial credit.
    pub fn is_correct(&self, answer1: i32, answer2: i32) -> bool {
        self.answer1 == answer1 && self.answer2 == answer2
    }
}

/// Question as returned to participants, positioned in the catalog.
///
/// `answer1`/`answer2` are only present when answer exposure is switched on.
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub ordinal: usize,
    pub work_name: String,
    pub ask: String,
    pub ask2: String,
    pub questions1: Vec<String>,
    pub questions2: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer1: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer2: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl PublicQuestion {
    pub fn from_question(question: Question, ordinal: usize, expose_answers: bool) -> Self {
        Self {
            id: question.id,
            ordinal,
            work_name: question.work_name,
            ask: question.ask,
            ask2: question.ask2,
            questions1: question.questions1.0,
            questions2: question.questions2.0,
            answer1: expose_answers.then_some(question.answer1),
            answer2: expose_answers.then_some(question.answer2),
            created_at: question.created_at,
        }
    }
}

/// Fields needed to insert a question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub work_name: String,
    pub ask: String,
    pub ask2: String,
    pub questions1: Vec<String>,
    pub questions2: Vec<String>,
    pub answer1: i32,
    pub answer2: i32,
    /// Explicit creation time, used when importing a catalog in a fixed order.
    /// Defaults to now.
    pub created_at: Option<DateTime<Utc>>,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 200))]
    pub work_name: String,
    #[validate(length(min = 1, max = 1000))]
    pub ask: String,
    #[validate(length(min = 1, max = 1000))]
    pub ask2: String,
    #[validate(custom(function = validate_options))]
    pub questions1: Vec<String>,
    #[validate(custom(function = validate_options))]
    pub questions2: Vec<String>,
    #[validate(range(min = 0, max = 9))]
    pub answer1: i32,
    #[validate(range(min = 0, max = 9))]
    pub answer2: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateQuestionRequest {
    /// Checks that each answer index points at an existing option.
    pub fn answers_in_range(&self) -> bool {
        let in_range = |answer: i32, options: &[String]| {
            usize::try_from(answer).is_ok_and(|idx| idx < options.len())
        };
        in_range(self.answer1, &self.questions1) && in_range(self.answer2, &self.questions2)
    }
}

/// One row of a staff spreadsheet import.
///
/// Answers are option letters (`A` is the first option) as they appear in the
/// booth spreadsheets.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ImportQuestionRow {
    #[validate(length(min = 1, max = 200))]
    pub work_name: String,
    #[validate(length(min = 1, max = 1000))]
    pub ask: String,
    #[validate(length(min = 1, max = 1000))]
    pub ask2: String,
    #[validate(custom(function = validate_options))]
    pub questions1: Vec<String>,
    #[validate(custom(function = validate_options))]
    pub questions2: Vec<String>,
    #[validate(length(min = 1, max = 8))]
    pub answer1: String,
    #[validate(length(min = 1, max = 8))]
    pub answer2: String,
}

/// DTO for a bulk import. Row order becomes catalog order.
#[derive(Debug, Deserialize, Validate)]
pub struct ImportQuestionsRequest {
    #[validate(length(min = 1, max = 500), nested)]
    pub questions: Vec<ImportQuestionRow>,
}

/// Maps an option letter to its index, case-insensitively.
///
/// Returns `None` unless the letter names one of `options`.
pub fn parse_answer_letter(raw: &str, options: &[String]) -> Option<i32> {
    let mut chars = raw.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !letter.is_ascii_uppercase() {
        return None;
    }
    let index = (letter as u8 - b'A') as usize;
    (index < options.len()).then_some(index as i32)
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    for opt in options {
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

/// Per-booth link printed as a QR code next to each exhibit.
#[derive(Debug, Serialize)]
pub struct BoothLink {
    pub id: i64,
    pub ordinal: usize,
    pub work_name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            id: 7,
            work_name: "Bridge".to_string(),
            ask: "Q1".to_string(),
            ask2: "Q2".to_string(),
            questions1: Json(vec!["A".into(), "B".into()]),
            questions2: Json(vec!["A".into(), "B".into()]),
            answer1: 1,
            answer2: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn correctness_requires_both_parts() {
        let q = sample();
        assert!(q.is_correct(1, 0));
        assert!(!q.is_correct(1, 1));
        assert!(!q.is_correct(0, 0));
    }

    #[test]
    fn public_view_hides_answers_by_default() {
        let view = PublicQuestion::from_question(sample(), 3, false);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["ordinal"], 3);
        assert!(json.get("answer1").is_none());
        assert!(json.get("answer2").is_none());

        let view = PublicQuestion::from_question(sample(), 3, true);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["answer1"], 1);
        assert_eq!(json["answer2"], 0);
    }

    #[test]
    fn answer_index_must_point_at_option() {
        let mut req = CreateQuestionRequest {
            work_name: "Bridge".to_string(),
            ask: "Q1".to_string(),
            ask2: "Q2".to_string(),
            questions1: vec!["A".into(), "B".into()],
            questions2: vec!["A".into()],
            answer1: 1,
            answer2: 0,
            created_at: None,
        };
        assert!(req.answers_in_range());

        req.answer2 = 1;
        assert!(!req.answers_in_range());
    }

    #[test]
    fn answer_letters_map_to_option_indexes() {
        let options: Vec<String> = ["w", "x", "y", "z"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parse_answer_letter("A", &options), Some(0));
        assert_eq!(parse_answer_letter("b", &options), Some(1));
        assert_eq!(parse_answer_letter(" C ", &options), Some(2));
        assert_eq!(parse_answer_letter("D", &options), Some(3));
    }

    #[test]
    fn unknown_answer_letters_are_rejected() {
        let options: Vec<String> = vec!["yes".into(), "no".into()];
        assert_eq!(parse_answer_letter("C", &options), None);
        assert_eq!(parse_answer_letter("", &options), None);
        assert_eq!(parse_answer_letter("AB", &options), None);
        assert_eq!(parse_answer_letter("1", &options), None);
        assert_eq!(parse_answer_letter("甲", &options), None);
    }

    #[test]
    fn import_request_validates_rows() {
        let row = |answer1: &str| ImportQuestionRow {
            work_name: "Bridge".to_string(),
            ask: "Q1".to_string(),
            ask2: "Q2".to_string(),
            questions1: vec!["A".into()],
            questions2: vec!["A".into()],
            answer1: answer1.to_string(),
            answer2: "A".to_string(),
        };
        let ok = ImportQuestionsRequest { questions: vec![row("A")] };
        assert!(ok.validate().is_ok());

        let empty_answer = ImportQuestionsRequest { questions: vec![row("")] };
        assert!(empty_answer.validate().is_err());

        let no_rows = ImportQuestionsRequest { questions: Vec::new() };
        assert!(no_rows.validate().is_err());
    }
}
