// src/services/importer.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::{QuestionCatalog, QuizError};
use crate::{
    models::question::{ImportQuestionRow, NewQuestion, Question, parse_answer_letter},
    store::QuizStore,
    utils::sanitize::clean_text,
};

/// Loads a staff spreadsheet into the catalog in one batch.
#[derive(Clone)]
pub struct QuestionImporter {
    store: Arc<dyn QuizStore>,
    catalog: QuestionCatalog,
}

impl QuestionImporter {
    pub fn new(store: Arc<dyn QuizStore>, catalog: QuestionCatalog) -> Self {
        Self { store, catalog }
    }

    /// Appends `rows` to the end of the catalog, keeping their order.
    ///
    /// Every row is checked before anything is written; a bad answer letter
    /// rejects the whole import.
    pub async fn import(&self, rows: &[ImportQuestionRow]) -> Result<Vec<Question>, QuizError> {
        let latest = self
            .catalog
            .all_ordered()
            .await?
            .last()
            .map(|q| q.created_at);

        let planned = plan_import(rows, latest, Utc::now())?;
        let stored = self.store.insert_questions(planned).await?;

        tracing::info!(count = stored.len(), "questions imported");
        Ok(stored)
    }
}

/// Turns spreadsheet rows into inserts whose timestamps sort after `latest`
/// and after each other, one second apart, so row order is catalog order.
fn plan_import(
    rows: &[ImportQuestionRow],
    latest: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<Vec<NewQuestion>, QuizError> {
    let start = match latest {
        Some(t) if t >= now => t + Duration::seconds(1),
        _ => now,
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let answer1 = parse_answer_letter(&row.answer1, &row.questions1).ok_or_else(|| {
                QuizError::InvalidInput(format!(
                    "Row {}: answer1 '{}' does not name an option",
                    i + 1,
                    row.answer1
                ))
            })?;
            let answer2 = parse_answer_letter(&row.answer2, &row.questions2).ok_or_else(|| {
                QuizError::InvalidInput(format!(
                    "Row {}: answer2 '{}' does not name an option",
                    i + 1,
                    row.answer2
                ))
            })?;

            Ok(NewQuestion {
                work_name: clean_text(&row.work_name),
                ask: clean_text(&row.ask),
                ask2: clean_text(&row.ask2),
                questions1: row.questions1.iter().map(|o| clean_text(o)).collect(),
                questions2: row.questions2.iter().map(|o| clean_text(o)).collect(),
                answer1,
                answer2,
                created_at: Some(start + Duration::seconds(i as i64)),
            })
        })
        .collect()
}
