// src/services/catalog.rs

use std::sync::Arc;

use super::QuizError;
use crate::{models::question::Question, store::QuizStore};

/// Read-only view of the question set in its total order.
#[derive(Clone)]
pub struct QuestionCatalog {
    store: Arc<dyn QuizStore>,
}

impl QuestionCatalog {
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self { store }
    }

    /// Every question, ascending by creation time, ties broken by ID.
    pub async fn all_ordered(&self) -> Result<Vec<Question>, QuizError> {
        let mut questions = self.store.list_questions().await?;
        sort_catalog(&mut questions);
        Ok(questions)
    }

    pub async fn get(&self, id: i64) -> Result<Question, QuizError> {
        self.store
            .get_question(id)
            .await
            .map_err(|e| QuizError::from_store(e, "Question"))
    }

    /// 0-based rank of `id` in the current catalog.
    ///
    /// Recomputed on every call, so an ordinal can move if a question with an
    /// earlier timestamp is inserted later.
    pub async fn ordinal_of(&self, id: i64) -> Result<usize, QuizError> {
        let questions = self.all_ordered().await?;
        position_of(&questions, id)
            .ok_or_else(|| QuizError::NotFound("Question not found".to_string()))
    }

    /// Question and its ordinal resolved against one snapshot of the catalog.
    pub async fn resolve(&self, id: i64) -> Result<(Question, usize), QuizError> {
        let mut questions = self.all_ordered().await?;
        let ordinal = position_of(&questions, id)
            .ok_or_else(|| QuizError::NotFound("Question not found".to_string()))?;
        Ok((questions.swap_remove(ordinal), ordinal))
    }
}

fn sort_catalog(questions: &mut [Question]) {
    questions.sort_by_key(|q| (q.created_at, q.id));
}

fn position_of(questions: &[Question], id: i64) -> Option<usize> {
    questions.iter().position(|q| q.id == id)
}
