// src/services/mod.rs

use thiserror::Error;

use crate::store::StoreError;

pub mod catalog;
pub mod importer;
pub mod progress;
pub mod recorder;

pub use catalog::QuestionCatalog;
pub use importer::QuestionImporter;
pub use progress::{PassRule, ProgressEvaluator};
pub use recorder::AnswerRecorder;

/// Errors raised by the quiz services.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    /// Storage failures pass through unmodified.
    #[error(transparent)]
    Storage(StoreError),
}

impl QuizError {
    /// Maps a store error, turning `NotFound` into a message about `what`.
    pub fn from_store(err: StoreError, what: &str) -> Self {
        match err {
            StoreError::NotFound => QuizError::NotFound(format!("{what} not found")),
            other => QuizError::Storage(other),
        }
    }
}

impl From<StoreError> for QuizError {
    fn from(err: StoreError) -> Self {
        QuizError::Storage(err)
    }
}
