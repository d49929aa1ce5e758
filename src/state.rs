// src/state.rs

use std::sync::Arc;

use crate::config::Config;
use crate::services::{AnswerRecorder, ProgressEvaluator, QuestionCatalog, QuestionImporter};
use crate::store::QuizStore;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuizStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn QuizStore>, config: Config) -> Self {
        Self { store, config }
    }

    pub fn catalog(&self) -> QuestionCatalog {
        QuestionCatalog::new(self.store.clone())
    }

    pub fn recorder(&self) -> AnswerRecorder {
        AnswerRecorder::new(self.store.clone(), self.catalog())
    }

    pub fn importer(&self) -> QuestionImporter {
        QuestionImporter::new(self.store.clone(), self.catalog())
    }

    pub fn evaluator(&self) -> ProgressEvaluator {
        ProgressEvaluator::new(self.store.clone(), self.catalog())
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
