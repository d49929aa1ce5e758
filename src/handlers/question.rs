// src/handlers/question.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, models::question::PublicQuestion, state::AppState};

/// Lists every question in catalog order, with its ordinal.
pub async fn list_questions(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let questions = state.catalog().all_ordered().await.map_err(|e| {
        tracing::error!("Failed to list questions: {:?}", e);
        AppError::from(e)
    })?;

    let expose = state.config.expose_answers;
    let view: Vec<PublicQuestion> = questions
        .into_iter()
        .enumerate()
        .map(|(ordinal, q)| PublicQuestion::from_question(q, ordinal, expose))
        .collect();

    Ok(Json(view))
}

/// Retrieves a single question by ID.
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let (question, ordinal) = state.catalog().resolve(id).await?;

    Ok(Json(PublicQuestion::from_question(
        question,
        ordinal,
        state.config.expose_answers,
    )))
}
