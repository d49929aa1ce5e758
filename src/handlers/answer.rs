// src/handlers/answer.rs

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::answer::{SubmitAnswerRequest, SubmitAnswerResponse},
    services::QuizError,
    state::AppState,
};

/// Records a participant's answers to one booth question.
///
/// * Creates the participant on first use of the phone number.
/// * Responds with whether both answers were right.
pub async fn submit_answer(
    State(state): State<AppState>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let submission = payload.into_submission().ok_or_else(|| {
        AppError::BadRequest("name, phone, question_id, answer1 and answer2 are required".to_string())
    })?;

    let correct = state
        .recorder()
        .record(&submission)
        .await
        .map_err(|e| {
            if let QuizError::Storage(ref inner) = e {
                tracing::error!("Failed to record answer: {:?}", inner);
            }
            AppError::from(e)
        })?;

    Ok(Json(SubmitAnswerResponse { correct }))
}
