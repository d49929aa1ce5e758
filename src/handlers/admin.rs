// src/handlers/admin.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        participant::{ParticipantSummary, UpdateReceivedRequest},
        question::{
            BoothLink, CreateQuestionRequest, ImportQuestionsRequest, NewQuestion, PublicQuestion,
        },
    },
    state::AppState,
    store::StoreError,
    utils::{
        hash::verify_password,
        jwt::{ADMIN_ROLE, Claims, sign_jwt},
        sanitize::clean_text,
    },
};

/// DTO for staff login.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Authenticates booth staff against the configured admin credentials.
/// Returns a bearer token for the admin routes.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let config = &state.config;
    let (Some(username), Some(password_hash)) =
        (&config.admin_username, &config.admin_password_hash)
    else {
        return Err(AppError::AuthError("Admin login is disabled".to_string()));
    };

    if &payload.username != username || !verify_password(&payload.password, password_hash)? {
        tracing::warn!("Rejected admin login for '{}'", payload.username);
        return Err(AppError::AuthError("Invalid credentials".to_string()));
    }

    let token = sign_jwt(username, ADMIN_ROLE, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
    })))
}

/// Creates a new question.
/// Admin only.
pub async fn create_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if !payload.answers_in_range() {
        return Err(AppError::BadRequest(
            "answer1/answer2 must index an existing option".to_string(),
        ));
    }

    let new_question = NewQuestion {
        work_name: clean_text(&payload.work_name),
        ask: clean_text(&payload.ask),
        ask2: clean_text(&payload.ask2),
        questions1: payload.questions1.iter().map(|o| clean_text(o)).collect(),
        questions2: payload.questions2.iter().map(|o| clean_text(o)).collect(),
        answer1: payload.answer1,
        answer2: payload.answer2,
        created_at: payload.created_at,
    };

    let question = state.store.insert_question(new_question).await.map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::from(e)
    })?;
    let ordinal = state.catalog().ordinal_of(question.id).await?;

    tracing::info!(
        question_id = question.id,
        ordinal,
        admin = %claims.sub,
        "question created"
    );

    Ok((
        StatusCode::CREATED,
        Json(PublicQuestion::from_question(question, ordinal, true)),
    ))
}

/// Appends a spreadsheet's worth of questions to the catalog.
/// Admin only.
pub async fn import_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ImportQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let imported = state.importer().import(&payload.questions).await?;
    let catalog = state.catalog().all_ordered().await?;

    let view: Vec<PublicQuestion> = imported
        .into_iter()
        .filter_map(|q| {
            let ordinal = catalog.iter().position(|c| c.id == q.id)?;
            Some(PublicQuestion::from_question(q, ordinal, true))
        })
        .collect();

    tracing::info!(count = view.len(), admin = %claims.sub, "question import finished");

    Ok((StatusCode::CREATED, Json(view)))
}

/// Lists every question with its answers.
/// Admin only.
pub async fn list_questions(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let questions = state.catalog().all_ordered().await?;

    let view: Vec<PublicQuestion> = questions
        .into_iter()
        .enumerate()
        .map(|(ordinal, q)| PublicQuestion::from_question(q, ordinal, true))
        .collect();

    Ok(Json(view))
}

/// Builds the per-booth URL encoded in each exhibit's QR code.
/// Admin only.
pub async fn booth_links(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let base = state
        .config
        .booth_base_url
        .clone()
        .ok_or_else(|| AppError::BadRequest("BOOTH_BASE_URL is not configured".to_string()))?;

    let questions = state.catalog().all_ordered().await?;

    let links: Vec<BoothLink> = questions
        .into_iter()
        .enumerate()
        .filter(|(_, q)| !q.work_name.is_empty())
        .map(|(ordinal, q)| {
            let mut url = base.clone();
            url.query_pairs_mut().append_pair("booth", &q.id.to_string());
            BoothLink {
                id: q.id,
                ordinal,
                work_name: q.work_name,
                url: url.to_string(),
            }
        })
        .collect();

    Ok(Json(links))
}

/// Marks whether a participant has collected the prize.
/// Admin only.
pub async fn update_received(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReceivedRequest>,
) -> Result<impl IntoResponse, AppError> {
    let participant = state
        .store
        .set_received(id, payload.received)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AppError::NotFound("Participant not found".to_string()),
            other => {
                tracing::error!("Failed to update participant {}: {:?}", id, other);
                AppError::from(other)
            }
        })?;

    tracing::info!(participant_id = id, received = payload.received, "prize status updated");

    Ok(Json(ParticipantSummary::from(&participant)))
}
