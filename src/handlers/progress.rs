// src/handlers/progress.rs

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    error::AppError,
    models::progress::{MatchMode, ProgressParams},
    services::PassRule,
    state::AppState,
};

/// Reports quiz progress by phone number.
///
/// `match=exact` returns one report; `match=suffix` (default) returns a report
/// for every participant whose number ends with the given digits.
pub async fn get_progress(
    State(state): State<AppState>,
    Query(params): Query<ProgressParams>,
) -> Result<Response, AppError> {
    let phone = params
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Phone number is required".to_string()))?;

    let rule = match params.rule.as_deref() {
        Some(raw) => PassRule::parse(raw, state.config.pass_threshold).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown pass rule '{raw}'"))
        })?,
        None => state.config.pass_rule,
    };

    let match_mode = match params.match_mode.as_deref() {
        Some(raw) => MatchMode::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown match mode '{raw}'")))?,
        None => MatchMode::default(),
    };

    let evaluator = state.evaluator();
    let response = match match_mode {
        MatchMode::Exact => Json(evaluator.evaluate_by_phone(phone, rule).await?).into_response(),
        MatchMode::Suffix => Json(evaluator.evaluate_by_suffix(phone, rule).await?).into_response(),
    };

    Ok(response)
}
