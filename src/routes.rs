// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{admin, answer, progress, question},
    state::AppState,
    utils::jwt::admin_middleware,
};

/// Assembles the main application router.
///
/// * Participant routes: questions, answers, progress.
/// * Staff routes under `/api/admin`, guarded by a bearer token.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.cors_origins);

    let question_routes = Router::new()
        .route("/", get(question::list_questions))
        .route("/{id}", get(question::get_question));

    let admin_routes = Router::new()
        .route(
            "/questions",
            get(admin::list_questions).post(admin::create_question),
        )
        .route("/questions/import", post(admin::import_questions))
        .route("/booth-links", get(admin::booth_links))
        .route("/participants/{id}/received", put(admin::update_received))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ))
        // Login stays outside the guard
        .route("/login", post(admin::login));

    Router::new()
        .nest("/api/questions", question_routes)
        .route("/api/answers", post(answer::submit_answer))
        .route("/api/progress", get(progress::get_progress))
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Empty origin list allows any origin, matching the public booth pages.
fn build_cors(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
