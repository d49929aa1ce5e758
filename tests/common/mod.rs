// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use booth_quiz::{
    config::Config,
    models::question::{NewQuestion, Question},
    routes,
    services::PassRule,
    state::AppState,
    store::{MemoryStore, QuizStore},
    utils::hash::hash_password,
};
use chrono::{Duration, TimeZone, Utc};

pub const ADMIN_USERNAME: &str = "staff";
pub const ADMIN_PASSWORD: &str = "booth-staff-pw";

pub fn test_config() -> Config {
    Config {
        database_url: "memory".to_string(),
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        port: 0,
        pass_rule: PassRule::Threshold(5),
        pass_threshold: 5,
        expose_answers: false,
        cors_origins: Vec::new(),
        booth_base_url: Some("https://quiz.example.org/lotter".parse().unwrap()),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        admin_username: Some(ADMIN_USERNAME.to_string()),
        admin_password_hash: Some(hash_password(ADMIN_PASSWORD).unwrap()),
    }
}

/// Spawns the app on a random port. Returns the base URL.
pub async fn spawn_app(store: Arc<MemoryStore>, config: Config) -> String {
    let store: Arc<dyn QuizStore> = store;
    let app = routes::create_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

/// Inserts `count` questions one minute apart. Every answer pair is (1, 2).
pub async fn seed_questions(store: &MemoryStore, count: usize) -> Vec<Question> {
    let start = Utc.with_ymd_and_hms(2024, 11, 26, 9, 0, 0).unwrap();
    let mut questions = Vec::with_capacity(count);
    for i in 0..count {
        let q = store
            .insert_question(NewQuestion {
                work_name: format!("Work {i}"),
                ask: format!("First question {i}"),
                ask2: format!("Second question {i}"),
                questions1: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                questions2: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                answer1: 1,
                answer2: 2,
                created_at: Some(start + Duration::minutes(i as i64)),
            })
            .await
            .unwrap();
        questions.push(q);
    }
    questions
}
