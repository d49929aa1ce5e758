// src/config.rs

use std::env;
use dotenvy::dotenv;
use url::Url;

use crate::{services::PassRule, utils::hash::hash_password};

/// Pass threshold observed in the original booth event.
pub const DEFAULT_PASS_THRESHOLD: usize = 5;

/// `DATABASE_URL` value that selects the in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub log_dir: String,
    pub port: u16,

    /// Default pass rule for progress queries.
    pub pass_rule: PassRule,
    pub pass_threshold: usize,

    /// Whether the participant-facing question view includes the answers.
    pub expose_answers: bool,

    /// Allowed CORS origins; empty means any origin.
    pub cors_origins: Vec<String>,

    /// Base URL printed on booth QR codes, e.g. `https://example.org/lotter`.
    pub booth_base_url: Option<Url>,

    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub admin_username: Option<String>,
    /// Argon2 PHC string for the admin password.
    pub admin_password_hash: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .map(|v| v.parse().expect("JWT_EXPIRATION must be a number of seconds"))
            .unwrap_or(8 * 3600);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let port = env::var("PORT")
            .ok()
            .map(|v| v.parse().expect("PORT must be a valid port number"))
            .unwrap_or(3000);

        let pass_threshold = env::var("PASS_THRESHOLD")
            .ok()
            .map(|v| v.parse().expect("PASS_THRESHOLD must be a non-negative integer"))
            .unwrap_or(DEFAULT_PASS_THRESHOLD);

        let pass_rule = env::var("PASS_RULE")
            .ok()
            .map(|v| {
                PassRule::parse(&v, pass_threshold)
                    .expect("PASS_RULE must be 'threshold' or 'all'")
            })
            .unwrap_or(PassRule::Threshold(pass_threshold));

        let expose_answers = env::var("EXPOSE_ANSWERS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default());

        let booth_base_url = env::var("BOOTH_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| Url::parse(v.trim()).expect("BOOTH_BASE_URL must be an absolute URL"));

        let admin_username = env::var("ADMIN_USERNAME").ok();

        // A plain ADMIN_PASSWORD is hashed once at startup.
        let admin_password_hash = env::var("ADMIN_PASSWORD_HASH").ok().or_else(|| {
            env::var("ADMIN_PASSWORD")
                .ok()
                .map(|plain| hash_password(&plain).expect("Failed to hash ADMIN_PASSWORD"))
        });

        Self {
            database_url,
            rust_log,
            log_dir,
            port,
            pass_rule,
            pass_threshold,
            expose_answers,
            cors_origins,
            booth_base_url,
            jwt_secret,
            jwt_expiration,
            admin_username,
            admin_password_hash,
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

/// Splits a comma-separated origin list. `*` (or nothing) allows any origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}
