// src/handlers/mod.rs

pub mod admin;
pub mod answer;
pub mod progress;
pub mod question;
