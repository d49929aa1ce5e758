// src/models/mod.rs

pub mod answer;
pub mod answer_log;
pub mod participant;
pub mod progress;
pub mod question;
