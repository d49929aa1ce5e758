// src/models/participant.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::answer_log::AnswerLog;

/// Represents the 'participants' table in the database.
///
/// The phone number is the natural key; a participant is created on the
/// first submission.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,

    pub name: String,

    /// Unique phone number.
    pub phone: String,

    /// Outcome per question ordinal.
    #[sqlx(json)]
    pub answers: AnswerLog,

    /// Whether the participant already collected the prize.
    pub received: bool,

    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a participant.
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub name: String,
    pub phone: String,
}

/// Participant as shown in a progress report (no raw log).
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantSummary {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub received: bool,
}

impl From<&Participant> for ParticipantSummary {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            phone: p.phone.clone(),
            received: p.received,
        }
    }
}

/// DTO for updating the prize-claim flag.
#[derive(Debug, Deserialize)]
pub struct UpdateReceivedRequest {
    pub received: bool,
}
