// src/store/mod.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    answer_log::{AnswerLog, AnswerSlot},
    participant::{NewParticipant, Participant},
    question::{NewQuestion, Question},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("storage error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Persistence contract for questions and participants.
///
/// Every method is a single unit of work; callers do not compose them into
/// transactions, so each write must be atomic on its own.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Fetch a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if missing, or other storage errors.
    async fn get_question(&self, id: i64) -> Result<Question, StoreError>;

    /// All questions, ascending by `(created_at, id)`.
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError>;

    /// Insert a batch of questions in order. Either every row is stored or
    /// none is.
    async fn insert_questions(
        &self,
        questions: Vec<NewQuestion>,
    ) -> Result<Vec<Question>, StoreError>;

    async fn get_participant(&self, id: i64) -> Result<Participant, StoreError>;

    /// Fetch a participant by exact phone number.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no participant has that phone.
    async fn find_participant_by_phone(&self, phone: &str) -> Result<Participant, StoreError>;

    /// Participants whose phone number ends with `suffix`, ordered by ID.
    /// An empty result is not an error at this layer.
    async fn find_participants_by_phone_suffix(
        &self,
        suffix: &str,
    ) -> Result<Vec<Participant>, StoreError>;

    /// Insert a participant with an empty AnswerLog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the phone number is already taken.
    async fn insert_participant(
        &self,
        participant: NewParticipant,
    ) -> Result<Participant, StoreError>;

    /// Atomically write one AnswerLog slot and return the resulting log.
    ///
    /// The read of the current log and the write of the new one happen under
    /// the same lock/transaction, so concurrent writes to different ordinals
    /// never drop each other.
    async fn set_answer_slot(
        &self,
        participant_id: i64,
        ordinal: usize,
        outcome: AnswerSlot,
    ) -> Result<AnswerLog, StoreError>;

    async fn set_received(&self, participant_id: i64, received: bool)
    -> Result<Participant, StoreError>;
}
