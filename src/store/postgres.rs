// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use super::{QuizStore, StoreError};
use crate::models::{
    answer_log::{AnswerLog, AnswerSlot},
    participant::{NewParticipant, Participant},
    question::{NewQuestion, Question},
};

const QUESTION_COLUMNS: &str =
    "id, work_name, ask, ask2, questions1, questions2, answer1, answer2, created_at";

const INSERT_QUESTION: &str = r#"
    INSERT INTO questions
        (work_name, ask, ask2, questions1, questions2, answer1, answer2, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()))
    RETURNING id, work_name, ask, ask2, questions1, questions2, answer1, answer2, created_at
"#;

const PARTICIPANT_COLUMNS: &str = "id, name, phone, answers, received, created_at";

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

/// Escapes LIKE metacharacters so the fragment is matched literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn insert_question_query(
    question: &NewQuestion,
) -> sqlx::query::QueryAs<'_, sqlx::Postgres, Question, sqlx::postgres::PgArguments> {
    sqlx::query_as::<_, Question>(INSERT_QUESTION)
        .bind(&question.work_name)
        .bind(&question.ask)
        .bind(&question.ask2)
        .bind(Json(&question.questions1))
        .bind(Json(&question.questions2))
        .bind(question.answer1)
        .bind(question.answer2)
        .bind(question.created_at)
}

#[async_trait]
impl QuizStore for PgStore {
    async fn get_question(&self, id: i64) -> Result<Question, StoreError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(question)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let stored = insert_question_query(&question)
            .fetch_one(&self.pool)
            .await?;

        Ok(stored)
    }

    async fn insert_questions(
        &self,
        questions: Vec<NewQuestion>,
    ) -> Result<Vec<Question>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let mut stored = Vec::with_capacity(questions.len());
        for question in &questions {
            stored.push(insert_question_query(question).fetch_one(&mut *tx).await?);
        }

        tx.commit().await?;
        Ok(stored)
    }

    async fn get_participant(&self, id: i64) -> Result<Participant, StoreError> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(participant)
    }

    async fn find_participant_by_phone(&self, phone: &str) -> Result<Participant, StoreError> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE phone = $1"
        ))
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(participant)
    }

    async fn find_participants_by_phone_suffix(
        &self,
        suffix: &str,
    ) -> Result<Vec<Participant>, StoreError> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            r#"
            SELECT {PARTICIPANT_COLUMNS}
            FROM participants
            WHERE phone LIKE '%' || $1 ESCAPE '\'
            ORDER BY id ASC
            "#
        ))
        .bind(escape_like(suffix))
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    async fn insert_participant(
        &self,
        participant: NewParticipant,
    ) -> Result<Participant, StoreError> {
        let stored = sqlx::query_as::<_, Participant>(&format!(
            r#"
            INSERT INTO participants (name, phone, answers)
            VALUES ($1, $2, '[]'::jsonb)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(&participant.name)
        .bind(&participant.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn set_answer_slot(
        &self,
        participant_id: i64,
        ordinal: usize,
        outcome: AnswerSlot,
    ) -> Result<AnswerLog, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Row lock keeps concurrent submissions from reading the same base log.
        let (Json(mut log),): (Json<AnswerLog>,) =
            sqlx::query_as("SELECT answers FROM participants WHERE id = $1 FOR UPDATE")
                .bind(participant_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StoreError::NotFound)?;

        log.set(ordinal, outcome);

        sqlx::query("UPDATE participants SET answers = $1 WHERE id = $2")
            .bind(Json(&log))
            .bind(participant_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(log)
    }

    async fn set_received(
        &self,
        participant_id: i64,
        received: bool,
    ) -> Result<Participant, StoreError> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "UPDATE participants SET received = $1 WHERE id = $2 RETURNING {PARTICIPANT_COLUMNS}"
        ))
        .bind(received)
        .bind(participant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(participant)
    }
}
