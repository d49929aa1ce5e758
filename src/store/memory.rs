// src/store/memory.rs

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;

use super::{QuizStore, StoreError};
use crate::models::{
    answer_log::{AnswerLog, AnswerSlot},
    participant::{NewParticipant, Participant},
    question::{NewQuestion, Question},
};

#[derive(Default)]
struct Inner {
    questions: BTreeMap<i64, Question>,
    participants: BTreeMap<i64, Participant>,
    next_question_id: i64,
    next_participant_id: i64,
}

impl Inner {
    fn store_question(&mut self, question: NewQuestion) -> Question {
        self.next_question_id += 1;
        let stored = Question {
            id: self.next_question_id,
            work_name: question.work_name,
            ask: question.ask,
            ask2: question.ask2,
            questions1: Json(question.questions1),
            questions2: Json(question.questions2),
            answer1: question.answer1,
            answer2: question.answer2,
            created_at: question.created_at.unwrap_or_else(Utc::now),
        };
        self.questions.insert(stored.id, stored.clone());
        stored
    }
}

/// In-memory store used by tests and `DATABASE_URL=memory` runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn get_question(&self, id: i64) -> Result<Question, StoreError> {
        let guard = self.lock()?;
        guard.questions.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        let guard = self.lock()?;
        let mut questions: Vec<Question> = guard.questions.values().cloned().collect();
        questions.sort_by_key(|q| (q.created_at, q.id));
        Ok(questions)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard.store_question(question))
    }

    async fn insert_questions(
        &self,
        questions: Vec<NewQuestion>,
    ) -> Result<Vec<Question>, StoreError> {
        let mut guard = self.lock()?;
        Ok(questions
            .into_iter()
            .map(|q| guard.store_question(q))
            .collect())
    }

    async fn get_participant(&self, id: i64) -> Result<Participant, StoreError> {
        let guard = self.lock()?;
        guard
            .participants
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_participant_by_phone(&self, phone: &str) -> Result<Participant, StoreError> {
        let guard = self.lock()?;
        guard
            .participants
            .values()
            .find(|p| p.phone == phone)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_participants_by_phone_suffix(
        &self,
        suffix: &str,
    ) -> Result<Vec<Participant>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .participants
            .values()
            .filter(|p| p.phone.ends_with(suffix))
            .cloned()
            .collect())
    }

    async fn insert_participant(
        &self,
        participant: NewParticipant,
    ) -> Result<Participant, StoreError> {
        let mut guard = self.lock()?;
        if guard
            .participants
            .values()
            .any(|p| p.phone == participant.phone)
        {
            return Err(StoreError::Conflict);
        }
        guard.next_participant_id += 1;
        let stored = Participant {
            id: guard.next_participant_id,
            name: participant.name,
            phone: participant.phone,
            answers: AnswerLog::new(),
            received: false,
            created_at: Utc::now(),
        };
        guard.participants.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn set_answer_slot(
        &self,
        participant_id: i64,
        ordinal: usize,
        outcome: AnswerSlot,
    ) -> Result<AnswerLog, StoreError> {
        let mut guard = self.lock()?;
        let participant = guard
            .participants
            .get_mut(&participant_id)
            .ok_or(StoreError::NotFound)?;
        participant.answers.set(ordinal, outcome);
        Ok(participant.answers.clone())
    }

    async fn set_received(
        &self,
        participant_id: i64,
        received: bool,
    ) -> Result<Participant, StoreError> {
        let mut guard = self.lock()?;
        let participant = guard
            .participants
            .get_mut(&participant_id)
            .ok_or(StoreError::NotFound)?;
        participant.received = received;
        Ok(participant.clone())
    }
}
