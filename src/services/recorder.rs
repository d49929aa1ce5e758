// src/services/recorder.rs

use std::sync::Arc;

use super::{QuestionCatalog, QuizError};
use crate::{
    models::{
        answer::Submission,
        answer_log::AnswerSlot,
        participant::{NewParticipant, Participant},
    },
    store::{QuizStore, StoreError},
    utils::phone::normalize_phone,
};

/// Records a participant's outcome for one question.
#[derive(Clone)]
pub struct AnswerRecorder {
    store: Arc<dyn QuizStore>,
    catalog: QuestionCatalog,
}

impl AnswerRecorder {
    pub fn new(store: Arc<dyn QuizStore>, catalog: QuestionCatalog) -> Self {
        Self { store, catalog }
    }

    /// Scores the submission and writes the outcome into the participant's
    /// AnswerLog at the question's ordinal.
    ///
    /// * Creates the participant on first submission; an existing name is kept.
    /// * Both answers must match for the outcome to be `correct`.
    /// * Only the slot for this question is written.
    pub async fn record(&self, submission: &Submission) -> Result<bool, QuizError> {
        if submission.name.is_empty() {
            return Err(QuizError::InvalidInput("Name is required".to_string()));
        }
        let phone = normalize_phone(&submission.phone)
            .ok_or_else(|| QuizError::InvalidInput("Invalid phone number".to_string()))?;

        let participant = self.resolve_participant(&submission.name, &phone).await?;

        let (question, ordinal) = self.catalog.resolve(submission.question_id).await?;
        let correct = question.is_correct(submission.answer1, submission.answer2);

        self.store
            .set_answer_slot(participant.id, ordinal, AnswerSlot::from_correct(correct))
            .await
            .map_err(|e| QuizError::from_store(e, "Participant"))?;

        tracing::info!(
            participant_id = participant.id,
            question_id = question.id,
            ordinal,
            correct,
            "answer recorded"
        );

        Ok(correct)
    }

    async fn resolve_participant(&self, name: &str, phone: &str) -> Result<Participant, QuizError> {
        match self.store.find_participant_by_phone(phone).await {
            Ok(existing) => return Ok(existing),
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let new_participant = NewParticipant {
            name: name.to_string(),
            phone: phone.to_string(),
        };

        match self.store.insert_participant(new_participant).await {
            Ok(created) => {
                tracing::info!(participant_id = created.id, "participant created");
                Ok(created)
            }
            // Lost a race with a concurrent first submission for the same phone.
            Err(StoreError::Conflict) => self
                .store
                .find_participant_by_phone(phone)
                .await
                .map_err(QuizError::from),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::{
        models::question::{NewQuestion, Question},
        store::MemoryStore,
    };

    async fn seeded(count: usize) -> (Arc<MemoryStore>, Vec<Question>) {
        let store = Arc::new(MemoryStore::new());
        let t = Utc.with_ymd_and_hms(2024, 11, 26, 9, 0, 0).unwrap();
        let mut questions = Vec::new();
        for i in 0..count {
            let q = store
                .insert_question(NewQuestion {
                    work_name: format!("Work {i}"),
                    ask: format!("Ask {i}"),
                    ask2: format!("Ask2 {i}"),
                    questions1: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    questions2: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    answer1: 1,
                    answer2: 2,
                    created_at: Some(t + Duration::minutes(i as i64)),
                })
                .await
                .unwrap();
            questions.push(q);
        }
        (store, questions)
    }

    fn recorder(store: Arc<MemoryStore>) -> AnswerRecorder {
        let store: Arc<dyn QuizStore> = store;
        AnswerRecorder::new(store.clone(), QuestionCatalog::new(store))
    }

    fn submission(phone: &str, question_id: i64, answer1: i32, answer2: i32) -> Submission {
        Submission {
            name: "Alice".to_string(),
            phone: phone.to_string(),
            question_id,
            answer1,
            answer2,
        }
    }

    #[tokio::test]
    async fn first_submission_creates_participant() {
        let (store, questions) = seeded(2).await;
        let recorder = recorder(store.clone());

        let correct = recorder
            .record(&submission("0912345678", questions[1].id, 1, 2))
            .await
            .unwrap();
        assert!(correct);

        let p = store.find_participant_by_phone("0912345678").await.unwrap();
        assert_eq!(p.name, "Alice");
        assert_eq!(
            p.answers.slots(),
            &[AnswerSlot::Unanswered, AnswerSlot::Correct]
        );
    }

    #[tokio::test]
    async fn existing_name_is_not_overwritten() {
        let (store, questions) = seeded(1).await;
        let recorder = recorder(store.clone());

        recorder
            .record(&submission("0912345678", questions[0].id, 1, 2))
            .await
            .unwrap();
        let mut renamed = submission("0912345678", questions[0].id, 1, 2);
        renamed.name = "Bob".to_string();
        recorder.record(&renamed).await.unwrap();

        let p = store.find_participant_by_phone("0912345678").await.unwrap();
        assert_eq!(p.name, "Alice");
    }

    #[tokio::test]
    async fn partial_match_is_incorrect() {
        let (store, questions) = seeded(1).await;
        let recorder = recorder(store.clone());

        let correct = recorder
            .record(&submission("0912345678", questions[0].id, 1, 3))
            .await
            .unwrap();
        assert!(!correct);

        let p = store.find_participant_by_phone("0912345678").await.unwrap();
        assert_eq!(p.answers.get(0), AnswerSlot::Incorrect);
    }

    #[tokio::test]
    async fn repeat_submission_is_idempotent() {
        let (store, questions) = seeded(3).await;
        let recorder = recorder(store.clone());
        let sub = submission("0912345678", questions[2].id, 1, 2);

        recorder.record(&sub).await.unwrap();
        let after_first = store
            .find_participant_by_phone("0912345678")
            .await
            .unwrap()
            .answers;
        recorder.record(&sub).await.unwrap();
        let after_second = store
            .find_participant_by_phone("0912345678")
            .await
            .unwrap()
            .answers;

        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn resubmission_only_touches_its_own_slot() {
        let (store, questions) = seeded(3).await;
        let recorder = recorder(store.clone());

        for q in &questions {
            recorder
                .record(&submission("0912345678", q.id, 1, 2))
                .await
                .unwrap();
        }
        recorder
            .record(&submission("0912345678", questions[1].id, 0, 0))
            .await
            .unwrap();

        let p = store.find_participant_by_phone("0912345678").await.unwrap();
        assert_eq!(
            p.answers.slots(),
            &[AnswerSlot::Correct, AnswerSlot::Incorrect, AnswerSlot::Correct]
        );
    }

    #[tokio::test]
    async fn unknown_question_is_not_found() {
        let (store, _) = seeded(1).await;
        let recorder = recorder(store);

        let err = recorder
            .record(&submission("0912345678", 999, 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::NotFound(_)));
    }

    #[tokio::test]
    async fn invalid_phone_is_rejected() {
        let (store, questions) = seeded(1).await;
        let recorder = recorder(store);

        let err = recorder
            .record(&submission("abc", questions[0].id, 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn concurrent_submissions_for_different_ordinals_all_survive() {
        let (store, questions) = seeded(8).await;
        let recorder = recorder(store.clone());

        let mut handles = Vec::new();
        for q in &questions {
            let recorder = recorder.clone();
            let sub = submission("0912345678", q.id, 1, 2);
            handles.push(tokio::spawn(async move { recorder.record(&sub).await }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        let p = store.find_participant_by_phone("0912345678").await.unwrap();
        assert!(p.answers.slots().iter().all(|slot| slot.is_correct()));
        assert_eq!(p.answers.slots().len(), 8);
        assert_eq!(
            store.find_participants_by_phone_suffix("").await.unwrap().len(),
            1
        );
    }
}
