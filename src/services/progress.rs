// src/services/progress.rs

use std::sync::Arc;

use super::{QuestionCatalog, QuizError};
use crate::{
    models::{
        participant::{Participant, ParticipantSummary},
        progress::{ProgressReport, QuestionProgress},
        question::Question,
    },
    store::QuizStore,
    utils::phone::{normalize_phone, normalize_suffix},
};

/// How a correct-count turns into a pass/fail verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassRule {
    /// At least `n` correct answers.
    Threshold(usize),
    /// Every question in the catalog answered correctly.
    AllCorrect,
}

impl PassRule {
    pub fn passed(self, correct_count: usize, total_questions: usize) -> bool {
        match self {
            PassRule::Threshold(n) => correct_count >= n,
            PassRule::AllCorrect => total_questions > 0 && correct_count == total_questions,
        }
    }

    /// Parses `threshold`/`all`, using `threshold` as the count for the former.
    /// Config and the progress endpoint both go through this.
    pub fn parse(raw: &str, threshold: usize) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "threshold" => Some(PassRule::Threshold(threshold)),
            "all" | "all_correct" => Some(PassRule::AllCorrect),
            _ => None,
        }
    }
}

/// Builds progress reports from the catalog and a participant's AnswerLog.
#[derive(Clone)]
pub struct ProgressEvaluator {
    store: Arc<dyn QuizStore>,
    catalog: QuestionCatalog,
}

impl ProgressEvaluator {
    pub fn new(store: Arc<dyn QuizStore>, catalog: QuestionCatalog) -> Self {
        Self { store, catalog }
    }

    pub async fn evaluate(
        &self,
        participant: &Participant,
        rule: PassRule,
    ) -> Result<ProgressReport, QuizError> {
        let questions = self.catalog.all_ordered().await?;
        Ok(build_report(participant, &questions, rule))
    }

    /// Report for the participant with exactly this phone number.
    pub async fn evaluate_by_phone(
        &self,
        phone: &str,
        rule: PassRule,
    ) -> Result<ProgressReport, QuizError> {
        let phone = normalize_phone(phone)
            .ok_or_else(|| QuizError::InvalidInput("Invalid phone number".to_string()))?;

        let participant = self
            .store
            .find_participant_by_phone(&phone)
            .await
            .map_err(|e| QuizError::from_store(e, "Participant"))?;

        self.evaluate(&participant, rule).await
    }

    /// Reports for every participant whose phone number ends with `suffix`.
    pub async fn evaluate_by_suffix(
        &self,
        suffix: &str,
        rule: PassRule,
    ) -> Result<Vec<ProgressReport>, QuizError> {
        let suffix = normalize_suffix(suffix)
            .ok_or_else(|| QuizError::InvalidInput("Invalid phone suffix".to_string()))?;

        let participants: Vec<Participant> = self
            .store
            .find_participants_by_phone_suffix(&suffix)
            .await?
            .into_iter()
            .filter(|p| p.phone.ends_with(&suffix))
            .collect();

        if participants.is_empty() {
            return Err(QuizError::NotFound("Participant not found".to_string()));
        }

        let questions = self.catalog.all_ordered().await?;
        Ok(participants
            .iter()
            .map(|p| build_report(p, &questions, rule))
            .collect())
    }
}

/// Pairs each catalog question with the log slot at its ordinal.
fn build_report(participant: &Participant, questions: &[Question], rule: PassRule) -> ProgressReport {
    let rows: Vec<QuestionProgress> = questions
        .iter()
        .enumerate()
        .map(|(ordinal, q)| {
            let status = participant.answers.get(ordinal);
            QuestionProgress {
                ordinal,
                question_id: q.id,
                work_name: q.work_name.clone(),
                ask: q.ask.clone(),
                ask2: q.ask2.clone(),
                status,
                correct: status.is_correct(),
            }
        })
        .collect();

    let correct_count = rows.iter().filter(|r| r.correct).count();
    let total_questions = rows.len();

    ProgressReport {
        participant: ParticipantSummary::from(participant),
        questions: rows,
        correct_count,
        total_questions,
        passed: rule.passed(correct_count, total_questions),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use sqlx::types::Json;

    use super::*;
    use crate::{
        models::answer_log::{AnswerLog, AnswerSlot},
        models::participant::NewParticipant,
        store::MemoryStore,
    };

    fn catalog(n: usize) -> Vec<Question> {
        let t = Utc.with_ymd_and_hms(2024, 11, 26, 9, 0, 0).unwrap();
        (0..n)
            .map(|i| Question {
                id: i as i64 + 1,
                work_name: format!("Work {i}"),
                ask: format!("Ask {i}"),
                ask2: format!("Ask2 {i}"),
                questions1: Json(vec!["A".into()]),
                questions2: Json(vec!["A".into()]),
                answer1: 0,
                answer2: 0,
                created_at: t + Duration::minutes(i as i64),
            })
            .collect()
    }

    fn participant(slots: Vec<AnswerSlot>) -> Participant {
        Participant {
            id: 1,
            name: "Alice".to_string(),
            phone: "0912345678".to_string(),
            answers: AnswerLog::from(slots),
            received: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn threshold_boundary() {
        let questions = catalog(8);
        let four = participant(vec![AnswerSlot::Correct; 4]);
        let five = participant(vec![AnswerSlot::Correct; 5]);

        let rule = PassRule::Threshold(5);
        assert!(!build_report(&four, &questions, rule).passed);
        assert!(build_report(&five, &questions, rule).passed);
    }

    #[test]
    fn all_correct_rule_needs_every_question() {
        let questions = catalog(3);
        let two = participant(vec![AnswerSlot::Correct, AnswerSlot::Correct]);
        let three = participant(vec![AnswerSlot::Correct; 3]);

        assert!(!build_report(&two, &questions, PassRule::AllCorrect).passed);
        assert!(build_report(&three, &questions, PassRule::AllCorrect).passed);
        assert!(!PassRule::AllCorrect.passed(0, 0));
    }

    #[test]
    fn report_aligns_with_log() {
        let questions = catalog(4);
        let p = participant(vec![
            AnswerSlot::Incorrect,
            AnswerSlot::Correct,
            AnswerSlot::Unanswered,
        ]);

        let report = build_report(&p, &questions, PassRule::Threshold(5));
        assert_eq!(report.total_questions, 4);
        for (i, row) in report.questions.iter().enumerate() {
            assert_eq!(row.ordinal, i);
            assert_eq!(row.question_id, questions[i].id);
            assert_eq!(row.correct, p.answers.get(i) == AnswerSlot::Correct);
        }
        assert_eq!(report.questions[3].status, AnswerSlot::Unanswered);
        assert_eq!(report.correct_count, 1);
    }

    #[test]
    fn log_longer_than_catalog_is_truncated() {
        let questions = catalog(1);
        let p = participant(vec![AnswerSlot::Incorrect, AnswerSlot::Correct]);

        let report = build_report(&p, &questions, PassRule::Threshold(1));
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.correct_count, 0);
        assert!(!report.passed);
    }

    #[test]
    fn parses_pass_rules() {
        assert_eq!(PassRule::parse("threshold", 7), Some(PassRule::Threshold(7)));
        assert_eq!(PassRule::parse("ALL", 7), Some(PassRule::AllCorrect));
        assert_eq!(PassRule::parse(" all_correct ", 7), Some(PassRule::AllCorrect));
        assert_eq!(PassRule::parse("some", 7), None);
        assert_eq!(PassRule::parse("5", 7), None);
    }

    #[tokio::test]
    async fn suffix_lookup_matches_only_trailing_digits() {
        let store = Arc::new(MemoryStore::new());
        for phone in ["0912345678", "0987654321"] {
            store
                .insert_participant(NewParticipant {
                    name: "P".to_string(),
                    phone: phone.to_string(),
                })
                .await
                .unwrap();
        }
        let store: Arc<dyn QuizStore> = store;
        let evaluator = ProgressEvaluator::new(store.clone(), QuestionCatalog::new(store));

        let reports = evaluator
            .evaluate_by_suffix("678", PassRule::Threshold(5))
            .await
            .unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].participant.phone, "0912345678");

        let err = evaluator
            .evaluate_by_suffix("99", PassRule::Threshold(5))
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::NotFound(_)));
    }

    #[tokio::test]
    async fn exact_lookup_of_unknown_phone_is_not_found() {
        let store: Arc<dyn QuizStore> = Arc::new(MemoryStore::new());
        let evaluator = ProgressEvaluator::new(store.clone(), QuestionCatalog::new(store));

        let err = evaluator
            .evaluate_by_phone("0912345678", PassRule::Threshold(5))
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::NotFound(_)));
    }
}
