// src/models/answer_log.rs

use serde::{Deserialize, Serialize};

/// Outcome stored in a single AnswerLog slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSlot {
    #[default]
    Unanswered,
    Incorrect,
    Correct,
}

impl AnswerSlot {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            AnswerSlot::Correct
        } else {
            AnswerSlot::Incorrect
        }
    }

    pub fn is_correct(self) -> bool {
        self == AnswerSlot::Correct
    }
}

/// Per-participant record of outcomes, one slot per question ordinal.
///
/// Stored as a JSON array (e.g. `["correct", "unanswered", "incorrect"]`).
/// Slots past the end of the array read as `Unanswered`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerLog(Vec<AnswerSlot>);

impl AnswerLog {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the slot at `ordinal`, `Unanswered` when it was never written.
    pub fn get(&self, ordinal: usize) -> AnswerSlot {
        self.0.get(ordinal).copied().unwrap_or_default()
    }

    /// Writes `outcome` at `ordinal`, padding with `Unanswered` as needed.
    /// No other slot is modified.
    pub fn set(&mut self, ordinal: usize, outcome: AnswerSlot) {
        if self.0.len() <= ordinal {
            self.0.resize(ordinal + 1, AnswerSlot::Unanswered);
        }
        self.0[ordinal] = outcome;
    }

    pub fn slots(&self) -> &[AnswerSlot] {
        &self.0
    }
}

impl From<Vec<AnswerSlot>> for AnswerLog {
    fn from(slots: Vec<AnswerSlot>) -> Self {
        Self(slots)
    }
}
