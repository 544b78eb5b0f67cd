//! Flashcard is a question/answer pair together with its review schedule.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier assigned to a card when it is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value).map(Self)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardValidationError {
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("answer must not be empty")]
    EmptyAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Absent in files written before ids existed; a fresh one is generated on load.
    #[serde(default = "CardId::generate")]
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub interval: u32,
    pub next_review: NaiveDate,
    pub correct_count: u32,
}

impl Flashcard {
    /// Creates a card that is due immediately.
    ///
    /// Question and answer are stored trimmed and must not be empty after trimming.
    pub fn new(
        question: &str,
        answer: &str,
        today: NaiveDate,
    ) -> Result<Self, CardValidationError> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() {
            return Err(CardValidationError::EmptyQuestion);
        }
        if answer.is_empty() {
            return Err(CardValidationError::EmptyAnswer);
        }

        Ok(Self {
            id: CardId::generate(),
            question: question.to_string(),
            answer: answer.to_string(),
            interval: 1,
            next_review: today,
            correct_count: 0,
        })
    }
}
