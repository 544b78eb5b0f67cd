//! Per-session interaction state for review and quiz practice.
//! Owned by the presentation layer and handed to the store and scheduler as plain values.

use super::{CardId, Flashcard};
use chrono::{Days, Local, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

/// Case-insensitive comparison of trimmed answers.
pub fn answers_match(expected: &str, given: &str) -> bool {
    expected.trim().to_lowercase() == given.trim().to_lowercase()
}

/// Review of due cards: one randomly drawn card at a time, answer hidden until revealed.
#[derive(Debug, Default, Clone)]
pub struct ReviewSession {
    pub current: Option<CardId>,
    pub answer_revealed: bool,
}

impl ReviewSession {
    /// Draws a card from `due`, keeping the current one while it is still due.
    pub fn draw<'a, R: Rng + ?Sized>(
        &mut self,
        due: &'a [Flashcard],
        rng: &mut R,
    ) -> Option<&'a Flashcard> {
        if let Some(id) = self.current {
            if let Some(card) = due.iter().find(|card| card.id == id) {
                return Some(card);
            }
        }

        self.answer_revealed = false;
        let card = due.choose(rng);
        self.current = card.map(|card| card.id);
        card
    }

    pub fn reveal(&mut self) {
        self.answer_revealed = true;
    }

    /// Clears the drawn card once its outcome has been recorded.
    pub fn finish(&mut self) {
        self.current = None;
        self.answer_revealed = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizFeedback {
    Correct,
    Incorrect { expected: String },
}

/// Free-form quiz over the whole collection. Never touches scheduling.
#[derive(Debug, Default, Clone)]
pub struct QuizSession {
    pub current: Option<CardId>,
    pub input: String,
    pub feedback: Option<QuizFeedback>,
}

impl QuizSession {
    /// Picks a random card and clears the previous input and feedback.
    pub fn next<R: Rng + ?Sized>(&mut self, cards: &[Flashcard], rng: &mut R) {
        self.current = cards.choose(rng).map(|card| card.id);
        self.input.clear();
        self.feedback = None;
    }

    /// Current quiz card, drawing a new one if none is active or it was deleted.
    pub fn current_card<'a, R: Rng + ?Sized>(
        &mut self,
        cards: &'a [Flashcard],
        rng: &mut R,
    ) -> Option<&'a Flashcard> {
        let active = self
            .current
            .and_then(|id| cards.iter().position(|card| card.id == id));
        match active {
            Some(index) => cards.get(index),
            None => {
                self.next(cards, rng);
                self.current
                    .and_then(|id| cards.iter().find(|card| card.id == id))
            }
        }
    }

    pub fn check(&mut self, card: &Flashcard) -> &QuizFeedback {
        let feedback = if answers_match(&card.answer, &self.input) {
            QuizFeedback::Correct
        } else {
            QuizFeedback::Incorrect {
                expected: card.answer.clone(),
            }
        };
        self.feedback.insert(feedback)
    }
}

/// Today's date, optionally shifted forward to simulate the passing of days.
#[derive(Debug, Default, Clone)]
pub struct StudyCalendar {
    pub offset_days: u64,
}

impl StudyCalendar {
    pub fn today(&self) -> NaiveDate {
        self.shift(Local::now().date_naive())
    }

    pub fn advance_day(&mut self) {
        self.offset_days += 1;
    }

    fn shift(&self, date: NaiveDate) -> NaiveDate {
        date.checked_add_days(Days::new(self.offset_days))
            .unwrap_or(NaiveDate::MAX)
    }
}
