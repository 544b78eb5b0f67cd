//! Doubling-interval review scheduler.
//!
//! Each card carries an interval in days and a streak counter:
//! - Correct recall: streak + 1, interval doubles (1 → 2 → 4 → 8 ...)
//! - Incorrect recall: streak resets to 0, interval resets to 1
//! - The next review date is always today + the new interval, so even a failed
//!   card is next seen tomorrow
//!
//! A streak of n consecutive correct recalls therefore yields an interval of 2^n days.

use super::Flashcard;
use chrono::{Days, NaiveDate};

/// Upper bound for the doubling so that `today + interval` stays a valid date.
pub const MAX_INTERVAL_DAYS: u32 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl From<bool> for Outcome {
    fn from(correct: bool) -> Self {
        if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Returns the card rescheduled after a review on `today`.
pub fn record_outcome(card: &Flashcard, outcome: Outcome, today: NaiveDate) -> Flashcard {
    let (interval, correct_count) = match outcome {
        Outcome::Correct => (
            card.interval.max(1).saturating_mul(2).min(MAX_INTERVAL_DAYS),
            card.correct_count.saturating_add(1),
        ),
        Outcome::Incorrect => (1, 0),
    };

    let next_review = today
        .checked_add_days(Days::new(u64::from(interval)))
        .unwrap_or(NaiveDate::MAX);

    Flashcard {
        interval,
        correct_count,
        next_review,
        ..card.clone()
    }
}

pub fn is_due(card: &Flashcard, today: NaiveDate) -> bool {
    card.next_review <= today
}

/// Cards whose review date is today or earlier, in their original order.
pub fn select_due(cards: &[Flashcard], today: NaiveDate) -> Vec<Flashcard> {
    cards
        .iter()
        .filter(|card| is_due(card, today))
        .cloned()
        .collect()
}
