//! SQLite storage for the card collection
//!
//! One row per card; the `position` column keeps the collection order.
//! Dates are stored as `YYYY-MM-DD` text, matching the JSON layout.

use super::CardBackend;
use crate::error::{StoreError, StoreResult};
use crate::models::{CardId, Flashcard};
use chrono::NaiveDate;
use log::debug;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

/// Row as read from the table, before ids and dates are parsed
struct CardRow {
    id: String,
    question: String,
    answer: String,
    interval_days: i64,
    next_review_date: String,
    correct_count: i64,
}

impl CardRow {
    fn into_card(self) -> StoreResult<Flashcard> {
        let id = CardId::parse(&self.id)
            .map_err(|e| StoreError::Parse(format!("invalid card id `{}`: {e}", self.id)))?;
        let next_review = NaiveDate::parse_from_str(&self.next_review_date, DATE_FORMAT)
            .map_err(|e| {
                StoreError::Parse(format!(
                    "invalid review date `{}` for card {id}: {e}",
                    self.next_review_date
                ))
            })?;
        let interval = u32::try_from(self.interval_days)
            .ok()
            .filter(|days| *days >= 1)
            .ok_or_else(|| {
                StoreError::Parse(format!(
                    "invalid interval {} for card {id}",
                    self.interval_days
                ))
            })?;
        let correct_count = u32::try_from(self.correct_count).map_err(|_| {
            StoreError::Parse(format!(
                "invalid correct count {} for card {id}",
                self.correct_count
            ))
        })?;

        Ok(Flashcard {
            id,
            question: self.question,
            answer: self.answer,
            interval,
            next_review,
            correct_count,
        })
    }
}

impl SqliteBackend {
    /// Opens (creating if needed) the database file and its table.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS flashcards (
                id TEXT PRIMARY KEY,
                position INTEGER NOT NULL,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                interval_days INTEGER NOT NULL DEFAULT 1,
                next_review_date TEXT NOT NULL,
                correct_count INTEGER NOT NULL DEFAULT 0
            )",
            (),
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CardBackend for SqliteBackend {
    fn load_all(&self) -> StoreResult<Vec<Flashcard>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, question, answer, interval_days, next_review_date, correct_count
             FROM flashcards
             ORDER BY position ASC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(CardRow {
                    id: row.get(0)?,
                    question: row.get(1)?,
                    answer: row.get(2)?,
                    interval_days: row.get(3)?,
                    next_review_date: row.get(4)?,
                    correct_count: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<CardRow>>>()?;

        rows.into_iter().map(CardRow::into_card).collect()
    }

    /// Rewrites the table inside one transaction; a failed insert rolls everything back.
    fn save_all(&self, cards: &[Flashcard]) -> StoreResult<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM flashcards", ())?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO flashcards
                    (id, position, question, answer, interval_days, next_review_date, correct_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (position, card) in cards.iter().enumerate() {
                stmt.execute(params![
                    card.id.to_string(),
                    position as i64,
                    card.question,
                    card.answer,
                    card.interval,
                    card.next_review.format(DATE_FORMAT).to_string(),
                    card.correct_count
                ])?;
            }
        }
        tx.commit()?;

        debug!("stored {} cards in sqlite", cards.len());
        Ok(())
    }
}
