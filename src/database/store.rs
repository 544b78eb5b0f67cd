//! Card operations on top of a [`CardBackend`].
//!
//! Every operation reloads the full collection, applies its change and writes the
//! whole collection back. Nothing is cached between calls. Cycles are serialized
//! by a store-wide lock so two callers in one process cannot lose each other's
//! updates. Cycles that change nothing do not write.

use super::{CardBackend, JsonFileBackend, MemoryBackend, SqliteBackend};
use crate::config::{AppConfig, Backend};
use crate::error::StoreResult;
use crate::models::{CardId, Flashcard, Outcome, record_outcome};
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

pub struct CardStore {
    backend: Box<dyn CardBackend>,
    lock: Mutex<()>,
}

impl CardStore {
    pub fn new(backend: impl CardBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            lock: Mutex::new(()),
        }
    }

    /// Opens the backend selected by `config`.
    pub fn open(config: &AppConfig) -> StoreResult<Self> {
        let path = config.data_path();
        info!("opening {:?} card store at {}", config.backend, path.display());
        Ok(match config.backend {
            Backend::Json => Self::new(JsonFileBackend::new(path)),
            Backend::Sqlite => Self::new(SqliteBackend::open(&path)?),
        })
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    pub fn load_all(&self) -> StoreResult<Vec<Flashcard>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.backend.load_all()
    }

    pub fn save_all(&self, cards: &[Flashcard]) -> StoreResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.backend.save_all(cards)
    }

    /// Runs one load-modify-save cycle. `change` returns `None` to leave storage untouched.
    fn modify<T>(
        &self,
        change: impl FnOnce(&mut Vec<Flashcard>) -> Option<T>,
    ) -> StoreResult<Option<T>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut cards = self.backend.load_all()?;
        let result = change(&mut cards);
        if result.is_some() {
            self.backend.save_all(&cards)?;
        }
        debug!(
            "store cycle finished: {} cards, changed={}",
            cards.len(),
            result.is_some()
        );
        Ok(result)
    }

    /// Appends a new card due on `today` and returns it.
    ///
    /// Blank question or answer is rejected before storage is touched.
    pub fn add(&self, question: &str, answer: &str, today: NaiveDate) -> StoreResult<Flashcard> {
        let card = Flashcard::new(question, answer, today)?;
        self.modify(|cards| {
            cards.push(card.clone());
            Some(())
        })?;
        info!("added card {}", card.id);
        Ok(card)
    }

    /// Replaces the first card with the same question text, keeping that card's id.
    /// Returns `false` when none matches.
    pub fn update_by_question_match(&self, card: &Flashcard) -> StoreResult<bool> {
        let replaced = self.modify(|cards| {
            let slot = cards.iter_mut().find(|c| c.question == card.question)?;
            *slot = Flashcard {
                id: slot.id,
                ..card.clone()
            };
            Some(())
        })?;
        Ok(replaced.is_some())
    }

    /// Replaces the card with the same id. Returns `false` when the id is unknown.
    pub fn update(&self, card: &Flashcard) -> StoreResult<bool> {
        let replaced = self.modify(|cards| {
            let slot = cards.iter_mut().find(|c| c.id == card.id)?;
            *slot = card.clone();
            Some(())
        })?;
        Ok(replaced.is_some())
    }

    /// Removes the card at `index`; out-of-range indices are ignored.
    pub fn delete_at(&self, index: usize) -> StoreResult<bool> {
        let removed = self.modify(|cards| (index < cards.len()).then(|| cards.remove(index)))?;
        if let Some(card) = &removed {
            info!("deleted card {} at position {}", card.id, index);
        }
        Ok(removed.is_some())
    }

    pub fn delete(&self, id: CardId) -> StoreResult<bool> {
        let removed = self.modify(|cards| {
            let index = cards.iter().position(|c| c.id == id)?;
            Some(cards.remove(index))
        })?;
        if removed.is_some() {
            info!("deleted card {id}");
        }
        Ok(removed.is_some())
    }

    /// Reschedules the card with `id` after a review and persists it.
    ///
    /// Returns the updated card, or `None` when the id is unknown.
    pub fn record_review(
        &self,
        id: CardId,
        outcome: Outcome,
        today: NaiveDate,
    ) -> StoreResult<Option<Flashcard>> {
        let updated = self.modify(|cards| {
            let slot = cards.iter_mut().find(|c| c.id == id)?;
            *slot = record_outcome(slot, outcome, today);
            Some(slot.clone())
        })?;
        if let Some(card) = &updated {
            debug!(
                "card {} reviewed ({:?}): interval={} next_review={}",
                card.id, outcome, card.interval, card.next_review
            );
        }
        Ok(updated)
    }

    /// Appends `incoming`, giving a fresh id to any card whose id is already taken.
    ///
    /// Returns the number of cards appended.
    pub fn import(&self, incoming: Vec<Flashcard>) -> StoreResult<usize> {
        if incoming.is_empty() {
            return Ok(0);
        }
        let count = incoming.len();
        self.modify(|cards| {
            let mut taken: HashSet<CardId> = cards.iter().map(|c| c.id).collect();
            for mut card in incoming {
                if !taken.insert(card.id) {
                    card.id = CardId::generate();
                    taken.insert(card.id);
                }
                cards.push(card);
            }
            Some(())
        })?;
        info!("imported {count} cards");
        Ok(count)
    }
}
