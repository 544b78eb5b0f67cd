use super::CardBackend;
use crate::error::StoreResult;
use crate::models::Flashcard;
use std::sync::{Mutex, PoisonError};

/// Keeps the collection in process memory only.
#[derive(Default)]
pub struct MemoryBackend {
    cards: Mutex<Vec<Flashcard>>,
}

impl MemoryBackend {
    pub fn with_cards(cards: Vec<Flashcard>) -> Self {
        Self {
            cards: Mutex::new(cards),
        }
    }
}

impl CardBackend for MemoryBackend {
    fn load_all(&self) -> StoreResult<Vec<Flashcard>> {
        Ok(self
            .cards
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save_all(&self, cards: &[Flashcard]) -> StoreResult<()> {
        *self.cards.lock().unwrap_or_else(PoisonError::into_inner) = cards.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::CardStore;
    use chrono::NaiveDate;

    #[test]
    fn test_seeded_collection() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let seed = vec![Flashcard::new("cześć", "hello", today).unwrap()];
        let store = CardStore::new(MemoryBackend::with_cards(seed.clone()));

        assert_eq!(store.load_all().unwrap(), seed);
        assert!(store.delete_at(0).unwrap());
        assert!(store.load_all().unwrap().is_empty());
    }
}
