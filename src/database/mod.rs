//! Persistence for the card collection.
//!
//! A backend only knows how to read and overwrite the whole ordered collection.
//! [`CardStore`] layers the card operations on top, each as one locked
//! load-modify-save cycle.

pub mod json_file;
pub mod memory;
pub mod sqlite;
pub mod store;

use crate::error::StoreResult;
use crate::models::Flashcard;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use store::CardStore;

pub trait CardBackend: Send + Sync {
    /// Reads the full collection. Storage that does not exist yet is an empty collection.
    fn load_all(&self) -> StoreResult<Vec<Flashcard>>;

    /// Replaces the full collection. On failure the previous contents stay intact.
    fn save_all(&self, cards: &[Flashcard]) -> StoreResult<()>;
}
