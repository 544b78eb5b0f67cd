pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use config::AppConfig;
pub use database::CardStore;
pub use error::{ConfigError, StoreError, StoreResult};
pub use models::{CardId, Flashcard, Outcome, record_outcome, select_due};
