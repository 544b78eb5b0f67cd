//! Where and how the card collection is stored.
//!
//! Read from the environment:
//! - `FLASHCARDS_DATA_DIR`: directory holding the collection (default: platform data dir)
//! - `FLASHCARDS_BACKEND`: `json` (default) or `sqlite`

use crate::error::ConfigError;
use std::path::PathBuf;
use std::str::FromStr;

pub const DATA_DIR_VAR: &str = "FLASHCARDS_DATA_DIR";
pub const BACKEND_VAR: &str = "FLASHCARDS_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Json,
    Sqlite,
}

impl Backend {
    fn file_name(self) -> &'static str {
        match self {
            Backend::Json => "flashcards.json",
            Backend::Sqlite => "flashcards.sqlite3",
        }
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Backend::Json),
            "sqlite" | "sqlite3" => Ok(Backend::Sqlite),
            _ => Err(ConfigError::UnknownBackend(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(DATA_DIR_VAR).ok(),
            std::env::var(BACKEND_VAR).ok(),
        )
    }

    fn from_values(data_dir: Option<String>, backend: Option<String>) -> Result<Self, ConfigError> {
        let backend = match backend.filter(|value| !value.trim().is_empty()) {
            Some(value) => value.parse()?,
            None => Backend::default(),
        };
        let data_dir = data_dir
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Ok(Self { backend, data_dir })
    }

    /// Full path of the collection file for the configured backend.
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(self.backend.file_name())
    }
}

fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("flashcards");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(None, None).unwrap();
        assert_eq!(config.backend, Backend::Json);
        assert!(config.data_path().ends_with("flashcards/flashcards.json"));
    }

    #[test]
    fn test_explicit_values() {
        let config =
            AppConfig::from_values(Some("/tmp/cards".to_string()), Some(" SQLite ".to_string()))
                .unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.data_path(), PathBuf::from("/tmp/cards/flashcards.sqlite3"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config =
            AppConfig::from_values(Some("  ".to_string()), Some(String::new())).unwrap();
        assert_eq!(config.backend, Backend::Json);
        assert_ne!(config.data_dir, PathBuf::from("  "));
    }

    #[test]
    fn test_unknown_backend() {
        let err = AppConfig::from_values(None, Some("yaml".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBackend(ref name) if name == "yaml"));
    }
}
