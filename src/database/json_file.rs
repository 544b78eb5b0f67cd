//! Collection stored as a pretty-printed JSON document.
//!
//! Current layout is `{"version": 1, "cards": [...]}`. A bare array of cards is
//! the unversioned layout (version 0); it is accepted on load and rewritten in
//! the current layout so that generated ids persist.

use super::CardBackend;
use crate::error::{StoreError, StoreResult};
use crate::models::Flashcard;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u64 = 1;

#[derive(Serialize)]
struct Document<'a> {
    version: u64,
    cards: &'a [Flashcard],
}

/// Serializes cards in the current layout.
pub fn encode_cards(cards: &[Flashcard]) -> StoreResult<String> {
    let document = Document {
        version: FORMAT_VERSION,
        cards,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parses either layout, returning the layout version and the cards.
pub fn decode_cards(text: &str) -> StoreResult<(u64, Vec<Flashcard>)> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| StoreError::Parse(format!("invalid JSON: {e}")))?;

    let (version, cards) = match value {
        Value::Array(items) => (0, Value::Array(items)),
        Value::Object(mut fields) => {
            let version = match fields.remove("version") {
                None => 0,
                Some(v) => v.as_u64().ok_or_else(|| {
                    StoreError::Parse(format!("version must be a non-negative integer, got {v}"))
                })?,
            };
            let cards = fields
                .remove("cards")
                .ok_or_else(|| StoreError::Parse("missing `cards` field".to_string()))?;
            (version, cards)
        }
        other => {
            return Err(StoreError::Parse(format!(
                "expected a list of cards, got {other}"
            )));
        }
    };

    if version > FORMAT_VERSION {
        return Err(StoreError::Parse(format!(
            "unsupported format version {version} (newest known is {FORMAT_VERSION})"
        )));
    }

    let cards: Vec<Flashcard> = serde_json::from_value(cards)
        .map_err(|e| StoreError::Parse(format!("malformed card record: {e}")))?;
    if let Some(card) = cards.iter().find(|card| card.interval == 0) {
        return Err(StoreError::Parse(format!(
            "invalid interval 0 for card `{}`",
            card.question
        )));
    }
    Ok((version, cards))
}

/// Atomically replaces `path` with `contents` (write to a sibling temp file, then rename).
pub fn write_atomic(path: &Path, contents: &str) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path);
    let result = File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp_path, path));

    if let Err(err) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CardBackend for JsonFileBackend {
    fn load_all(&self) -> StoreResult<Vec<Flashcard>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no collection at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let (version, cards) = decode_cards(&text)?;
        if version < FORMAT_VERSION {
            info!(
                "upgrading {} from format version {} to {}",
                self.path.display(),
                version,
                FORMAT_VERSION
            );
            // Read-only storage still loads; ids are regenerated until a write succeeds.
            if let Err(err) = self.save_all(&cards) {
                warn!("could not upgrade {}: {err}", self.path.display());
            }
        }
        Ok(cards)
    }

    fn save_all(&self, cards: &[Flashcard]) -> StoreResult<()> {
        let json = encode_cards(cards)?;
        write_atomic(&self.path, &json)?;
        debug!("wrote {} cards to {}", cards.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_cards() -> Vec<Flashcard> {
        vec![
            Flashcard::new("hello", "cześć", day(2024, 1, 1)).unwrap(),
            Flashcard::new("goodbye", "do widzenia", day(2024, 1, 2)).unwrap(),
        ]
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("absent.json"));
        assert!(backend.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested/dir/cards.json"));
        let cards = sample_cards();

        backend.save_all(&cards).unwrap();
        assert_eq!(backend.load_all().unwrap(), cards);

        let raw = fs::read_to_string(backend.path()).unwrap();
        assert!(raw.contains("\"version\": 1"));
        assert!(raw.contains("\"next_review\": \"2024-01-02\""));
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cards.json");
        let backend = JsonFileBackend::new(&path);
        let cards = sample_cards();
        backend.save_all(&cards).unwrap();

        // A directory squatting on the temp path makes the write fail.
        fs::create_dir(dir.path().join("cards.json.tmp")).unwrap();

        let err = backend.save_all(&cards[..1]).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(backend.load_all().unwrap(), cards);
    }

    #[test]
    fn test_legacy_array_is_upgraded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flashcards.json");
        fs::write(
            &path,
            r#"[
  {
    "question": "2+2",
    "answer": "4",
    "interval": 2,
    "next_review": "2024-01-03",
    "correct_count": 1
  }
]"#,
        )
        .unwrap();
        let backend = JsonFileBackend::new(&path);

        let first = backend.load_all().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].question, "2+2");
        assert_eq!(first[0].next_review, day(2024, 1, 3));

        let second = backend.load_all().unwrap();
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cards.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        let err = JsonFileBackend::new(&path).load_all().unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_malformed_date_is_parse_error() {
        let text = r#"[{"question": "q", "answer": "a", "interval": 1,
                        "next_review": "01/02/2024", "correct_count": 0}]"#;
        assert!(matches!(decode_cards(text), Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_zero_interval_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cards.json");
        fs::write(
            &path,
            r#"[{"question": "q", "answer": "a", "interval": 0,
                 "next_review": "2024-01-01", "correct_count": 0}]"#,
        )
        .unwrap();

        let err = JsonFileBackend::new(&path).load_all().unwrap_err();
        assert!(matches!(err, StoreError::Parse(ref msg) if msg.contains("interval 0")));
    }

    #[test]
    fn test_legacy_array_loads_when_upgrade_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cards.json");
        let legacy = r#"[{"question": "q", "answer": "a", "interval": 1,
                          "next_review": "2024-01-01", "correct_count": 0}]"#;
        fs::write(&path, legacy).unwrap();
        // A directory squatting on the temp path makes the upgrade write fail.
        fs::create_dir(dir.path().join("cards.json.tmp")).unwrap();

        let cards = JsonFileBackend::new(&path).load_all().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "q");
        assert_eq!(fs::read_to_string(&path).unwrap(), legacy);
    }

    #[test]
    fn test_future_version_rejected() {
        let text = r#"{"version": 7, "cards": []}"#;
        let err = decode_cards(text).unwrap_err();
        assert!(err.to_string().contains("unsupported format version 7"));
    }

    #[test]
    fn test_object_without_version_is_version_zero() {
        let (version, cards) = decode_cards(r#"{"cards": []}"#).unwrap();
        assert_eq!(version, 0);
        assert!(cards.is_empty());
    }
}
