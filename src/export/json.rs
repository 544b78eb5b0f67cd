//! JSON import/export module for card collections.
//! Files use the same layout as the JSON store, so a store file can be imported directly.

use crate::database::json_file::{decode_cards, encode_cards, write_atomic};
use crate::error::StoreResult;
use crate::models::Flashcard;
use log::info;
use std::fs;
use std::path::Path;

/// Exports cards to a JSON file at the specified path.
pub fn export_json_to_path(cards: &[Flashcard], path: &Path) -> StoreResult<()> {
    let json = encode_cards(cards)?;
    write_atomic(path, &json)?;
    info!("exported {} cards to {}", cards.len(), path.display());
    Ok(())
}

/// Imports cards from a JSON file in either the versioned or the bare-list layout.
/// Returns an error if the file doesn't exist or contains invalid cards.
pub fn import_json(path: &Path) -> StoreResult<Vec<Flashcard>> {
    let contents = fs::read_to_string(path)?;
    let (_, cards) = decode_cards(&contents)?;
    info!("read {} cards from {}", cards.len(), path.display());
    Ok(cards)
}
