//! Category is a named, append-only list of flashcards. This is also the
//! shape written to exported JSON files.
use super::Flashcard;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub cards: Vec<Flashcard>,
}

impl Default for Category {
    fn default() -> Self {
        Self {
            name: "My Category".to_string(),
            cards: Vec::new(),
        }
    }
}
