//! Container for every category the user has defined. The whole store is
//! serialized as one JSON object (category name -> array of cards) and
//! persisted as a unit after every change.
use std::collections::BTreeMap;

use super::{Category, Flashcard};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Refusals reported by store mutations. The store is left untouched when
/// one of these is returned; callers decide whether to log or ignore.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("flashcard needs both an English gloss and a Chinese character")]
    EmptyField,

    #[error("no category named '{0}'")]
    UnknownCategory(String),

    #[error("category '{0}' already exists")]
    DuplicateCategory(String),
}

#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryStore {
    categories: BTreeMap<String, Vec<Flashcard>>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an empty category. Returns true if it was actually created;
    /// an empty name or an existing category is a no-op.
    pub fn create_category(&mut self, name: &str) -> bool {
        if name.is_empty() || self.categories.contains_key(name) {
            return false;
        }
        self.categories.insert(name.to_string(), Vec::new());
        true
    }

    /// Appends a card to an existing category. Cards are append-only and
    /// duplicates are allowed.
    pub fn add_card(&mut self, category_name: &str, card: Flashcard) -> Result<(), StoreError> {
        if card.english.is_empty() || card.chinese.is_empty() {
            return Err(StoreError::EmptyField);
        }
        let cards = self
            .categories
            .get_mut(category_name)
            .ok_or_else(|| StoreError::UnknownCategory(category_name.to_string()))?;
        cards.push(card);
        Ok(())
    }

    pub fn list_categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Cards of a category in insertion order; empty if the category is
    /// absent.
    pub fn get_cards(&self, category_name: &str) -> &[Flashcard] {
        self.categories
            .get(category_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contains(&self, category_name: &str) -> bool {
        self.categories.contains_key(category_name)
    }

    /// Snapshot of one category, for export.
    pub fn category(&self, name: &str) -> Option<Category> {
        self.categories.get(name).map(|cards| Category {
            name: name.to_string(),
            cards: cards.clone(),
        })
    }

    /// Adds a whole category, e.g. from an imported file. Existing
    /// categories are never replaced.
    pub fn insert_category(&mut self, category: Category) -> Result<(), StoreError> {
        if category.name.is_empty() {
            return Err(StoreError::EmptyField);
        }
        if self.categories.contains_key(&category.name) {
            return Err(StoreError::DuplicateCategory(category.name));
        }
        self.categories.insert(category.name, category.cards);
        Ok(())
    }
}
