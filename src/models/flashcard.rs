//! Flashcard is one vocabulary entry: English gloss, pinyin and the Chinese
//! character (or short string) itself.
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Flashcard {
    pub english: String,
    /// Empty for cards saved before the field existed.
    #[serde(default)]
    pub pinyin: String,
    pub chinese: String,
}

impl Flashcard {
    pub fn new(english: &str, pinyin: &str, chinese: &str) -> Self {
        Self {
            english: english.to_string(),
            pinyin: pinyin.to_string(),
            chinese: chinese.to_string(),
        }
    }
}
