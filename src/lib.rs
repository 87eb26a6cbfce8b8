pub mod database;
pub mod export;
pub mod models;
pub mod strokes;

pub use models::{Category, CategoryStore, Flashcard, PracticeMode, PracticeSession};
