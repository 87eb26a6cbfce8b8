pub mod category;
pub mod category_store;
pub mod flashcard;
pub mod session;

pub use category::Category;
pub use category_store::{CategoryStore, StoreError};
pub use flashcard::Flashcard;
pub use session::{PracticeMode, PracticeSession};
