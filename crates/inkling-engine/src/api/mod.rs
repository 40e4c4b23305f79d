pub mod config;
pub mod types;

pub use config::{ClueForm, DifficultyTier, GameConfig};
pub use types::{NoteId, RequestSeq};
