pub mod api;
pub mod board;
pub mod core;
pub mod provider;

// Re-export key types at crate root for convenience
pub use api::config::{ClueForm, DifficultyTier, GameConfig};
pub use api::types::{NoteId, RequestSeq};
pub use board::color::{color_for, Rgb};
pub use board::notes::{Note, NoteBoard, ABSTRACTION_MAX};
pub use board::viewport::{Viewport, BOARD_EXTENT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
pub use crate::core::ledger::{Player, ScoreLedger, Standing};
pub use crate::core::scoring::{pass_delta, rating_delta, Evaluation};
pub use crate::core::session::{ChallengeRequest, Phase, RatingRequest, Session};
pub use provider::payload::{challenge_from_json, rating_from_json};
pub use provider::port::{Challenge, ChallengeProvider, ProviderError, RatingReply};
pub use provider::scripted::ScriptedProvider;
