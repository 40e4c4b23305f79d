// board/mod.rs
//
// The idea-board side of the app: placed notes on a fixed-extent logical
// square, a zoomable viewport over it, and the abstraction-level gradient.
// Independent of the game session; pointer events drive it directly.

pub mod color;
pub mod notes;
pub mod rng;
pub mod viewport;

pub use color::{color_for, Rgb};
pub use notes::{Note, NoteBoard, ABSTRACTION_MAX, PLACE_JITTER};
pub use viewport::{Viewport, BOARD_EXTENT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
