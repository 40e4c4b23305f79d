use serde::{Deserialize, Serialize};

/// Unique identifier for a note on the idea board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(pub u32);

/// Monotonic sequence number tagging an outstanding provider request.
/// A delivery whose seq does not match the currently pending request is stale
/// and must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestSeq(pub u64);
