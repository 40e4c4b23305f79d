use glam::Vec2;
use serde::Serialize;

use crate::api::types::NoteId;
use crate::board::rng::Rng;
use crate::board::viewport::{ZOOM_MAX, ZOOM_MIN};

/// Top of the concreteness-to-abstraction scale.
pub const ABSTRACTION_MAX: u8 = 100;

/// Placement jitter in board units per axis, so successive notes dropped at
/// the viewport center don't stack perfectly.
pub const PLACE_JITTER: f32 = 20.0;

/// A placed idea: text, where it sits on the abstraction scale, and its
/// position in unscaled board space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    pub abstraction: u8,
    pub pos: Vec2,
}

/// An active drag, captured at press time. Holding the starting pointer and
/// note positions keeps the math incremental-error-free: every move computes
/// from the original anchor, not from the previous move.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    note_id: NoteId,
    start_pointer: Vec2,
    start_pos: Vec2,
}

/// The set of placed notes plus the (at most one) active drag session.
/// Most-recent-first ordering is a display convention only.
#[derive(Debug)]
pub struct NoteBoard {
    notes: Vec<Note>,
    next_id: u32,
    drag: Option<DragSession>,
    rng: Rng,
}

impl NoteBoard {
    pub fn new() -> Self {
        Self::with_seed(0x1dea)
    }

    /// Deterministic board for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
            drag: None,
            rng: Rng::new(seed),
        }
    }

    /// Place a note near `center` (board coordinates), jittered by up to
    /// ±PLACE_JITTER per axis. Blank text is rejected locally: no note is
    /// created and nothing changes. Abstraction is clamped onto the scale.
    pub fn place(&mut self, text: &str, abstraction: u8, center: Vec2) -> Option<NoteId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = NoteId(self.next_id);
        self.next_id += 1;
        let jitter = Vec2::new(
            self.rng.next_range(-PLACE_JITTER, PLACE_JITTER),
            self.rng.next_range(-PLACE_JITTER, PLACE_JITTER),
        );
        self.notes.insert(
            0,
            Note {
                id,
                text: text.to_string(),
                abstraction: abstraction.min(ABSTRACTION_MAX),
                pos: center + jitter,
            },
        );
        Some(id)
    }

    /// Remove a note. Ends the drag first if that note was being dragged.
    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        if self.dragging() == Some(id) {
            self.drag = None;
        }
        let idx = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(idx))
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Notes in display order, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn clear(&mut self) {
        self.drag = None;
        self.notes.clear();
    }

    // -- Drag session --

    /// Begin dragging a note. `pointer` is in screen pixels. Replaces any
    /// drag already in progress. Returns false for an unknown note.
    pub fn begin_drag(&mut self, id: NoteId, pointer: Vec2) -> bool {
        match self.get(id) {
            Some(note) => {
                self.drag = Some(DragSession {
                    note_id: id,
                    start_pointer: pointer,
                    start_pos: note.pos,
                });
                true
            }
            None => false,
        }
    }

    /// Move the dragged note. The pointer delta is measured in screen pixels
    /// and divided by the zoom factor to land in unscaled board units. The
    /// zoom is clamped into the viewport's range so a zero or negative value
    /// can never produce a non-finite position. No-op when no drag is active.
    pub fn update_drag(&mut self, pointer: Vec2, zoom: f32) {
        let Some(session) = self.drag else {
            return;
        };
        let delta = (pointer - session.start_pointer) / zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == session.note_id) {
            note.pos = session.start_pos + delta;
        }
    }

    /// End the drag session. Idempotent: calling with no drag active is a
    /// no-op. No snapping, no collision resolution.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Id of the note currently being dragged, if any.
    pub fn dragging(&self) -> Option<NoteId> {
        self.drag.map(|d| d.note_id)
    }
}

impl Default for NoteBoard {
    fn default() -> Self {
        Self::new()
    }
}
