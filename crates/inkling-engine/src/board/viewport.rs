use glam::Vec2;
use serde::Serialize;

/// Zoom bounds and step. Requests outside the bounds are clamped, never
/// rejected.
pub const ZOOM_MIN: f32 = 0.2;
pub const ZOOM_MAX: f32 = 2.0;
pub const ZOOM_STEP: f32 = 0.1;
pub const ZOOM_DEFAULT: f32 = 1.0;

/// Side length of the logical board square, in board units. Zoom scales the
/// rendered size only; note positions always live in this unscaled space.
pub const BOARD_EXTENT: f32 = 5000.0;

/// Maps screen coordinates to board coordinates under a zoom factor.
/// Screen space is measured in pixels from the viewport's top-left corner;
/// `scroll` is how far the (scaled) board is scrolled in those pixels.
#[derive(Debug, Clone, Serialize)]
pub struct Viewport {
    zoom: f32,
    pub scroll: Vec2,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            zoom: ZOOM_DEFAULT,
            scroll: Vec2::ZERO,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor, clamped into [ZOOM_MIN, ZOOM_MAX].
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Rendered side length of the board at the current zoom.
    pub fn scaled_extent(&self) -> f32 {
        BOARD_EXTENT * self.zoom
    }

    /// Scroll by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    /// Convert a screen-space point (viewport-relative pixels) to unscaled
    /// board coordinates.
    pub fn screen_to_board(&self, point: Vec2) -> Vec2 {
        (self.scroll + point) / self.zoom
    }

    /// Board coordinates of the visible area's center.
    pub fn board_center(&self, viewport_size: Vec2) -> Vec2 {
        self.screen_to_board(viewport_size * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
