//! Click-drag panning for the tiled overview.

use crate::viewport::ViewportState;

/// Tracks one in-progress drag against window-local coordinates.
///
/// Holds its own anchor instead of capturing surrounding state; outside an
/// active drag the controller is inert.
#[derive(Debug, Default)]
pub struct PanController {
    active: bool,
    anchor: (f64, f64),
}

impl PanController {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.active = true;
        self.anchor = (x, y);
    }

    /// Apply the movement since the last anchor to the viewport offsets.
    ///
    /// Dragging right moves the view left: the delta is subtracted, each
    /// axis clamped to `[0, max(0, buffer - window)]`, and the anchor moves
    /// to the current position. Returns `true` if the offsets changed.
    pub fn on_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        viewport: &mut ViewportState,
        buf_w: u32,
        buf_h: u32,
    ) -> bool {
        if !self.active {
            return false;
        }
        let dx = (x - self.anchor.0).round() as i64;
        let dy = (y - self.anchor.1).round() as i64;
        self.anchor = (x, y);

        let max_x = i64::from(buf_w.saturating_sub(viewport.win_w));
        let max_y = i64::from(buf_h.saturating_sub(viewport.win_h));
        let new_x = (i64::from(viewport.x) - dx).clamp(0, max_x) as u32;
        let new_y = (i64::from(viewport.y) - dy).clamp(0, max_y) as u32;
        let changed = new_x != viewport.x || new_y != viewport.y;
        viewport.x = new_x;
        viewport.y = new_y;
        changed
    }

    pub fn on_pointer_up(&mut self) {
        self.active = false;
    }
}
