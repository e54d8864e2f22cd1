//! Pan/drag state for the infinite canvas.
//!
//! Pure state machine: the host feeds pointer coordinates in and reads the CSS
//! transform back out. Card positions are untouched by panning.

use serde::Serialize;

/// How long the recenter animation runs before `finish_transition` is due.
pub const RECENTER_TRANSITION_MS: u32 = 500;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CanvasView {
    offset: Offset,
    dragging: bool,
    /// Pointer position minus the offset at drag start.
    drag_start: Offset,
    transitioning: bool,
}

impl CanvasView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.dragging = true;
        self.drag_start = Offset { x: x - self.offset.x, y: y - self.offset.y };
    }

    /// Returns true when the offset changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.dragging {
            return false;
        }
        self.offset = Offset { x: x - self.drag_start.x, y: y - self.drag_start.y };
        true
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn pointer_leave(&mut self) {
        self.dragging = false;
    }

    /// Animate back to the origin. The host calls `finish_transition` after
    /// `RECENTER_TRANSITION_MS`.
    pub fn recenter(&mut self) {
        self.transitioning = true;
        self.offset = Offset::ZERO;
    }

    pub fn finish_transition(&mut self) {
        self.transitioning = false;
    }

    /// Whether the recenter control should be shown.
    pub fn has_moved(&self) -> bool {
        self.offset != Offset::ZERO
    }

    pub fn transform(&self) -> String {
        format!("translate3d({}px, {}px, 0)", self.offset.x, self.offset.y)
    }

    pub fn cursor(&self) -> &'static str {
        if self.dragging { "grabbing" } else { "grab" }
    }

    pub fn transition(&self) -> &'static str {
        if self.transitioning { "transform 0.5s ease-in-out" } else { "none" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_moves_offset() {
        let mut view = CanvasView::new();
        assert!(!view.has_moved());
        assert_eq!(view.cursor(), "grab");

        view.pointer_down(100.0, 100.0);
        assert!(view.is_dragging());
        assert_eq!(view.cursor(), "grabbing");

        assert!(view.pointer_move(150.0, 80.0));
        assert_eq!(view.offset(), Offset { x: 50.0, y: -20.0 });
        assert!(view.has_moved());
        assert_eq!(view.transform(), "translate3d(50px, -20px, 0)");

        view.pointer_up();
        assert!(!view.is_dragging());
    }

    #[test]
    fn test_second_drag_continues_from_offset() {
        let mut view = CanvasView::new();
        view.pointer_down(0.0, 0.0);
        view.pointer_move(30.0, 40.0);
        view.pointer_up();

        view.pointer_down(200.0, 200.0);
        view.pointer_move(210.0, 190.0);
        assert_eq!(view.offset(), Offset { x: 40.0, y: 30.0 });
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut view = CanvasView::new();
        assert!(!view.pointer_move(500.0, 500.0));
        assert_eq!(view.offset(), Offset::ZERO);

        view.pointer_down(0.0, 0.0);
        view.pointer_leave();
        assert!(!view.pointer_move(10.0, 10.0));
        assert_eq!(view.offset(), Offset::ZERO);
    }

    #[test]
    fn test_recenter() {
        let mut view = CanvasView::new();
        view.pointer_down(0.0, 0.0);
        view.pointer_move(-75.5, 12.0);
        view.pointer_up();

        view.recenter();
        assert!(!view.has_moved());
        assert!(view.is_transitioning());
        assert_eq!(view.transition(), "transform 0.5s ease-in-out");

        view.finish_transition();
        assert!(!view.is_transitioning());
        assert_eq!(view.transition(), "none");
    }
}
