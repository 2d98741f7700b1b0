use crate::surface::{Snapshot, Surface};

/// Whole-surface snapshots are cheap to reason about but not free to hold,
/// so the undo stack is capped and the oldest checkpoints fall off the back.
pub const MAX_HISTORY: usize = 64;

/// Undo/redo over whole-surface checkpoints. A snapshot lives on exactly one
/// stack at a time; starting a new gesture discards the redo branch.
#[derive(Default)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// Checkpoints the surface at the start of a mutating gesture. Called
    /// once per gesture, never mid-gesture.
    pub fn begin_gesture(&mut self, surface: &Surface) {
        self.undo.push(surface.snapshot());
        let overflow = self.undo.len().saturating_sub(MAX_HISTORY);
        if overflow > 0 {
            self.undo.drain(0..overflow);
        }
        self.redo.clear();
    }

    /// Restores the most recent checkpoint, parking the current state on the
    /// redo stack. Returns false (and leaves the surface alone) when there is
    /// nothing to undo.
    pub fn undo(&mut self, surface: &mut Surface) -> bool {
        let Some(snapshot) = self.undo.pop() else {
            return false;
        };
        self.redo.push(surface.snapshot());
        // Dimensions are fixed per session, so restore cannot mismatch here.
        let _ = surface.restore(&snapshot);
        true
    }

    pub fn redo(&mut self, surface: &mut Surface) -> bool {
        let Some(snapshot) = self.redo.pop() else {
            return false;
        };
        self.undo.push(surface.snapshot());
        let _ = surface.restore(&snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Rgba;

    fn paint(surface: &mut Surface, x: i32, value: u8) {
        surface.set(x, 0, Rgba([value, value, value, 255])).unwrap();
    }

    #[test]
    fn undo_redo_round_trip() {
        let mut surface = Surface::new(8, 1, Rgba::WHITE);
        let mut history = History::new();

        // Three gestures, each painting one pixel.
        for gesture in 0..3 {
            history.begin_gesture(&surface);
            paint(&mut surface, gesture, gesture as u8);
        }
        let final_state = surface.snapshot();

        for _ in 0..3 {
            assert!(history.undo(&mut surface));
        }
        assert_eq!(surface.snapshot(), Surface::new(8, 1, Rgba::WHITE).snapshot());

        for _ in 0..3 {
            assert!(history.redo(&mut surface));
        }
        assert_eq!(surface.snapshot(), final_state);
    }

    #[test]
    fn undo_then_redo_cycles_deterministically() {
        let mut surface = Surface::new(4, 1, Rgba::WHITE);
        let mut history = History::new();
        history.begin_gesture(&surface);
        paint(&mut surface, 0, 1);
        let after = surface.snapshot();

        for _ in 0..3 {
            assert!(history.undo(&mut surface));
            assert_eq!(surface.snapshot(), Surface::new(4, 1, Rgba::WHITE).snapshot());
            assert!(history.redo(&mut surface));
            assert_eq!(surface.snapshot(), after);
        }
    }

    #[test]
    fn new_gesture_invalidates_redo() {
        let mut surface = Surface::new(4, 1, Rgba::WHITE);
        let mut history = History::new();

        history.begin_gesture(&surface);
        paint(&mut surface, 0, 1);
        assert!(history.undo(&mut surface));
        assert!(history.can_redo());

        history.begin_gesture(&surface);
        paint(&mut surface, 1, 2);
        assert!(!history.can_redo());
        let diverged = surface.snapshot();
        assert!(!history.redo(&mut surface));
        assert_eq!(surface.snapshot(), diverged);
    }

    #[test]
    fn empty_stacks_are_no_ops() {
        let mut surface = Surface::new(4, 1, Rgba::WHITE);
        let mut history = History::new();
        let before = surface.snapshot();
        assert!(!history.undo(&mut surface));
        assert!(!history.redo(&mut surface));
        assert_eq!(surface.snapshot(), before);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn depth_cap_drops_oldest_checkpoints() {
        let mut surface = Surface::new(4, 1, Rgba::WHITE);
        let mut history = History::new();
        for gesture in 0..(MAX_HISTORY + 5) {
            history.begin_gesture(&surface);
            paint(&mut surface, 0, (gesture % 256) as u8);
        }
        let mut undone = 0;
        while history.undo(&mut surface) {
            undone += 1;
        }
        assert_eq!(undone, MAX_HISTORY);
    }
}
