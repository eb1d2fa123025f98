//! Visual synchronization seam.
//!
//! The simulation owns position; whatever draws the body only ever receives
//! it. Nothing flows back from the visual layer into physics.

use karst_common::Vec2;

/// Receiver for per-tick position updates.
pub trait VisualSink {
    /// Called once per tick with the body's post-resolution position.
    fn sync_visual(&mut self, position: Vec2);
}

/// Sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVisual;

impl VisualSink for NullVisual {
    fn sync_visual(&mut self, _position: Vec2) {}
}

/// Sink that records every update, for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingVisual {
    /// Positions in the order they were pushed
    pub positions: Vec<Vec2>,
}

impl RecordingVisual {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent position pushed, if any.
    #[must_use]
    pub fn last(&self) -> Option<Vec2> {
        self.positions.last().copied()
    }
}

impl VisualSink for RecordingVisual {
    fn sync_visual(&mut self, position: Vec2) {
        self.positions.push(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_visual_keeps_order() {
        let mut sink = RecordingVisual::new();
        sink.sync_visual(Vec2::new(1.0, 2.0));
        sink.sync_visual(Vec2::new(3.0, 4.0));

        assert_eq!(sink.positions.len(), 2);
        assert_eq!(sink.positions[0], Vec2::new(1.0, 2.0));
        assert_eq!(sink.last(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_null_visual_accepts_anything() {
        let mut sink = NullVisual;
        sink.sync_visual(Vec2::new(f32::MAX, f32::MIN));
    }
}
