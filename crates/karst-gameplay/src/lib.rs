//! # Karst Gameplay
//!
//! Gameplay layer for Karst: everything between raw input and the physics
//! simulation.
//!
//! This crate provides:
//! - Input mapping from keys to per-tick intents
//! - The player action controller with jump buffering and jump cut
//! - Gameplay events (jumped, landed, hit ceiling) over an event bus
//! - Fixed timestep accumulation for deterministic simulation
//! - The visual sync seam toward whatever renders the body

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod controller;
pub mod events;
pub mod input;
pub mod timestep;
pub mod visual;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::controller::*;
    pub use crate::events::*;
    pub use crate::input::*;
    pub use crate::timestep::*;
    pub use crate::visual::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use karst_common::{EntityId, Vec2};
    use karst_physics::{MockTileGrid, PhysicsConfig};

    #[test]
    fn test_frame_driven_session() {
        // A small host loop: variable frames in, fixed ticks out
        let mut grid = MockTileGrid::new(16.0);
        grid.set_ground_row(8);

        let bus = EventBus::default();
        let mut controller = ActionController::new(
            EntityId::new(),
            Vec2::new(100.0, 100.0),
            Vec2::new(16.0, 24.0),
            &PhysicsConfig::default(),
        );
        controller.connect_events(bus.sender());

        let mut stepper = FixedStep::default();
        let mut visual = RecordingVisual::new();
        let mut map = InputMap::new();

        let frames = [16.0f32, 18.0, 15.0, 33.0, 16.0, 17.0, 16.5, 16.0, 17.0, 16.0];
        let mut total_ticks = 0;
        for (i, &frame) in frames.iter().enumerate() {
            // Press jump on the fourth frame, release two frames later
            map.update_key(KeyCode::Space, (3..5).contains(&i));
            let intent = map.sample();
            map.end_frame();

            for _ in 0..stepper.advance(frame) {
                controller.tick(&intent, &grid, &mut visual, stepper.step_ms());
                total_ticks += 1;
            }
        }

        assert!(total_ticks > 0);
        assert_eq!(visual.positions.len(), total_ticks);
        assert!(bus
            .drain()
            .iter()
            .any(|e| matches!(e, GameplayEvent::Landed { .. })));
    }
}
