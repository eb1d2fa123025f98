//! Horizontal movement, jumping, and the coyote window.

use serde::{Deserialize, Serialize};

use crate::body::KinematicBody;
use crate::config::PhysicsConfig;

/// Drives a body's horizontal velocity from a movement direction and gates
/// jumping on ground contact.
///
/// The controller mirrors the body's grounded flag so the coyote window can
/// start on the exact tick the body leaves its support; callers sync it with
/// [`set_grounded`](Self::set_grounded) after every collision pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementController {
    /// Horizontal acceleration while input is held
    acceleration: f32,
    /// Maximum horizontal speed
    max_run_speed: f32,
    /// Horizontal deceleration while no input is held
    friction: f32,
    /// Length of the coyote window
    coyote_time_ms: f32,
    /// Time left in the current coyote window
    coyote_remaining_ms: f32,
    /// Grounded state as of the last sync
    grounded: bool,
}

impl MovementController {
    /// Creates a controller with tuning from the config.
    #[must_use]
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            acceleration: config.acceleration,
            max_run_speed: config.max_run_speed,
            friction: config.friction,
            coyote_time_ms: config.coyote_time_ms,
            coyote_remaining_ms: 0.0,
            grounded: false,
        }
    }

    /// Accelerates toward the input direction, or decelerates to a stop.
    ///
    /// `direction` is clamped to `[-1, 1]`. While it is non-zero the body
    /// accelerates and its speed is capped at the run speed; while it is
    /// zero, friction bleeds speed off and snaps it to exactly zero once the
    /// remaining speed is below one tick of friction, so the body never
    /// oscillates around rest. Non-positive `delta_ms` does nothing.
    pub fn apply_move(&self, body: &mut KinematicBody, direction: f32, delta_ms: f32) {
        if delta_ms <= 0.0 {
            return;
        }
        let dt = delta_ms / 1000.0;
        let direction = direction.clamp(-1.0, 1.0);

        if direction != 0.0 {
            body.velocity.x += direction * self.acceleration * dt;
            body.velocity.x = body.velocity.x.clamp(-self.max_run_speed, self.max_run_speed);
        } else {
            let drop = self.friction * dt;
            if body.velocity.x.abs() <= drop {
                body.velocity.x = 0.0;
            } else {
                body.velocity.x -= body.velocity.x.signum() * drop;
            }
        }
    }

    /// Launches a jump, overwriting vertical velocity with the full launch
    /// speed upward.
    ///
    /// Clears ground contact and the coyote window so the jump cannot be
    /// doubled out of stale state.
    pub fn jump(&mut self, body: &mut KinematicBody, launch_velocity: f32) {
        body.velocity.y = -launch_velocity;
        body.grounded = false;
        self.grounded = false;
        self.coyote_remaining_ms = 0.0;
    }

    /// Ticks the coyote window down while airborne. Never goes below zero.
    pub fn update_coyote(&mut self, delta_ms: f32) {
        if delta_ms <= 0.0 || self.grounded {
            return;
        }
        self.coyote_remaining_ms = (self.coyote_remaining_ms - delta_ms).max(0.0);
    }

    /// Syncs the grounded mirror from the collision pass.
    ///
    /// A true-to-false transition opens the coyote window at its full
    /// configured length.
    pub fn set_grounded(&mut self, grounded: bool) {
        if self.grounded && !grounded {
            self.coyote_remaining_ms = self.coyote_time_ms;
        }
        self.grounded = grounded;
    }

    /// Whether a jump may start: on the ground, or within the coyote window.
    #[must_use]
    pub fn can_jump(&self) -> bool {
        self.grounded || self.coyote_remaining_ms > 0.0
    }

    /// Time remaining in the coyote window, in milliseconds.
    #[must_use]
    pub fn coyote_remaining_ms(&self) -> f32 {
        self.coyote_remaining_ms
    }
}
