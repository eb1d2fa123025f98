//! Kinematic body state and integration.

use serde::{Deserialize, Serialize};

use karst_common::{Aabb, Vec2};

use crate::config::PhysicsConfig;

/// A rectangular body moved by the simulation.
///
/// `position` is the center of the body; the collision rectangle extends
/// `half_extents` from it on each axis. The body does not collide on its
/// own: callers integrate it and run it through a collision pass, which is
/// the only place `grounded` and `on_wall` are earned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Center position in world space
    pub position: Vec2,
    /// Current velocity in units per second
    pub velocity: Vec2,
    /// Half the body's width and height
    pub half_extents: Vec2,
    /// Whether the body is supported from below
    pub grounded: bool,
    /// Whether the body pressed against a wall during the last pass
    pub on_wall: bool,
    /// Gravity acceleration for this body (positive = down)
    gravity: f32,
    /// Maximum upward speed
    max_rise_speed: f32,
    /// Maximum downward speed
    max_fall_speed: f32,
}

impl KinematicBody {
    /// Creates a body at the given center with the given half-extents,
    /// taking its vertical tuning from the config.
    #[must_use]
    pub fn new(position: Vec2, half_extents: Vec2, config: &PhysicsConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extents,
            grounded: false,
            on_wall: false,
            gravity: config.gravity,
            max_rise_speed: config.max_rise_speed,
            max_fall_speed: config.max_fall_speed,
        }
    }

    /// Applies gravity for one tick.
    ///
    /// Grounded bodies hold a vertical velocity of exactly zero instead of
    /// accumulating acceleration against their support. Airborne bodies
    /// accelerate downward, clamped to the rise and fall speed limits.
    /// Non-positive `delta_ms` does nothing.
    pub fn apply_gravity(&mut self, delta_ms: f32) {
        if delta_ms <= 0.0 {
            return;
        }
        if self.grounded {
            self.velocity.y = 0.0;
            return;
        }
        self.velocity.y += self.gravity * (delta_ms / 1000.0);
        self.velocity.y = self
            .velocity
            .y
            .clamp(-self.max_rise_speed, self.max_fall_speed);
    }

    /// Integrates position from velocity for one tick.
    ///
    /// The move is tentative; a collision pass afterwards corrects it.
    /// Non-positive `delta_ms` does nothing.
    pub fn update_position(&mut self, delta_ms: f32) {
        if delta_ms <= 0.0 {
            return;
        }
        self.position += self.velocity * (delta_ms / 1000.0);
    }

    /// The body's collision rectangle at its current position.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents.x, self.half_extents.y)
    }

    /// Gravity acceleration this body was built with.
    #[must_use]
    pub const fn gravity(&self) -> f32 {
        self.gravity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_body() -> KinematicBody {
        KinematicBody::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(16.0, 24.0),
            &PhysicsConfig::default(),
        )
    }

    #[test]
    fn test_bounds_centered_on_position() {
        let body = test_body();
        let bounds = body.bounds();
        assert_eq!(bounds.left(), 84.0);
        assert_eq!(bounds.right(), 116.0);
        assert_eq!(bounds.top(), 76.0);
        assert_eq!(bounds.bottom(), 124.0);
    }

    #[test]
    fn test_gravity_accumulates_while_airborne() {
        let mut body = test_body();
        body.apply_gravity(100.0);
        // 800 u/s^2 for 0.1 s
        assert!((body.velocity.y - 80.0).abs() < 1e-4);
        body.apply_gravity(100.0);
        assert!((body.velocity.y - 160.0).abs() < 1e-4);
    }

    #[test]
    fn test_gravity_zeroed_while_grounded() {
        let mut body = test_body();
        body.velocity.y = 50.0;
        body.grounded = true;
        body.apply_gravity(16.67);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_gravity_clamped_to_fall_speed() {
        let mut body = test_body();
        for _ in 0..100 {
            body.apply_gravity(100.0);
        }
        assert_eq!(body.velocity.y, 600.0);
    }

    #[test]
    fn test_rise_speed_clamped() {
        let mut body = test_body();
        body.velocity.y = -10_000.0;
        body.apply_gravity(16.67);
        assert!(body.velocity.y >= -600.0);
    }

    #[test]
    fn test_update_position_scales_by_dt() {
        let mut body = test_body();
        body.velocity = Vec2::new(200.0, -100.0);
        body.update_position(500.0);
        assert!((body.position.x - 200.0).abs() < 1e-4);
        assert!((body.position.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_and_negative_dt_are_no_ops() {
        let mut body = test_body();
        body.velocity = Vec2::new(200.0, 300.0);
        let before = body.clone();

        body.apply_gravity(0.0);
        body.update_position(0.0);
        body.apply_gravity(-16.67);
        body.update_position(-16.67);

        assert_eq!(body.position, before.position);
        assert_eq!(body.velocity, before.velocity);
    }
}
