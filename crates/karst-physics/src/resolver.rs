//! Pairwise AABB overlap resolution.
//!
//! Given a body rectangle overlapping a static rectangle, resolution finds
//! the face with the least penetration, pushes the body back out through it,
//! and applies the side's velocity and contact effects.

use serde::{Deserialize, Serialize};

use karst_common::{Aabb, Vec2};

use crate::body::KinematicBody;

/// Which face of the static rectangle was struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactSide {
    /// The rectangle's upper face; the body landed on it
    Top,
    /// The rectangle's underside; the body bonked it from below
    Bottom,
    /// The rectangle's left face
    Left,
    /// The rectangle's right face
    Right,
    /// No contact
    #[default]
    None,
}

/// Minimum-translation penetration of a body rectangle into a static one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Struck face of the static rectangle
    pub side: ContactSide,
    /// Overlap depth along the push-out axis
    pub depth: f32,
}

/// Result of resolving a body against one static rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the rectangles overlapped at all
    pub collided: bool,
    /// Struck face of the static rectangle
    pub side: ContactSide,
    /// Unit normal of the struck face, pointing from the rectangle toward
    /// the body
    pub normal: Vec2,
    /// Overlap depth that was resolved
    pub overlap: f32,
}

impl CollisionResult {
    /// A result for two rectangles that do not overlap.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            collided: false,
            side: ContactSide::None,
            normal: Vec2::ZERO,
            overlap: 0.0,
        }
    }
}

impl Default for CollisionResult {
    fn default() -> Self {
        Self::none()
    }
}

/// Outward unit normal of a struck face.
#[must_use]
pub fn side_normal(side: ContactSide) -> Vec2 {
    match side {
        ContactSide::Top => Vec2::UP,
        ContactSide::Bottom => Vec2::DOWN,
        ContactSide::Left => Vec2::LEFT,
        ContactSide::Right => Vec2::RIGHT,
        ContactSide::None => Vec2::ZERO,
    }
}

/// Finds the least-penetrated face of `rect` for an overlapping `body`
/// rectangle, or `None` when they do not overlap (shared edges included).
///
/// When the horizontal and vertical depths are exactly equal the vertical
/// face wins, so a body clipping a corner resolves as a landing or bonk
/// rather than a wall hit.
#[must_use]
pub fn penetration(body: &Aabb, rect: &Aabb) -> Option<Penetration> {
    if !body.overlaps(rect) {
        return None;
    }

    // Depth past each face of the static rectangle
    let from_left = body.right() - rect.left();
    let from_right = rect.right() - body.left();
    let from_top = body.bottom() - rect.top();
    let from_bottom = rect.bottom() - body.top();

    let (h_side, h_depth) = if from_left <= from_right {
        (ContactSide::Left, from_left)
    } else {
        (ContactSide::Right, from_right)
    };
    let (v_side, v_depth) = if from_top <= from_bottom {
        (ContactSide::Top, from_top)
    } else {
        (ContactSide::Bottom, from_bottom)
    };

    if v_depth <= h_depth {
        Some(Penetration {
            side: v_side,
            depth: v_depth,
        })
    } else {
        Some(Penetration {
            side: h_side,
            depth: h_depth,
        })
    }
}

/// Resolves a body against one static rectangle.
///
/// Pushes the body out along the least-penetrated axis, leaving an `epsilon`
/// gap so the pair does not re-collide next tick, then applies the side's
/// effects:
///
/// - `Top`: unless the body is rising, downward motion stops and the body
///   becomes grounded.
/// - `Bottom`: upward motion stops; grounded is untouched.
/// - `Left`/`Right`: motion into the wall stops and `on_wall` is set;
///   grounded is untouched.
pub fn resolve(body: &mut KinematicBody, rect: &Aabb, epsilon: f32) -> CollisionResult {
    let bounds = body.bounds();
    let Some(pen) = penetration(&bounds, rect) else {
        return CollisionResult::none();
    };

    let push = pen.depth + epsilon;
    match pen.side {
        ContactSide::Top => {
            body.position.y -= push;
            if body.velocity.y >= 0.0 {
                body.velocity.y = 0.0;
                body.grounded = true;
            }
        }
        ContactSide::Bottom => {
            body.position.y += push;
            if body.velocity.y < 0.0 {
                body.velocity.y = 0.0;
            }
        }
        ContactSide::Left => {
            body.position.x -= push;
            if body.velocity.x > 0.0 {
                body.velocity.x = 0.0;
            }
            body.on_wall = true;
        }
        ContactSide::Right => {
            body.position.x += push;
            if body.velocity.x < 0.0 {
                body.velocity.x = 0.0;
            }
            body.on_wall = true;
        }
        ContactSide::None => {}
    }

    CollisionResult {
        collided: true,
        side: pen.side,
        normal: side_normal(pen.side),
        overlap: pen.depth,
    }
}
