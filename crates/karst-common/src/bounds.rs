//! Axis-aligned rectangles for collision detection.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Axis-aligned bounding box in world space.
///
/// Stored as min/max corners. With y growing downward, `top` is the
/// smaller y (the visually upper edge) and `bottom` is the larger y
/// (a standing body's feet).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum X coordinate
    pub min_x: f32,
    /// Minimum Y coordinate
    pub min_y: f32,
    /// Maximum X coordinate
    pub max_x: f32,
    /// Maximum Y coordinate
    pub max_y: f32,
}

impl Aabb {
    /// Creates a new Aabb from min/max corners.
    #[must_use]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates an Aabb from a top-left corner and a size.
    #[must_use]
    pub const fn from_pos_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    /// Creates an Aabb from center and half-extents.
    #[must_use]
    pub fn from_center(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Returns the center of the Aabb.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the Aabb.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the Aabb.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// X coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.min_x
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub const fn right(&self) -> f32 {
        self.max_x
    }

    /// Y coordinate of the top edge (smaller y).
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.min_y
    }

    /// Y coordinate of the bottom edge (larger y).
    #[must_use]
    pub const fn bottom(&self) -> f32 {
        self.max_y
    }

    /// Checks if this Aabb overlaps with another.
    ///
    /// Comparisons are strict, so rectangles that merely share an edge or a
    /// corner do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Returns the Aabb translated by a vector.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Expands the Aabb by a margin on all sides.
    #[must_use]
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_creation() {
        let aabb = Aabb::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(aabb.width(), 10.0);
        assert_eq!(aabb.height(), 20.0);
    }

    #[test]
    fn test_aabb_from_pos_size() {
        let aabb = Aabb::from_pos_size(80.0, 180.0, 64.0, 32.0);
        assert_eq!(aabb.left(), 80.0);
        assert_eq!(aabb.top(), 180.0);
        assert_eq!(aabb.right(), 144.0);
        assert_eq!(aabb.bottom(), 212.0);
    }

    #[test]
    fn test_aabb_from_center() {
        let aabb = Aabb::from_center(Vec2::new(10.0, 10.0), 5.0, 10.0);
        assert_eq!(aabb.min_x, 5.0);
        assert_eq!(aabb.max_x, 15.0);
        assert_eq!(aabb.min_y, 0.0);
        assert_eq!(aabb.max_y, 20.0);
    }

    #[test]
    fn test_aabb_overlaps() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 15.0, 15.0);
        let c = Aabb::new(20.0, 20.0, 30.0, 30.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_edge_contact_is_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right_neighbor = Aabb::new(10.0, 0.0, 20.0, 10.0);
        let below_neighbor = Aabb::new(0.0, 10.0, 10.0, 20.0);
        let corner_neighbor = Aabb::new(10.0, 10.0, 20.0, 20.0);

        assert!(!a.overlaps(&right_neighbor));
        assert!(!a.overlaps(&below_neighbor));
        assert!(!a.overlaps(&corner_neighbor));
    }

    #[test]
    fn test_aabb_translated() {
        let aabb = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let translated = aabb.translated(Vec2::new(5.0, 5.0));
        assert_eq!(translated.min_x, 5.0);
        assert_eq!(translated.min_y, 5.0);
        assert_eq!(translated.max_x, 15.0);
        assert_eq!(translated.max_y, 15.0);
    }

    #[test]
    fn test_aabb_expanded() {
        let aabb = Aabb::new(5.0, 5.0, 15.0, 15.0);
        let expanded = aabb.expanded(2.0);
        assert_eq!(expanded.min_x, 3.0);
        assert_eq!(expanded.min_y, 3.0);
        assert_eq!(expanded.max_x, 17.0);
        assert_eq!(expanded.max_y, 17.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_aabb() -> impl Strategy<Value = Aabb> {
            (
                -1000.0f32..1000.0,
                -1000.0f32..1000.0,
                0.1f32..200.0,
                0.1f32..200.0,
            )
                .prop_map(|(x, y, w, h)| Aabb::from_pos_size(x, y, w, h))
        }

        proptest! {
            #[test]
            fn overlap_is_symmetric(a in arb_aabb(), b in arb_aabb()) {
                prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            }

            #[test]
            fn overlap_with_self(a in arb_aabb()) {
                prop_assert!(a.overlaps(&a));
            }

            #[test]
            fn shared_edge_never_overlaps(a in arb_aabb(), h in 0.1f32..200.0) {
                // A rectangle sitting exactly on top of `a`
                let stacked = Aabb::new(a.min_x, a.min_y - h, a.max_x, a.min_y);
                prop_assert!(!a.overlaps(&stacked));
                prop_assert!(!stacked.overlaps(&a));
            }

            #[test]
            fn translated_preserves_size(a in arb_aabb(), dx in -500.0f32..500.0, dy in -500.0f32..500.0) {
                let t = a.translated(Vec2::new(dx, dy));
                prop_assert!((t.width() - a.width()).abs() < 1e-3);
                prop_assert!((t.height() - a.height()).abs() < 1e-3);
            }
        }
    }
}
