//! Tile-grid coordinates.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Index of a cell in a tile grid.
///
/// Cell (0, 0) covers world space `[0, tile_size)` on both axes; negative
/// world positions map to negative cell indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    /// X index in cell space
    pub x: i32,
    /// Y index in cell space
    pub y: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a world-space point, given the grid's tile size.
    #[must_use]
    pub fn from_world(point: Vec2, tile_size: f32) -> Self {
        Self {
            x: (point.x / tile_size).floor() as i32,
            y: (point.y / tile_size).floor() as i32,
        }
    }

    /// World-space position of this cell's top-left corner.
    #[must_use]
    pub fn to_world(self, tile_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * tile_size, self.y as f32 * tile_size)
    }
}
