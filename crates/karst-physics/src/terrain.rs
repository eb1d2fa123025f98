//! Terrain collision pass.
//!
//! Resolves a body against static geometry as one ordered pass per tick:
//! candidates are collected around the body, vertical overlaps are resolved
//! before horizontal ones, and a short downward probe keeps a previously
//! grounded body attached across seams and small steps. The ordering gives a
//! single coherent outcome per tick instead of whatever order the tiles
//! happened to be visited in.

use karst_common::{Aabb, CellCoord, Vec2};

use crate::body::KinematicBody;
use crate::config::PhysicsConfig;
use crate::resolver::{penetration, ContactSide};

/// Grid of square tiles the simulation collides against.
///
/// The grid is read-only during a pass. Cells outside whatever region the
/// implementation knows about must report non-solid rather than fail.
pub trait TileGrid {
    /// Edge length of one tile in world units. Must be positive.
    fn tile_size(&self) -> f32;

    /// Whether the tile at the given cell is solid.
    fn is_solid(&self, cell: CellCoord) -> bool;
}

/// In-memory tile grid for tests.
#[derive(Debug)]
pub struct MockTileGrid {
    tile_size: f32,
    /// Set of solid cells (x, y)
    solid_cells: std::collections::HashSet<(i32, i32)>,
    /// Row from which every cell downward is solid
    ground_row: Option<i32>,
}

impl MockTileGrid {
    /// Creates an empty grid with the given tile size.
    #[must_use]
    pub fn new(tile_size: f32) -> Self {
        Self {
            tile_size,
            solid_cells: std::collections::HashSet::new(),
            ground_row: None,
        }
    }

    /// Marks a single cell solid.
    pub fn set_solid(&mut self, x: i32, y: i32) {
        self.solid_cells.insert((x, y));
    }

    /// Makes every cell at `y >= row` solid.
    pub fn set_ground_row(&mut self, row: i32) {
        self.ground_row = Some(row);
    }
}

impl TileGrid for MockTileGrid {
    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn is_solid(&self, cell: CellCoord) -> bool {
        if let Some(row) = self.ground_row {
            if cell.y >= row {
                return true;
            }
        }
        self.solid_cells.contains(&(cell.x, cell.y))
    }
}

/// Summary of one terrain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerrainContact {
    /// The body came to rest on a surface from above this pass
    pub landed: bool,
    /// The body struck a ceiling this pass
    pub hit_ceiling: bool,
    /// The body pressed against a wall this pass
    pub hit_wall: bool,
}

/// Ordered collision pass against tiles or ad hoc rectangles.
#[derive(Debug, Clone, Copy)]
pub struct TerrainPass {
    /// Separation margin left after each push-out
    epsilon: f32,
    /// Reach of the grounded-retention probe below the feet
    snap_distance: f32,
}

impl TerrainPass {
    /// Creates a pass with tuning from the config.
    #[must_use]
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            epsilon: config.collision_epsilon,
            snap_distance: config.ground_snap_distance,
        }
    }

    /// Resolves the body against a tile grid.
    ///
    /// Candidates are every solid tile within one tile of the body's
    /// rectangle, collected in row-major order.
    pub fn resolve<G: TileGrid>(&self, body: &mut KinematicBody, grid: &G) -> TerrainContact {
        let tile_size = grid.tile_size();
        if tile_size <= 0.0 {
            return TerrainContact::default();
        }

        let search = body.bounds().expanded(tile_size);
        let min = CellCoord::from_world(Vec2::new(search.min_x, search.min_y), tile_size);
        let max = CellCoord::from_world(Vec2::new(search.max_x, search.max_y), tile_size);

        let mut tiles = Vec::new();
        for cy in min.y..=max.y {
            for cx in min.x..=max.x {
                let cell = CellCoord::new(cx, cy);
                if grid.is_solid(cell) {
                    let corner = cell.to_world(tile_size);
                    tiles.push(Aabb::from_pos_size(corner.x, corner.y, tile_size, tile_size));
                }
            }
        }

        self.resolve_rects(body, &tiles)
    }

    /// Resolves the body against an explicit list of static rectangles.
    ///
    /// The pass owns the body's contact flags: `grounded` and `on_wall` are
    /// cleared on entry and re-earned by what actually resolves. Vertical
    /// overlaps resolve first, re-evaluating after every snap so flush tile
    /// seams stay quiet, then the retention probe, then horizontal overlaps.
    pub fn resolve_rects(&self, body: &mut KinematicBody, rects: &[Aabb]) -> TerrainContact {
        let mut contact = TerrainContact::default();
        let was_grounded = body.grounded;
        body.grounded = false;
        body.on_wall = false;

        // Vertical pass
        for rect in rects {
            let Some(pen) = penetration(&body.bounds(), rect) else {
                continue;
            };
            match pen.side {
                ContactSide::Top if body.velocity.y >= 0.0 => {
                    body.position.y -= pen.depth + self.epsilon;
                    body.velocity.y = 0.0;
                    body.grounded = true;
                    contact.landed = true;
                }
                ContactSide::Bottom if body.velocity.y < 0.0 => {
                    body.position.y += pen.depth + self.epsilon;
                    body.velocity.y = 0.0;
                    contact.hit_ceiling = true;
                }
                _ => {}
            }
        }

        // Grounded retention: a body that was supported last tick and is not
        // moving upward stays attached to a surface within the snap reach.
        if !contact.landed && was_grounded && body.velocity.y >= 0.0 && self.snap_distance > 0.0 {
            let bounds = body.bounds();
            let probe = Aabb::new(
                bounds.min_x,
                bounds.max_y,
                bounds.max_x,
                bounds.max_y + self.snap_distance,
            );

            let mut nearest_top: Option<f32> = None;
            for rect in rects {
                if !probe.overlaps(rect) {
                    continue;
                }
                // Only a face at or below the feet counts as support
                if rect.top() < bounds.max_y - self.epsilon {
                    continue;
                }
                match nearest_top {
                    Some(top) if top <= rect.top() => {}
                    _ => nearest_top = Some(rect.top()),
                }
            }

            if let Some(top) = nearest_top {
                body.position.y = top - self.epsilon - body.half_extents.y;
                body.grounded = true;
            }
        }

        // Horizontal pass
        for rect in rects {
            let Some(pen) = penetration(&body.bounds(), rect) else {
                continue;
            };
            match pen.side {
                ContactSide::Left => {
                    body.position.x -= pen.depth + self.epsilon;
                    if body.velocity.x > 0.0 {
                        body.velocity.x = 0.0;
                    }
                    body.on_wall = true;
                    contact.hit_wall = true;
                }
                ContactSide::Right => {
                    body.position.x += pen.depth + self.epsilon;
                    if body.velocity.x < 0.0 {
                        body.velocity.x = 0.0;
                    }
                    body.on_wall = true;
                    contact.hit_wall = true;
                }
                _ => {}
            }
        }

        contact
    }
}
