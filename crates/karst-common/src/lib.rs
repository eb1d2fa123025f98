//! # Karst Common
//!
//! Shared foundation types for the Karst movement core.
//!
//! This crate provides the types used across all Karst subsystems:
//! - 2D vector math (y grows downward)
//! - Axis-aligned rectangles for collision
//! - Tile-grid cell coordinates
//! - Entity IDs
//! - Common error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod bounds;
pub mod coords;
pub mod error;
pub mod ids;
pub mod math;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bounds::*;
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::math::*;
}

pub use prelude::*;
