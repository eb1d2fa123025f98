//! # Karst Physics
//!
//! Kinematic platformer physics for Karst.
//!
//! This crate provides the simulation layer under the gameplay code:
//! - Kinematic bodies with gravity and velocity clamps
//! - Horizontal movement with acceleration, friction, and coyote time
//! - Minimum-translation collision resolution against rectangles
//! - The ordered terrain pass over tile grids and ad hoc geometry
//! - Physics tuning loaded from TOML
//!
//! The coordinate system is screen-style: y grows downward, so gravity is
//! positive and a jump starts with negative vertical velocity. All speeds are
//! world units per second; tick durations are passed in milliseconds.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod body;
pub mod config;
pub mod movement;
pub mod resolver;
pub mod terrain;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::body::*;
    pub use crate::config::*;
    pub use crate::movement::*;
    pub use crate::resolver::*;
    pub use crate::terrain::*;
}

pub use prelude::*;
