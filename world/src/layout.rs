//! World layout description, validation, and the built-in yard.
//!
//! Layouts are authored in pixel coordinates and converted onto the
//! normalized pixel grid when the world is constructed. Capacity and
//! configuration problems are fatal at load time; nothing is silently
//! truncated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MAX_BLOCKS, MAX_WALLS};
use blockyard_core::collision::DEFAULT_SHRINK_PIXELS;

/// Fixed set of wall/block positions plus grid configuration, as supplied
/// by a TOML file or the built-in table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    /// Scale factor applied to the pixel grid.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Pixels trimmed per axis in every collision test.
    #[serde(default = "default_shrink_pixels")]
    pub collision_shrink_pixels: f32,
    /// Player origin in pixel coordinates.
    pub player: [f32; 2],
    /// Wall origins in pixel coordinates, in storage (and thus collision
    /// iteration) order.
    #[serde(default)]
    pub walls: Vec<[f32; 2]>,
    /// Block origins in pixel coordinates, in storage order.
    #[serde(default)]
    pub blocks: Vec<[f32; 2]>,
}

fn default_scale() -> f32 {
    1.0
}

fn default_shrink_pixels() -> f32 {
    DEFAULT_SHRINK_PIXELS
}

/// Reasons a layout is rejected before any world state is built.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// The layout exceeds the fixed wall capacity.
    #[error("layout places {count} walls but at most {max} are supported")]
    TooManyWalls {
        /// Number of walls requested by the layout.
        count: usize,
        /// Fixed wall capacity.
        max: usize,
    },
    /// The layout exceeds the fixed block capacity.
    #[error("layout places {count} blocks but at most {max} are supported")]
    TooManyBlocks {
        /// Number of blocks requested by the layout.
        count: usize,
        /// Fixed block capacity.
        max: usize,
    },
    /// The grid scale cannot produce a usable pixel unit.
    #[error("scale must be positive and finite (received {scale})")]
    InvalidScale {
        /// Scale supplied by the layout.
        scale: f32,
    },
    /// The collision shrink would widen rectangles instead of trimming.
    #[error("collision shrink must be finite and non-negative (received {shrink_pixels})")]
    InvalidShrink {
        /// Shrink supplied by the layout.
        shrink_pixels: f32,
    },
}

impl WorldLayout {
    /// Checks the layout against the fixed capacities and configuration
    /// bounds.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(LayoutError::InvalidScale { scale: self.scale });
        }
        if !(self.collision_shrink_pixels.is_finite() && self.collision_shrink_pixels >= 0.0) {
            return Err(LayoutError::InvalidShrink {
                shrink_pixels: self.collision_shrink_pixels,
            });
        }
        if self.walls.len() > MAX_WALLS {
            return Err(LayoutError::TooManyWalls {
                count: self.walls.len(),
                max: MAX_WALLS,
            });
        }
        if self.blocks.len() > MAX_BLOCKS {
            return Err(LayoutError::TooManyBlocks {
                count: self.blocks.len(),
                max: MAX_BLOCKS,
            });
        }
        Ok(())
    }

    /// Built-in yard used when no layout file is supplied: a walled floor,
    /// a two-block chain resting near the right wall, and two loose blocks.
    #[must_use]
    pub fn training_yard() -> Self {
        let mut walls = Vec::new();
        for index in 0..10 {
            walls.push([-160.0 + index as f32 * 32.0, -128.0]);
        }
        for index in 0..4 {
            walls.push([-160.0, -96.0 + index as f32 * 32.0]);
        }
        for index in 0..4 {
            walls.push([128.0, -96.0 + index as f32 * 32.0]);
        }

        Self {
            scale: 1.0,
            collision_shrink_pixels: DEFAULT_SHRINK_PIXELS,
            player: [-112.0, -96.0],
            walls,
            blocks: vec![[-32.0, -96.0], [0.0, -96.0], [64.0, -32.0], [-96.0, 16.0]],
        }
    }
}
