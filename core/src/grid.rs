//! Pixel-grid mapping between screen pixels and normalized space.
//!
//! All collision math runs in a renderer-agnostic normalized space spanning
//! `-1.0..=1.0` over a 960×540 virtual surface. The grid converts pixel
//! quantities into that space and snaps stored positions onto exact pixel
//! multiples so that repeated float accumulation can never drift two
//! pixel-aligned objects out of exact alignment.

use glam::Vec2;

/// Normalized-space distance covered by one unscaled pixel along the X axis.
pub const X_UNITS_PER_PIXEL: f32 = 2.0 / 960.0;

/// Normalized-space distance covered by one unscaled pixel along the Y axis.
pub const Y_UNITS_PER_PIXEL: f32 = 2.0 / 540.0;

/// Linear pixel-to-normalized mapping with pixel-grid snapping.
///
/// Stateless apart from the configured scale; every operation is a pure,
/// total function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelGrid {
    scale: f32,
}

impl PixelGrid {
    /// Creates a grid that maps pixels through the provided scale factor.
    ///
    /// Non-positive or non-finite scales are coerced to `1.0` so the grid
    /// can never produce a degenerate unit.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self { scale }
    }

    /// Scale factor applied on top of the per-axis pixel constants.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Normalized distance of one scaled pixel along the X axis.
    #[must_use]
    pub fn unit_x(&self) -> f32 {
        X_UNITS_PER_PIXEL * self.scale
    }

    /// Normalized distance of one scaled pixel along the Y axis.
    #[must_use]
    pub fn unit_y(&self) -> f32 {
        Y_UNITS_PER_PIXEL * self.scale
    }

    /// Converts a pixel-space quantity into normalized space.
    #[must_use]
    pub fn pixels_to_normalized(&self, pixels: Vec2) -> Vec2 {
        Vec2::new(pixels.x * self.unit_x(), pixels.y * self.unit_y())
    }

    /// Snaps a normalized-space point onto the nearest pixel multiple.
    ///
    /// Idempotent: `snap(snap(p)) == snap(p)` for every finite `p`.
    #[must_use]
    pub fn snap(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            snap_axis(point.x, self.unit_x()),
            snap_axis(point.y, self.unit_y()),
        )
    }
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn snap_axis(value: f32, unit: f32) -> f32 {
    (value / unit + 0.5).floor() * unit
}
