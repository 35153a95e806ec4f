//! Epsilon-tolerant axis-aligned overlap testing.
//!
//! Every rectangle parameter is snapped onto the pixel grid before the
//! test, and both extents are shrunk by a small pixel epsilon so that two
//! flush-adjacent objects never register as overlapping.

use glam::Vec2;

use crate::grid::PixelGrid;

/// Pixels trimmed from each axis of both rectangles before the overlap
/// test. Tunable; callers pass it explicitly so configurations can widen or
/// narrow the tolerance.
pub const DEFAULT_SHRINK_PIXELS: f32 = 0.05;

/// Reports whether two axis-aligned rectangles overlap.
///
/// Origins are lower-left corners and extents are widths/heights, all in
/// normalized space. The test is symmetric in its two rectangles and has no
/// side effects.
#[must_use]
pub fn overlaps(
    grid: &PixelGrid,
    origin_a: Vec2,
    extent_a: Vec2,
    origin_b: Vec2,
    extent_b: Vec2,
    shrink_pixels: f32,
) -> bool {
    let a = grid.snap(origin_a);
    let b = grid.snap(origin_b);
    let shrink = grid.pixels_to_normalized(Vec2::splat(shrink_pixels));
    let ea = grid.snap(extent_a) - shrink;
    let eb = grid.snap(extent_b) - shrink;

    a.x < b.x + eb.x && b.x < a.x + ea.x && a.y < b.y + eb.y && b.y < a.y + ea.y
}
