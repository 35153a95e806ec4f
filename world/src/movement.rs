//! Player-versus-wall movement resolution.
//!
//! Each axis is resolved independently against the walls in storage order,
//! clamping onto the first overlapping wall's near edge. When both axes are
//! individually clear, the combined diagonal destination is tested once
//! more so the player cannot slip through a corner gap that neither
//! single-axis probe sees. Ties go to wall iteration order rather than
//! minimal penetration.

use blockyard_core::{collision, grid::PixelGrid};
use glam::Vec2;

use crate::Wall;

pub(crate) fn resolve(
    grid: &PixelGrid,
    shrink_pixels: f32,
    current: Vec2,
    tentative: Vec2,
    player_extent: Vec2,
    walls: &[Wall],
    wall_extent: Vec2,
) -> Vec2 {
    let mut next = tentative;
    let mut x_blocked = false;
    let mut y_blocked = false;

    let x_probe = Vec2::new(tentative.x, current.y);
    for wall in walls {
        if collision::overlaps(
            grid,
            x_probe,
            player_extent,
            wall.origin,
            wall_extent,
            shrink_pixels,
        ) {
            if tentative.x > current.x {
                next.x = wall.origin.x - player_extent.x;
            } else if tentative.x < current.x {
                next.x = wall.origin.x + wall_extent.x;
            }
            x_blocked = true;
            break;
        }
    }

    let y_probe = Vec2::new(current.x, tentative.y);
    for wall in walls {
        if collision::overlaps(
            grid,
            y_probe,
            player_extent,
            wall.origin,
            wall_extent,
            shrink_pixels,
        ) {
            if tentative.y > current.y {
                next.y = wall.origin.y - player_extent.y;
            } else if tentative.y < current.y {
                next.y = wall.origin.y + wall_extent.y;
            }
            y_blocked = true;
            break;
        }
    }

    if !x_blocked && !y_blocked {
        for wall in walls {
            if collision::overlaps(
                grid,
                tentative,
                player_extent,
                wall.origin,
                wall_extent,
                shrink_pixels,
            ) {
                return current;
            }
        }
    }

    next
}
