//! Transitive block-push resolution.
//!
//! A push either commits a whole chain of touching blocks, rejects against
//! a wall somewhere in the chain, or is ignored when the player's only
//! contact with a seeded block is a diagonal corner clip. Exactly one of
//! those outcomes applies per invocation and no partial chain movement
//! ever persists.

use blockyard_core::{collision, grid::PixelGrid, Axis, Direction, Event};
use glam::Vec2;

use crate::{latch::Cooldowns, Block, Wall};

/// Upper bound on closure passes. The wall/block capacity limits make the
/// closure settle long before this; exceeding it is a logic error, not a
/// truncation point.
pub(crate) const MAX_PUSH_PASSES: usize = 64;

/// Pixels of slack distinguishing a genuine side contact from a diagonal
/// corner clip.
pub(crate) const ADJACENCY_SLACK_PIXELS: f32 = 0.1;

/// Immutable geometry plus the mutable block storage a push operates on.
pub(crate) struct PushContext<'a> {
    pub(crate) grid: &'a PixelGrid,
    pub(crate) shrink_pixels: f32,
    pub(crate) walls: &'a [Wall],
    pub(crate) wall_extent: Vec2,
    pub(crate) blocks: &'a mut [Block],
    pub(crate) block_extent: Vec2,
    pub(crate) player_extent: Vec2,
}

/// Resolves one push attempt along `direction`, returning the player's
/// possibly clamped tentative position.
///
/// Seeds every block overlapping the tentative player AABB, then grows the
/// candidate set to the fixed point of "a moved candidate overlaps it". A
/// wall anywhere in the closure rejects the whole chain: the player clamps
/// against the first-seeded block and the direction's cooldown schedule is
/// cancelled. Otherwise every candidate shifts by the push distance.
pub(crate) fn resolve(
    ctx: &mut PushContext<'_>,
    cooldowns: &mut Cooldowns,
    tentative: Vec2,
    direction: Direction,
    step: Vec2,
    out_events: &mut Vec<Event>,
) -> Vec2 {
    let delta = direction.displacement(step);

    let mut candidates: Vec<usize> = Vec::new();
    let mut member = vec![false; ctx.blocks.len()];
    for (index, block) in ctx.blocks.iter().enumerate() {
        if !collision::overlaps(
            ctx.grid,
            tentative,
            ctx.player_extent,
            block.origin,
            ctx.block_extent,
            ctx.shrink_pixels,
        ) {
            continue;
        }
        if corner_clip_only(ctx, tentative, block.origin, direction.axis()) {
            out_events.push(Event::PushIgnored {
                direction,
                block: block.id,
            });
            return tentative;
        }
        candidates.push(index);
        member[index] = true;
    }
    if candidates.is_empty() {
        return tentative;
    }

    let mut passes = 0;
    loop {
        passes += 1;
        debug_assert!(passes <= MAX_PUSH_PASSES, "push closure failed to settle");

        let mut grew = false;
        let mut cursor = 0;
        while cursor < candidates.len() {
            let moved = ctx.blocks[candidates[cursor]].origin + delta;

            for wall in ctx.walls {
                if collision::overlaps(
                    ctx.grid,
                    moved,
                    ctx.block_extent,
                    wall.origin,
                    ctx.wall_extent,
                    ctx.shrink_pixels,
                ) {
                    let leader = &ctx.blocks[candidates[0]];
                    cooldowns.cancel(direction);
                    out_events.push(Event::PushBlocked {
                        direction,
                        leader: leader.id,
                    });
                    return clamp_to_leader(
                        tentative,
                        leader.origin,
                        ctx.player_extent,
                        ctx.block_extent,
                        direction,
                    );
                }
            }

            for (index, other) in ctx.blocks.iter().enumerate() {
                if member[index] {
                    continue;
                }
                if collision::overlaps(
                    ctx.grid,
                    moved,
                    ctx.block_extent,
                    other.origin,
                    ctx.block_extent,
                    ctx.shrink_pixels,
                ) {
                    candidates.push(index);
                    member[index] = true;
                    grew = true;
                }
            }

            cursor += 1;
        }

        if !grew {
            break;
        }
    }

    let mut moved_blocks = Vec::with_capacity(candidates.len());
    for &index in &candidates {
        let block = &mut ctx.blocks[index];
        block.origin = ctx.grid.snap(block.origin + delta);
        moved_blocks.push(block.id);
    }
    out_events.push(Event::BlocksPushed {
        direction,
        blocks: moved_blocks,
    });
    tentative
}

/// A seeded block whose cross-axis center offset from the player exceeds
/// the block extent (minus slack) only touches the player at a corner, and
/// such contact never qualifies as a push.
fn corner_clip_only(
    ctx: &PushContext<'_>,
    player_origin: Vec2,
    block_origin: Vec2,
    axis: Axis,
) -> bool {
    let player_center = player_origin + ctx.player_extent * 0.5;
    let block_center = block_origin + ctx.block_extent * 0.5;
    match axis {
        Axis::Horizontal => {
            let offset = (player_center.y - block_center.y).abs();
            offset > ctx.block_extent.y - ctx.grid.unit_y() * ADJACENCY_SLACK_PIXELS
        }
        Axis::Vertical => {
            let offset = (player_center.x - block_center.x).abs();
            offset > ctx.block_extent.x - ctx.grid.unit_x() * ADJACENCY_SLACK_PIXELS
        }
    }
}

fn clamp_to_leader(
    tentative: Vec2,
    leader_origin: Vec2,
    player_extent: Vec2,
    block_extent: Vec2,
    direction: Direction,
) -> Vec2 {
    match direction {
        Direction::Right => Vec2::new(leader_origin.x - player_extent.x, tentative.y),
        Direction::Left => Vec2::new(leader_origin.x + block_extent.x, tentative.y),
        Direction::Up => Vec2::new(tentative.x, leader_origin.y - player_extent.y),
        Direction::Down => Vec2::new(tentative.x, leader_origin.y + block_extent.y),
    }
}
