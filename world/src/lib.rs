#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Block Yard.
//!
//! The world owns every entity between ticks: walls, pushable blocks, the
//! player with its cooldown timers, and the camera. Adapters and systems
//! submit [`Command`] values through [`apply`]; the world executes one
//! fixed tick at a time (latch acquisition, cadence, wall resolution, push
//! resolution, commit) and broadcasts [`Event`] values describing what
//! happened. Read access goes through the snapshot views in [`query`].

use blockyard_core::{
    grid::PixelGrid, BlockId, Command, Direction, Event, TickInput, WallId, STEP_PIXELS,
};
use glam::Vec2;

mod latch;
mod movement;
mod pushing;

pub mod layout;

pub use layout::{LayoutError, WorldLayout};

/// Side length in pixels shared by every wall.
pub const WALL_SIZE_PIXELS: f32 = 32.0;

/// Side length in pixels shared by every block.
pub const BLOCK_SIZE_PIXELS: f32 = 32.0;

/// Side length in pixels of the player.
pub const PLAYER_SIZE_PIXELS: f32 = 48.0;

/// Fixed wall capacity enforced when a layout is loaded.
pub const MAX_WALLS: usize = 64;

/// Fixed block capacity enforced when a layout is loaded.
pub const MAX_BLOCKS: usize = 64;

#[derive(Clone, Debug)]
pub(crate) struct Wall {
    pub(crate) id: WallId,
    pub(crate) origin: Vec2,
}

#[derive(Clone, Debug)]
pub(crate) struct Block {
    pub(crate) id: BlockId,
    pub(crate) origin: Vec2,
}

#[derive(Clone, Debug)]
struct Player {
    origin: Vec2,
    cooldowns: latch::Cooldowns,
}

#[derive(Clone, Copy, Debug, Default)]
struct Camera {
    offset: Vec2,
}

/// Represents the authoritative Block Yard world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: PixelGrid,
    shrink_pixels: f32,
    walls: Vec<Wall>,
    blocks: Vec<Block>,
    player: Player,
    camera: Camera,
    tick_index: u64,
}

impl World {
    /// Builds a world from a validated layout.
    ///
    /// Every position is converted onto the normalized pixel grid and
    /// snapped once here; ticks keep the invariant by re-snapping on
    /// commit. Identifier assignment follows storage order and stays
    /// stable for the lifetime of the world.
    pub fn from_layout(layout: &WorldLayout) -> Result<Self, LayoutError> {
        layout.validate()?;

        let grid = PixelGrid::new(layout.scale);
        let snap_px = |point: [f32; 2]| grid.snap(grid.pixels_to_normalized(Vec2::from(point)));

        let walls = layout
            .walls
            .iter()
            .enumerate()
            .map(|(index, origin)| Wall {
                id: WallId::new(index as u32),
                origin: snap_px(*origin),
            })
            .collect();
        let blocks = layout
            .blocks
            .iter()
            .enumerate()
            .map(|(index, origin)| Block {
                id: BlockId::new(index as u32),
                origin: snap_px(*origin),
            })
            .collect();

        Ok(Self {
            grid,
            shrink_pixels: layout.collision_shrink_pixels,
            walls,
            blocks,
            player: Player {
                origin: snap_px(layout.player),
                cooldowns: latch::Cooldowns::default(),
            },
            camera: Camera::default(),
            tick_index: 0,
        })
    }

    fn advance_tick(&mut self, input: &TickInput, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TickAdvanced {
            tick: self.tick_index,
        });

        self.player.cooldowns.acquire(input, out_events);

        let step = self.step_extent();
        let displacement = self.player.cooldowns.advance_cadence(step);

        let from = self.player.origin;
        let mut tentative = movement::resolve(
            &self.grid,
            self.shrink_pixels,
            from,
            from + displacement,
            self.player_extent(),
            &self.walls,
            self.wall_extent(),
        );

        let grid = self.grid;
        let shrink_pixels = self.shrink_pixels;
        let wall_extent = self.wall_extent();
        let block_extent = self.block_extent();
        let player_extent = self.player_extent();
        for direction in Direction::PUSH_ORDER {
            if self.player.cooldowns.timer(direction) == 0 {
                continue;
            }
            let mut ctx = pushing::PushContext {
                grid: &grid,
                shrink_pixels,
                walls: &self.walls,
                wall_extent,
                blocks: &mut self.blocks,
                block_extent,
                player_extent,
            };
            tentative = pushing::resolve(
                &mut ctx,
                &mut self.player.cooldowns,
                tentative,
                direction,
                step,
                out_events,
            );
        }

        let to = self.grid.snap(tentative);
        if to != from {
            self.player.origin = to;
            out_events.push(Event::PlayerMoved { from, to });
        }
    }

    fn wall_extent(&self) -> Vec2 {
        self.grid.pixels_to_normalized(Vec2::splat(WALL_SIZE_PIXELS))
    }

    fn block_extent(&self) -> Vec2 {
        self.grid
            .pixels_to_normalized(Vec2::splat(BLOCK_SIZE_PIXELS))
    }

    fn player_extent(&self) -> Vec2 {
        self.grid
            .pixels_to_normalized(Vec2::splat(PLAYER_SIZE_PIXELS))
    }

    fn step_extent(&self) -> Vec2 {
        self.grid.pixels_to_normalized(Vec2::splat(STEP_PIXELS))
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PanCamera { delta_pixels } => {
            world.camera.offset += world.grid.pixels_to_normalized(delta_pixels);
            out_events.push(Event::CameraPanned {
                offset: world.camera.offset,
            });
        }
        Command::Tick { input } => world.advance_tick(&input, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use blockyard_core::{grid::PixelGrid, BlockId, Direction, WallId};
    use glam::Vec2;

    use super::World;

    /// Provides the pixel grid the world snaps against.
    #[must_use]
    pub fn pixel_grid(world: &World) -> PixelGrid {
        world.grid
    }

    /// Number of ticks executed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's committed position and extent.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            origin: world.player.origin,
            extent: world.player_extent(),
        }
    }

    /// Camera offset in normalized space.
    #[must_use]
    pub fn camera_offset(world: &World) -> Vec2 {
        world.camera.offset
    }

    /// Captures the cooldown timers gating player movement.
    #[must_use]
    pub fn cooldowns(world: &World) -> CooldownSnapshot {
        CooldownSnapshot {
            up: world.player.cooldowns.timer(Direction::Up),
            left: world.player.cooldowns.timer(Direction::Left),
            down: world.player.cooldowns.timer(Direction::Down),
            right: world.player.cooldowns.timer(Direction::Right),
            global: world.player.cooldowns.global(),
        }
    }

    /// Captures a read-only view of every wall in storage order.
    #[must_use]
    pub fn wall_view(world: &World) -> WallView {
        let extent = world.wall_extent();
        WallView {
            snapshots: world
                .walls
                .iter()
                .map(|wall| WallSnapshot {
                    id: wall.id,
                    origin: wall.origin,
                    extent,
                })
                .collect(),
        }
    }

    /// Captures a read-only view of every block in storage order.
    #[must_use]
    pub fn block_view(world: &World) -> BlockView {
        let extent = world.block_extent();
        BlockView {
            snapshots: world
                .blocks
                .iter()
                .map(|block| BlockSnapshot {
                    id: block.id,
                    origin: block.origin,
                    extent,
                })
                .collect(),
        }
    }

    /// Immutable representation of the player used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Committed origin in normalized space.
        pub origin: Vec2,
        /// Extent in normalized space.
        pub extent: Vec2,
    }

    /// Immutable representation of the cooldown timers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CooldownSnapshot {
        /// Countdown gating upward movement.
        pub up: u8,
        /// Countdown gating leftward movement.
        pub left: u8,
        /// Countdown gating downward movement.
        pub down: u8,
        /// Countdown gating rightward movement.
        pub right: u8,
        /// Countdown gating the next acquisition.
        pub global: u8,
    }

    impl CooldownSnapshot {
        /// Countdown value for the provided direction.
        #[must_use]
        pub const fn timer(&self, direction: Direction) -> u8 {
            match direction {
                Direction::Up => self.up,
                Direction::Left => self.left,
                Direction::Down => self.down,
                Direction::Right => self.right,
            }
        }
    }

    /// Read-only snapshot describing every wall.
    #[derive(Clone, Debug, Default)]
    pub struct WallView {
        snapshots: Vec<WallSnapshot>,
    }

    impl WallView {
        /// Iterator over the captured wall snapshots in storage order.
        pub fn iter(&self) -> impl Iterator<Item = &WallSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<WallSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single wall.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct WallSnapshot {
        /// Identifier assigned at layout load.
        pub id: WallId,
        /// Snapped origin in normalized space.
        pub origin: Vec2,
        /// Extent in normalized space, shared by every wall.
        pub extent: Vec2,
    }

    /// Read-only snapshot describing every block.
    #[derive(Clone, Debug, Default)]
    pub struct BlockView {
        snapshots: Vec<BlockSnapshot>,
    }

    impl BlockView {
        /// Iterator over the captured block snapshots in storage order.
        pub fn iter(&self) -> impl Iterator<Item = &BlockSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<BlockSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single block.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct BlockSnapshot {
        /// Identifier assigned at layout load.
        pub id: BlockId,
        /// Snapped origin in normalized space.
        pub origin: Vec2,
        /// Extent in normalized space, shared by every block.
        pub extent: Vec2,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, query, World, WorldLayout};
    use blockyard_core::{BlockId, Command, Event, TickInput, WallId};
    use glam::Vec2;

    #[test]
    fn from_layout_assigns_storage_order_ids() {
        let world = World::from_layout(&WorldLayout::training_yard()).expect("valid layout");

        let walls = query::wall_view(&world).into_vec();
        for (index, wall) in walls.iter().enumerate() {
            assert_eq!(wall.id, WallId::new(index as u32));
        }

        let blocks = query::block_view(&world).into_vec();
        for (index, block) in blocks.iter().enumerate() {
            assert_eq!(block.id, BlockId::new(index as u32));
        }
    }

    #[test]
    fn from_layout_snaps_every_position() {
        let mut layout = WorldLayout::training_yard();
        layout.player = [-112.3, -95.8];
        layout.blocks = vec![[15.6, 32.4]];

        let world = World::from_layout(&layout).expect("valid layout");
        let grid = query::pixel_grid(&world);

        let player = query::player(&world);
        assert_eq!(player.origin, grid.snap(player.origin));

        for block in query::block_view(&world).iter() {
            assert_eq!(block.origin, grid.snap(block.origin));
        }
    }

    #[test]
    fn from_layout_rejects_invalid_layouts() {
        let mut layout = WorldLayout::training_yard();
        layout.scale = f32::INFINITY;
        assert!(World::from_layout(&layout).is_err());
    }

    #[test]
    fn pan_camera_accumulates_offsets() {
        let mut world = World::from_layout(&WorldLayout::training_yard()).expect("valid layout");
        let grid = query::pixel_grid(&world);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::PanCamera {
                delta_pixels: Vec2::new(10.0, -4.0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::PanCamera {
                delta_pixels: Vec2::new(-2.0, 6.0),
            },
            &mut events,
        );

        let expected = grid.pixels_to_normalized(Vec2::new(10.0, -4.0))
            + grid.pixels_to_normalized(Vec2::new(-2.0, 6.0));
        assert_eq!(query::camera_offset(&world), expected);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], Event::CameraPanned { .. }));
    }

    #[test]
    fn idle_tick_advances_the_clock_and_nothing_else() {
        let mut world = World::from_layout(&WorldLayout::training_yard()).expect("valid layout");
        let before = query::player(&world).origin;
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Tick {
                input: TickInput::default(),
            },
            &mut events,
        );

        assert_eq!(query::tick_index(&world), 1);
        assert_eq!(query::player(&world).origin, before);
        assert_eq!(events, vec![Event::TickAdvanced { tick: 1 }]);
    }
}
