#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Block Yard engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters capture a [`TickInput`]
//! snapshot once per frame, the simulation clock translates frames into
//! [`Command`] values, the world executes those commands via its `apply`
//! entry point, and then broadcasts [`Event`] values describing what the
//! tick actually did. The two leaf components with no state of their own,
//! the pixel grid and the collision test, live here as pure modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub mod collision;
pub mod grid;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Block Yard.";

/// Value loaded into a cooldown timer when its direction is acquired.
pub const COOLDOWN_TICKS: u8 = 8;

/// Distance in pixels covered by a single discrete movement step.
pub const STEP_PIXELS: f32 = 8.0;

/// Movement directions available to the player, one per tracked key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing Y (the `W` key).
    Up,
    /// Movement toward decreasing X (the `A` key).
    Left,
    /// Movement toward decreasing Y (the `S` key).
    Down,
    /// Movement toward increasing X (the `D` key).
    Right,
}

impl Direction {
    /// Every direction in key order (`W`, `A`, `S`, `D`).
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Adjacent-direction pairs recognised as diagonal combos, checked in
    /// this order before any single-direction activation.
    pub const COMBO_PAIRS: [(Direction, Direction); 4] = [
        (Direction::Up, Direction::Left),
        (Direction::Left, Direction::Down),
        (Direction::Down, Direction::Right),
        (Direction::Right, Direction::Up),
    ];

    /// Fixed order in which active directions are offered to the push
    /// resolver each tick.
    pub const PUSH_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Axis the direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// Sign of the direction along its axis in normalized space.
    #[must_use]
    pub const fn polarity(self) -> f32 {
        match self {
            Direction::Up | Direction::Right => 1.0,
            Direction::Down | Direction::Left => -1.0,
        }
    }

    /// Signed single-axis displacement produced by one step of the given
    /// per-axis magnitudes.
    #[must_use]
    pub fn displacement(self, step: Vec2) -> Vec2 {
        match self.axis() {
            Axis::Horizontal => Vec2::new(self.polarity() * step.x, 0.0),
            Axis::Vertical => Vec2::new(0.0, self.polarity() * step.y),
        }
    }
}

/// Axis of movement within the normalized plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    Horizontal,
    /// The Y axis.
    Vertical,
}

/// Unique identifier assigned to a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallId(u32);

impl WallId {
    /// Creates a new wall identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pushable block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(u32);

impl BlockId {
    /// Creates a new block identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable per-frame snapshot of the tracked input state.
///
/// Captured once per real frame by the windowing adapter; every tick run
/// during that frame observes the same snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    /// Whether the up key (`W`) is held.
    pub up: bool,
    /// Whether the left key (`A`) is held.
    pub left: bool,
    /// Whether the down key (`S`) is held.
    pub down: bool,
    /// Whether the right key (`D`) is held.
    pub right: bool,
    /// Raw pointer movement since the previous frame, in pixels, with +Y
    /// pointing up to match normalized space.
    pub pointer_delta: Vec2,
}

impl TickInput {
    /// Reports whether the key associated with the direction is held.
    #[must_use]
    pub const fn pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Left => self.left,
            Direction::Down => self.down,
            Direction::Right => self.right,
        }
    }

    /// Reports whether any tracked key is held.
    #[must_use]
    pub const fn any_pressed(&self) -> bool {
        self.up || self.left || self.down || self.right
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Moves the camera offset by the provided pixel delta, bypassing the
    /// cooldown system.
    PanCamera {
        /// Pointer movement for the frame, in pixels.
        delta_pixels: Vec2,
    },
    /// Advances the simulation by exactly one fixed tick.
    Tick {
        /// Input snapshot captured for the frame this tick belongs to.
        input: TickInput,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation advanced by one tick.
    TickAdvanced {
        /// Index of the tick that just ran.
        tick: u64,
    },
    /// Confirms that a single direction acquired its cooldown timer.
    DirectionActivated {
        /// Direction whose timer was loaded.
        direction: Direction,
    },
    /// Confirms that an adjacent-direction pair acquired both timers.
    ComboActivated {
        /// First direction of the recognised pair.
        first: Direction,
        /// Second direction of the recognised pair.
        second: Direction,
    },
    /// Confirms that the player's committed position changed this tick.
    PlayerMoved {
        /// Position before the tick, in normalized space.
        from: Vec2,
        /// Position after the tick, in normalized space.
        to: Vec2,
    },
    /// Confirms that a chain of blocks moved together.
    BlocksPushed {
        /// Direction of the push.
        direction: Direction,
        /// Every block in the committed chain, in discovery order.
        blocks: Vec<BlockId>,
    },
    /// Reports that a push was rejected because the chain met a wall.
    PushBlocked {
        /// Direction of the rejected push.
        direction: Direction,
        /// First-seeded block the player was clamped against.
        leader: BlockId,
    },
    /// Reports that a push was ignored because the only contact was a
    /// diagonal corner clip.
    PushIgnored {
        /// Direction of the ignored push.
        direction: Direction,
        /// Block whose adjacency failed the push eligibility test.
        block: BlockId,
    },
    /// Confirms that the camera offset changed.
    CameraPanned {
        /// Camera offset after the pan, in normalized space.
        offset: Vec2,
    },
}
