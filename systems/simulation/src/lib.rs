#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-increment simulation clock that turns real frames into commands.
//!
//! The clock is a pure system: it never touches the world. Each real frame
//! it absorbs the (clamped) frame delta into an accumulator and emits one
//! [`Command::Tick`] per whole physics increment the accumulator holds,
//! carrying the frame's input snapshot. Leftover time is never lost or
//! duplicated. The camera pan rides along as its own command, at most once
//! per frame, because the pointer delta is a per-frame quantity that the
//! cooldown system does not gate.

use std::time::Duration;

use blockyard_core::{Command, TickInput};
use glam::Vec2;

/// Duration of one physics tick (1/60 s).
pub const TICK_DURATION: Duration = Duration::from_nanos(16_666_667);

/// Longest real frame the accumulator absorbs. Keeps a stall or a debugger
/// breakpoint from unleashing a burst of catch-up ticks.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Fixed-increment accumulator driving zero or more ticks per real frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulationClock {
    accumulator: Duration,
}

impl SimulationClock {
    /// Creates a clock with an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one real frame and emits the commands it owes.
    ///
    /// Returns the number of ticks emitted, which may be zero when the
    /// accumulator has not yet reached a full increment.
    pub fn handle(
        &mut self,
        frame_delta: Duration,
        input: &TickInput,
        out: &mut Vec<Command>,
    ) -> usize {
        let clamped = frame_delta.min(MAX_FRAME_DELTA);
        self.accumulator = self.accumulator.saturating_add(clamped);

        if input.pointer_delta != Vec2::ZERO {
            out.push(Command::PanCamera {
                delta_pixels: input.pointer_delta,
            });
        }

        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION {
            self.accumulator -= TICK_DURATION;
            out.push(Command::Tick { input: *input });
            ticks += 1;
        }
        ticks
    }

    /// Time absorbed but not yet simulated.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }
}
