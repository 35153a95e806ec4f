//! Cooldown state machine that converts held keys into paced movement.
//!
//! Four per-direction countdown timers plus one global timer gate every
//! player movement. Acquisition only happens while the global timer is
//! idle; a recognised adjacent-direction pair takes precedence over
//! single-direction activation. While a direction timer runs, its axis
//! contributes one discrete step on every even pre-decrement value, which
//! spaces exactly four steps over a full countdown.

use blockyard_core::{Direction, Event, TickInput, COOLDOWN_TICKS};
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cooldowns {
    up: u8,
    left: u8,
    down: u8,
    right: u8,
    global: u8,
}

impl Cooldowns {
    /// Loads timers from the frame's key snapshot.
    ///
    /// Combos are checked before single directions; the first recognised
    /// pair wins the whole acquisition. With no pair held, every held
    /// direction is loaded at once.
    pub(crate) fn acquire(&mut self, input: &TickInput, out_events: &mut Vec<Event>) {
        if self.global != 0 {
            return;
        }

        for (first, second) in Direction::COMBO_PAIRS {
            if input.pressed(first) && input.pressed(second) {
                self.load(first);
                self.load(second);
                self.global = COOLDOWN_TICKS;
                out_events.push(Event::ComboActivated { first, second });
                return;
            }
        }

        let mut acquired = false;
        for direction in Direction::ALL {
            if input.pressed(direction) {
                self.load(direction);
                acquired = true;
                out_events.push(Event::DirectionActivated { direction });
            }
        }
        if acquired {
            self.global = COOLDOWN_TICKS;
        }
    }

    /// Runs one tick of the cadence: collects the displacement owed by
    /// every active timer whose pre-decrement value is even, then
    /// decrements all timers including the global one.
    pub(crate) fn advance_cadence(&mut self, step: Vec2) -> Vec2 {
        let mut displacement = Vec2::ZERO;
        for direction in Direction::ALL {
            let timer = self.timer_mut(direction);
            if *timer == 0 {
                continue;
            }
            if *timer % 2 == 0 {
                displacement += direction.displacement(step);
            }
            *timer -= 1;
        }
        self.global = self.global.saturating_sub(1);
        displacement
    }

    /// Current countdown value for the direction.
    pub(crate) fn timer(&self, direction: Direction) -> u8 {
        match direction {
            Direction::Up => self.up,
            Direction::Left => self.left,
            Direction::Down => self.down,
            Direction::Right => self.right,
        }
    }

    /// Remaining ticks before a new acquisition is possible.
    pub(crate) fn global(&self) -> u8 {
        self.global
    }

    /// Force-resets the direction's timer, cancelling its remaining
    /// movement schedule. The global timer keeps running.
    pub(crate) fn cancel(&mut self, direction: Direction) {
        *self.timer_mut(direction) = 0;
    }

    fn load(&mut self, direction: Direction) {
        *self.timer_mut(direction) = COOLDOWN_TICKS;
    }

    fn timer_mut(&mut self, direction: Direction) -> &mut u8 {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Left => &mut self.left,
            Direction::Down => &mut self.down,
            Direction::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cooldowns;
    use blockyard_core::{Direction, Event, TickInput, COOLDOWN_TICKS};
    use glam::Vec2;

    const STEP: Vec2 = Vec2::new(1.0, 1.0);

    fn held(direction: Direction) -> TickInput {
        let mut input = TickInput::default();
        match direction {
            Direction::Up => input.up = true,
            Direction::Left => input.left = true,
            Direction::Down => input.down = true,
            Direction::Right => input.right = true,
        }
        input
    }

    #[test]
    fn full_countdown_steps_on_even_values_only() {
        let mut cooldowns = Cooldowns::default();
        let mut events = Vec::new();
        cooldowns.acquire(&held(Direction::Right), &mut events);
        assert_eq!(events, vec![Event::DirectionActivated {
            direction: Direction::Right
        }]);

        let mut stepped_on = Vec::new();
        for _ in 0..COOLDOWN_TICKS {
            let before = cooldowns.timer(Direction::Right);
            let displacement = cooldowns.advance_cadence(STEP);
            if displacement != Vec2::ZERO {
                stepped_on.push(before);
                assert_eq!(displacement, Vec2::new(1.0, 0.0));
            }
        }
        assert_eq!(stepped_on, vec![8, 6, 4, 2]);
        assert_eq!(cooldowns.timer(Direction::Right), 0);
        assert_eq!(cooldowns.global(), 0);
    }

    #[test]
    fn combo_takes_precedence_over_single_directions() {
        let mut cooldowns = Cooldowns::default();
        let mut events = Vec::new();
        let input = TickInput {
            up: true,
            left: true,
            ..TickInput::default()
        };
        cooldowns.acquire(&input, &mut events);

        assert_eq!(events, vec![Event::ComboActivated {
            first: Direction::Up,
            second: Direction::Left
        }]);
        assert_eq!(cooldowns.timer(Direction::Up), COOLDOWN_TICKS);
        assert_eq!(cooldowns.timer(Direction::Left), COOLDOWN_TICKS);
        assert_eq!(cooldowns.timer(Direction::Down), 0);
        assert_eq!(cooldowns.global(), COOLDOWN_TICKS);
    }

    #[test]
    fn combo_pairs_match_in_declaration_order() {
        let mut cooldowns = Cooldowns::default();
        let mut events = Vec::new();
        // Up+Left and Left+Down both held; the first declared pair wins.
        let input = TickInput {
            up: true,
            left: true,
            down: true,
            ..TickInput::default()
        };
        cooldowns.acquire(&input, &mut events);

        assert_eq!(events, vec![Event::ComboActivated {
            first: Direction::Up,
            second: Direction::Left
        }]);
        assert_eq!(cooldowns.timer(Direction::Down), 0);
    }

    #[test]
    fn global_timer_blocks_reacquisition_until_idle() {
        let mut cooldowns = Cooldowns::default();
        let mut events = Vec::new();
        cooldowns.acquire(&held(Direction::Up), &mut events);
        let _ = cooldowns.advance_cadence(STEP);

        events.clear();
        cooldowns.acquire(&held(Direction::Down), &mut events);
        assert!(events.is_empty());
        assert_eq!(cooldowns.timer(Direction::Down), 0);

        for _ in 0..COOLDOWN_TICKS {
            let _ = cooldowns.advance_cadence(STEP);
        }
        assert_eq!(cooldowns.global(), 0);
        cooldowns.acquire(&held(Direction::Down), &mut events);
        assert_eq!(cooldowns.timer(Direction::Down), COOLDOWN_TICKS);
    }

    #[test]
    fn opposite_directions_without_a_pair_both_activate() {
        let mut cooldowns = Cooldowns::default();
        let mut events = Vec::new();
        let input = TickInput {
            up: true,
            down: true,
            ..TickInput::default()
        };
        cooldowns.acquire(&input, &mut events);

        assert_eq!(cooldowns.timer(Direction::Up), COOLDOWN_TICKS);
        assert_eq!(cooldowns.timer(Direction::Down), COOLDOWN_TICKS);
        // Their even-tick steps cancel to a net zero displacement.
        assert_eq!(cooldowns.advance_cadence(STEP), Vec2::ZERO);
    }

    #[test]
    fn cancel_clears_one_schedule_but_not_the_gate() {
        let mut cooldowns = Cooldowns::default();
        let mut events = Vec::new();
        let input = TickInput {
            up: true,
            left: true,
            ..TickInput::default()
        };
        cooldowns.acquire(&input, &mut events);
        cooldowns.cancel(Direction::Left);

        assert_eq!(cooldowns.timer(Direction::Left), 0);
        assert_eq!(cooldowns.timer(Direction::Up), COOLDOWN_TICKS);
        assert_eq!(cooldowns.global(), COOLDOWN_TICKS);
        assert_eq!(cooldowns.advance_cadence(STEP), Vec2::new(0.0, 1.0));
    }
}
