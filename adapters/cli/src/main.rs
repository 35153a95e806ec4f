#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Block Yard experience.
//!
//! Wires the pieces together exactly once per frame: the simulation clock
//! turns the frame delta and input snapshot into commands, the world
//! applies them, and the scene module composes the frame the backend
//! presents. The headless mode drives the same pipeline without a window,
//! which makes determinism runs scriptable.

mod scene;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use blockyard_core::{Event, TickInput, WELCOME_BANNER};
use blockyard_rendering::{Color, Presentation, RenderingBackend};
use blockyard_rendering_macroquad::MacroquadBackend;
use blockyard_system_simulation::{SimulationClock, TICK_DURATION};
use blockyard_world::{self as world, query, World, WorldLayout};

/// Command-line options accepted by the `blockyard` binary.
#[derive(Debug, Parser)]
#[command(name = "blockyard", about = "Fixed-timestep block-pushing yard")]
struct Args {
    /// Path to a TOML world layout; the built-in yard is used when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Run the given number of ticks without a window and report the result.
    #[arg(long)]
    headless: Option<u64>,

    /// Keys held for the whole headless run (any combination of w, a, s, d).
    #[arg(long, default_value = "")]
    hold: String,

    /// Disable vertical sync in the windowed backend.
    #[arg(long)]
    no_vsync: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("{WELCOME_BANNER}");

    let layout = match &args.layout {
        Some(path) => load_layout(path)?,
        None => WorldLayout::training_yard(),
    };
    let world = World::from_layout(&layout).context("world layout rejected")?;
    info!(
        walls = query::wall_view(&world).iter().count(),
        blocks = query::block_view(&world).iter().count(),
        "world ready"
    );

    match args.headless {
        Some(ticks) => run_headless(world, ticks, parse_held_keys(&args.hold)?),
        None => run_windowed(world, !args.no_vsync),
    }
}

fn load_layout(path: &Path) -> Result<WorldLayout> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout file {}", path.display()))?;
    let layout = toml::from_str(&text)
        .with_context(|| format!("failed to parse layout file {}", path.display()))?;
    Ok(layout)
}

fn parse_held_keys(hold: &str) -> Result<TickInput> {
    let mut input = TickInput::default();
    for key in hold.chars() {
        match key.to_ascii_lowercase() {
            'w' => input.up = true,
            'a' => input.left = true,
            's' => input.down = true,
            'd' => input.right = true,
            other => bail!("unrecognised held key {other:?} (expected w, a, s or d)"),
        }
    }
    Ok(input)
}

fn run_headless(mut world: World, ticks: u64, input: TickInput) -> Result<()> {
    let mut clock = SimulationClock::new();
    let mut events = Vec::new();
    let mut commands = Vec::new();
    let mut ticks_run = 0;

    for _ in 0..ticks {
        commands.clear();
        ticks_run += clock.handle(TICK_DURATION, &input, &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
    }

    let pushes = events
        .iter()
        .filter(|event| matches!(event, Event::BlocksPushed { .. }))
        .count();
    let rejections = events
        .iter()
        .filter(|event| matches!(event, Event::PushBlocked { .. }))
        .count();
    let player = query::player(&world);
    info!(
        ticks = ticks_run,
        pushes,
        rejections,
        position = ?player.origin,
        "headless run complete"
    );
    Ok(())
}

fn run_windowed(world: World, vsync: bool) -> Result<()> {
    let backend = MacroquadBackend::new().with_vsync(vsync);
    let presentation = Presentation::new("Block Yard", Color::from_rgb_u8(24, 26, 33));

    let mut world = world;
    let mut clock = SimulationClock::new();
    let mut commands = Vec::new();
    let mut events = Vec::new();

    backend.run(presentation, move |frame_dt, input| {
        commands.clear();
        events.clear();

        let _ = clock.handle(frame_dt, &input, &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
        for event in &events {
            debug!(?event, "world event");
        }

        scene::compose(&world)
    })
}

#[cfg(test)]
mod tests {
    use super::parse_held_keys;
    use blockyard_core::TickInput;

    #[test]
    fn held_keys_parse_into_the_input_snapshot() {
        let input = parse_held_keys("wd").expect("valid keys");
        assert_eq!(
            input,
            TickInput {
                up: true,
                right: true,
                ..TickInput::default()
            }
        );
    }

    #[test]
    fn empty_hold_means_idle_input() {
        assert_eq!(
            parse_held_keys("").expect("empty is valid"),
            TickInput::default()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_held_keys("wx").is_err());
    }
}
