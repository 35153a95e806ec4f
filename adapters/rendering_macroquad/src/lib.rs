#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Block Yard.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in containerised CI environments, so
//! the dependency omits the default `audio` feature.
//!
//! The backend owns the window and the frame loop. Each frame it polls the
//! tracked keys and the right-button mouse drag into a
//! [`TickInput`] snapshot, hands the snapshot plus the frame delta to the
//! update closure, and draws the returned batches as flat colored
//! rectangles. Batches arrive camera-relative in normalized space; the
//! only transform applied here is normalized-to-screen.

use anyhow::Result;
use blockyard_core::TickInput;
use blockyard_rendering::{Color, Frame, Presentation, RenderingBackend, TextureKey};
use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_down, mouse_position, KeyCode, MouseButton,
};
use std::time::Duration;

const WALL_COLOR: Color = Color::from_rgb_u8(96, 96, 104);
const BLOCK_COLOR: Color = Color::from_rgb_u8(214, 160, 56);
const PLAYER_COLOR: Color = Color::from_rgb_u8(88, 120, 255);

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the
    /// platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update: F) -> Result<()>
    where
        F: FnMut(Duration, TickInput) -> Frame + 'static,
    {
        let Self { swap_interval } = self;
        let Presentation {
            window_title,
            clear_color,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 540,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let background = to_macroquad_color(clear_color);
            let mut pointer = PointerTracker::default();

            loop {
                if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let input = gather_tick_input(&mut pointer);

                let frame = update(frame_dt, input);

                macroquad::window::clear_background(background);
                draw_frame(&frame);
                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Tracks the absolute pointer position so per-frame drags can be derived.
#[derive(Debug, Default)]
struct PointerTracker {
    last: Option<Vec2>,
}

impl PointerTracker {
    /// Pointer movement since the previous frame while the right button is
    /// held, with Y flipped into the normalized +Y-up convention.
    fn drag_delta(&mut self) -> Vec2 {
        let (x, y) = mouse_position();
        let position = Vec2::new(x, y);
        let delta = match (self.last, is_mouse_button_down(MouseButton::Right)) {
            (Some(last), true) => {
                let raw = position - last;
                Vec2::new(raw.x, -raw.y)
            }
            _ => Vec2::ZERO,
        };
        self.last = Some(position);
        delta
    }
}

fn gather_tick_input(pointer: &mut PointerTracker) -> TickInput {
    TickInput {
        up: is_key_down(KeyCode::W),
        left: is_key_down(KeyCode::A),
        down: is_key_down(KeyCode::S),
        right: is_key_down(KeyCode::D),
        pointer_delta: pointer.drag_delta(),
    }
}

fn draw_frame(frame: &Frame) {
    let screen_width = macroquad::window::screen_width();
    let screen_height = macroquad::window::screen_height();

    for batch in &frame.batches {
        let color = to_macroquad_color(texture_color(batch.texture));
        for instance in &batch.instances {
            let width = instance.size.x * 0.5 * screen_width;
            let height = instance.size.y * 0.5 * screen_height;
            let x = (instance.origin.x + 1.0) * 0.5 * screen_width;
            let y = (1.0 - (instance.origin.y + instance.size.y)) * 0.5 * screen_height;
            macroquad::shapes::draw_rectangle(x, y, width, height, color);
        }
    }
}

fn texture_color(texture: TextureKey) -> Color {
    match texture {
        TextureKey::Wall => WALL_COLOR,
        TextureKey::Block => BLOCK_COLOR,
        TextureKey::Player => PLAYER_COLOR,
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
