#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Block Yard adapters.
//!
//! The simulation's sole output is a [`Frame`]: camera parameters plus a
//! list of texture-keyed, instance-capped draw batches. [`compose_frame`]
//! builds that frame from world-space sprites by applying the camera
//! offset, culling everything outside the clip radius, and grouping the
//! survivors by texture. Backends implement [`RenderingBackend`] and own
//! every native concern: the window, buffering, presentation.

use anyhow::Result as AnyResult;
use blockyard_core::TickInput;
use glam::Vec2;
use std::time::Duration;

/// Maximum number of instances a single draw batch carries. A sprite that
/// does not fit opens a sibling batch with the same texture.
pub const MAX_BATCH_INSTANCES: usize = 64;

/// Default half-extent of the clip window, in normalized units, applied on
/// every side of the camera before a sprite survives culling.
pub const DEFAULT_CLIP_RADIUS: f32 = 1.25;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Texture identity shared by every instance of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureKey {
    /// Immovable wall tile.
    Wall,
    /// Pushable block tile.
    Block,
    /// The player sprite.
    Player,
}

/// World-space sprite submitted for composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Texture the sprite is drawn with.
    pub texture: TextureKey,
    /// Origin in normalized world space.
    pub origin: Vec2,
    /// Extent in normalized space.
    pub size: Vec2,
}

impl Sprite {
    /// Creates a new world-space sprite descriptor.
    #[must_use]
    pub const fn new(texture: TextureKey, origin: Vec2, size: Vec2) -> Self {
        Self {
            texture,
            origin,
            size,
        }
    }
}

/// Camera-relative instance inside a draw batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    /// Origin relative to the camera, in normalized units.
    pub origin: Vec2,
    /// Extent in normalized units.
    pub size: Vec2,
}

/// Bounded list of instances sharing one texture.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawBatch {
    /// Texture shared by every instance in the batch.
    pub texture: TextureKey,
    /// Camera-relative instances, at most [`MAX_BATCH_INSTANCES`].
    pub instances: Vec<SpriteInstance>,
}

/// Camera parameters handed to the backend alongside the batches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    /// Camera offset in normalized space, already applied to every batch
    /// instance.
    pub offset: Vec2,
    /// Pixel-grid scale the frame was composed with.
    pub scale: f32,
}

/// Per-tick output of the simulation: everything a backend needs to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Camera parameters for the frame.
    pub camera: CameraParams,
    /// Culled, texture-grouped draw batches.
    pub batches: Vec<DrawBatch>,
}

/// Composes a frame from world-space sprites.
///
/// Instances come out camera-relative; sprites whose AABB lies entirely
/// outside the clip radius on any side are dropped; survivors group into
/// batches keyed by texture, each capped at [`MAX_BATCH_INSTANCES`].
/// Batch order follows first appearance, instance order follows submission
/// order, so identical input always yields an identical frame.
#[must_use]
pub fn compose_frame(
    camera: CameraParams,
    clip_radius: f32,
    sprites: impl IntoIterator<Item = Sprite>,
) -> Frame {
    let mut batches: Vec<DrawBatch> = Vec::new();

    for sprite in sprites {
        let relative = sprite.origin - camera.offset;
        if relative.x + sprite.size.x < -clip_radius
            || relative.x > clip_radius
            || relative.y + sprite.size.y < -clip_radius
            || relative.y > clip_radius
        {
            continue;
        }

        let instance = SpriteInstance {
            origin: relative,
            size: sprite.size,
        };
        let open_batch = batches.iter().rposition(|batch| {
            batch.texture == sprite.texture && batch.instances.len() < MAX_BATCH_INSTANCES
        });
        match open_batch {
            Some(index) => batches[index].instances.push(instance),
            None => batches.push(DrawBatch {
                texture: sprite.texture,
                instances: vec![instance],
            }),
        }
    }

    Frame { camera, batches }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
        }
    }
}

/// Rendering backend capable of presenting Block Yard frames.
pub trait RenderingBackend {
    /// Runs the backend until it is requested to exit.
    ///
    /// The `update` closure runs once per real frame with the frame delta
    /// and the input snapshot the backend captured, and returns the frame
    /// to present. The call is synchronous; the returned frame's buffers
    /// may be reused once the closure is invoked again.
    fn run<F>(self, presentation: Presentation, update: F) -> AnyResult<()>
    where
        F: FnMut(Duration, TickInput) -> Frame + 'static;
}

#[cfg(test)]
mod tests {
    use super::{
        compose_frame, CameraParams, Sprite, TextureKey, DEFAULT_CLIP_RADIUS, MAX_BATCH_INSTANCES,
    };
    use glam::Vec2;

    fn camera_at(offset: Vec2) -> CameraParams {
        CameraParams { offset, scale: 1.0 }
    }

    const SIZE: Vec2 = Vec2::new(0.1, 0.1);

    #[test]
    fn instances_come_out_camera_relative() {
        let camera = camera_at(Vec2::new(0.5, -0.25));
        let frame = compose_frame(
            camera,
            DEFAULT_CLIP_RADIUS,
            [Sprite::new(TextureKey::Player, Vec2::new(0.5, 0.0), SIZE)],
        );

        assert_eq!(frame.batches.len(), 1);
        assert_eq!(
            frame.batches[0].instances[0].origin,
            Vec2::new(0.0, 0.25)
        );
    }

    #[test]
    fn sprites_outside_the_clip_radius_are_culled() {
        let camera = camera_at(Vec2::ZERO);
        let outside = [
            Sprite::new(TextureKey::Wall, Vec2::new(1.3, 0.0), SIZE),
            Sprite::new(TextureKey::Wall, Vec2::new(-1.5, 0.0), SIZE),
            Sprite::new(TextureKey::Wall, Vec2::new(0.0, 1.3), SIZE),
            Sprite::new(TextureKey::Wall, Vec2::new(0.0, -1.5), SIZE),
        ];

        let frame = compose_frame(camera, DEFAULT_CLIP_RADIUS, outside);
        assert!(frame.batches.is_empty());
    }

    #[test]
    fn sprite_straddling_the_clip_edge_survives() {
        let camera = camera_at(Vec2::ZERO);
        let frame = compose_frame(
            camera,
            DEFAULT_CLIP_RADIUS,
            [Sprite::new(TextureKey::Wall, Vec2::new(-1.3, 0.0), SIZE)],
        );

        assert_eq!(frame.batches.len(), 1);
    }

    #[test]
    fn panning_the_camera_changes_which_sprites_survive() {
        let sprite = Sprite::new(TextureKey::Block, Vec2::new(2.0, 0.0), SIZE);

        let centered = compose_frame(camera_at(Vec2::ZERO), DEFAULT_CLIP_RADIUS, [sprite]);
        assert!(centered.batches.is_empty());

        let panned = compose_frame(
            camera_at(Vec2::new(2.0, 0.0)),
            DEFAULT_CLIP_RADIUS,
            [sprite],
        );
        assert_eq!(panned.batches.len(), 1);
    }

    #[test]
    fn batches_group_by_texture_in_first_seen_order() {
        let camera = camera_at(Vec2::ZERO);
        let sprites = [
            Sprite::new(TextureKey::Wall, Vec2::ZERO, SIZE),
            Sprite::new(TextureKey::Block, Vec2::new(0.2, 0.0), SIZE),
            Sprite::new(TextureKey::Wall, Vec2::new(0.4, 0.0), SIZE),
            Sprite::new(TextureKey::Player, Vec2::new(0.6, 0.0), SIZE),
        ];

        let frame = compose_frame(camera, DEFAULT_CLIP_RADIUS, sprites);

        let textures: Vec<_> = frame.batches.iter().map(|batch| batch.texture).collect();
        assert_eq!(
            textures,
            vec![TextureKey::Wall, TextureKey::Block, TextureKey::Player]
        );
        assert_eq!(frame.batches[0].instances.len(), 2);
    }

    #[test]
    fn overflowing_a_batch_opens_a_sibling_with_the_same_texture() {
        let camera = camera_at(Vec2::ZERO);
        let sprites =
            vec![Sprite::new(TextureKey::Wall, Vec2::ZERO, SIZE); MAX_BATCH_INSTANCES + 1];

        let frame = compose_frame(camera, DEFAULT_CLIP_RADIUS, sprites);

        assert_eq!(frame.batches.len(), 2);
        assert_eq!(frame.batches[0].instances.len(), MAX_BATCH_INSTANCES);
        assert_eq!(frame.batches[1].instances.len(), 1);
        assert_eq!(frame.batches[1].texture, TextureKey::Wall);
    }
}
