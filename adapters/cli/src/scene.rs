//! Builds renderer frames from world snapshots.

use blockyard_rendering::{
    compose_frame, CameraParams, Frame, Sprite, TextureKey, DEFAULT_CLIP_RADIUS,
};
use blockyard_world::{query, World};

/// Composes the per-tick frame: walls first, then blocks, then the player,
/// so the draw order resolves overlap the same way every frame.
pub(crate) fn compose(world: &World) -> Frame {
    let camera = CameraParams {
        offset: query::camera_offset(world),
        scale: query::pixel_grid(world).scale(),
    };

    let walls = query::wall_view(world);
    let blocks = query::block_view(world);
    let player = query::player(world);

    let sprites = walls
        .iter()
        .map(|wall| Sprite::new(TextureKey::Wall, wall.origin, wall.extent))
        .chain(
            blocks
                .iter()
                .map(|block| Sprite::new(TextureKey::Block, block.origin, block.extent)),
        )
        .chain(std::iter::once(Sprite::new(
            TextureKey::Player,
            player.origin,
            player.extent,
        )));

    compose_frame(camera, DEFAULT_CLIP_RADIUS, sprites)
}

#[cfg(test)]
mod tests {
    use super::compose;
    use blockyard_core::{Command, Event};
    use blockyard_rendering::TextureKey;
    use blockyard_world::{self as world, query, World, WorldLayout};
    use glam::Vec2;

    fn training_world() -> World {
        World::from_layout(&WorldLayout::training_yard()).expect("built-in layout is valid")
    }

    #[test]
    fn frame_carries_every_entity_in_draw_order() {
        let world = training_world();
        let frame = compose(&world);

        let wall_count = query::wall_view(&world).iter().count();
        let block_count = query::block_view(&world).iter().count();

        let textures: Vec<_> = frame.batches.iter().map(|batch| batch.texture).collect();
        assert_eq!(
            textures,
            vec![TextureKey::Wall, TextureKey::Block, TextureKey::Player]
        );
        assert_eq!(frame.batches[0].instances.len(), wall_count);
        assert_eq!(frame.batches[1].instances.len(), block_count);
        assert_eq!(frame.batches[2].instances.len(), 1);
    }

    #[test]
    fn panning_far_away_culls_the_entire_yard() {
        let mut world = training_world();
        let mut events: Vec<Event> = Vec::new();
        world::apply(
            &mut world,
            Command::PanCamera {
                delta_pixels: Vec2::new(100_000.0, 0.0),
            },
            &mut events,
        );

        let frame = compose(&world);
        assert!(frame.batches.is_empty());
    }

    #[test]
    fn frame_camera_tracks_the_world_camera() {
        let mut world = training_world();
        let mut events: Vec<Event> = Vec::new();
        world::apply(
            &mut world,
            Command::PanCamera {
                delta_pixels: Vec2::new(12.0, 7.0),
            },
            &mut events,
        );

        let frame = compose(&world);
        assert_eq!(frame.camera.offset, query::camera_offset(&world));
        assert_eq!(frame.camera.scale, query::pixel_grid(&world).scale());
    }
}
