use crate::tile::{Block, Floor, Tile};
use tileworks_common::{DrawLayer, SpriteCmd, SpriteEmitter, TILE_PX, TextureId};

/// Data-driven floor descriptor: one base sprite on the primary layer and an
/// optional decoration sprite contributed to layers above it.
///
/// Content defines floors as static values:
///
/// ```
/// use tileworks_common::{DrawLayer, TextureId};
/// use tileworks_world::StaticFloor;
///
/// static GRASS: StaticFloor =
///     StaticFloor::new(DrawLayer::Floor, TextureId(1)).with_decoration(TextureId(2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StaticFloor {
    layer: DrawLayer,
    texture: TextureId,
    decoration: Option<TextureId>,
}

impl StaticFloor {
    pub const fn new(layer: DrawLayer, texture: TextureId) -> Self {
        Self {
            layer,
            texture,
            decoration: None,
        }
    }

    /// Add a decoration sprite emitted on layers above the primary one.
    pub const fn with_decoration(self, texture: TextureId) -> Self {
        Self {
            decoration: Some(texture),
            ..self
        }
    }
}

impl Floor for StaticFloor {
    fn draw_layer(&self) -> DrawLayer {
        self.layer
    }

    fn draw(&self, tile: &Tile, out: &mut dyn SpriteEmitter) {
        out.emit_sprite(SpriteCmd::simple(
            self.texture,
            tile.x as f32 * TILE_PX,
            tile.y as f32 * TILE_PX,
            TILE_PX,
            TILE_PX,
        ));
    }

    fn draw_non_layer(&self, tile: &Tile, out: &mut dyn SpriteEmitter) {
        if let Some(texture) = self.decoration {
            out.emit_sprite(SpriteCmd::simple(
                texture,
                tile.x as f32 * TILE_PX,
                tile.y as f32 * TILE_PX,
                TILE_PX,
                TILE_PX,
            ));
        }
    }
}

/// Data-driven block descriptor. A block with a texture is a solid wall; a
/// block without one occupies no layer worth drawing (see [`AIR`]).
#[derive(Debug, Clone, Copy)]
pub struct StaticBlock {
    layer: DrawLayer,
    texture: Option<TextureId>,
}

impl StaticBlock {
    /// A solid wall drawn on the walls layer.
    pub const fn wall(texture: TextureId) -> Self {
        Self {
            layer: DrawLayer::Walls,
            texture: Some(texture),
        }
    }

    /// A block that neither occupies the walls layer nor draws anything.
    pub const fn empty() -> Self {
        Self {
            layer: DrawLayer::Floor,
            texture: None,
        }
    }
}

impl Block for StaticBlock {
    fn draw_layer(&self) -> DrawLayer {
        self.layer
    }

    fn draw(&self, tile: &Tile, out: &mut dyn SpriteEmitter) {
        if let Some(texture) = self.texture {
            out.emit_sprite(SpriteCmd::simple(
                texture,
                tile.x as f32 * TILE_PX,
                tile.y as f32 * TILE_PX,
                TILE_PX,
                TILE_PX,
            ));
        }
    }
}

/// The block of tiles that carry no wall.
pub static AIR: StaticBlock = StaticBlock::empty();

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Block as _, Floor as _};

    static SAND: StaticFloor =
        StaticFloor::new(DrawLayer::Floor, TextureId(4)).with_decoration(TextureId(5));
    static ROCK: StaticBlock = StaticBlock::wall(TextureId(9));

    fn tile_at(x: i32, y: i32) -> Tile {
        Tile::new(x, y, &SAND, &ROCK)
    }

    #[test]
    fn floor_draws_one_sprite_at_tile_position() {
        let tile = tile_at(2, 3);
        let mut out: Vec<SpriteCmd> = Vec::new();
        SAND.draw(&tile, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].texture, TextureId(4));
        assert_eq!((out[0].x, out[0].y), (2.0 * TILE_PX, 3.0 * TILE_PX));
        assert_eq!((out[0].width, out[0].height), (TILE_PX, TILE_PX));
    }

    #[test]
    fn decoration_draws_only_via_non_layer() {
        let tile = tile_at(0, 0);
        let mut out: Vec<SpriteCmd> = Vec::new();
        SAND.draw_non_layer(&tile, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].texture, TextureId(5));
    }

    #[test]
    fn undecorated_floor_emits_nothing_off_layer() {
        static BARE: StaticFloor = StaticFloor::new(DrawLayer::Floor, TextureId(4));
        let tile = tile_at(0, 0);
        let mut out: Vec<SpriteCmd> = Vec::new();
        BARE.draw_non_layer(&tile, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn wall_block_is_on_walls_layer() {
        let tile = tile_at(1, 1);
        let mut out: Vec<SpriteCmd> = Vec::new();
        assert_eq!(ROCK.draw_layer(), DrawLayer::Walls);
        ROCK.draw(&tile, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn air_occupies_no_wall_and_draws_nothing() {
        let tile = tile_at(0, 0);
        let mut out: Vec<SpriteCmd> = Vec::new();
        assert_ne!(AIR.draw_layer(), DrawLayer::Walls);
        AIR.draw(&tile, &mut out);
        assert!(out.is_empty());
    }
}
