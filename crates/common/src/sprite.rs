use serde::{Deserialize, Serialize};

/// Identifier of a texture region in the atlas. Resolution to actual GPU
/// textures happens in the backend; the core only records the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureId(pub u16);

/// A recorded textured-quad draw command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteCmd {
    pub texture: TextureId,
    /// Bottom-left corner in world pixels.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// RGBA tint, each channel in [0, 1].
    pub color: [f32; 4],
    /// UV rectangle as (u0, v0, u1, v1).
    pub uv: [f32; 4],
}

impl SpriteCmd {
    /// An untinted sprite covering one full texture region.
    pub fn simple(texture: TextureId, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            texture,
            x,
            y,
            width,
            height,
            color: [1.0, 1.0, 1.0, 1.0],
            uv: [0.0, 0.0, 1.0, 1.0],
        }
    }
}

/// Accepts per-sprite draw commands.
///
/// Floor and block draw routines emit through this trait; geometry sinks
/// implement it to record commands into the cache currently being built.
pub trait SpriteEmitter {
    fn emit_sprite(&mut self, sprite: SpriteCmd);
}

impl SpriteEmitter for Vec<SpriteCmd> {
    fn emit_sprite(&mut self, sprite: SpriteCmd) {
        self.push(sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_sprite_is_untinted_full_region() {
        let s = SpriteCmd::simple(TextureId(3), 8.0, 16.0, 8.0, 8.0);
        assert_eq!(s.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(s.uv, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(s.texture, TextureId(3));
    }

    #[test]
    fn vec_emitter_collects_in_order() {
        let mut out: Vec<SpriteCmd> = Vec::new();
        out.emit_sprite(SpriteCmd::simple(TextureId(0), 0.0, 0.0, 8.0, 8.0));
        out.emit_sprite(SpriteCmd::simple(TextureId(1), 8.0, 0.0, 8.0, 8.0));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].texture, TextureId(0));
        assert_eq!(out[1].texture, TextureId(1));
    }
}
