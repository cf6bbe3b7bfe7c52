//! Shared types for the tileworks engine.
//!
//! # Invariants
//! - The draw-layer catalog is closed; per-chunk cache arrays are sized by
//!   `DrawLayer::COUNT` at compile time.
//! - Layer order is total and fixed: floor < overlay < walls.

mod layer;
mod sprite;

pub use layer::DrawLayer;
pub use sprite::{SpriteCmd, SpriteEmitter, TextureId};

/// Side length of a geometry-cache chunk, in tiles.
pub const CHUNK_SIZE: i32 = 32;

/// Size of one tile in world pixels.
pub const TILE_PX: f32 = 8.0;

/// Vertices recorded per sprite quad; used to size geometry sinks.
pub const VERTS_PER_SPRITE: usize = 4;

/// Side length of a chunk in world pixels.
pub fn chunk_px() -> f32 {
    CHUNK_SIZE as f32 * TILE_PX
}

pub fn crate_info() -> &'static str {
    "tileworks-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }

    #[test]
    fn chunk_px_matches_constants() {
        assert_eq!(chunk_px(), CHUNK_SIZE as f32 * TILE_PX);
    }
}
