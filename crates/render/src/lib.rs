//! Chunked tile-floor renderer.
//!
//! Floors are pre-recorded into per-chunk, per-layer GPU geometry caches at
//! world load; each frame replays the caches of the visible chunk window in
//! ascending layer order.
//!
//! # Invariants
//! - The renderer never mutates world state; tiles are read-only after load.
//! - Each chunk-layer cache slot is written exactly once, during the initial
//!   fill. A `None` slot means "zero primitives", not "not built yet".
//! - All sink operations happen on the rendering thread; record and replay
//!   never interleave across threads.
//!
//! The trait-based sink contract keeps the core backend-agnostic: tests and
//! headless runs use [`RecordingSink`], GPU frames use the wgpu backend crate.

mod camera;
mod floor;
mod sink;

pub use camera::Camera2d;
pub use floor::{Chunk, FloorRenderer};
pub use sink::{CacheHandle, GeometrySink, NullBatch, RecordingSink, SinkOp, SpriteBatch};

pub fn crate_info() -> &'static str {
    "tileworks-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
