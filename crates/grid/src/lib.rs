//! Chunk partitioning: fixed-size chunks over an arbitrary-size tile world.
//!
//! # Invariants
//! - The chunk table covers `(W / C) x (H / C)` chunks with flooring
//!   division; tiles in a partial trailing chunk belong to no chunk.
//! - Visibility windows are symmetric around the camera's chunk and may
//!   extend out of bounds; clipping is the caller's concern and
//!   [`VisibleWindow::clipped`] provides it.

mod window;

pub use window::{ChunkCoord, VisibleWindow, chunk_dims};

pub fn crate_info() -> &'static str {
    "tileworks-grid v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("grid"));
    }
}
