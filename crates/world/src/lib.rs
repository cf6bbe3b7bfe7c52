//! Tile grid and draw descriptors.
//!
//! # Invariants
//! - Tiles are immutable once the world is built; the renderer only reads them.
//! - Floor descriptors never claim the walls layer; block descriptors draw
//!   nowhere else.
//! - Out-of-bounds lookups return `None`, never panic.

mod descriptors;
mod tile;

pub use descriptors::{AIR, StaticBlock, StaticFloor};
pub use tile::{Block, Floor, Tile, World};

pub fn crate_info() -> &'static str {
    "tileworks-world v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("world"));
    }
}
