use serde::{Deserialize, Serialize};

/// A named stage in the fixed render order.
///
/// The catalog is closed: rendering code sizes per-chunk cache arrays by
/// [`DrawLayer::COUNT`] and iterates [`DrawLayer::ALL`] in ascending ordinal
/// order. `Walls` is the top layer; floors never appear in it, and blocks
/// appear nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DrawLayer {
    Floor,
    Overlay,
    Walls,
}

impl DrawLayer {
    /// Number of layers; usable as an array length.
    pub const COUNT: usize = 3;

    /// All layers in ascending ordinal order.
    pub const ALL: [DrawLayer; Self::COUNT] =
        [DrawLayer::Floor, DrawLayer::Overlay, DrawLayer::Walls];

    /// Position of this layer in the total order.
    pub fn ordinal(self) -> usize {
        match self {
            DrawLayer::Floor => 0,
            DrawLayer::Overlay => 1,
            DrawLayer::Walls => 2,
        }
    }

    /// Layer at the given ordinal. Panics if out of range; the catalog is
    /// closed and callers index with ordinals they obtained from it.
    pub fn from_ordinal(ordinal: usize) -> DrawLayer {
        Self::ALL[ordinal]
    }

    /// Whether this is the top layer (blocks-only).
    pub fn is_top(self) -> bool {
        self == DrawLayer::Walls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_ascending_and_dense() {
        for (i, layer) in DrawLayer::ALL.iter().enumerate() {
            assert_eq!(layer.ordinal(), i);
            assert_eq!(DrawLayer::from_ordinal(i), *layer);
        }
    }

    #[test]
    fn order_matches_ordinals() {
        assert!(DrawLayer::Floor < DrawLayer::Overlay);
        assert!(DrawLayer::Overlay < DrawLayer::Walls);
    }

    #[test]
    fn walls_is_top() {
        assert!(DrawLayer::Walls.is_top());
        assert!(!DrawLayer::Floor.is_top());
        assert!(!DrawLayer::Overlay.is_top());
    }
}
