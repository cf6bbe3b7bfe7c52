use tileworks_common::{DrawLayer, SpriteEmitter};

/// A floor descriptor: static, shared-immutable draw data for one floor type.
///
/// `draw` emits the floor's geometry on its primary layer. `draw_non_layer`
/// lets a floor contribute decoration (edge blends, highlights) to layers
/// above its primary one; the default contributes nothing.
pub trait Floor: Sync {
    /// Primary draw layer. Never [`DrawLayer::Walls`].
    fn draw_layer(&self) -> DrawLayer;

    /// Emit this floor's primary geometry for the given tile.
    fn draw(&self, tile: &Tile, out: &mut dyn SpriteEmitter);

    /// Emit decoration for a layer above the primary one.
    fn draw_non_layer(&self, _tile: &Tile, _out: &mut dyn SpriteEmitter) {}
}

/// A block descriptor. Blocks only ever draw on [`DrawLayer::Walls`]; a
/// block whose layer is anything else is treated as occupying no wall.
pub trait Block: Sync {
    fn draw_layer(&self) -> DrawLayer;

    /// Emit this block's geometry for the given tile.
    fn draw(&self, tile: &Tile, out: &mut dyn SpriteEmitter);
}

/// One cell of the tile grid: integer coords plus its floor and block
/// descriptors. Created at world load, immutable during rendering.
#[derive(Clone, Copy)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    floor: &'static dyn Floor,
    block: &'static dyn Block,
}

impl Tile {
    pub fn new(x: i32, y: i32, floor: &'static dyn Floor, block: &'static dyn Block) -> Self {
        Self { x, y, floor, block }
    }

    pub fn floor(&self) -> &'static dyn Floor {
        self.floor
    }

    pub fn block(&self) -> &'static dyn Block {
        self.block
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tile")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("floor_layer", &self.floor.draw_layer())
            .field("block_layer", &self.block.draw_layer())
            .finish()
    }
}

/// The tile grid. Row-major storage; built once, read-only afterwards.
pub struct World {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl World {
    /// Build a world by calling `f` for every tile coordinate in row-major
    /// ascending (y, x) order.
    pub fn generate<F>(width: i32, height: i32, mut f: F) -> Self
    where
        F: FnMut(i32, i32) -> (&'static dyn Floor, &'static dyn Block),
    {
        assert!(width >= 0 && height >= 0, "world extents must be non-negative");
        let mut tiles = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                let (floor, block) = f(x, y);
                tiles.push(Tile::new(x, y, floor, block));
            }
        }
        tracing::debug!(width, height, "world generated");
        Self { width, height, tiles }
    }

    /// Width in tiles.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Nullable tile lookup. Any coordinate outside `[0, W) x [0, H)` is `None`.
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((y * self.width + x) as usize)
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::{AIR, StaticFloor};

    static GRASS: StaticFloor = StaticFloor::new(DrawLayer::Floor, tileworks_common::TextureId(1));

    fn grass_world(w: i32, h: i32) -> World {
        World::generate(w, h, |_, _| (&GRASS, &AIR))
    }

    #[test]
    fn lookup_in_bounds() {
        let w = grass_world(4, 3);
        let t = w.tile(3, 2).unwrap();
        assert_eq!((t.x, t.y), (3, 2));
        assert_eq!(t.floor().draw_layer(), DrawLayer::Floor);
    }

    #[test]
    fn lookup_out_of_bounds_is_none() {
        let w = grass_world(4, 3);
        assert!(w.tile(-1, 0).is_none());
        assert!(w.tile(0, -1).is_none());
        assert!(w.tile(4, 0).is_none());
        assert!(w.tile(0, 3).is_none());
        assert!(w.tile(i32::MIN, i32::MAX).is_none());
    }

    #[test]
    fn zero_sized_world_has_no_tiles() {
        let w = grass_world(0, 0);
        assert!(w.tile(0, 0).is_none());
    }

    #[test]
    fn generate_visits_row_major() {
        let mut visited = Vec::new();
        let _ = World::generate(2, 2, |x, y| {
            visited.push((x, y));
            (&GRASS as &'static dyn Floor, &AIR as &'static dyn Block)
        });
        assert_eq!(visited, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
