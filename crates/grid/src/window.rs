use glam::Vec2;
use tileworks_common::CHUNK_SIZE;

/// A 2D chunk coordinate. Unclipped window coordinates may be negative or
/// past the table edge; in-bounds checks happen against the table dims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this coordinate lies inside a table of the given dimensions.
    pub fn in_bounds(self, dims: (usize, usize)) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < dims.0 && (self.y as usize) < dims.1
    }

    /// Origin of this chunk in world pixels.
    pub fn origin_px(self, chunk_px: f32) -> Vec2 {
        Vec2::new(self.x as f32 * chunk_px, self.y as f32 * chunk_px)
    }
}

/// Chunk-table dimensions for a world of the given tile extents.
///
/// Flooring division: a 33x33 world with C = 32 is a single chunk, and a
/// world smaller than one chunk yields an empty table (rendering becomes a
/// no-op rather than an error).
pub fn chunk_dims(world_width: i32, world_height: i32) -> (usize, usize) {
    let cx = (world_width.max(0) / CHUNK_SIZE) as usize;
    let cy = (world_height.max(0) / CHUNK_SIZE) as usize;
    (cx, cy)
}

/// The rectangular window of chunks a camera can see.
///
/// Half-extents are one chunk larger than the viewport strictly needs so
/// partially visible chunks at the edges are always included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    pub center: ChunkCoord,
    pub range_x: i32,
    pub range_y: i32,
}

impl VisibleWindow {
    /// Compute the window for a camera at `position` (world pixels) with the
    /// given viewport size (pixels) and zoom factor. `chunk_px` is the chunk
    /// side length in world pixels.
    pub fn compute(position: Vec2, viewport: Vec2, zoom: f32, chunk_px: f32) -> Self {
        let range_x = (viewport.x * zoom / chunk_px).ceil() as i32 + 1;
        let range_y = (viewport.y * zoom / chunk_px).ceil() as i32 + 1;
        let center = ChunkCoord::new(
            (position.x / chunk_px).floor() as i32,
            (position.y / chunk_px).floor() as i32,
        );
        Self {
            center,
            range_x,
            range_y,
        }
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        (coord.x - self.center.x).abs() <= self.range_x
            && (coord.y - self.center.y).abs() <= self.range_y
    }

    /// All chunk coordinates in the window, including out-of-bounds ones.
    /// Column-major: x varies in the outer loop, matching the fill order of
    /// the frame renderer.
    pub fn iter(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        let (cx, cy) = (self.center.x, self.center.y);
        let (rx, ry) = (self.range_x, self.range_y);
        (-rx..=rx).flat_map(move |dx| (-ry..=ry).map(move |dy| ChunkCoord::new(cx + dx, cy + dy)))
    }

    /// Window coordinates clipped to a chunk table of the given dimensions.
    pub fn clipped(&self, dims: (usize, usize)) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.iter().filter(move |c| c.in_bounds(dims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dims_floor_divide() {
        assert_eq!(chunk_dims(96, 96), (3, 3));
        assert_eq!(chunk_dims(33, 33), (1, 1));
        assert_eq!(chunk_dims(31, 500), (0, 15));
        assert_eq!(chunk_dims(0, 0), (0, 0));
    }

    #[test]
    fn negative_extents_yield_empty_table() {
        assert_eq!(chunk_dims(-5, 100), (0, 3));
    }

    #[test]
    fn window_is_symmetric_around_camera_chunk() {
        let chunk_px = 256.0;
        let w = VisibleWindow::compute(
            Vec2::new(3.0 * chunk_px + 10.0, chunk_px * 0.5),
            Vec2::new(800.0, 600.0),
            1.0,
            chunk_px,
        );
        assert_eq!(w.center, ChunkCoord::new(3, 0));
        // ceil(800 / 256) + 1 = 5, ceil(600 / 256) + 1 = 4
        assert_eq!((w.range_x, w.range_y), (5, 4));
        for c in w.iter() {
            assert!(w.contains(c));
        }
        assert_eq!(
            w.iter().count() as i32,
            (2 * w.range_x + 1) * (2 * w.range_y + 1)
        );
    }

    #[test]
    fn contains_matches_half_extent_definition() {
        let w = VisibleWindow {
            center: ChunkCoord::new(2, 2),
            range_x: 1,
            range_y: 2,
        };
        assert!(w.contains(ChunkCoord::new(1, 4)));
        assert!(!w.contains(ChunkCoord::new(0, 2)));
        assert!(!w.contains(ChunkCoord::new(2, 5)));
    }

    #[test]
    fn clipped_equals_bounds_intersection() {
        let w = VisibleWindow {
            center: ChunkCoord::new(0, 0),
            range_x: 2,
            range_y: 2,
        };
        let dims = (3usize, 3usize);
        let clipped: Vec<_> = w.clipped(dims).collect();
        for c in &clipped {
            assert!(c.in_bounds(dims) && w.contains(*c));
        }
        // |x| <= 2 and 0 <= x < 3 leaves x in {0, 1, 2}; same for y.
        assert_eq!(clipped.len(), 9);
    }

    #[test]
    fn camera_far_off_world_sees_nothing_in_bounds() {
        let chunk_px = 256.0;
        let w = VisibleWindow::compute(
            Vec2::new(-10_000.0 * 8.0, 0.0),
            Vec2::new(800.0, 600.0),
            1.0,
            chunk_px,
        );
        assert_eq!(w.clipped((3, 3)).count(), 0);
    }

    #[test]
    fn zoom_widens_the_window() {
        let chunk_px = 256.0;
        let near = VisibleWindow::compute(Vec2::ZERO, Vec2::new(800.0, 600.0), 1.0, chunk_px);
        let far = VisibleWindow::compute(Vec2::ZERO, Vec2::new(800.0, 600.0), 4.0, chunk_px);
        assert!(far.range_x > near.range_x);
        assert!(far.range_y > near.range_y);
    }
}
