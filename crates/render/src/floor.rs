use crate::camera::Camera2d;
use crate::sink::{CacheHandle, GeometrySink, SpriteBatch};
use std::time::Instant;
use tileworks_common::{CHUNK_SIZE, DrawLayer, VERTS_PER_SPRITE, chunk_px};
use tileworks_grid::{ChunkCoord, VisibleWindow, chunk_dims};
use tileworks_world::World;

/// Background fill color drawn under the floor caches.
const BACKGROUND: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// One chunk's cache handles, one slot per layer. `None` means the chunk
/// emits zero primitives for that layer.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    caches: [Option<CacheHandle>; DrawLayer::COUNT],
}

impl Chunk {
    pub fn cache(&self, layer: DrawLayer) -> Option<CacheHandle> {
        self.caches[layer.ordinal()]
    }
}

/// The chunked tile-floor renderer.
///
/// Owns the chunk table and the geometry sink. [`FloorRenderer::rebuild`]
/// runs once per world load; [`FloorRenderer::draw_floor`] runs per frame.
/// The walls layer is cached here but replayed by the host through
/// [`FloorRenderer::draw_layer`], after everything that sits between floors
/// and walls has been drawn.
pub struct FloorRenderer<S: GeometrySink> {
    sink: Option<S>,
    chunks: Vec<Chunk>,
    dims: (usize, usize),
    drawn_layers: Vec<DrawLayer>,
}

impl<S: GeometrySink> Default for FloorRenderer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GeometrySink> FloorRenderer<S> {
    pub fn new() -> Self {
        Self {
            sink: None,
            chunks: Vec::new(),
            dims: (0, 0),
            drawn_layers: Vec::new(),
        }
    }

    /// Vertex capacity a sink for this world should be sized for: one sprite
    /// per tile per layer slot, four vertices each.
    pub fn vertex_capacity(world: &World) -> usize {
        world.width().max(0) as usize
            * world.height().max(0) as usize
            * VERTS_PER_SPRITE
            * (DrawLayer::COUNT + 1)
    }

    /// Chunk-table dimensions of the current world, `(columns, rows)`.
    pub fn dims(&self) -> (usize, usize) {
        self.dims
    }

    /// Cache handle of one chunk-layer slot. `None` for empty slots and for
    /// out-of-range chunk coordinates.
    pub fn layer_handle(&self, cx: usize, cy: usize, layer: DrawLayer) -> Option<CacheHandle> {
        self.chunk(cx, cy).and_then(|c| c.cache(layer))
    }

    pub fn chunk(&self, cx: usize, cy: usize) -> Option<&Chunk> {
        if cx >= self.dims.0 || cy >= self.dims.1 {
            return None;
        }
        self.chunks.get(cx * self.dims.1 + cy)
    }

    /// The geometry sink, once a world has been loaded.
    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Layers replayed by the most recent [`FloorRenderer::draw_floor`], in
    /// ascending ordinal order.
    pub fn drawn_layers(&self) -> &[DrawLayer] {
        &self.drawn_layers
    }

    /// The chunk window a camera can see.
    pub fn window(camera: &Camera2d) -> VisibleWindow {
        VisibleWindow::compute(camera.position, camera.viewport, camera.zoom, chunk_px())
    }

    /// React to a world (re)load: dispose the previous sink, allocate a
    /// fresh chunk table, and fill every chunk's caches.
    ///
    /// The replacement sink comes from `make_sink`, invoked with the vertex
    /// capacity for this world only after the previous sink has been
    /// disposed, so GPU memory never holds two generations at once.
    pub fn rebuild<F>(&mut self, world: &World, make_sink: F)
    where
        F: FnOnce(usize) -> S,
    {
        let _span = tracing::info_span!("floor_rebuild").entered();

        if let Some(mut old) = self.sink.take() {
            old.dispose();
        }
        let mut sink = make_sink(Self::vertex_capacity(world));

        let start = Instant::now();
        self.dims = chunk_dims(world.width(), world.height());
        self.chunks = vec![Chunk::default(); self.dims.0 * self.dims.1];
        self.drawn_layers.clear();
        tracing::info!(
            chunks_x = self.dims.0,
            chunks_y = self.dims.1,
            elapsed_us = start.elapsed().as_micros() as u64,
            "chunk table created"
        );

        let fill = Instant::now();
        for cx in 0..self.dims.0 {
            for cy in 0..self.dims.1 {
                self.cache_chunk(world, &mut sink, cx, cy);
            }
        }
        tracing::info!(
            caches = self.chunks.len() * DrawLayer::COUNT,
            elapsed_us = fill.elapsed().as_micros() as u64,
            "chunk caches built"
        );

        self.sink = Some(sink);
    }

    fn cache_chunk(&mut self, world: &World, sink: &mut S, cx: usize, cy: usize) {
        for layer in DrawLayer::ALL {
            self.cache_chunk_layer(world, sink, cx, cy, layer);
        }
    }

    /// Record one chunk-layer cache. Tiles iterate in ascending (y, x) order
    /// so overdraw inside a cache is deterministic.
    fn cache_chunk_layer(
        &mut self,
        world: &World,
        sink: &mut S,
        cx: usize,
        cy: usize,
        layer: DrawLayer,
    ) {
        sink.begin_cache();

        let x0 = cx as i32 * CHUNK_SIZE;
        let y0 = cy as i32 * CHUNK_SIZE;
        for ty in y0..y0 + CHUNK_SIZE {
            for tx in x0..x0 + CHUNK_SIZE {
                let Some(tile) = world.tile(tx, ty) else {
                    continue;
                };
                let floor_layer = tile.floor().draw_layer();
                let block_layer = tile.block().draw_layer();
                let walled = block_layer == DrawLayer::Walls;

                if floor_layer == layer && !walled {
                    tile.floor().draw(tile, sink);
                } else if floor_layer.ordinal() < layer.ordinal() && !walled && !layer.is_top() {
                    // Floors decorate layers above their primary one.
                    tile.floor().draw_non_layer(tile, sink);
                }

                if block_layer == layer && layer.is_top() {
                    tile.block().draw(tile, sink);
                }
            }
        }

        let handle = sink.end_cache();
        let slot = &mut self.chunks[cx * self.dims.1 + cy].caches[layer.ordinal()];
        debug_assert!(slot.is_none(), "chunk cache slot written twice");
        *slot = (sink.sprite_count(handle) > 0).then_some(handle);
    }

    /// Draw the floor for one frame.
    ///
    /// Fills the visible chunks with a background rect through the general
    /// `batch`, suspends it, replays every non-empty layer below the walls
    /// layer in ascending order, then resumes the batch. Does nothing before
    /// the first [`FloorRenderer::rebuild`].
    pub fn draw_floor(&mut self, camera: &Camera2d, batch: &mut dyn SpriteBatch) {
        let FloorRenderer {
            sink,
            chunks,
            dims,
            drawn_layers,
        } = self;
        let Some(sink) = sink.as_mut() else {
            return;
        };

        let window = Self::window(camera);
        let size = chunk_px();

        for coord in window.clipped(*dims) {
            let origin = coord.origin_px(size);
            batch.draw_rect(origin.x, origin.y, size, size, BACKGROUND);
        }

        // Union of non-empty layers below the top layer across the window.
        let mut used = [false; DrawLayer::COUNT];
        for coord in window.clipped(*dims) {
            let chunk = &chunks[chunk_index(coord, *dims)];
            for ordinal in 0..DrawLayer::COUNT - 1 {
                if chunk.caches[ordinal].is_some() {
                    used[ordinal] = true;
                }
            }
        }
        drawn_layers.clear();
        for (ordinal, used) in used.iter().enumerate() {
            if *used {
                drawn_layers.push(DrawLayer::from_ordinal(ordinal));
            }
        }

        batch.end();
        sink.set_projection(camera.combined());
        sink.begin_draw();
        for layer in drawn_layers.iter() {
            replay_layer(sink, chunks, *dims, &window, *layer);
        }
        sink.end_draw();
        batch.begin();
    }

    /// Replay a single layer's visible caches inside its own draw-mode
    /// bracket. The host calls this for the walls layer once everything
    /// beneath it has been drawn.
    pub fn draw_layer(&mut self, camera: &Camera2d, layer: DrawLayer) {
        let FloorRenderer {
            sink, chunks, dims, ..
        } = self;
        let Some(sink) = sink.as_mut() else {
            return;
        };
        sink.begin_draw();
        replay_layer(sink, chunks, *dims, &Self::window(camera), layer);
        sink.end_draw();
    }
}

fn chunk_index(coord: ChunkCoord, dims: (usize, usize)) -> usize {
    coord.x as usize * dims.1 + coord.y as usize
}

fn replay_layer<S: GeometrySink>(
    sink: &mut S,
    chunks: &[Chunk],
    dims: (usize, usize),
    window: &VisibleWindow,
    layer: DrawLayer,
) {
    sink.begin_layer(layer);
    for coord in window.clipped(dims) {
        if let Some(handle) = chunks[chunk_index(coord, dims)].caches[layer.ordinal()] {
            sink.replay(handle);
        }
    }
    sink.end_layer(layer);
}
