use glam::Mat4;
use tileworks_common::{DrawLayer, SpriteCmd, SpriteEmitter};

/// Opaque handle naming a replayable cached command list inside a geometry
/// sink. Valid until the issuing sink is disposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheHandle(u32);

impl CacheHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Construct a handle from a cache index. For sink implementations;
    /// consumers treat handles as opaque.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// The geometry-cache builder and replayer.
///
/// A sink records sprite commands between `begin_cache` and `end_cache` into
/// GPU-resident caches, then replays any cache by handle during a frame.
/// All operations are rendering-thread only.
///
/// Layer `begin`/`end` hooks live here because the state they switch (blend
/// mode, shader) belongs to the backend.
pub trait GeometrySink: SpriteEmitter {
    /// Enter recording mode; subsequent sprites go into a new cache.
    fn begin_cache(&mut self);

    /// Finalize the recording and return its handle. An empty recording
    /// still yields a valid handle.
    fn end_cache(&mut self) -> CacheHandle;

    /// Number of sprites recorded in the given cache. Lets callers treat
    /// empty caches as absent.
    fn sprite_count(&self, handle: CacheHandle) -> usize;

    /// Set the shared projection matrix for subsequent replays.
    fn set_projection(&mut self, projection: Mat4);

    /// Enter replay mode for the current frame.
    fn begin_draw(&mut self);

    /// Leave replay mode.
    fn end_draw(&mut self);

    /// Apply the GPU state for a layer before its chunks replay.
    fn begin_layer(&mut self, layer: DrawLayer);

    /// Restore state after a layer's chunks have replayed.
    fn end_layer(&mut self, layer: DrawLayer);

    /// Submit the cached geometry for drawing under the current projection
    /// and layer state.
    fn replay(&mut self, handle: CacheHandle);

    /// Release all resources and invalidate every handle. Replaying a handle
    /// afterwards is a use-after-dispose bug and panics.
    fn dispose(&mut self);
}

/// The general sprite batch collaborator. The frame renderer draws its
/// background fill through it, then suspends it while cached geometry
/// replays.
pub trait SpriteBatch {
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]);

    /// Flush and suspend batching.
    fn end(&mut self);

    /// Resume batching after cached replay.
    fn begin(&mut self);
}

/// A batch that discards everything; for headless runs.
#[derive(Debug, Default)]
pub struct NullBatch;

impl SpriteBatch for NullBatch {
    fn draw_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: [f32; 4]) {}
    fn end(&mut self) {}
    fn begin(&mut self) {}
}

/// One entry in a [`RecordingSink`] operation log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkOp {
    SetProjection,
    BeginDraw,
    EndDraw,
    BeginLayer(DrawLayer),
    EndLayer(DrawLayer),
    Replay(CacheHandle),
}

/// In-memory geometry sink.
///
/// Retains every cache's command list and a full operation log, which is what
/// tests and headless diagnostics need: cache contents can be compared for
/// determinism and the replay order inspected. The GPU backend mirrors this
/// contract against real buffers.
#[derive(Debug, Default)]
pub struct RecordingSink {
    caches: Vec<Vec<SpriteCmd>>,
    recording: Option<Vec<SpriteCmd>>,
    ops: Vec<SinkOp>,
    dispose_count: usize,
    disposed: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded into the given cache.
    pub fn cache(&self, handle: CacheHandle) -> &[SpriteCmd] {
        &self.caches[handle.index()]
    }

    /// All caches in handle order.
    pub fn caches(&self) -> &[Vec<SpriteCmd>] {
        &self.caches
    }

    /// The frame operation log, in submission order.
    pub fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    pub fn dispose_count(&self) -> usize {
        self.dispose_count
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Sprites that were replayed this frame, in replay order.
    pub fn replayed_sprites(&self) -> Vec<SpriteCmd> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SinkOp::Replay(h) => Some(self.cache(*h)),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }
}

impl SpriteEmitter for RecordingSink {
    fn emit_sprite(&mut self, sprite: SpriteCmd) {
        let recording = self
            .recording
            .as_mut()
            .expect("emit_sprite outside begin_cache/end_cache");
        recording.push(sprite);
    }
}

impl GeometrySink for RecordingSink {
    fn begin_cache(&mut self) {
        assert!(!self.disposed, "begin_cache on disposed sink");
        assert!(self.recording.is_none(), "begin_cache while already recording");
        self.recording = Some(Vec::new());
    }

    fn end_cache(&mut self) -> CacheHandle {
        let recorded = self.recording.take().expect("end_cache without begin_cache");
        self.caches.push(recorded);
        CacheHandle::from_index(self.caches.len() - 1)
    }

    fn sprite_count(&self, handle: CacheHandle) -> usize {
        self.caches[handle.index()].len()
    }

    fn set_projection(&mut self, _projection: Mat4) {
        self.ops.push(SinkOp::SetProjection);
    }

    fn begin_draw(&mut self) {
        assert!(!self.disposed, "begin_draw on disposed sink");
        self.ops.push(SinkOp::BeginDraw);
    }

    fn end_draw(&mut self) {
        self.ops.push(SinkOp::EndDraw);
    }

    fn begin_layer(&mut self, layer: DrawLayer) {
        self.ops.push(SinkOp::BeginLayer(layer));
    }

    fn end_layer(&mut self, layer: DrawLayer) {
        self.ops.push(SinkOp::EndLayer(layer));
    }

    fn replay(&mut self, handle: CacheHandle) {
        assert!(!self.disposed, "replay on disposed sink: use-after-dispose");
        assert!(handle.index() < self.caches.len(), "replay of unknown handle");
        self.ops.push(SinkOp::Replay(handle));
    }

    fn dispose(&mut self) {
        self.caches.clear();
        self.recording = None;
        self.disposed = true;
        self.dispose_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworks_common::TextureId;

    fn sprite(n: u16) -> SpriteCmd {
        SpriteCmd::simple(TextureId(n), 0.0, 0.0, 8.0, 8.0)
    }

    #[test]
    fn record_and_inspect_cache() {
        let mut sink = RecordingSink::new();
        sink.begin_cache();
        sink.emit_sprite(sprite(1));
        sink.emit_sprite(sprite(2));
        let h = sink.end_cache();
        assert_eq!(sink.sprite_count(h), 2);
        assert_eq!(sink.cache(h)[0].texture, TextureId(1));
    }

    #[test]
    fn empty_recording_still_gets_a_handle() {
        let mut sink = RecordingSink::new();
        sink.begin_cache();
        let h = sink.end_cache();
        assert_eq!(sink.sprite_count(h), 0);
    }

    #[test]
    fn handles_are_issued_in_order() {
        let mut sink = RecordingSink::new();
        sink.begin_cache();
        let a = sink.end_cache();
        sink.begin_cache();
        let b = sink.end_cache();
        assert_eq!(a.index() + 1, b.index());
    }

    #[test]
    fn op_log_preserves_frame_order() {
        let mut sink = RecordingSink::new();
        sink.begin_cache();
        sink.emit_sprite(sprite(1));
        let h = sink.end_cache();

        sink.set_projection(Mat4::IDENTITY);
        sink.begin_draw();
        sink.begin_layer(DrawLayer::Floor);
        sink.replay(h);
        sink.end_layer(DrawLayer::Floor);
        sink.end_draw();

        assert_eq!(
            sink.ops(),
            &[
                SinkOp::SetProjection,
                SinkOp::BeginDraw,
                SinkOp::BeginLayer(DrawLayer::Floor),
                SinkOp::Replay(h),
                SinkOp::EndLayer(DrawLayer::Floor),
                SinkOp::EndDraw,
            ]
        );
        assert_eq!(sink.replayed_sprites().len(), 1);
    }

    #[test]
    fn dispose_is_observable() {
        let mut sink = RecordingSink::new();
        sink.begin_cache();
        let _ = sink.end_cache();
        sink.dispose();
        assert!(sink.is_disposed());
        assert_eq!(sink.dispose_count(), 1);
        assert!(sink.caches().is_empty());
    }

    #[test]
    #[should_panic(expected = "use-after-dispose")]
    fn replay_after_dispose_panics() {
        let mut sink = RecordingSink::new();
        sink.begin_cache();
        let h = sink.end_cache();
        sink.dispose();
        sink.replay(h);
    }

    #[test]
    #[should_panic(expected = "outside begin_cache")]
    fn emit_outside_recording_panics() {
        let mut sink = RecordingSink::new();
        sink.emit_sprite(sprite(1));
    }
}
