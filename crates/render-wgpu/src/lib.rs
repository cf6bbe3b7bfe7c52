//! wgpu backend for the tile-floor renderer.
//!
//! Implements the geometry-sink contract against one persistent vertex
//! buffer: caches are recorded into CPU staging, uploaded once, then
//! replayed as index ranges each frame.
//!
//! # Invariants
//! - All sink calls happen on the rendering thread.
//! - The vertex buffer is sized once, at world load, for the world's worst
//!   case; recording past it is a bug in the capacity computation.
//! - Handles die with the sink: replay after `dispose` panics.

mod shaders;
mod sink;

pub use sink::WgpuCacheSink;
