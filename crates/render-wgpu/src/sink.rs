use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use tileworks_common::{DrawLayer, SpriteCmd, SpriteEmitter};
use tileworks_render::{CacheHandle, GeometrySink};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Uniforms {
    projection: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct SpriteVertex {
    position: [f32; 2],
    uv: [f32; 2],
    color: [f32; 4],
}

/// Indices per quad: two triangles over four vertices.
const INDICES_PER_QUAD: usize = 6;
const VERTS_PER_QUAD: usize = 4;

/// One cached command list: a contiguous quad range in the vertex buffer.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    first_quad: u32,
    quad_count: u32,
}

/// Corner expansion of one sprite command.
fn quad_vertices(cmd: &SpriteCmd) -> [SpriteVertex; 4] {
    let (x0, y0) = (cmd.x, cmd.y);
    let (x1, y1) = (cmd.x + cmd.width, cmd.y + cmd.height);
    let [u0, v0, u1, v1] = cmd.uv;
    [
        SpriteVertex { position: [x0, y0], uv: [u0, v0], color: cmd.color },
        SpriteVertex { position: [x1, y0], uv: [u1, v0], color: cmd.color },
        SpriteVertex { position: [x1, y1], uv: [u1, v1], color: cmd.color },
        SpriteVertex { position: [x0, y1], uv: [u0, v1], color: cmd.color },
    ]
}

/// Shared index pattern for `max_quads` quads.
fn quad_indices(max_quads: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(max_quads * INDICES_PER_QUAD);
    for quad in 0..max_quads as u32 {
        let base = quad * VERTS_PER_QUAD as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    indices
}

/// wgpu-backed geometry sink.
///
/// Recording appends vertices to CPU staging; `end_cache` uploads the range
/// into the persistent vertex buffer and remembers it by handle. Replays
/// enqueue ranges; [`WgpuCacheSink::frame_submit`] encodes one render pass
/// drawing them in submission order.
pub struct WgpuCacheSink {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    atlas_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    quad_capacity: usize,
    used_quads: u32,
    staging: Vec<SpriteVertex>,
    recording: bool,
    caches: Vec<CacheEntry>,
    queued: Vec<CacheEntry>,
    current_layer: Option<DrawLayer>,
    drawing: bool,
    disposed: bool,
}

impl WgpuCacheSink {
    /// Create a sink sized for `vertex_capacity` sprite vertices (four per
    /// potential sprite; see the renderer's capacity helper).
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target_format: wgpu::TextureFormat,
        atlas_view: &wgpu::TextureView,
        atlas_sampler: &wgpu::Sampler,
        vertex_capacity: usize,
    ) -> Self {
        let quad_capacity = (vertex_capacity / VERTS_PER_QUAD).max(1);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("floor_uniforms"),
            contents: bytemuck::bytes_of(&Uniforms {
                projection: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("floor_uniform_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("floor_uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let atlas_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("floor_atlas_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("floor_atlas_bind_group"),
            layout: &atlas_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(atlas_sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("floor_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &atlas_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("floor_sprite_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SPRITE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("floor_sprite_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_sprite"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<SpriteVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x2,
                        2 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_sprite"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("floor_vertex_buffer"),
            size: (quad_capacity * VERTS_PER_QUAD * std::mem::size_of::<SpriteVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("floor_index_buffer"),
            contents: bytemuck::cast_slice(&quad_indices(quad_capacity)),
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::debug!(quad_capacity, "cache sink allocated");

        Self {
            device: device.clone(),
            queue: queue.clone(),
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            atlas_bind_group,
            vertex_buffer,
            index_buffer,
            quad_capacity,
            used_quads: 0,
            staging: Vec::new(),
            recording: false,
            caches: Vec::new(),
            queued: Vec::new(),
            current_layer: None,
            drawing: false,
            disposed: false,
        }
    }

    /// Encode and submit one render pass drawing every range replayed since
    /// `begin_draw`, over the host's current frame contents.
    pub fn frame_submit(&mut self, view: &wgpu::TextureView) {
        assert!(!self.disposed, "frame_submit on disposed sink");

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("floor_cache_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("floor_cache_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_bind_group(1, &self.atlas_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for entry in &self.queued {
                let index_count = entry.quad_count * INDICES_PER_QUAD as u32;
                let base_vertex = (entry.first_quad * VERTS_PER_QUAD as u32) as i32;
                pass.draw_indexed(0..index_count, base_vertex, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.queued.clear();
    }
}

impl SpriteEmitter for WgpuCacheSink {
    fn emit_sprite(&mut self, sprite: SpriteCmd) {
        assert!(self.recording, "emit_sprite outside begin_cache/end_cache");
        self.staging.extend_from_slice(&quad_vertices(&sprite));
    }
}

impl GeometrySink for WgpuCacheSink {
    fn begin_cache(&mut self) {
        assert!(!self.disposed, "begin_cache on disposed sink");
        assert!(!self.recording, "begin_cache while already recording");
        self.recording = true;
        self.staging.clear();
    }

    fn end_cache(&mut self) -> CacheHandle {
        assert!(self.recording, "end_cache without begin_cache");
        self.recording = false;

        let quad_count = (self.staging.len() / VERTS_PER_QUAD) as u32;
        let entry = CacheEntry {
            first_quad: self.used_quads,
            quad_count,
        };
        assert!(
            (self.used_quads + quad_count) as usize <= self.quad_capacity,
            "geometry sink capacity exceeded: sized for {} quads",
            self.quad_capacity
        );

        if quad_count > 0 {
            let vertex_size = std::mem::size_of::<SpriteVertex>();
            let offset = (entry.first_quad as usize * VERTS_PER_QUAD * vertex_size) as u64;
            self.queue
                .write_buffer(&self.vertex_buffer, offset, bytemuck::cast_slice(&self.staging));
            self.used_quads += quad_count;
        }
        self.staging.clear();

        self.caches.push(entry);
        CacheHandle::from_index(self.caches.len() - 1)
    }

    fn sprite_count(&self, handle: CacheHandle) -> usize {
        self.caches[handle.index()].quad_count as usize
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                projection: projection.to_cols_array_2d(),
            }),
        );
    }

    fn begin_draw(&mut self) {
        assert!(!self.disposed, "begin_draw on disposed sink");
        assert!(!self.drawing, "begin_draw while already drawing");
        self.drawing = true;
        self.queued.clear();
    }

    fn end_draw(&mut self) {
        assert!(self.drawing, "end_draw without begin_draw");
        self.drawing = false;
    }

    fn begin_layer(&mut self, layer: DrawLayer) {
        assert!(self.current_layer.is_none(), "layer begin while layer active");
        self.current_layer = Some(layer);
    }

    fn end_layer(&mut self, layer: DrawLayer) {
        assert_eq!(self.current_layer.take(), Some(layer), "mismatched layer end");
    }

    fn replay(&mut self, handle: CacheHandle) {
        assert!(!self.disposed, "replay on disposed sink: use-after-dispose");
        let entry = self.caches[handle.index()];
        if entry.quad_count > 0 {
            self.queued.push(entry);
        }
    }

    fn dispose(&mut self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.uniform_buffer.destroy();
        self.caches.clear();
        self.queued.clear();
        self.used_quads = 0;
        self.disposed = true;
        tracing::debug!("cache sink disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworks_common::TextureId;

    #[test]
    fn sprite_vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<SpriteVertex>(), 32);
        assert_eq!(std::mem::size_of::<Uniforms>(), 64);
    }

    #[test]
    fn quad_vertices_wind_counter_clockwise_from_origin_corner() {
        let cmd = SpriteCmd::simple(TextureId(0), 8.0, 16.0, 8.0, 8.0);
        let v = quad_vertices(&cmd);
        assert_eq!(v[0].position, [8.0, 16.0]);
        assert_eq!(v[1].position, [16.0, 16.0]);
        assert_eq!(v[2].position, [16.0, 24.0]);
        assert_eq!(v[3].position, [8.0, 24.0]);
        assert_eq!(v[0].uv, [0.0, 0.0]);
        assert_eq!(v[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn quad_indices_tile_two_triangles_per_quad() {
        let indices = quad_indices(2);
        assert_eq!(indices, vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn uv_rect_maps_to_corners() {
        let mut cmd = SpriteCmd::simple(TextureId(0), 0.0, 0.0, 8.0, 8.0);
        cmd.uv = [0.25, 0.5, 0.75, 1.0];
        let v = quad_vertices(&cmd);
        assert_eq!(v[0].uv, [0.25, 0.5]);
        assert_eq!(v[1].uv, [0.75, 0.5]);
        assert_eq!(v[2].uv, [0.75, 1.0]);
        assert_eq!(v[3].uv, [0.25, 1.0]);
    }
}
