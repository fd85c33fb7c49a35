//! The instanced trail draw pass.
//!
//! Bind group convention:
//! - group(0): frame uniforms + gradient texture + sampler
//! - group(1): point and metadata storage buffers (see [`TrailBuffers`])
//! - group(2): trail index, one 256-byte slot per trail picked by dynamic
//!   offset

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::gpu::{
    pipeline_helpers::{
        align256, filtering_sampler, texture_1d, uniform_buffer,
    },
    render_context::RenderContext,
    texture::{GradientTexture, DEPTH_FORMAT},
    trail_buffers::TrailBuffers,
};

const SHADER_SOURCE: &str = include_str!("../../assets/shaders/trail.wgsl");

/// Stride between trail-index slots.
pub const SLOT_STRIDE: u64 = align256(size_of::<TrailSlot>() as u64);

/// Quad corners as a triangle strip: x across the ribbon, y along the
/// segment.
pub const QUAD_CORNERS: [[f32; 2]; 4] =
    [[-0.5, 0.0], [0.5, 0.0], [-0.5, 1.0], [0.5, 1.0]];

/// Per-frame shader state, bound once per frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Combined view-projection matrix, column-major.
    pub view_proj: [[f32; 4]; 4],
    /// World-space camera position.
    pub camera_pos: [f32; 3],
    /// Seconds since the engine started.
    pub current_time: f32,
    /// Fade period in seconds.
    pub max_age: f32,
    _pad: [f32; 3],
}

impl FrameUniforms {
    /// Uniforms for one frame.
    #[must_use]
    pub fn new(
        view_proj: glam::Mat4,
        camera_pos: glam::Vec3,
        current_time: f32,
        max_age: f32,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera_pos.to_array(),
            current_time,
            max_age,
            _pad: [0.0; 3],
        }
    }
}

/// Content of one trail-index slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TrailSlot {
    /// Index of the trail being drawn.
    pub index: i32,
    _pad: [u32; 3],
}

/// Byte image of `count` trail-index slots, each at a [`SLOT_STRIDE`]
/// boundary holding its own index.
#[must_use]
pub fn slot_bytes(count: usize) -> Vec<u8> {
    let stride = SLOT_STRIDE as usize;
    let mut bytes = vec![0u8; count * stride];
    for (i, chunk) in bytes.chunks_exact_mut(stride).enumerate() {
        let slot = TrailSlot {
            index: i as i32,
            _pad: [0; 3],
        };
        chunk[..size_of::<TrailSlot>()]
            .copy_from_slice(bytemuck::bytes_of(&slot));
    }
    bytes
}

/// Pipeline, frame uniforms, gradient, and trail-index slots for drawing
/// trails out of a [`TrailBuffers`] mirror.
pub struct TrailPass {
    pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    slot_layout: wgpu::BindGroupLayout,
    slot_bind_group: wgpu::BindGroup,
    slot_capacity: usize,
    _gradient: GradientTexture,
}

impl TrailPass {
    /// Build the pass.
    ///
    /// Shader and pipeline validation errors are logged, not returned: the
    /// pass is still created and renders in a degraded state.
    pub async fn new(
        context: &RenderContext,
        storage_layout: &wgpu::BindGroupLayout,
        sample_count: u32,
        gradient_size: u32,
    ) -> Self {
        let device = &context.device;

        let gradient =
            GradientTexture::new(device, &context.queue, gradient_size);

        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Trail Frame Layout"),
                entries: &[
                    uniform_buffer(
                        0,
                        false,
                        wgpu::BufferSize::new(size_of::<FrameUniforms>() as u64),
                    ),
                    texture_1d(1),
                    filtering_sampler(2),
                ],
            });
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Trail Frame Uniforms"),
            size: size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Trail Frame Bind Group"),
                layout: &frame_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: frame_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &gradient.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(
                            &gradient.sampler,
                        ),
                    },
                ],
            });

        let slot_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Trail Slot Layout"),
                entries: &[uniform_buffer(
                    0,
                    true,
                    wgpu::BufferSize::new(size_of::<TrailSlot>() as u64),
                )],
            });
        let slot_capacity = 16;
        let slot_bind_group = create_slots(device, &slot_layout, slot_capacity);

        let quad_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Trail Quad Buffer"),
                contents: bytemuck::cast_slice(&QUAD_CORNERS),
                usage: wgpu::BufferUsages::VERTEX,
            });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = create_pipeline(
            context,
            &[&frame_layout, storage_layout, &slot_layout],
            sample_count,
        );
        if let Some(error) = device.pop_error_scope().await {
            log::error!("trail pipeline setup failed: {error}");
        }

        Self {
            pipeline,
            quad_buffer,
            frame_buffer,
            frame_bind_group,
            slot_layout,
            slot_bind_group,
            slot_capacity,
            _gradient: gradient,
        }
    }

    /// Make room for `count` trail-index slots. Returns `true` if the slot
    /// buffer was reallocated.
    pub fn ensure_slots(&mut self, device: &wgpu::Device, count: usize) -> bool {
        if count <= self.slot_capacity {
            return false;
        }
        let capacity = count.next_power_of_two().max(self.slot_capacity * 2);
        self.slot_bind_group =
            create_slots(device, &self.slot_layout, capacity);
        self.slot_capacity = capacity;
        log::debug!("trail slots grown to {capacity}");
        true
    }

    /// Upload this frame's shared uniforms.
    pub fn write_frame(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Bind shared state once, then issue one instanced quad draw per
    /// uploaded trail.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        buffers: &TrailBuffers,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        render_pass.set_bind_group(1, buffers.bind_group(), &[]);

        for draw in buffers.draws() {
            if draw.trail_index as usize >= self.slot_capacity {
                break;
            }
            let offset = (u64::from(draw.trail_index) * SLOT_STRIDE) as u32;
            render_pass.set_bind_group(2, &self.slot_bind_group, &[offset]);
            render_pass.draw(0..4, 0..draw.segments);
        }
    }
}

fn create_slots(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: usize,
) -> wgpu::BindGroup {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Trail Slot Buffer"),
        contents: &slot_bytes(capacity),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Trail Slot Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(size_of::<TrailSlot>() as u64),
            }),
        }],
    })
}

fn create_pipeline(
    context: &RenderContext,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    sample_count: u32,
) -> wgpu::RenderPipeline {
    let device = &context.device;
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Trail Shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
    });

    let pipeline_layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Trail Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Trail Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: context.format(),
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            ..Default::default()
        },
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_uniforms_are_96_bytes() {
        assert_eq!(size_of::<FrameUniforms>(), 96);
    }

    #[test]
    fn frame_uniform_field_offsets() {
        let u = FrameUniforms::new(
            glam::Mat4::IDENTITY,
            glam::Vec3::new(1.0, 2.0, 3.0),
            4.5,
            10.0,
        );
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&u));
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[5], 1.0);
        assert_eq!(&floats[16..21], &[1.0, 2.0, 3.0, 4.5, 10.0]);
    }

    #[test]
    fn slots_hold_their_index_at_aligned_offsets() {
        assert_eq!(SLOT_STRIDE, 256);
        let bytes = slot_bytes(3);
        assert_eq!(bytes.len(), 3 * 256);
        for i in 0..3 {
            let at = i * 256;
            let index = i32::from_le_bytes([
                bytes[at],
                bytes[at + 1],
                bytes[at + 2],
                bytes[at + 3],
            ]);
            assert_eq!(index, i as i32);
        }
    }

    #[test]
    fn quad_is_a_unit_strip() {
        assert_eq!(QUAD_CORNERS.len(), 4);
        assert_eq!(QUAD_CORNERS[0], [-0.5, 0.0]);
        assert_eq!(QUAD_CORNERS[3], [0.5, 1.0]);
    }
}
