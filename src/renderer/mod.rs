//! Per-frame rendering of the trail store.
//!
//! [`TrailRenderer`] owns every GPU object the frame needs: the storage
//! mirror, the trail pass, and the size-dependent depth/MSAA attachments.
//! It is created when a context is attached and dropped on detach.

/// The instanced trail draw pass.
pub mod trail_pass;

use glam::{Mat4, Vec3};

use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::FrameTargets;
use crate::gpu::trail_buffers::TrailBuffers;
use crate::options::RenderOptions;
use crate::trail::TrailStore;
use trail_pass::{FrameUniforms, TrailPass};

/// Camera and clock state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Combined view-projection matrix.
    pub view_proj: Mat4,
    /// World-space camera position.
    pub camera_pos: Vec3,
    /// Seconds since start.
    pub time: f32,
}

/// GPU-side renderer: mirror + pass + attachments.
pub struct TrailRenderer {
    buffers: TrailBuffers,
    pass: TrailPass,
    targets: FrameTargets,
    clear_color: wgpu::Color,
    max_age: f32,
}

impl TrailRenderer {
    /// Create all GPU resources for `context`.
    pub async fn new(context: &RenderContext, options: &RenderOptions) -> Self {
        let sample_count = options.effective_msaa_samples();
        let buffers = TrailBuffers::new(&context.device);
        let pass = TrailPass::new(
            context,
            buffers.layout(),
            sample_count,
            options.gradient_size,
        )
        .await;
        let (width, height) = context.size();
        let targets = FrameTargets::new(
            &context.device,
            context.format(),
            sample_count,
            width,
            height,
        );
        let [r, g, b, a] = options.clear_color;

        Self {
            buffers,
            pass,
            targets,
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: f64::from(a),
            },
            max_age: options.max_age,
        }
    }

    /// Bring the GPU mirror up to date with `store`. Returns `true` if
    /// anything was uploaded.
    pub fn sync(&mut self, context: &RenderContext, store: &TrailStore) -> bool {
        let uploaded =
            self.buffers.sync(&context.device, &context.queue, store);
        if uploaded {
            let _ = self
                .pass
                .ensure_slots(&context.device, self.buffers.trail_count());
        }
        uploaded
    }

    /// Resize the depth and MSAA attachments.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.targets.resize(device, width, height);
    }

    /// Render one frame into `output`.
    ///
    /// Clears color and depth every frame. When no trails are uploaded the
    /// clear is all that happens; otherwise shared state is bound once and
    /// each trail gets one instanced quad draw.
    pub fn render(
        &mut self,
        context: &RenderContext,
        output: &wgpu::TextureView,
        frame: &FrameState,
    ) {
        let mut encoder = context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Trail Render Pass"),
                    color_attachments: &[Some(
                        self.targets.color_attachment(output, self.clear_color),
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: self.targets.depth_view(),
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            if !self.buffers.draws().is_empty() {
                let uniforms = FrameUniforms::new(
                    frame.view_proj,
                    frame.camera_pos,
                    frame.time,
                    self.max_age,
                );
                self.pass.write_frame(&context.queue, &uniforms);
                self.pass.draw(&mut render_pass, &self.buffers);
            }
        }
        context.submit(encoder);
    }

    /// The storage-buffer mirror.
    #[must_use]
    pub fn buffers(&self) -> &TrailBuffers {
        &self.buffers
    }
}
