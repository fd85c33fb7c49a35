//! Render-target, depth/MSAA attachment, and gradient lookup textures.

/// Depth attachment format.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Gradient lookup texture format: a filterable single float channel.
pub const GRADIENT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R16Float;

/// A render-target texture and its default view.
///
/// Created with `RENDER_ATTACHMENT | TEXTURE_BINDING | COPY_SRC` usage, so it
/// can be rendered into offscreen and read back.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    /// Create a new render-target texture with the given dimensions and format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("RenderTarget"),
            size: extent(width, height),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Size-dependent attachments of the frame: a depth buffer and, with
/// multisampling, a color target resolved into the output view.
pub struct FrameTargets {
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    format: wgpu::TextureFormat,
    sample_count: u32,
    size: (u32, u32),
}

impl FrameTargets {
    /// Allocate attachments for a `width`×`height` frame.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        sample_count: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let size = (width.max(1), height.max(1));
        let (depth_view, msaa_view) =
            create_attachments(device, format, sample_count, size);
        Self {
            depth_view,
            msaa_view,
            format,
            sample_count,
            size,
        }
    }

    /// Recreate the attachments if the size changed.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let size = (width.max(1), height.max(1));
        if size == self.size {
            return;
        }
        let (depth_view, msaa_view) =
            create_attachments(device, self.format, self.sample_count, size);
        self.depth_view = depth_view;
        self.msaa_view = msaa_view;
        self.size = size;
    }

    /// Depth attachment view.
    #[must_use]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Color attachment for a frame whose final output is `output`: the
    /// multisampled target resolving into `output`, or `output` itself.
    #[must_use]
    pub fn color_attachment<'a>(
        &'a self,
        output: &'a wgpu::TextureView,
        clear: wgpu::Color,
    ) -> wgpu::RenderPassColorAttachment<'a> {
        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(output)),
            None => (output, None),
        };
        wgpu::RenderPassColorAttachment {
            view,
            depth_slice: None,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        }
    }

}

fn create_attachments(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    sample_count: u32,
    (width, height): (u32, u32),
) -> (wgpu::TextureView, Option<wgpu::TextureView>) {
    let depth = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: extent(width, height),
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

    let msaa_view = (sample_count > 1).then(|| {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("MSAA Color Texture"),
                size: extent(width, height),
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    });

    (depth_view, msaa_view)
}

fn extent(width: u32, height: u32) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}

/// Radial falloff across the trail: `(1 - |2·i/(n-1) - 1|)²` for `i` in
/// `0..n`. Zero at both edges, one in the middle.
#[must_use]
pub fn gradient_values(n: u32) -> Vec<f32> {
    let last = n.saturating_sub(1).max(1) as f32;
    (0..n)
        .map(|i| {
            let x = 2.0 * i as f32 / last - 1.0;
            (1.0 - x.abs()).powi(2)
        })
        .collect()
}

/// The 1D cross-trail falloff lookup texture the fragment stage samples.
pub struct GradientTexture {
    /// The underlying 1D texture.
    pub texture: wgpu::Texture,
    /// Full-texture 1D view.
    pub view: wgpu::TextureView,
    /// Linear clamp-to-edge sampler.
    pub sampler: wgpu::Sampler,
}

impl GradientTexture {
    /// Create and upload a gradient of `size` texels.
    #[must_use]
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, size: u32) -> Self {
        let size = size.max(2);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Trail Gradient"),
            size: wgpu::Extent3d {
                width: size,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D1,
            format: GRADIENT_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let data: Vec<u8> = gradient_values(size)
            .into_iter()
            .flat_map(|v| half::f16::from_f32(v).to_le_bytes())
            .collect();

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(size * 2),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: size,
                height: 1,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Trail Gradient View"),
            dimension: Some(wgpu::TextureViewDimension::D1),
            ..Default::default()
        });
        let sampler = super::pipeline_helpers::linear_sampler(
            device,
            "Trail Gradient Sampler",
        );

        Self {
            texture,
            view,
            sampler,
        }
    }
}
