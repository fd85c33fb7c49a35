//! The [`TrailEngine`] facade a UI drives.
//!
//! The engine owns the trail store unconditionally and the GPU side
//! optionally. Mutations always land in the store; the GPU mirror is
//! re-uploaded immediately when a context is attached, and otherwise on the
//! next attach or frame.

mod input;
mod queries;
mod trails;

use web_time::{Duration, Instant};

use crate::camera::OrbitController;
use crate::error::TrailsError;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::renderer::{FrameState, TrailRenderer};
use crate::trail::TrailStore;
use crate::util::frame_timing::FpsCounter;

/// Snapshot of the stats a UI polls for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Frames per second over the last closed window.
    pub fps: f32,
    /// Number of trails.
    pub trail_count: usize,
    /// Points across all trails.
    pub total_points: u32,
}

/// GPU resources that only exist while a context is attached.
struct GpuState {
    context: RenderContext,
    renderer: TrailRenderer,
}

/// Trail store, orbit camera, FPS counter, and (while attached) the GPU
/// renderer, behind one single-threaded API.
pub struct TrailEngine {
    options: Options,
    store: TrailStore,
    camera_controller: OrbitController,
    fps: FpsCounter,
    start: Instant,
    gpu: Option<GpuState>,
}

impl TrailEngine {
    /// Engine with no GPU context attached yet.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let ranges = options.trail.style;
        let store = options.trail.seed.map_or_else(
            || TrailStore::new(ranges),
            |seed| TrailStore::with_seed(ranges, seed),
        );
        let camera_controller = OrbitController::new(&options.camera, 1.0);
        let fps = FpsCounter::new(Duration::from_millis(
            options.render.fps_window_ms,
        ));

        Self {
            options,
            store,
            camera_controller,
            fps,
            start: Instant::now(),
            gpu: None,
        }
    }

    // ── Lifecycle ──

    /// Create a GPU context for `window` and attach it.
    ///
    /// # Errors
    ///
    /// Returns [`TrailsError::Gpu`] if the context cannot be created. The
    /// engine stays detached and keeps working on the CPU side.
    pub async fn attach(
        &mut self,
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<(), TrailsError> {
        let context = RenderContext::new(window, size).await?;
        self.attach_context(context).await;
        Ok(())
    }

    /// Attach an existing context: builds the renderer and uploads the
    /// store right away.
    pub async fn attach_context(&mut self, context: RenderContext) {
        let renderer =
            TrailRenderer::new(&context, &self.options.render).await;
        let (width, height) = context.size();
        self.camera_controller.resize(width, height);
        self.gpu = Some(GpuState { context, renderer });
        log::info!("GPU context attached ({width}x{height})");
        self.sync_gpu();
    }

    /// Release every GPU resource. The store is kept and re-uploaded on the
    /// next attach.
    pub fn detach(&mut self) {
        if self.gpu.take().is_some() {
            log::info!("GPU context detached");
        }
    }

    /// Whether a GPU context is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.gpu.is_some()
    }

    /// The attached context, if any.
    #[must_use]
    pub fn context(&self) -> Option<&RenderContext> {
        self.gpu.as_ref().map(|gpu| &gpu.context)
    }

    /// The attached renderer, if any.
    #[must_use]
    pub fn renderer(&self) -> Option<&TrailRenderer> {
        self.gpu.as_ref().map(|gpu| &gpu.renderer)
    }

    /// Resize the surface, attachments, and camera aspect. Ignores
    /// zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera_controller.resize(width, height);
        if let Some(gpu) = &mut self.gpu {
            gpu.context.resize(width, height);
            gpu.renderer.resize(&gpu.context.device, width, height);
        }
    }

    /// Reapply the surface configuration after the surface was lost or
    /// went out of date.
    pub fn reconfigure_surface(&self) {
        if let Some(gpu) = &self.gpu {
            gpu.context.reconfigure();
        }
    }

    // ── Frame ──

    /// Render one frame to the window surface and present it.
    ///
    /// Does nothing while detached.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] from acquiring the frame; the
    /// host decides whether to reconfigure or skip.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.fps.tick();
        let frame = self.frame_state();
        let Some(gpu) = &mut self.gpu else {
            return Ok(());
        };
        let output = gpu.context.get_next_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Self::draw_frame(gpu, &self.store, &view, &frame);
        output.present();
        Ok(())
    }

    /// Render one frame into `view`, which must match the context size.
    ///
    /// Does nothing while detached.
    pub fn render_to_view(&mut self, view: &wgpu::TextureView) {
        self.fps.tick();
        let frame = self.frame_state();
        if let Some(gpu) = &mut self.gpu {
            Self::draw_frame(gpu, &self.store, view, &frame);
        }
    }

    fn draw_frame(
        gpu: &mut GpuState,
        store: &TrailStore,
        view: &wgpu::TextureView,
        frame: &FrameState,
    ) {
        let _ = gpu.renderer.sync(&gpu.context, store);
        gpu.renderer.render(&gpu.context, view, frame);
    }

    fn frame_state(&self) -> FrameState {
        FrameState {
            view_proj: self.camera_controller.view_projection(),
            camera_pos: self.camera_controller.camera.eye,
            time: self.start.elapsed().as_secs_f32(),
        }
    }

    /// Upload the store if a context is attached; otherwise defer.
    fn sync_gpu(&mut self) {
        if let Some(gpu) = &mut self.gpu {
            let _ = gpu.renderer.sync(&gpu.context, &self.store);
        }
    }
}
