//! Standalone trail demo window backed by winit.
//!
//! ```no_run
//! # use trails::Viewer;
//! Viewer::builder().build().run().unwrap();
//! ```

use std::sync::Arc;

use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    engine::FrameStats,
    error::TrailsError,
    input::scroll_notches,
    options::Options,
    util::frame_timing::FrameTicker,
    InputEvent, MouseButton, TrailEngine,
};

/// Default window title.
pub const DEFAULT_TITLE: &str = "Instanced Quad Trail Demo - Multi Trail";

/// Default inner window size in logical pixels.
pub const DEFAULT_SIZE: (u32, u32) = (1400, 800);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    size: (u32, u32),
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: DEFAULT_TITLE.into(),
            size: DEFAULT_SIZE,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial inner size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(1), height.max(1));
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
            size: self.size,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that renders trails.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    size: (u32, u32),
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`TrailsError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), TrailsError> {
        let event_loop =
            EventLoop::new().map_err(|e| TrailsError::Viewer(e.to_string()))?;

        let now = Instant::now();
        let render = &self.options.render;
        let frame_ticker = FrameTicker::new(
            Duration::from_millis(render.frame_interval_ms.max(1)),
            now,
        );
        let stats_ticker = FrameTicker::new(
            Duration::from_millis(render.stats_interval_ms.max(1)),
            now,
        );

        let mut app = ViewerApp {
            window: None,
            engine: TrailEngine::new(self.options),
            frame_ticker,
            stats_ticker,
            title: self.title,
            size: self.size,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TrailsError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: TrailEngine,
    frame_ticker: FrameTicker,
    stats_ticker: FrameTicker,
    title: String,
    size: (u32, u32),
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Window title carrying the live stats.
fn stats_title(title: &str, stats: &FrameStats) -> String {
    format!(
        "{title} | {:.1} fps | {} trails | {} points",
        stats.fps, stats.trail_count, stats.total_points
    )
}

impl ViewerApp {
    fn render_frame(&mut self) {
        match self.engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.engine.reconfigure_surface();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("surface timeout, skipping frame");
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }
    }

    fn publish_stats(&self) {
        let stats = self.engine.stats();
        log::debug!(
            "fps {:.1}, trails {}, points {}",
            stats.fps,
            stats.trail_count,
            stats.total_points
        );
        if let Some(w) = &self.window {
            w.set_title(&stats_title(&self.title, &stats));
        }
    }

    fn forward(&mut self, event: &InputEvent) {
        let _ = self.engine.handle_input(event);
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.size.0,
                self.size.1,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        if let Err(e) =
            pollster::block_on(self.engine.attach(window.clone(), size))
        {
            log::error!("Failed to initialize GPU: {e}");
            event_loop.exit();
            return;
        }

        let now = Instant::now();
        event_loop.set_control_flow(ControlFlow::WaitUntil(
            self.frame_ticker.deadline().max(now),
        ));
        window.request_redraw();
        self.window = Some(window);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.engine.detach();
        self.window = None;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                self.engine.resize(vp_w, vp_h);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let inner = self.window.as_ref().map(|w| w.inner_size());
                if let Some(inner) = inner {
                    let (vp_w, vp_h) = viewport_size(inner);
                    self.engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => self.render_frame(),

            WindowEvent::MouseInput { button, state, .. } => {
                self.forward(&InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward(&InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.forward(&InputEvent::Scroll {
                    delta: scroll_notches(delta),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if let Some(action) = self.engine.handle_key(&key_str) {
                    log::debug!("{key_str} -> {action:?}");
                }
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        let now = Instant::now();

        if self.frame_ticker.is_due(now) {
            self.frame_ticker.advance(now);
            window.request_redraw();
        }
        if self.stats_ticker.is_due(now) {
            self.stats_ticker.advance(now);
            self.publish_stats();
        }

        let next = self.frame_ticker.deadline().min(self.stats_ticker.deadline());
        event_loop.set_control_flow(ControlFlow::WaitUntil(next));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_carries_stats() {
        let stats = FrameStats {
            fps: 59.94,
            trail_count: 2,
            total_points: 8000,
        };
        assert_eq!(
            stats_title(DEFAULT_TITLE, &stats),
            "Instanced Quad Trail Demo - Multi Trail | 59.9 fps | 2 trails | \
             8000 points"
        );
    }

    #[test]
    fn builder_defaults() {
        let viewer = Viewer::builder().with_size(0, 600).build();
        assert_eq!(viewer.title, DEFAULT_TITLE);
        assert_eq!(viewer.size, (1, 600));
        assert_eq!(viewer.options.trail.default_point_count, 5000);
    }
}
