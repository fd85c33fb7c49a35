use serde::{Deserialize, Serialize};

/// MSAA sample counts the renderer accepts.
const SUPPORTED_MSAA: [u32; 2] = [1, 4];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Frame clearing, fade, multisampling, and timing parameters.
pub struct RenderOptions {
    /// Background RGBA.
    pub clear_color: [f32; 4],
    /// Fade period in seconds, passed to the shader.
    pub max_age: f32,
    /// Samples per pixel, 1 or 4.
    pub msaa_samples: u32,
    /// Texels in the cross-trail gradient lookup.
    pub gradient_size: u32,
    /// Fixed frame tick of the viewer, in milliseconds.
    pub frame_interval_ms: u64,
    /// How often the viewer publishes stats, in milliseconds.
    pub stats_interval_ms: u64,
    /// FPS averaging window, in milliseconds.
    pub fps_window_ms: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.05, 0.05, 0.1, 1.0],
            max_age: 10.0,
            msaa_samples: 4,
            gradient_size: 256,
            frame_interval_ms: 16,
            stats_interval_ms: 100,
            fps_window_ms: 500,
        }
    }
}

impl RenderOptions {
    /// The configured sample count if supported, otherwise 1.
    #[must_use]
    pub fn effective_msaa_samples(&self) -> u32 {
        if SUPPORTED_MSAA.contains(&self.msaa_samples) {
            self.msaa_samples
        } else {
            log::warn!(
                "unsupported MSAA sample count {}, falling back to 1",
                self.msaa_samples
            );
            1
        }
    }
}
