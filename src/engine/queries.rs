//! Read-only stats and accessors for [`TrailEngine`].

use super::{FrameStats, TrailEngine};
use crate::camera::OrbitController;
use crate::options::Options;
use crate::trail::TrailStore;

impl TrailEngine {
    /// Frames per second over the last closed FPS window.
    #[must_use]
    pub fn current_fps(&self) -> f32 {
        self.fps.fps()
    }

    /// Number of trails.
    #[must_use]
    pub fn trail_count(&self) -> usize {
        self.store.trail_count()
    }

    /// Points across all trails.
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.store.total_points()
    }

    /// All polled stats at once.
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        FrameStats {
            fps: self.current_fps(),
            trail_count: self.trail_count(),
            total_points: self.total_points(),
        }
    }

    /// The trail store.
    #[must_use]
    pub fn store(&self) -> &TrailStore {
        &self.store
    }

    /// The orbit camera.
    #[must_use]
    pub fn camera(&self) -> &OrbitController {
        &self.camera_controller
    }

    /// The options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::FrameStats;
    use crate::options::Options;
    use crate::TrailEngine;

    #[test]
    fn stats_track_the_store() {
        let mut engine = TrailEngine::new(Options::default());
        assert_eq!(
            engine.stats(),
            FrameStats {
                fps: 0.0,
                trail_count: 0,
                total_points: 0,
            }
        );
        let _ = engine.add_trail(100, 1.0, 0.1);
        let stats = engine.stats();
        assert_eq!((stats.trail_count, stats.total_points), (1, 100));
    }
}
