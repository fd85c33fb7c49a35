//! Trail mutations for [`TrailEngine`].

use super::TrailEngine;
use crate::options::TrailRequest;

impl TrailEngine {
    /// Generate a randomly styled trail and append it.
    ///
    /// Out-of-range input is clamped to the configured ranges (with a
    /// warning) before it reaches the generator. Returns the new trail's
    /// index.
    pub fn add_trail(
        &mut self,
        point_count: u32,
        radius: f32,
        width: f32,
    ) -> usize {
        let requested = TrailRequest {
            point_count,
            radius,
            width,
        };
        let request = self.options.trail.clamp(requested);
        if request != requested {
            log::warn!("trail request {requested:?} clamped to {request:?}");
        }

        let index = self.store.trail_count();
        let trail = self
            .store
            .add_trail(request.point_count, request.radius, request.width)
            .clone();
        log::info!(
            "added trail {index}: {} points (start {}), radius {}, width {}, \
             total {} points",
            trail.point_count,
            trail.start_index,
            trail.radius,
            trail.width,
            self.store.total_points(),
        );

        self.sync_gpu();
        index
    }

    /// Append a trail with the configured default request.
    pub fn add_default_trail(&mut self) -> usize {
        let request = self.options.trail.default_request();
        self.add_trail(request.point_count, request.radius, request.width)
    }

    /// Remove every trail.
    pub fn clear_all_trails(&mut self) {
        self.store.clear_all();
        log::info!("cleared all trails");
        self.sync_gpu();
    }
}
