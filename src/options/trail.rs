use serde::{Deserialize, Serialize};

use crate::trail::StyleRanges;

/// Parameters of one add-trail request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailRequest {
    /// Number of points to generate.
    pub point_count: u32,
    /// Ring radius.
    pub radius: f32,
    /// Ribbon width.
    pub width: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Add-trail defaults, accepted input ranges, and random styling ranges.
pub struct TrailOptions {
    /// Point count used by the add-trail key.
    pub default_point_count: u32,
    /// Radius used by the add-trail key.
    pub default_radius: f32,
    /// Width used by the add-trail key.
    pub default_width: f32,
    /// Accepted point counts, inclusive.
    pub point_count_range: [u32; 2],
    /// Accepted radii, inclusive.
    pub radius_range: [f32; 2],
    /// Accepted widths, inclusive.
    pub width_range: [f32; 2],
    /// Ranges random glow and shape are drawn from.
    pub style: StyleRanges,
    /// Fixed RNG seed; random per session when absent.
    pub seed: Option<u64>,
}

impl Default for TrailOptions {
    fn default() -> Self {
        Self {
            default_point_count: 5000,
            default_radius: 5.0,
            default_width: 0.08,
            point_count_range: [100, 20_000],
            radius_range: [1.0, 20.0],
            width_range: [0.01, 1.0],
            style: StyleRanges::default(),
            seed: None,
        }
    }
}

impl TrailOptions {
    /// The request the add-trail key issues.
    #[must_use]
    pub fn default_request(&self) -> TrailRequest {
        TrailRequest {
            point_count: self.default_point_count,
            radius: self.default_radius,
            width: self.default_width,
        }
    }

    /// Clamp `request` into the accepted ranges. Never yields fewer than 2
    /// points or a non-positive radius/width, whatever the ranges say.
    #[must_use]
    pub fn clamp(&self, request: TrailRequest) -> TrailRequest {
        let [min_points, max_points] = self.point_count_range;
        let [min_radius, max_radius] = self.radius_range;
        let [min_width, max_width] = self.width_range;
        TrailRequest {
            point_count: request
                .point_count
                .clamp(min_points.min(max_points), max_points.max(min_points))
                .max(2),
            radius: clamp_positive(request.radius, min_radius, max_radius),
            width: clamp_positive(request.width, min_width, max_width),
        }
    }
}

fn clamp_positive(value: f32, lo: f32, hi: f32) -> f32 {
    let clamped = if value.is_nan() {
        lo
    } else {
        value.clamp(lo.min(hi), hi.max(lo))
    };
    clamped.max(f32::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(point_count: u32, radius: f32, width: f32) -> TrailRequest {
        TrailRequest {
            point_count,
            radius,
            width,
        }
    }

    #[test]
    fn in_range_requests_pass_through() {
        let opts = TrailOptions::default();
        let r = request(5000, 5.0, 0.08);
        assert_eq!(opts.clamp(r), r);
        assert_eq!(opts.default_request(), r);
    }

    #[test]
    fn out_of_range_requests_are_clamped() {
        let opts = TrailOptions::default();
        assert_eq!(opts.clamp(request(1, 0.0, 5.0)), request(100, 1.0, 1.0));
        assert_eq!(
            opts.clamp(request(1_000_000, 100.0, 0.0)),
            request(20_000, 20.0, 0.01)
        );
    }

    #[test]
    fn nan_takes_the_lower_bound() {
        let opts = TrailOptions::default();
        let r = opts.clamp(request(500, f32::NAN, f32::NAN));
        assert_eq!(r.radius, 1.0);
        assert_eq!(r.width, 0.01);
    }

    #[test]
    fn degenerate_ranges_still_yield_a_segment() {
        let opts = TrailOptions {
            point_count_range: [0, 0],
            radius_range: [0.0, 0.0],
            ..TrailOptions::default()
        };
        let r = opts.clamp(request(0, 3.0, 0.1));
        assert_eq!(r.point_count, 2);
        assert!(r.radius > 0.0);
    }
}
