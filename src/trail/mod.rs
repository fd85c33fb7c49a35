//! Trail data: the parametric curve generator, random trail styling, and the
//! append-only store that owns every trail and point.

/// Vivid random colors via HSV.
pub mod color;
/// Parametric trail-curve generator.
pub mod generator;
/// Append-only trail and point storage.
pub mod store;

use bytemuck::{Pod, Zeroable};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use color::{hsv_to_rgb, random_vivid_color};
pub use generator::{generate_points, TrailShape};
pub use store::{Trail, TrailMetadata, TrailStore, TrailStyle};

/// One sample along a trail: world position plus normalized parameter.
///
/// Laid out exactly as the shader reads it: four consecutive `f32`s
/// `(x, y, z, t)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Point {
    /// World-space position.
    pub position: [f32; 3],
    /// Normalized position along the trail, in `[0, 1]`.
    pub t: f32,
}

impl Point {
    /// Point at `(x, y, z)` with parameter `t`.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, t: f32) -> Self {
        Self {
            position: [x, y, z],
            t,
        }
    }
}

/// Half-open `[min, max)` ranges that randomized trail styling is drawn from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleRanges {
    /// Glow intensity range.
    pub glow_intensity: [f32; 2],
    /// Height-field amplitude range.
    pub height_scale: [f32; 2],
    /// Number of revolutions around the ring.
    pub cycles: [f32; 2],
    /// Starting angle offset in degrees.
    pub rotation_offset: [f32; 2],
}

impl Default for StyleRanges {
    fn default() -> Self {
        Self {
            glow_intensity: [1.5, 3.0],
            height_scale: [1.0, 3.0],
            cycles: [2.0, 6.0],
            rotation_offset: [0.0, 360.0],
        }
    }
}

/// Uniform sample from `[range[0], range[1])`; collapses to the lower bound
/// when the range is empty.
pub(crate) fn sample_range<R: Rng + ?Sized>(rng: &mut R, range: [f32; 2]) -> f32 {
    let [lo, hi] = range;
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn point_is_four_packed_floats() {
        let p = Point::new(1.0, 2.0, 3.0, 0.5);
        let bytes: &[u8] = bytemuck::bytes_of(&p);
        assert_eq!(bytes.len(), 16);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.5]);
    }

    #[test]
    fn sample_range_stays_half_open() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = sample_range(&mut rng, [1.5, 3.0]);
            assert!((1.5..3.0).contains(&v));
        }
    }

    #[test]
    fn empty_range_collapses_to_lower_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sample_range(&mut rng, [2.0, 2.0]), 2.0);
        assert_eq!(sample_range(&mut rng, [4.0, 1.0]), 4.0);
    }
}
