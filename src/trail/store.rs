use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::color::random_vivid_color;
use super::generator::{extend_with_points, TrailShape};
use super::{sample_range, Point, StyleRanges};

/// Appearance and shape of a trail that are chosen at creation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailStyle {
    /// RGBA color, each channel in `[0, 1]`.
    pub color: [f32; 4],
    /// Glow multiplier applied by the shader.
    pub glow_intensity: f32,
    /// Curve shape parameters.
    pub shape: TrailShape,
}

impl TrailStyle {
    /// Random vivid color, glow and shape drawn from `ranges`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, ranges: &StyleRanges) -> Self {
        let color = random_vivid_color(rng);
        let glow_intensity = sample_range(rng, ranges.glow_intensity);
        let shape = TrailShape::random(rng, ranges);
        Self {
            color,
            glow_intensity,
            shape,
        }
    }
}

/// One rendered curve: a contiguous slice of the global point array plus
/// appearance metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    /// Offset of the first point in the store's point array.
    pub start_index: u32,
    /// Number of points, at least 2.
    pub point_count: u32,
    /// RGBA color.
    pub color: [f32; 4],
    /// Ribbon width in world units.
    pub width: f32,
    /// Glow multiplier.
    pub glow_intensity: f32,
    /// Ring radius.
    pub radius: f32,
    /// Height-field amplitude.
    pub height_scale: f32,
    /// Revolutions around the ring.
    pub cycles: f32,
}

impl Trail {
    /// Number of quad segments (instances) the trail draws.
    #[must_use]
    pub fn segment_count(&self) -> u32 {
        self.point_count.saturating_sub(1)
    }

    /// The two metadata records the shader reads for this trail.
    #[must_use]
    pub fn metadata(&self) -> TrailMetadata {
        TrailMetadata {
            color: self.color,
            params: [
                self.width,
                self.glow_intensity,
                self.start_index as f32,
                self.point_count as f32,
            ],
        }
    }
}

/// Per-trail metadata as laid out in the metadata storage buffer: record A is
/// the color, record B is `(width, glow, start_index, point_count)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TrailMetadata {
    /// RGBA color.
    pub color: [f32; 4],
    /// `(width, glow_intensity, start_index, point_count)`.
    pub params: [f32; 4],
}

/// Append-only collection of trails and the flat array of all their points.
///
/// Trails are laid out contiguously in insertion order, so trail `i` starts
/// at the sum of the point counts of trails `0..i`. The only removal is
/// [`clear_all`](Self::clear_all). Every structural change bumps
/// [`revision`](Self::revision) so GPU mirrors can tell they are stale.
pub struct TrailStore {
    trails: Vec<Trail>,
    points: Vec<Point>,
    total_points: u32,
    revision: u64,
    ranges: StyleRanges,
    rng: StdRng,
}

impl TrailStore {
    /// Empty store seeded from the OS entropy source.
    #[must_use]
    pub fn new(ranges: StyleRanges) -> Self {
        Self::with_rng(ranges, StdRng::from_os_rng())
    }

    /// Empty store with a fixed seed, for reproducible sessions and tests.
    #[must_use]
    pub fn with_seed(ranges: StyleRanges, seed: u64) -> Self {
        Self::with_rng(ranges, StdRng::seed_from_u64(seed))
    }

    fn with_rng(ranges: StyleRanges, rng: StdRng) -> Self {
        Self {
            trails: Vec::new(),
            points: Vec::new(),
            total_points: 0,
            revision: 0,
            ranges,
            rng,
        }
    }

    /// Generate a randomly styled trail and append it.
    pub fn add_trail(
        &mut self,
        point_count: u32,
        radius: f32,
        width: f32,
    ) -> &Trail {
        let style = TrailStyle::random(&mut self.rng, &self.ranges);
        self.add_trail_with_style(point_count, radius, width, style)
    }

    /// Generate a trail with an explicit style and append it.
    pub fn add_trail_with_style(
        &mut self,
        point_count: u32,
        radius: f32,
        width: f32,
        style: TrailStyle,
    ) -> &Trail {
        debug_assert!(point_count >= 2, "a trail needs at least one segment");

        let trail = Trail {
            start_index: self.total_points,
            point_count,
            color: style.color,
            width,
            glow_intensity: style.glow_intensity,
            radius,
            height_scale: style.shape.height_scale,
            cycles: style.shape.cycles,
        };

        extend_with_points(&mut self.points, point_count, radius, &style.shape);
        self.total_points += point_count;
        self.revision += 1;

        let index = self.trails.len();
        self.trails.push(trail);
        &self.trails[index]
    }

    /// Remove every trail and point.
    pub fn clear_all(&mut self) {
        self.trails.clear();
        self.points.clear();
        self.total_points = 0;
        self.revision += 1;
    }

    /// Number of trails.
    #[must_use]
    pub fn trail_count(&self) -> usize {
        self.trails.len()
    }

    /// Number of points across all trails.
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// All trails in insertion order.
    #[must_use]
    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    /// The flat point array, trail after trail.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Points belonging to one trail.
    #[must_use]
    pub fn trail_points(&self, index: usize) -> Option<&[Point]> {
        let trail = self.trails.get(index)?;
        let start = trail.start_index as usize;
        self.points.get(start..start + trail.point_count as usize)
    }

    /// Metadata records for every trail, two `vec4`s per trail.
    #[must_use]
    pub fn metadata(&self) -> Vec<TrailMetadata> {
        self.trails.iter().map(Trail::metadata).collect()
    }

    /// Monotonic counter bumped by every add or clear.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
