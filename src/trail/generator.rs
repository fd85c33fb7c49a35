use std::f32::consts::TAU;

use rand::Rng;

use super::{sample_range, Point, StyleRanges};

/// Shape parameters of one trail curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailShape {
    /// Amplitude of the height field.
    pub height_scale: f32,
    /// Revolutions around the ring over the whole trail.
    pub cycles: f32,
    /// Starting angle in degrees.
    pub rotation_offset_deg: f32,
}

impl TrailShape {
    /// Draw a random shape from `ranges`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, ranges: &StyleRanges) -> Self {
        let height_scale = sample_range(rng, ranges.height_scale);
        let cycles = sample_range(rng, ranges.cycles);
        let rotation_offset_deg = sample_range(rng, ranges.rotation_offset);
        Self {
            height_scale,
            cycles,
            rotation_offset_deg,
        }
    }
}

/// Generate `point_count` points on an undulating ring of `radius`.
///
/// Point `i` sits at parameter `t = i / (point_count - 1)` and angle
/// `θ = t·2π·cycles + rotation`, at `(r·cosθ, h·sin(x/2)·cos(z/2), r·sinθ)`.
/// The first point has `t == 0`, the last `t == 1`.
///
/// Callers guarantee `point_count >= 2`, `radius > 0`, `cycles > 0`.
#[must_use]
pub fn generate_points(
    point_count: u32,
    radius: f32,
    shape: &TrailShape,
) -> Vec<Point> {
    let mut points = Vec::with_capacity(point_count as usize);
    extend_with_points(&mut points, point_count, radius, shape);
    points
}

/// Append the points of one trail to `out` without an intermediate buffer.
pub(crate) fn extend_with_points(
    out: &mut Vec<Point>,
    point_count: u32,
    radius: f32,
    shape: &TrailShape,
) {
    debug_assert!(point_count >= 2, "a trail needs at least one segment");
    debug_assert!(radius > 0.0 && shape.cycles > 0.0);

    let last = (point_count.max(2) - 1) as f32;
    let rotation = shape.rotation_offset_deg.to_radians();

    out.extend((0..point_count).map(|i| {
        let t = i as f32 / last;
        let theta = t * TAU * shape.cycles + rotation;

        let x = radius * theta.cos();
        let z = radius * theta.sin();
        let y = shape.height_scale * (x * 0.5).sin() * (z * 0.5).cos();

        Point::new(x, y, z, t)
    }));
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn flat_ring(cycles: f32) -> TrailShape {
        TrailShape {
            height_scale: 0.0,
            cycles,
            rotation_offset_deg: 0.0,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn produces_exactly_point_count_points() {
        for &n in &[2u32, 3, 100, 5000, 20_000] {
            let shape = TrailShape {
                height_scale: 2.0,
                cycles: 3.5,
                rotation_offset_deg: 90.0,
            };
            assert_eq!(generate_points(n, 5.0, &shape).len(), n as usize);
        }
    }

    #[test]
    fn t_runs_from_zero_to_one_strictly_increasing() {
        let shape = TrailShape {
            height_scale: 1.7,
            cycles: 4.2,
            rotation_offset_deg: 12.0,
        };
        let points = generate_points(777, 8.0, &shape);
        assert_eq!(points[0].t, 0.0);
        assert_eq!(points[points.len() - 1].t, 1.0);
        for pair in points.windows(2) {
            assert!(pair[1].t > pair[0].t);
        }
    }

    #[test]
    fn two_point_unit_ring_closes_on_itself() {
        let points = generate_points(2, 1.0, &flat_ring(1.0));
        let [x0, y0, z0] = points[0].position;
        assert!(approx(x0, 1.0) && approx(y0, 0.0) && approx(z0, 0.0));
        assert_eq!(points[0].t, 0.0);

        let [x1, y1, z1] = points[1].position;
        assert!(approx(x1, TAU.cos()) && approx(z1, TAU.sin()));
        assert!(approx(x1, 1.0) && approx(y1, 0.0) && approx(z1, 0.0));
        assert_eq!(points[1].t, 1.0);
    }

    #[test]
    fn horizontal_distance_equals_radius() {
        let shape = TrailShape {
            height_scale: 2.5,
            cycles: 3.0,
            rotation_offset_deg: 200.0,
        };
        for p in generate_points(256, 7.5, &shape) {
            let [x, _, z] = p.position;
            assert!((x.hypot(z) - 7.5).abs() < 1e-3);
        }
    }

    #[test]
    fn height_follows_the_height_field() {
        let shape = TrailShape {
            height_scale: 3.0,
            cycles: 2.0,
            rotation_offset_deg: 45.0,
        };
        for p in generate_points(64, 4.0, &shape) {
            let [x, y, z] = p.position;
            let expected = 3.0 * (x * 0.5).sin() * (z * 0.5).cos();
            assert!(approx(y, expected));
            assert!(y.abs() <= 3.0 + 1e-4);
        }
    }

    #[test]
    fn rotation_offset_moves_the_start() {
        let shape = TrailShape {
            rotation_offset_deg: 90.0,
            ..flat_ring(1.0)
        };
        let points = generate_points(10, 2.0, &shape);
        let [x, _, z] = points[0].position;
        assert!(approx(x, 0.0) && approx(z, 2.0));
    }

    #[test]
    fn random_shapes_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = StyleRanges::default();
        for _ in 0..500 {
            let shape = TrailShape::random(&mut rng, &ranges);
            assert!((1.0..3.0).contains(&shape.height_scale));
            assert!((2.0..6.0).contains(&shape.cycles));
            assert!((0.0..360.0).contains(&shape.rotation_offset_deg));
        }
    }

    #[test]
    fn appends_after_existing_points() {
        let mut out = generate_points(3, 1.0, &flat_ring(1.0));
        extend_with_points(&mut out, 5, 2.0, &flat_ring(2.0));
        assert_eq!(out.len(), 8);
        assert_eq!(out[3].t, 0.0);
        assert_eq!(out[7].t, 1.0);
    }
}
