use glam::{Mat4, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Orbit camera around the world origin, parameterized by distance, yaw,
/// and pitch.
///
/// Dragging with the primary button changes yaw/pitch, the wheel changes
/// distance. Pitch stays within `±pitch_limit` and distance within
/// `[min_distance, max_distance]` whatever the input.
pub struct OrbitController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    dragging: bool,
    last_cursor: Option<Vec2>,
    options: CameraOptions,
    /// Derived camera, refreshed after every change.
    pub camera: Camera,
}

impl OrbitController {
    /// Controller at the configured starting pose.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let mut controller = Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 0.0,
            dragging: false,
            last_cursor: None,
            options: options.clone(),
            camera: Camera {
                eye: Vec3::ZERO,
                target: Vec3::ZERO,
                up: Vec3::Y,
                aspect,
                fovy: options.fovy,
                znear: options.znear,
                zfar: options.zfar,
            },
        };
        controller.reset();
        controller
    }

    /// Return to the starting pose. Drag state is kept.
    pub fn reset(&mut self) {
        self.yaw = self.options.initial_yaw;
        self.pitch = self.clamp_pitch(self.options.initial_pitch);
        self.distance = self.clamp_distance(self.options.initial_distance);
        self.update_camera_pos();
    }

    /// Rotate by a pointer delta in pixels.
    pub fn apply_drag_delta(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.options.rotate_speed;
        self.pitch =
            self.clamp_pitch(self.pitch + delta.y * self.options.rotate_speed);
        self.update_camera_pos();
    }

    /// Zoom by `notches` wheel steps (positive = closer).
    pub fn scroll(&mut self, notches: f32) {
        self.distance = self
            .clamp_distance(self.distance - self.options.zoom_step * notches);
        self.update_camera_pos();
    }

    /// Start or end a drag. The cursor keeps being tracked in between, so
    /// a drag starts from wherever the pointer was pressed.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Track the cursor; rotates by the movement since the last position
    /// while dragging.
    pub fn cursor_moved(&mut self, position: Vec2) {
        if self.dragging {
            if let Some(last) = self.last_cursor {
                self.apply_drag_delta(position - last);
            }
        }
        self.last_cursor = Some(position);
    }

    /// Update the aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Eye position: `(d·cosP·cosY, d·sinP, d·cosP·sinY)`.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            self.distance * pitch.cos() * yaw.cos(),
            self.distance * pitch.sin(),
            self.distance * pitch.cos() * yaw.sin(),
        )
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.camera.build_matrix()
    }

    /// Yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Orbit distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn update_camera_pos(&mut self) {
        self.camera.eye = self.eye();
        self.camera.target = Vec3::ZERO;
        self.camera.up = Vec3::Y;
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        let limit = self.options.pitch_limit.abs();
        pitch.clamp(-limit, limit)
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        let lo = self.options.min_distance.min(self.options.max_distance);
        let hi = self.options.max_distance.max(self.options.min_distance);
        distance.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(&CameraOptions::default(), 1.75)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn starts_at_configured_pose() {
        let c = controller();
        assert_eq!((c.distance(), c.yaw(), c.pitch()), (15.0, 45.0, 30.0));
        assert!(!c.is_dragging());
    }

    #[test]
    fn eye_is_spherical_position() {
        let c = controller();
        let eye = c.eye();
        let (p, y) = (30f32.to_radians(), 45f32.to_radians());
        assert!(approx(eye.x, 15.0 * p.cos() * y.cos()));
        assert!(approx(eye.y, 15.0 * p.sin()));
        assert!(approx(eye.z, 15.0 * p.cos() * y.sin()));
        assert!(approx(eye.length(), 15.0));
        assert_eq!(c.camera.eye, eye);
    }

    #[test]
    fn drag_scales_by_half_a_degree_per_pixel() {
        let mut c = controller();
        c.apply_drag_delta(Vec2::new(10.0, -20.0));
        assert!(approx(c.yaw(), 50.0));
        assert!(approx(c.pitch(), 20.0));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut c = controller();
        c.apply_drag_delta(Vec2::new(0.0, 10_000.0));
        assert_eq!(c.pitch(), 89.0);
        c.apply_drag_delta(Vec2::new(0.0, -10_000.0));
        assert_eq!(c.pitch(), -89.0);
    }

    #[test]
    fn scroll_steps_and_clamps_distance() {
        let mut c = controller();
        c.scroll(2.0);
        assert!(approx(c.distance(), 14.0));
        c.scroll(-4.0);
        assert!(approx(c.distance(), 16.0));
        c.scroll(1000.0);
        assert_eq!(c.distance(), 2.0);
        c.scroll(-1000.0);
        assert_eq!(c.distance(), 50.0);
    }

    #[test]
    fn random_input_stays_within_limits() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut c = controller();
        for _ in 0..2000 {
            if rng.random_bool(0.5) {
                c.apply_drag_delta(Vec2::new(
                    rng.random_range(-500.0..500.0),
                    rng.random_range(-500.0..500.0),
                ));
            } else {
                c.scroll(rng.random_range(-20.0..20.0));
            }
            assert!((-89.0..=89.0).contains(&c.pitch()));
            assert!((2.0..=50.0).contains(&c.distance()));
        }
    }

    #[test]
    fn cursor_moves_rotate_only_while_dragging() {
        let mut c = controller();
        c.cursor_moved(Vec2::new(100.0, 100.0));
        c.cursor_moved(Vec2::new(140.0, 100.0));
        assert_eq!(c.yaw(), 45.0);

        c.set_dragging(true);
        c.cursor_moved(Vec2::new(160.0, 110.0));
        assert!(approx(c.yaw(), 55.0));
        assert!(approx(c.pitch(), 35.0));

        c.set_dragging(false);
        c.cursor_moved(Vec2::new(200.0, 110.0));
        assert!(approx(c.yaw(), 55.0));
    }

    #[test]
    fn press_without_moving_keeps_the_drag_origin() {
        let mut c = controller();
        c.cursor_moved(Vec2::new(100.0, 100.0));
        c.set_dragging(true);
        c.cursor_moved(Vec2::new(120.0, 100.0));
        c.set_dragging(false);

        // press again at the same spot: the first movement already rotates
        c.set_dragging(true);
        c.cursor_moved(Vec2::new(140.0, 100.0));
        assert!(approx(c.yaw(), 65.0));
    }

    #[test]
    fn reset_restores_start() {
        let mut c = controller();
        c.apply_drag_delta(Vec2::new(33.0, 12.0));
        c.scroll(5.0);
        c.reset();
        assert_eq!((c.distance(), c.yaw(), c.pitch()), (15.0, 45.0, 30.0));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut c = controller();
        c.resize(800, 400);
        assert_eq!(c.camera.aspect, 2.0);
        c.resize(0, 400);
        assert_eq!(c.camera.aspect, 2.0);
    }
}
