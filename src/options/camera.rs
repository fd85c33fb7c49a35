use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Orbit camera projection, starting pose, and control parameters.
pub struct CameraOptions {
    /// Starting orbit distance.
    pub initial_distance: f32,
    /// Starting yaw in degrees.
    pub initial_yaw: f32,
    /// Starting pitch in degrees.
    pub initial_pitch: f32,
    /// Closest allowed orbit distance.
    pub min_distance: f32,
    /// Farthest allowed orbit distance.
    pub max_distance: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` degrees.
    pub pitch_limit: f32,
    /// Degrees of yaw/pitch per pixel of drag.
    pub rotate_speed: f32,
    /// Distance change per wheel notch.
    pub zoom_step: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            initial_distance: 15.0,
            initial_yaw: 45.0,
            initial_pitch: 30.0,
            min_distance: 2.0,
            max_distance: 50.0,
            pitch_limit: 89.0,
            rotate_speed: 0.5,
            zoom_step: 0.5,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}
