//! Orbit camera: projection math, drag/scroll controller, and event input.

/// Orbit controller: yaw/pitch/distance state and clamping.
pub mod controller;
/// Core camera struct and matrix construction.
pub mod core;
/// Input-event handling for the orbit controller.
pub mod input;

pub use controller::OrbitController;
pub use self::core::Camera;
