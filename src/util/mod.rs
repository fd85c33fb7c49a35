//! Shared utilities: frame timing and FPS estimation.

/// Windowed FPS counter and fixed-interval frame ticker.
pub mod frame_timing;
