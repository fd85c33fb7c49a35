use serde::{Deserialize, Serialize};

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// add_trail = "KeyA"
/// clear_trails = "KeyC"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Add a trail with the configured default request.
    AddTrail,
    /// Remove every trail.
    ClearTrails,
    /// Return the camera to its starting pose.
    ResetCamera,
}
