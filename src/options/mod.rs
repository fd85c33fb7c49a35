//! Centralized configuration with TOML file support.
//!
//! Camera, trail, render, and keybinding settings are consolidated here.
//! Every section uses `#[serde(default)]`, so a file only needs to name the
//! values it overrides.

mod camera;
mod keybindings;
mod render;
mod trail;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use render::RenderOptions;
use serde::{Deserialize, Serialize};
pub use trail::{TrailOptions, TrailRequest};

use crate::error::TrailsError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[render]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Orbit camera parameters.
    pub camera: CameraOptions,
    /// Add-trail defaults, ranges, and random styling.
    pub trail: TrailOptions,
    /// Frame, fade, and timing parameters.
    pub render: RenderOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TrailsError::OptionsParse`] if the text is not valid TOML
    /// for these options, or if a numeric setting is NaN or infinite.
    pub fn from_toml_str(content: &str) -> Result<Self, TrailsError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| TrailsError::OptionsParse(e.to_string()))?;
        options.check_finite()?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Every float setting must be finite, and every random range must have
    /// a finite span, before it reaches a clamp or a sampler.
    fn check_finite(&self) -> Result<(), TrailsError> {
        let camera = &self.camera;
        let trail = &self.trail;
        let style = &trail.style;
        let render = &self.render;
        let values: [(&str, &[f32]); 17] = [
            ("camera.initial_distance", &[camera.initial_distance]),
            ("camera.initial_yaw", &[camera.initial_yaw]),
            ("camera.initial_pitch", &[camera.initial_pitch]),
            ("camera.min_distance", &[camera.min_distance]),
            ("camera.max_distance", &[camera.max_distance]),
            ("camera.pitch_limit", &[camera.pitch_limit]),
            ("camera.rotate_speed", &[camera.rotate_speed]),
            ("camera.zoom_step", &[camera.zoom_step]),
            ("camera.fovy", &[camera.fovy]),
            ("camera.znear", &[camera.znear]),
            ("camera.zfar", &[camera.zfar]),
            ("trail.default_radius", &[trail.default_radius]),
            ("trail.default_width", &[trail.default_width]),
            ("trail.radius_range", &trail.radius_range),
            ("trail.width_range", &trail.width_range),
            ("render.clear_color", &render.clear_color),
            ("render.max_age", &[render.max_age]),
        ];
        let ranges = [
            ("trail.style.glow_intensity", style.glow_intensity),
            ("trail.style.height_scale", style.height_scale),
            ("trail.style.cycles", style.cycles),
            ("trail.style.rotation_offset", style.rotation_offset),
        ];

        for (name, floats) in values {
            if floats.iter().any(|v| !v.is_finite()) {
                return Err(TrailsError::OptionsParse(format!(
                    "{name} must be finite"
                )));
            }
        }
        for (name, [lo, hi]) in ranges {
            if !(lo.is_finite() && hi.is_finite() && (hi - lo).is_finite()) {
                return Err(TrailsError::OptionsParse(format!(
                    "{name} must be a finite range"
                )));
            }
        }
        Ok(())
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TrailsError::Io`] if the file cannot be read and
    /// [`TrailsError::OptionsParse`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, TrailsError> {
        let content = std::fs::read_to_string(path).map_err(TrailsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`TrailsError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), TrailsError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TrailsError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TrailsError::Io)?;
        }
        std::fs::write(path, content).map_err(TrailsError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap_or_default();
        let parsed = Options::from_toml_str(&toml_str).ok();
        assert_eq!(parsed, Some(opts));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[render]
msaa_samples = 1

[trail]
seed = 42
";
        let Ok(opts) = Options::from_toml_str(toml_str) else {
            panic!("partial options should parse");
        };
        assert_eq!(opts.render.msaa_samples, 1);
        assert_eq!(opts.trail.seed, Some(42));
        // Everything else should be default
        assert_eq!(opts.render.max_age, 10.0);
        assert_eq!(opts.camera.initial_distance, 15.0);
        assert_eq!(opts.trail.default_point_count, 5000);
        assert_eq!(opts.keybindings.lookup("KeyA"), Some(KeyAction::AddTrail));
    }

    #[test]
    fn loaded_keybindings_are_looked_up() {
        let toml_str = r#"
[keybindings.bindings]
add_trail = "Space"
"#;
        let Ok(opts) = Options::from_toml_str(toml_str) else {
            panic!("keybindings should parse");
        };
        assert_eq!(opts.keybindings.lookup("Space"), Some(KeyAction::AddTrail));
    }

    #[test]
    fn style_ranges_are_configurable() {
        let toml_str = r"
[trail.style]
cycles = [1.0, 1.5]
";
        let Ok(opts) = Options::from_toml_str(toml_str) else {
            panic!("style ranges should parse");
        };
        assert_eq!(opts.trail.style.cycles, [1.0, 1.5]);
        assert_eq!(opts.trail.style.glow_intensity, [1.5, 3.0]);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Options::from_toml_str("[render\nmax_age = ").err();
        assert!(matches!(err, Some(TrailsError::OptionsParse(_))));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for toml_str in [
            "[camera]\npitch_limit = nan\n",
            "[camera]\nmax_distance = inf\n",
            "[trail]\nradius_range = [1.0, -inf]\n",
            "[trail.style]\ncycles = [nan, 6.0]\n",
            "[trail.style]\nrotation_offset = [-3.0e38, 3.0e38]\n",
            "[render]\nmax_age = nan\n",
        ] {
            let err = Options::from_toml_str(toml_str).err();
            assert!(
                matches!(err, Some(TrailsError::OptionsParse(_))),
                "{toml_str:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejection_names_the_setting() {
        let err = Options::from_toml_str("[camera]\npitch_limit = nan\n")
            .err()
            .map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("options parse error: camera.pitch_limit must be finite")
        );
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("trails-options-{}", std::process::id()));
        let path = dir.join("options.toml");
        let mut opts = Options::default();
        opts.render.max_age = 4.0;
        opts.trail.seed = Some(7);

        assert!(opts.save(&path).is_ok());
        let loaded = Options::load(&path).ok();
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(loaded, Some(opts));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Options::load(Path::new("/nonexistent/trails.toml")).err();
        assert!(matches!(err, Some(TrailsError::Io(_))));
    }
}
