//! Input and key-action dispatch for [`TrailEngine`].

use super::TrailEngine;
use crate::input::{InputEvent, KeyAction};

impl TrailEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Pointer drag orbits the camera, the wheel zooms. Returns `true` if
    /// the camera consumed the event.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(&InputEvent::CursorMoved { x, y });
    /// engine.handle_input(&InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.camera_controller.handle_event(event)
    }

    /// Run a key-bound action.
    pub fn execute(&mut self, action: KeyAction) {
        match action {
            KeyAction::AddTrail => {
                let _ = self.add_default_trail();
            }
            KeyAction::ClearTrails => self.clear_all_trails(),
            KeyAction::ResetCamera => self.camera_controller.reset(),
        }
    }

    /// Look up `key` in the keybindings and run its action. Returns the
    /// action, or `None` if the key is unbound.
    pub fn handle_key(&mut self, key: &str) -> Option<KeyAction> {
        let action = self.options.keybindings.lookup(key)?;
        self.execute(action);
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use crate::input::{InputEvent, KeyAction, MouseButton};
    use crate::options::Options;
    use crate::TrailEngine;

    #[test]
    fn keys_drive_actions() {
        let mut engine = TrailEngine::new(Options::default());
        assert_eq!(engine.handle_key("KeyA"), Some(KeyAction::AddTrail));
        assert_eq!(engine.handle_key("KeyA"), Some(KeyAction::AddTrail));
        assert_eq!(engine.trail_count(), 2);
        assert_eq!(engine.total_points(), 10_000);

        assert_eq!(engine.handle_key("KeyC"), Some(KeyAction::ClearTrails));
        assert_eq!(engine.trail_count(), 0);

        assert_eq!(engine.handle_key("F12"), None);
    }

    #[test]
    fn drag_then_reset_camera() {
        let mut engine = TrailEngine::new(Options::default());
        let _ = engine.handle_input(&InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        let _ = engine.handle_input(&InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let _ = engine.handle_input(&InputEvent::CursorMoved { x: 40.0, y: 0.0 });
        assert_eq!(engine.camera().yaw(), 65.0);

        engine.execute(KeyAction::ResetCamera);
        assert_eq!(engine.camera().yaw(), 45.0);
    }

    #[test]
    fn wheel_zooms_the_engine_camera() {
        let mut engine = TrailEngine::new(Options::default());
        assert!(engine.handle_input(&InputEvent::Scroll { delta: -2.0 }));
        assert_eq!(engine.camera().distance(), 16.0);
    }
}
