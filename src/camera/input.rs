use glam::Vec2;

use crate::camera::controller::OrbitController;
use crate::input::{InputEvent, MouseButton};

impl OrbitController {
    /// Feed one input event to the camera.
    ///
    /// Returns true if the event was consumed by the camera.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                self.set_dragging(pressed);
                true
            }
            InputEvent::CursorMoved { x, y } => {
                self.cursor_moved(Vec2::new(x, y));
                self.is_dragging()
            }
            InputEvent::Scroll { delta } => {
                self.scroll(delta);
                true
            }
            InputEvent::MouseButton { .. } => false,
        }
    }
}
