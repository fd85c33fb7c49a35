/// Platform-agnostic input events.
///
/// A host window translates its native events into these and passes them to
/// [`TrailEngine::handle_input`](crate::TrailEngine::handle_input).
///
/// # Example
///
/// ```ignore
/// engine.handle_input(&InputEvent::MouseButton {
///     button: MouseButton::Left,
///     pressed: true,
/// });
/// engine.handle_input(&InputEvent::CursorMoved { x: 100.0, y: 200.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel, in notches (positive = zoom in).
    Scroll {
        /// Notches scrolled; fractional for smooth devices.
        delta: f32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Pixels of smooth-scroll delta per wheel notch.
pub const PIXELS_PER_NOTCH: f32 = 120.0;

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

/// Wheel notches of a winit scroll delta.
#[cfg(feature = "viewer")]
#[must_use]
pub fn scroll_notches(delta: winit::event::MouseScrollDelta) -> f32 {
    match delta {
        winit::event::MouseScrollDelta::LineDelta(_, y) => y,
        winit::event::MouseScrollDelta::PixelDelta(pos) => {
            pos.y as f32 / PIXELS_PER_NOTCH
        }
    }
}
