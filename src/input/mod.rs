//! Input handling: platform-agnostic pointer events and bindable key actions.

/// Platform-agnostic input events.
pub mod event;
/// Key-bindable engine actions.
pub mod keyboard;

#[cfg(feature = "viewer")]
pub use event::scroll_notches;
pub use event::{InputEvent, MouseButton, PIXELS_PER_NOTCH};
pub use keyboard::KeyAction;
