/// Pointer input as the viewer sees it, independent of the windowing
/// library. Coordinates are physical pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer is now at (`x`, `y`).
    CursorMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// The pointer left the window; any drag in progress ends.
    CursorLeft,
    /// A button changed state.
    MouseButton {
        /// The button.
        button: MouseButton,
        /// Down (`true`) or up.
        pressed: bool,
    },
    /// Wheel movement in notches; positive zooms in.
    Scroll {
        /// Notches.
        delta: f32,
    },
}

/// Pointer buttons. Only [`MouseButton::Left`] rotates the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// Back, forward and other extra buttons.
    Other,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Pixels of trackpad scrolling per wheel notch.
    const PIXELS_PER_NOTCH: f32 = 100.0;

    /// Wheel event in notches from a winit scroll delta.
    #[must_use]
    pub fn scroll(delta: winit::event::MouseScrollDelta) -> Self {
        let delta = match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => y,
            winit::event::MouseScrollDelta::PixelDelta(pos) => {
                pos.y as f32 / Self::PIXELS_PER_NOTCH
            }
        };
        Self::Scroll { delta }
    }
}
