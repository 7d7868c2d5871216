//! Converts raw platform events into view commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! primary-button state) and the key-binding map. It is the only thing that
//! sits between raw window events and the session's
//! [`execute`](crate::session::RenderSession::execute) method.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::engine::command::{KeyCommandTag, ViewCommand};

/// Maps physical key strings to [`ViewCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyQ"`, `"Tab"`, `"Escape"`, etc.
///
/// Only *discrete* commands make sense as key bindings. Drag and zoom
/// commands are produced by the pointer interpreter, not key lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyR".into(), KeyCommandTag::ToggleAutoRotate),
            ("KeyQ".into(), KeyCommandTag::ResetView),
            ("Tab".into(), KeyCommandTag::NextQuery),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`ViewCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input_processor.handle_event(event) {
///     session.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("KeyQ") {
///     session.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Last known cursor position in physical pixels.
    mouse_pos: Vec2,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeyBindings::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            mouse_pos: Vec2::ZERO,
            mouse_pressed: false,
            key_bindings,
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.mouse_pos = Vec2::new(x, y);
                self.mouse_pressed
                    .then_some(ViewCommand::Drag { to: self.mouse_pos })
            }
            InputEvent::CursorLeft => self.release(),
            InputEvent::MouseButton { button, pressed } => {
                if button != MouseButton::Left {
                    return None;
                }
                if pressed {
                    self.mouse_pressed = true;
                    return Some(ViewCommand::BeginDrag { at: self.mouse_pos });
                }
                self.release()
            }
            InputEvent::Scroll { delta } => {
                (delta != 0.0).then_some(ViewCommand::Zoom { delta })
            }
        }
    }

    fn release(&mut self) -> Option<ViewCommand> {
        std::mem::replace(&mut self.mouse_pressed, false)
            .then_some(ViewCommand::EndDrag)
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}
