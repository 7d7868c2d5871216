//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a pointer
//! gesture, or a programmatic call, is represented as a `ViewCommand`.
//! Consumers construct commands and pass them to
//! [`RenderSession::execute`](crate::session::RenderSession::execute).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A discrete or parameterized operation on the view.
///
/// ```ignore
/// session.execute(ViewCommand::ToggleAutoRotate);
/// session.execute(ViewCommand::Zoom { delta: 1.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    // ── Model rotation ──────────────────────────────────────────────
    /// Primary button went down at `at`; start rotating the model.
    BeginDrag {
        /// Pointer position in physical pixels.
        at: Vec2,
    },

    /// Pointer moved to `to` while dragging.
    Drag {
        /// Pointer position in physical pixels.
        to: Vec2,
    },

    /// Primary button released or the pointer left the window.
    EndDrag,

    /// Toggle idle auto-rotation.
    ToggleAutoRotate,

    // ── Camera ──────────────────────────────────────────────────────
    /// Wheel notches; positive moves the camera closer.
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    /// Restore the initial camera distance and model orientation.
    ResetView,

    // ── Search ──────────────────────────────────────────────────────
    /// Advance to the next query in the viewer's list. Ignored by the
    /// session; the viewer acts on it.
    NextQuery,
}

/// Serializable tag for the subset of [`ViewCommand`] that can be
/// key-bound (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Toggle idle auto-rotation.
    ToggleAutoRotate,
    /// Restore the initial view.
    ResetView,
    /// Load the next query.
    NextQuery,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`ViewCommand`].
    #[must_use]
    pub fn to_command(self) -> ViewCommand {
        match self {
            Self::ToggleAutoRotate => ViewCommand::ToggleAutoRotate,
            Self::ResetView => ViewCommand::ResetView,
            Self::NextQuery => ViewCommand::NextQuery,
        }
    }
}
