use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Model rotation behaviour.
pub struct InteractionOptions {
    /// Whether the model spins on its own while not being dragged.
    pub auto_rotate: bool,
    /// Yaw added per frame by auto-rotation, in radians.
    pub auto_rotate_speed: f32,
    /// Radians of rotation per pixel of pointer drag.
    pub drag_sensitivity: f32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            auto_rotate_speed: 0.005,
            drag_sensitivity: 0.01,
        }
    }
}
