use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Decorative background star shell.
pub struct StarfieldOptions {
    /// Whether stars are drawn at all.
    pub enabled: bool,
    /// Number of stars.
    pub count: usize,
    /// Radius of the inner surface of the shell.
    pub inner_radius: f32,
    /// Thickness of the shell.
    pub shell_depth: f32,
    /// Yaw added per frame, in radians.
    pub rotation_speed: f32,
    /// Point opacity.
    pub opacity: f32,
    /// Fixed RNG seed; `None` draws a fresh field each run.
    pub seed: Option<u64>,
}

impl Default for StarfieldOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 3000,
            inner_radius: 50.0,
            shell_depth: 50.0,
            rotation_speed: 0.0001,
            opacity: 0.8,
            seed: None,
        }
    }
}
