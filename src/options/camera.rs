use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and zoom parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Direction (from the origin) along which the eye sits. Scaled by the
    /// current distance; need not be normalized.
    pub approach: [f32; 3],
    /// Distance multiplier applied to `approach` at startup and on reset.
    pub initial_distance: f32,
    /// Closest allowed distance.
    pub min_distance: f32,
    /// Farthest allowed distance.
    pub max_distance: f32,
    /// Distance change per wheel notch.
    pub zoom_step: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            approach: [1.0, 0.6, 1.0],
            initial_distance: 8.0,
            min_distance: 3.0,
            max_distance: 30.0,
            zoom_step: 0.5,
        }
    }
}
