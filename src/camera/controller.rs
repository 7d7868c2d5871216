use glam::Vec3;

use crate::camera::core::{Camera, CameraUniform};
use crate::options::CameraOptions;

/// Fixed-direction dolly camera looking at the origin.
///
/// The eye always sits on the ray `approach * distance`. Wheel input moves
/// it along that ray; the model itself rotates, the camera never orbits.
pub struct CameraController {
    approach: Vec3,
    distance: f32,
    initial_distance: f32,
    min_distance: f32,
    max_distance: f32,
    zoom_step: f32,

    /// Current camera state.
    pub camera: Camera,
}

impl CameraController {
    /// Build a controller from options with the given viewport aspect.
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let approach = Vec3::from_array(options.approach);
        let approach = if approach.length_squared() > 0.0 {
            approach
        } else {
            log::warn!("camera approach is zero, using +Z");
            Vec3::Z
        };
        let min_distance = options.min_distance.min(options.max_distance);
        let max_distance = options.max_distance.max(options.min_distance);
        let initial_distance =
            options.initial_distance.clamp(min_distance, max_distance);

        let camera = Camera {
            eye: approach * initial_distance,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        Self {
            approach,
            distance: initial_distance,
            initial_distance,
            min_distance,
            max_distance,
            zoom_step: options.zoom_step,
            camera,
        }
    }

    fn update_camera_pos(&mut self) {
        self.camera.eye = self.approach * self.distance;
    }

    /// Current distance multiplier.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// The camera as uploaded to the GPU.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_camera(&self.camera)
    }

    /// Update the aspect ratio. Ignores zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Move by `delta` wheel notches; positive moves closer. The distance is
    /// clamped to the configured range.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta * self.zoom_step)
            .clamp(self.min_distance, self.max_distance);
        self.update_camera_pos();
    }

    /// Restore the initial distance.
    pub fn reset(&mut self) {
        self.distance = self.initial_distance;
        self.update_camera_pos();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(&CameraOptions::default(), 1.5)
    }

    #[test]
    fn starts_on_the_diagonal() {
        let cam = controller();
        assert_eq!(cam.distance(), 8.0);
        assert!(cam.camera.eye.abs_diff_eq(Vec3::new(8.0, 4.8, 8.0), 1e-5));
        assert_eq!(cam.camera.target, Vec3::ZERO);
    }

    #[test]
    fn zoom_steps_and_clamps() {
        let mut cam = controller();
        cam.zoom(1.0);
        assert_eq!(cam.distance(), 7.5);
        cam.zoom(-2.0);
        assert_eq!(cam.distance(), 8.5);

        for _ in 0..100 {
            cam.zoom(1.0);
        }
        assert_eq!(cam.distance(), 3.0);
        for _ in 0..100 {
            cam.zoom(-1.0);
        }
        assert_eq!(cam.distance(), 30.0);
        assert!(cam.camera.eye.abs_diff_eq(Vec3::new(30.0, 18.0, 30.0), 1e-4));

        cam.reset();
        assert_eq!(cam.distance(), 8.0);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = controller();
        cam.resize(800, 400);
        assert_eq!(cam.camera.aspect, 2.0);
        cam.resize(0, 400);
        assert_eq!(cam.camera.aspect, 2.0);
        let aspect = cam.uniform().aspect;
        assert_eq!(aspect, 2.0);
    }
}
