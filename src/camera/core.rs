use glam::{Mat4, Vec3};

/// Right-handed perspective camera with a `[0, 1]` depth range.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World-space eye position.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// World up.
    pub up: Vec3,
    /// Viewport width over height.
    pub aspect: f32,
    /// Vertical field of view, degrees.
    pub fovy: f32,
    /// Near plane.
    pub znear: f32,
    /// Far plane.
    pub zfar: f32,
}

impl Camera {
    /// World to view space.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// View to clip space.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// World to clip space.
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Unit vector from the eye towards the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or(Vec3::NEG_Z)
    }
}

/// `CameraUniform` from `modules/camera.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Column-major view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Eye position; the fragment shader's specular term needs it.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Viewing direction.
    pub forward: [f32; 3],
    /// Vertical field of view, degrees.
    pub fovy: f32,
}

impl CameraUniform {
    /// Snapshot of `camera` for upload.
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: camera.eye.to_array(),
            aspect: camera.aspect,
            forward: camera.forward().to_array(),
            fovy: camera.fovy,
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: Vec3::NEG_Z.to_array(),
            fovy: 45.0,
        }
    }
}
