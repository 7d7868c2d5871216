//! Pointer-driven model rotation.

use glam::{EulerRot, Mat4, Quat, Vec2};

use crate::options::InteractionOptions;

/// Whether the primary pointer is currently rotating the model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Dragging; `last` is the previous pointer position.
    Dragging {
        /// Pointer position at the previous event.
        last: Vec2,
    },
}

impl DragState {
    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Model orientation as pitch and yaw, applied in XYZ Euler order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTransform {
    /// Rotation about X, in radians.
    pub pitch: f32,
    /// Rotation about Y, in radians.
    pub yaw: f32,
    /// Whether idle frames add yaw.
    pub auto_rotate: bool,
    auto_rotate_speed: f32,
    drag_sensitivity: f32,
    drag: DragState,
}

impl ModelTransform {
    /// Unrotated model using the given behaviour.
    #[must_use]
    pub fn new(options: &InteractionOptions) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            auto_rotate: options.auto_rotate,
            auto_rotate_speed: options.auto_rotate_speed,
            drag_sensitivity: options.drag_sensitivity,
            drag: DragState::Idle,
        }
    }

    /// Current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Pointer went down at `at`.
    pub fn begin_drag(&mut self, at: Vec2) {
        self.drag = DragState::Dragging { last: at };
    }

    /// Pointer moved to `to`. Rotates only while dragging.
    pub fn drag_to(&mut self, to: Vec2) {
        let DragState::Dragging { last } = self.drag else {
            return;
        };
        let delta = to - last;
        self.yaw += delta.x * self.drag_sensitivity;
        self.pitch += delta.y * self.drag_sensitivity;
        self.drag = DragState::Dragging { last: to };
    }

    /// Pointer released or left the surface.
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Advance one frame. Auto-rotation is suspended while dragging.
    pub fn tick(&mut self) {
        if self.auto_rotate && !self.drag.is_dragging() {
            self.yaw += self.auto_rotate_speed;
        }
    }

    /// Back to the unrotated orientation.
    pub fn reset(&mut self) {
        self.pitch = 0.0;
        self.yaw = 0.0;
    }

    /// Orientation as a quaternion.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }

    /// Model matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform() -> ModelTransform {
        ModelTransform::new(&InteractionOptions::default())
    }

    #[test]
    fn idle_frames_auto_rotate() {
        let mut t = transform();
        for _ in 0..4 {
            t.tick();
        }
        assert!((t.yaw - 0.02).abs() < 1e-6);
        assert_eq!(t.pitch, 0.0);

        t.auto_rotate = false;
        t.tick();
        assert!((t.yaw - 0.02).abs() < 1e-6);
    }

    #[test]
    fn drag_rotates_and_suspends_auto_rotation() {
        let mut t = transform();
        t.begin_drag(Vec2::new(100.0, 100.0));
        t.drag_to(Vec2::new(110.0, 95.0));
        assert!((t.yaw - 0.1).abs() < 1e-6);
        assert!((t.pitch + 0.05).abs() < 1e-6);

        t.tick();
        assert!((t.yaw - 0.1).abs() < 1e-6, "no auto-rotate while dragging");

        // Deltas are relative to the previous event.
        t.drag_to(Vec2::new(120.0, 95.0));
        assert!((t.yaw - 0.2).abs() < 1e-6);

        t.end_drag();
        assert_eq!(t.drag_state(), DragState::Idle);
        t.tick();
        assert!((t.yaw - 0.205).abs() < 1e-6);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut t = transform();
        t.drag_to(Vec2::new(50.0, 50.0));
        assert_eq!((t.pitch, t.yaw), (0.0, 0.0));
    }

    #[test]
    fn matrix_matches_euler_order() {
        let mut t = transform();
        t.pitch = 0.3;
        t.yaw = -1.1;
        let expected = Mat4::from_rotation_x(0.3) * Mat4::from_rotation_y(-1.1);
        assert!(t.matrix().abs_diff_eq(expected, 1e-5));
    }
}
