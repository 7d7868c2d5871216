//! Placement frame for a bond cylinder.

use glam::{Quat, Vec3};

/// Midpoint, orientation and side-offset axis for a cylinder spanning two
/// atom centres.
///
/// Cylinder meshes are built along `+Y`; `rotation` takes `+Y` onto the
/// bond direction. `perpendicular` is the axis along which the parallel
/// cylinders of double and triple bonds are offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondFrame {
    /// Centre of the bond.
    pub midpoint: Vec3,
    /// Unit vector from start to end.
    pub direction: Vec3,
    /// Distance between the endpoints.
    pub length: f32,
    /// Rotation taking `+Y` onto `direction`.
    pub rotation: Quat,
    /// Unit vector perpendicular to `direction`.
    pub perpendicular: Vec3,
}

impl BondFrame {
    /// Frame for a bond from `start` to `end`.
    ///
    /// Coincident endpoints have no direction; the frame then points along
    /// `+Y` with zero length.
    #[must_use]
    pub fn between(start: Vec3, end: Vec3) -> Self {
        let span = end - start;
        let length = span.length();
        let direction = span.try_normalize().unwrap_or(Vec3::Y);
        Self {
            midpoint: (start + end) * 0.5,
            direction,
            length,
            rotation: Quat::from_rotation_arc(Vec3::Y, direction),
            perpendicular: find_perpendicular(direction),
        }
    }

    /// Midpoint shifted sideways by `offset` along the perpendicular.
    #[must_use]
    pub fn offset_center(&self, offset: f32) -> Vec3 {
        self.midpoint + self.perpendicular * offset
    }
}

/// Unit vector perpendicular to the unit vector `dir`.
///
/// Crosses with `X`, or with `Y` when `dir` is nearly parallel to `X`.
fn find_perpendicular(dir: Vec3) -> Vec3 {
    let reference = if dir.dot(Vec3::X).abs() > 0.9 {
        Vec3::Y
    } else {
        Vec3::X
    };
    dir.cross(reference).normalize()
}
