//! CPU-side instance store backing the GPU primitive passes.

use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable};

use crate::scene::{
    PrimitiveBackend, PrimitiveDesc, PrimitiveHandle, PrimitiveKind,
};

/// Per-instance data matching `Instance` in `primitive.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    /// World position, `w = 1`.
    pub center: [f32; 4],
    /// Quaternion `(x, y, z, w)`.
    pub rotation: [f32; 4],
    /// Radius on x and z; y is the radius for spheres, the length for
    /// cylinders.
    pub scale: [f32; 4],
    /// RGB plus emissive strength in `w`.
    pub color: [f32; 4],
}

impl InstanceRaw {
    fn from_desc(desc: &PrimitiveDesc) -> Self {
        let r = desc.radius;
        let scale = match desc.kind {
            PrimitiveKind::Sphere => [r, r, r, 0.0],
            PrimitiveKind::Cylinder => [r, desc.length, r, 0.0],
        };
        let [cr, cg, cb] = desc.color;
        Self {
            center: desc.center.extend(1.0).to_array(),
            rotation: desc.rotation.to_array(),
            scale,
            color: [cr, cg, cb, desc.emissive],
        }
    }
}

/// Live primitives keyed by handle, split into sphere and cylinder lists on
/// demand.
///
/// Creation order is preserved through the monotonically increasing handle
/// ids, so the GPU buffers are rebuilt deterministically.
#[derive(Debug, Default)]
pub struct PrimitiveInstances {
    next_id: u64,
    live: BTreeMap<u64, (PrimitiveKind, InstanceRaw)>,
    dirty: bool,
}

impl PrimitiveInstances {
    /// Empty store, not dirty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn of_kind(&self, kind: PrimitiveKind) -> Vec<InstanceRaw> {
        self.live
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, raw)| *raw)
            .collect()
    }

    /// Sphere instances in creation order.
    pub fn sphere_instances(&self) -> Vec<InstanceRaw> {
        self.of_kind(PrimitiveKind::Sphere)
    }

    /// Cylinder instances in creation order.
    pub fn cylinder_instances(&self) -> Vec<InstanceRaw> {
        self.of_kind(PrimitiveKind::Cylinder)
    }

    /// Whether anything changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl PrimitiveBackend for PrimitiveInstances {
    fn create(&mut self, desc: &PrimitiveDesc) -> PrimitiveHandle {
        let id = self.next_id;
        self.next_id += 1;
        let _ = self
            .live
            .insert(id, (desc.kind, InstanceRaw::from_desc(desc)));
        self.dirty = true;
        PrimitiveHandle(id)
    }

    fn release(&mut self, handle: PrimitiveHandle) {
        if self.live.remove(&handle.0).is_some() {
            self.dirty = true;
        }
    }

    fn live_count(&self) -> usize {
        self.live.len()
    }
}
