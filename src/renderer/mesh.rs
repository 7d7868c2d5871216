//! Unit meshes shared by every primitive instance.

use std::f32::consts::{PI, TAU};

/// Latitude bands of the unit sphere.
pub const SPHERE_STACKS: u32 = 32;
/// Longitude segments of the unit sphere.
pub const SPHERE_SLICES: u32 = 32;
/// Radial segments of the unit cylinder.
pub const CYLINDER_SEGMENTS: u32 = 8;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub fn mesh_vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
        ],
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn vertex(&mut self, position: [f32; 3], normal: [f32; 3]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex { position, normal });
        index
    }

    /// Number of indices, as the draw call wants it.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Radius-1 UV sphere centred at the origin.
pub fn unit_sphere() -> MeshData {
    let mut mesh = MeshData::default();
    let ring = SPHERE_SLICES + 1;

    for stack in 0..=SPHERE_STACKS {
        let phi = stack as f32 / SPHERE_STACKS as f32 * PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for slice in 0..=SPHERE_SLICES {
            let theta = slice as f32 / SPHERE_SLICES as f32 * TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let p = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            let _ = mesh.vertex(p, p);
        }
    }

    for stack in 0..SPHERE_STACKS {
        for slice in 0..SPHERE_SLICES {
            let a = stack * ring + slice;
            let b = a + ring;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Radius-1, height-1 capped cylinder along `+Y`, centred at the origin.
pub fn unit_cylinder() -> MeshData {
    let mut mesh = MeshData::default();
    let n = CYLINDER_SEGMENTS;

    // Side wall: bottom/top vertex pairs with radial normals.
    for seg in 0..=n {
        let theta = seg as f32 / n as f32 * TAU;
        let (s, c) = theta.sin_cos();
        let _ = mesh.vertex([c, -0.5, s], [c, 0.0, s]);
        let _ = mesh.vertex([c, 0.5, s], [c, 0.0, s]);
    }
    for seg in 0..n {
        let bottom = seg * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        mesh.indices.extend_from_slice(&[
            bottom,
            top,
            next_bottom,
            next_bottom,
            top,
            next_top,
        ]);
    }

    // Caps.
    for (y, ny) in [(-0.5_f32, -1.0_f32), (0.5, 1.0)] {
        let center = mesh.vertex([0.0, y, 0.0], [0.0, ny, 0.0]);
        for seg in 0..=n {
            let theta = seg as f32 / n as f32 * TAU;
            let (s, c) = theta.sin_cos();
            let _ = mesh.vertex([c, y, s], [0.0, ny, 0.0]);
        }
        for seg in 0..n {
            let a = center + 1 + seg;
            if ny > 0.0 {
                mesh.indices.extend_from_slice(&[center, a + 1, a]);
            } else {
                mesh.indices.extend_from_slice(&[center, a, a + 1]);
            }
        }
    }
    mesh
}
