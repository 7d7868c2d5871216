//! Molecule → renderable primitive descriptions.

use glam::{Quat, Vec3};

use super::bond_frame::BondFrame;
use crate::chem::element::unpack_rgb;
use crate::chem::{element_style, Bond, Molecule};
use crate::options::SceneOptions;

/// Radius factor of each cylinder in a double bond.
const DOUBLE_RADIUS_SCALE: f32 = 0.7;
/// Radius factor of each cylinder in a triple bond.
const TRIPLE_RADIUS_SCALE: f32 = 0.6;

/// Shape of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Unit sphere scaled by `radius`.
    Sphere,
    /// Unit `+Y` cylinder scaled by `radius` and `length`.
    Cylinder,
}

/// One sphere or cylinder, fully placed in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveDesc {
    /// Sphere or cylinder.
    pub kind: PrimitiveKind,
    /// Centre in model space.
    pub center: Vec3,
    /// Orientation; identity for spheres.
    pub rotation: Quat,
    /// Sphere or cylinder radius.
    pub radius: f32,
    /// Cylinder length; zero for spheres.
    pub length: f32,
    /// Linear RGB colour.
    pub color: [f32; 3],
    /// Self-illumination strength.
    pub emissive: f32,
}

impl PrimitiveDesc {
    /// A sphere at `center`.
    #[must_use]
    pub fn sphere(center: Vec3, radius: f32, color: [f32; 3], emissive: f32) -> Self {
        Self {
            kind: PrimitiveKind::Sphere,
            center,
            rotation: Quat::IDENTITY,
            radius,
            length: 0.0,
            color,
            emissive,
        }
    }

    /// A cylinder oriented by `frame`, shifted sideways by `offset`.
    #[must_use]
    pub fn cylinder(
        frame: &BondFrame,
        offset: f32,
        radius: f32,
        color: [f32; 3],
    ) -> Self {
        Self {
            kind: PrimitiveKind::Cylinder,
            center: frame.offset_center(offset),
            rotation: frame.rotation,
            radius,
            length: frame.length,
            color,
            emissive: 0.0,
        }
    }
}

/// Build the full primitive set for `molecule`: one sphere per atom, then
/// one to three cylinders per bond.
///
/// Bonds whose endpoints fall outside the atom list are skipped.
#[must_use]
pub fn synthesize(molecule: &Molecule, options: &SceneOptions) -> Vec<PrimitiveDesc> {
    let mut out = Vec::with_capacity(molecule.atoms.len() + molecule.bonds.len() * 2);

    for atom in &molecule.atoms {
        let style = element_style(&atom.element);
        out.push(PrimitiveDesc::sphere(
            atom.position(),
            style.radius * options.atom_scale,
            style.rgb(),
            options.atom_emissive,
        ));
    }

    let bond_color = unpack_rgb(options.bond_color);
    for bond in &molecule.bonds {
        let Some((from, to)) = molecule.bond_endpoints(bond) else {
            log::debug!(
                "skipping bond {}-{}: endpoint out of range",
                bond.atom1,
                bond.atom2
            );
            continue;
        };
        let frame = BondFrame::between(from.position(), to.position());
        push_bond(&mut out, bond, &frame, options, bond_color);
    }
    out
}

fn push_bond(
    out: &mut Vec<PrimitiveDesc>,
    bond: &Bond,
    frame: &BondFrame,
    options: &SceneOptions,
    color: [f32; 3],
) {
    let radius = options.bond_radius;
    match bond.order {
        2 => {
            let half = options.double_spacing / 2.0;
            let thin = radius * DOUBLE_RADIUS_SCALE;
            out.push(PrimitiveDesc::cylinder(frame, half, thin, color));
            out.push(PrimitiveDesc::cylinder(frame, -half, thin, color));
        }
        3 => {
            let spacing = options.triple_spacing;
            let thin = radius * TRIPLE_RADIUS_SCALE;
            out.push(PrimitiveDesc::cylinder(frame, 0.0, thin, color));
            out.push(PrimitiveDesc::cylinder(frame, spacing, thin, color));
            out.push(PrimitiveDesc::cylinder(frame, -spacing, thin, color));
        }
        _ => out.push(PrimitiveDesc::cylinder(frame, 0.0, radius, color)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::{Atom, MoleculeMetadata};

    fn atom(id: usize, element: &str, z: f64) -> Atom {
        Atom {
            id,
            element: element.to_owned(),
            x: 0.0,
            y: 0.0,
            z,
        }
    }

    /// Carbon at the origin, oxygen 1.2 along +Z.
    fn diatomic(order: u8) -> Molecule {
        Molecule {
            name: "test".to_owned(),
            formula: "CO".to_owned(),
            atoms: vec![atom(0, "C", 0.0), atom(1, "O", 1.2)],
            bonds: vec![Bond {
                atom1: 0,
                atom2: 1,
                order,
            }],
            metadata: MoleculeMetadata::default(),
        }
    }

    fn cylinders(prims: &[PrimitiveDesc]) -> Vec<&PrimitiveDesc> {
        prims
            .iter()
            .filter(|p| p.kind == PrimitiveKind::Cylinder)
            .collect()
    }

    #[test]
    fn atoms_become_scaled_cpk_spheres() {
        let opts = SceneOptions::default();
        let prims = synthesize(&diatomic(1), &opts);
        let spheres: Vec<_> = prims
            .iter()
            .filter(|p| p.kind == PrimitiveKind::Sphere)
            .collect();
        assert_eq!(spheres.len(), 2);
        let carbon = element_style("C");
        assert!((spheres[0].radius - carbon.radius * 0.5).abs() < 1e-6);
        assert_eq!(spheres[0].color, carbon.rgb());
        assert_eq!(spheres[0].emissive, 0.2);
        assert!(spheres[1].center.abs_diff_eq(Vec3::new(0.0, 0.0, 1.2), 1e-6));
    }

    #[test]
    fn single_bond_is_one_axial_cylinder() {
        let prims = synthesize(&diatomic(1), &SceneOptions::default());
        let cyl = cylinders(&prims);
        assert_eq!(cyl.len(), 1);
        assert!(cyl[0].center.abs_diff_eq(Vec3::new(0.0, 0.0, 0.6), 1e-6));
        assert!((cyl[0].length - 1.2).abs() < 1e-6);
        assert!((cyl[0].radius - 0.08).abs() < 1e-6);
        assert_eq!(cyl[0].color, unpack_rgb(0x4A_5568));
    }

    #[test]
    fn double_bond_is_two_symmetric_parallel_cylinders() {
        let prims = synthesize(&diatomic(2), &SceneOptions::default());
        let cyl = cylinders(&prims);
        assert_eq!(cyl.len(), 2);

        let mid = Vec3::new(0.0, 0.0, 0.6);
        let a = cyl[0].center - mid;
        let b = cyl[1].center - mid;
        assert!((a + b).length() < 1e-6, "offsets must be symmetric");
        assert!((a.length() - 0.1).abs() < 1e-6);
        assert!(a.dot(Vec3::Z).abs() < 1e-6, "offset is perpendicular");
        assert_eq!(cyl[0].rotation, cyl[1].rotation);
        assert!((cyl[0].radius - 0.08 * 0.7).abs() < 1e-6);
    }

    #[test]
    fn triple_bond_has_one_axial_and_two_offset_cylinders() {
        let prims = synthesize(&diatomic(3), &SceneOptions::default());
        let cyl = cylinders(&prims);
        assert_eq!(cyl.len(), 3);

        let mid = Vec3::new(0.0, 0.0, 0.6);
        let offsets: Vec<f32> = cyl.iter().map(|c| (c.center - mid).length()).collect();
        assert!(offsets[0] < 1e-6);
        assert!((offsets[1] - 0.25).abs() < 1e-6);
        assert!((offsets[2] - 0.25).abs() < 1e-6);
        assert!(((cyl[1].center - mid) + (cyl[2].center - mid)).length() < 1e-6);
        for c in &cyl {
            assert!((c.radius - 0.08 * 0.6).abs() < 1e-6);
            assert!((c.length - 1.2).abs() < 1e-6);
        }
    }

    #[test]
    fn out_of_range_bonds_are_skipped() {
        let mut mol = diatomic(1);
        mol.bonds.push(Bond {
            atom1: 0,
            atom2: 9,
            order: 1,
        });
        let prims = synthesize(&mol, &SceneOptions::default());
        assert_eq!(cylinders(&prims).len(), 1);
    }

    #[test]
    fn unknown_elements_use_default_style() {
        let mut mol = diatomic(1);
        mol.atoms[0].element = "X".to_owned();
        let prims = synthesize(&mol, &SceneOptions::default());
        assert_eq!(prims[0].color, unpack_rgb(0xFF_69B4));
        assert!((prims[0].radius - 0.5).abs() < 1e-6);
    }
}
