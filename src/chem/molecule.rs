use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Provenance recorded in [`MoleculeMetadata::source`].
pub const PUBCHEM_SOURCE: &str = "PubChem";

/// One atom of a normalized molecule.
///
/// `id` is dense and 0-based: it always equals the atom's index in
/// [`Molecule::atoms`], which is what [`Bond`] endpoints refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// Index of this atom in the owning molecule.
    pub id: usize,
    /// Chemical symbol (`"C"`, `"Cl"`, ...).
    pub element: String,
    /// X coordinate in angstrom.
    pub x: f64,
    /// Y coordinate in angstrom.
    pub y: f64,
    /// Z coordinate in angstrom (0 for flat 2D records).
    pub z: f64,
}

impl Atom {
    /// Position as a render-space vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// Bond between two atoms, referenced by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    /// First endpoint (index into [`Molecule::atoms`]).
    pub atom1: usize,
    /// Second endpoint (index into [`Molecule::atoms`]).
    pub atom2: usize,
    /// Bond multiplicity, always in `1..=3`.
    pub order: u8,
}

/// Descriptive metadata attached to a molecule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoleculeMetadata {
    /// Molecular weight, e.g. `"194.19 g/mol"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Data source name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Number of atoms in the molecule.
    pub atom_count: usize,
    /// Number of bonds in the molecule.
    pub bond_count: usize,
    /// PubChem compound identifier the record was fetched for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<u64>,
    /// `"3d"` for conformer records, `"2d"` for flat fallback records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
}

/// A render-ready molecule: immutable once built, replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    /// Preferred display name.
    pub name: String,
    /// Molecular formula (Hill notation).
    pub formula: String,
    /// Atoms in normalization order.
    pub atoms: Vec<Atom>,
    /// Bonds referencing [`Self::atoms`] by index.
    pub bonds: Vec<Bond>,
    /// Descriptive metadata.
    pub metadata: MoleculeMetadata,
}

impl Molecule {
    /// Both endpoint atoms of `bond`, or `None` if either index is out of
    /// range.
    #[must_use]
    pub fn bond_endpoints(&self, bond: &Bond) -> Option<(&Atom, &Atom)> {
        Some((self.atoms.get(bond.atom1)?, self.atoms.get(bond.atom2)?))
    }

    /// Mean atom position, or the origin for an empty molecule.
    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        if self.atoms.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self.atoms.iter().map(Atom::position).sum();
        sum / self.atoms.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Molecule {
        let atom = |id, element: &str, x| Atom {
            id,
            element: element.to_owned(),
            x,
            y: 0.0,
            z: 0.0,
        };
        Molecule {
            name: "water".to_owned(),
            formula: "H2O".to_owned(),
            atoms: vec![atom(0, "O", 0.0), atom(1, "H", 1.0), atom(2, "H", -1.0)],
            bonds: vec![
                Bond { atom1: 0, atom2: 1, order: 1 },
                Bond { atom1: 0, atom2: 2, order: 1 },
            ],
            metadata: MoleculeMetadata {
                weight: Some("18.015 g/mol".to_owned()),
                source: Some(PUBCHEM_SOURCE.to_owned()),
                atom_count: 3,
                bond_count: 2,
                cid: Some(962),
                geometry: None,
            },
        }
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let json = serde_json::to_value(water()).unwrap();
        assert_eq!(json["metadata"]["atomCount"], 3);
        assert_eq!(json["metadata"]["bondCount"], 2);
        assert_eq!(json["metadata"]["source"], "PubChem");
        assert!(json["metadata"].get("geometry").is_none());
        assert_eq!(json["atoms"][1]["element"], "H");
        assert_eq!(json["atoms"][1]["x"], 1.0);
    }

    #[test]
    fn bond_endpoints_checks_range() {
        let mol = water();
        let (a, b) = mol.bond_endpoints(&mol.bonds[0]).unwrap();
        assert_eq!((a.element.as_str(), b.element.as_str()), ("O", "H"));
        let dangling = Bond { atom1: 0, atom2: 7, order: 1 };
        assert!(mol.bond_endpoints(&dangling).is_none());
    }

    #[test]
    fn centroid_averages_positions() {
        assert_eq!(water().centroid(), Vec3::ZERO);
    }
}
