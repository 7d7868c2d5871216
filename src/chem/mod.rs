//! Normalized molecule model and static element data.

/// Atomic-number and CPK style tables.
pub mod element;
/// Atom, bond and molecule types.
pub mod molecule;

pub use element::{element_style, symbol_for_atomic_number, ElementStyle};
pub use molecule::{Atom, Bond, Molecule, MoleculeMetadata, PUBCHEM_SOURCE};
