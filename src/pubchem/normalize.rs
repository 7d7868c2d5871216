//! Raw PubChem record → [`Molecule`].
//!
//! Pure transformation. Every optional input field has an explicit default:
//!
//! | input                         | policy                                 |
//! |-------------------------------|----------------------------------------|
//! | atoms / first conformer x, y  | required, else [`NormalizeError`]      |
//! | atom list                     | empty → [`NormalizeError`]             |
//! | atomic number                 | unmapped → `"X"`                       |
//! | conformer `z`                 | absent → 0 for every atom              |
//! | single coordinate value       | absent or `null` → 0                   |
//! | bond order                    | absent, `null` or < 1 → 1, > 3 → 3     |
//! | bond endpoint aid             | unknown → bond dropped                 |
//! | formula / name / weight       | absent → `"N/A"`                       |

use std::fmt;

use rustc_hash::FxHashMap;

use super::client::Cid;
use super::fetcher::StructureRecord;
use super::record::{RawBonds, RawConformer, RawProperties};
use crate::chem::{
    symbol_for_atomic_number, Atom, Bond, Molecule, MoleculeMetadata,
    PUBCHEM_SOURCE,
};
use crate::chem::element::UNKNOWN_SYMBOL;

/// Placeholder for descriptive fields PubChem did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// Highest bond order the model represents.
pub const MAX_BOND_ORDER: u8 = 3;

/// A record that cannot be turned into a molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeError {
    /// No atoms, or no conformer with both `x` and `y` arrays.
    NoCoordinates,
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCoordinates => {
                write!(f, "molecule has no available coordinates")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// Clamp a raw bond order into `1..=3`.
#[must_use]
pub fn clamp_bond_order(raw: Option<i64>) -> u8 {
    raw.unwrap_or(1).clamp(1, i64::from(MAX_BOND_ORDER)) as u8
}

/// Build a [`Molecule`] from a structure record and optional properties.
///
/// # Errors
///
/// Returns [`NormalizeError::NoCoordinates`] when the record lacks atoms or
/// a usable conformer.
pub fn normalize(
    record: &StructureRecord,
    properties: Option<&RawProperties>,
    cid: Option<Cid>,
) -> Result<Molecule, NormalizeError> {
    let compound = &record.compound;
    let raw_atoms = compound.atoms.as_ref().ok_or(NormalizeError::NoCoordinates)?;
    let aids = raw_atoms
        .aid
        .as_deref()
        .filter(|aids| !aids.is_empty())
        .ok_or(NormalizeError::NoCoordinates)?;
    let coord_set = compound
        .coords
        .as_ref()
        .and_then(|sets| sets.first())
        .ok_or(NormalizeError::NoCoordinates)?;
    let conformer = coord_set
        .conformers
        .as_ref()
        .and_then(|c| c.first())
        .ok_or(NormalizeError::NoCoordinates)?;
    let coords = Coordinates::new(conformer, coord_set.aid.as_deref())
        .ok_or(NormalizeError::NoCoordinates)?;
    let elements = raw_atoms.element.as_deref().unwrap_or_default();

    let mut index_of_aid: FxHashMap<u32, usize> = FxHashMap::default();
    let mut atoms = Vec::with_capacity(aids.len());
    for (slot, &aid) in aids.iter().enumerate() {
        let id = atoms.len();
        let _ = index_of_aid.entry(aid).or_insert(id);
        let element = elements
            .get(slot)
            .map_or(UNKNOWN_SYMBOL, |&z| symbol_for_atomic_number(z));
        let [x, y, z] = coords.position(slot, aid);
        atoms.push(Atom {
            id,
            element: element.to_owned(),
            x,
            y,
            z,
        });
    }

    let bonds = compound
        .bonds
        .as_ref()
        .map(|raw| map_bonds(raw, &index_of_aid))
        .unwrap_or_default();

    Ok(Molecule {
        name: describe_name(properties),
        formula: properties
            .and_then(|p| p.molecular_formula.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        metadata: MoleculeMetadata {
            weight: Some(
                properties
                    .and_then(RawProperties::weight_text)
                    .map_or_else(|| NOT_AVAILABLE.to_owned(), |w| format!("{w} g/mol")),
            ),
            source: Some(PUBCHEM_SOURCE.to_owned()),
            atom_count: atoms.len(),
            bond_count: bonds.len(),
            cid: cid.map(|c| c.0),
            geometry: Some(record.geometry.as_str().to_owned()),
        },
        atoms,
        bonds,
    })
}

fn describe_name(properties: Option<&RawProperties>) -> String {
    properties
        .and_then(|p| p.title.clone().or_else(|| p.iupac_name.clone()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

fn map_bonds(raw: &RawBonds, index_of_aid: &FxHashMap<u32, usize>) -> Vec<Bond> {
    let aid1 = raw.aid1.as_deref().unwrap_or_default();
    let aid2 = raw.aid2.as_deref().unwrap_or_default();
    let orders = raw.order.as_deref().unwrap_or_default();

    let mut bonds = Vec::with_capacity(aid1.len());
    for (i, a1) in aid1.iter().enumerate() {
        let endpoints = aid2
            .get(i)
            .and_then(|a2| Some((*index_of_aid.get(a1)?, *index_of_aid.get(a2)?)));
        let Some((atom1, atom2)) = endpoints else {
            log::debug!("dropping bond {i}: endpoint aid not in atom set");
            continue;
        };
        bonds.push(Bond {
            atom1,
            atom2,
            order: clamp_bond_order(orders.get(i).copied().flatten()),
        });
    }
    bonds
}

/// Coordinate arrays of one conformer, addressable by atom slot or aid.
struct Coordinates<'a> {
    x: &'a [Option<f64>],
    y: &'a [Option<f64>],
    z: Option<&'a [Option<f64>]>,
    /// Conformer slot per aid, when the coordinate set lists its own aids.
    slot_of_aid: Option<FxHashMap<u32, usize>>,
}

impl<'a> Coordinates<'a> {
    fn new(conformer: &'a RawConformer, aids: Option<&[u32]>) -> Option<Self> {
        let slot_of_aid = aids.map(|aids| {
            aids.iter()
                .enumerate()
                .map(|(slot, &aid)| (aid, slot))
                .collect()
        });
        Some(Self {
            x: conformer.x.as_deref()?,
            y: conformer.y.as_deref()?,
            z: conformer.z.as_deref(),
            slot_of_aid,
        })
    }

    fn position(&self, atom_slot: usize, aid: u32) -> [f64; 3] {
        let slot = self
            .slot_of_aid
            .as_ref()
            .map_or(Some(atom_slot), |map| map.get(&aid).copied());
        let Some(slot) = slot else {
            return [0.0; 3];
        };
        let at = |values: &[Option<f64>]| {
            values.get(slot).copied().flatten().unwrap_or(0.0)
        };
        [at(self.x), at(self.y), self.z.map_or(0.0, at)]
    }
}
