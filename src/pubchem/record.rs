//! Raw PUG-REST payloads.
//!
//! PubChem responses are loosely shaped: arrays go missing, bond orders are
//! sometimes omitted, 2D records carry no `z` array, and bond order or
//! coordinate arrays may hold `null` entries. Every field here is optional
//! and defaulted, as are the entries of those arrays, so a well-formed
//! record never fails to deserialize over a missing value. The default
//! policy for each absent field lives in [`normalize`](super::normalize).

use serde::Deserialize;
use serde_json::Value;

/// `{"IdentifierList": {"CID": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdentifierListResponse {
    /// Identifier list wrapper.
    #[serde(rename = "IdentifierList")]
    pub identifier_list: Option<IdentifierList>,
}

/// List of compound identifiers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdentifierList {
    /// Matching CIDs, best match first.
    #[serde(rename = "CID")]
    pub cid: Option<Vec<u64>>,
}

impl IdentifierListResponse {
    /// First CID in the list, if any.
    #[must_use]
    pub fn first_cid(&self) -> Option<u64> {
        self.identifier_list
            .as_ref()?
            .cid
            .as_ref()?
            .first()
            .copied()
    }
}

/// `{"dictionary_terms": {"compound": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AutocompleteResponse {
    /// Suggested terms grouped by dictionary.
    pub dictionary_terms: Option<DictionaryTerms>,
}

/// Autocomplete suggestions per dictionary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DictionaryTerms {
    /// Compound-name suggestions.
    pub compound: Option<Vec<String>>,
}

impl AutocompleteResponse {
    /// First compound suggestion, if any.
    #[must_use]
    pub fn first_compound(&self) -> Option<&str> {
        self.dictionary_terms
            .as_ref()?
            .compound
            .as_ref()?
            .first()
            .map(String::as_str)
    }
}

/// `{"PC_Compounds": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompoundResponse {
    /// Compound records; PubChem returns exactly one per CID.
    #[serde(rename = "PC_Compounds")]
    pub pc_compounds: Option<Vec<RawCompound>>,
}

impl CompoundResponse {
    /// Take the first compound record out of the response.
    #[must_use]
    pub fn into_first(self) -> Option<RawCompound> {
        self.pc_compounds?.into_iter().next()
    }
}

/// One compound record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCompound {
    /// Atom identifiers and atomic numbers.
    pub atoms: Option<RawAtoms>,
    /// Parallel bond arrays.
    pub bonds: Option<RawBonds>,
    /// Coordinate sets; the first set's first conformer is used.
    pub coords: Option<Vec<RawCoordSet>>,
}

/// Parallel per-atom arrays.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAtoms {
    /// Native atom identifiers.
    pub aid: Option<Vec<u32>>,
    /// Atomic numbers, parallel to `aid`.
    pub element: Option<Vec<u32>>,
}

/// Parallel per-bond arrays.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBonds {
    /// First endpoint aids.
    pub aid1: Option<Vec<u32>>,
    /// Second endpoint aids.
    pub aid2: Option<Vec<u32>>,
    /// Bond orders; may be absent, shorter than `aid1` or hold `null`s.
    pub order: Option<Vec<Option<i64>>>,
}

/// A coordinate set covering some or all atoms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCoordSet {
    /// Atom identifiers the conformer arrays are parallel to.
    pub aid: Option<Vec<u32>>,
    /// Concrete geometric arrangements.
    pub conformers: Option<Vec<RawConformer>>,
}

/// Coordinate arrays for one conformer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConformer {
    /// X coordinates. Individual entries may be `null`.
    pub x: Option<Vec<Option<f64>>>,
    /// Y coordinates.
    pub y: Option<Vec<Option<f64>>>,
    /// Z coordinates; absent in 2D records.
    pub z: Option<Vec<Option<f64>>>,
}

/// `{"PropertyTable": {"Properties": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropertyTableResponse {
    /// Property table wrapper.
    #[serde(rename = "PropertyTable")]
    pub property_table: Option<PropertyTable>,
}

/// Rows of the property table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropertyTable {
    /// One row per requested CID.
    #[serde(rename = "Properties")]
    pub properties: Option<Vec<RawProperties>>,
}

impl PropertyTableResponse {
    /// Take the first property row out of the response.
    #[must_use]
    pub fn into_first(self) -> Option<RawProperties> {
        self.property_table?.properties?.into_iter().next()
    }
}

/// Descriptive properties for one compound.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawProperties {
    /// Molecular formula.
    #[serde(rename = "MolecularFormula")]
    pub molecular_formula: Option<String>,
    /// Molecular weight; PubChem sends a string, older dumps a number.
    #[serde(rename = "MolecularWeight")]
    pub molecular_weight: Option<Value>,
    /// Systematic IUPAC name.
    #[serde(rename = "IUPACName")]
    pub iupac_name: Option<String>,
    /// Preferred common name.
    #[serde(rename = "Title")]
    pub title: Option<String>,
}

impl RawProperties {
    /// Molecular weight rendered as text, whatever JSON type it arrived as.
    #[must_use]
    pub fn weight_text(&self) -> Option<String> {
        match self.molecular_weight.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
