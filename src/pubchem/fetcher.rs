//! Structural and descriptive record retrieval for a resolved CID.

use std::thread;

use super::client::{Cid, PubChemClient, RecordType};
use super::record::{RawCompound, RawProperties};
use super::transport::Transport;

/// Geometry flavour a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// A computed 3D conformer.
    ThreeD,
    /// A flat 2D depiction; `z` is implicitly zero.
    TwoD,
}

impl Geometry {
    /// Short tag used in molecule metadata.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThreeD => "3d",
            Self::TwoD => "2d",
        }
    }
}

/// Raw compound record plus the flavour that supplied it.
#[derive(Debug, Clone)]
pub struct StructureRecord {
    /// The compound payload.
    pub compound: RawCompound,
    /// Whether the coordinates are 3D or flat.
    pub geometry: Geometry,
}

/// Fetch the richest available structure: the 3D conformer if PubChem has
/// one, else the default 2D record.
pub fn fetch_structure<T: Transport>(
    client: &PubChemClient<T>,
    cid: Cid,
) -> Option<StructureRecord> {
    if let Some(compound) = client.compound(cid, RecordType::ThreeD) {
        return Some(StructureRecord {
            compound,
            geometry: Geometry::ThreeD,
        });
    }
    log::info!("no 3D conformer for CID {cid}, falling back to 2D");
    client
        .compound(cid, RecordType::TwoD)
        .map(|compound| StructureRecord {
            compound,
            geometry: Geometry::TwoD,
        })
}

/// Descriptive properties (formula, weight, names) for `cid`.
pub fn fetch_properties<T: Transport>(
    client: &PubChemClient<T>,
    cid: Cid,
) -> Option<RawProperties> {
    client.properties(cid)
}

/// Fetch structure and properties concurrently and wait for both.
pub fn fetch_compound<T: Transport>(
    client: &PubChemClient<T>,
    cid: Cid,
) -> (Option<StructureRecord>, Option<RawProperties>) {
    thread::scope(|scope| {
        let properties = scope.spawn(|| fetch_properties(client, cid));
        let structure = fetch_structure(client, cid);
        let properties = properties.join().unwrap_or_else(|_| {
            log::error!("property fetch for CID {cid} panicked");
            None
        });
        (structure, properties)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::pubchem::transport::{HttpResponse, TransportError};

    const COMPOUND: &str = r#"{"PC_Compounds":[{"atoms":{"aid":[1],"element":[6]},
        "coords":[{"aid":[1],"conformers":[{"x":[0.0],"y":[0.0]}]}]}]}"#;

    struct Records {
        has_3d: bool,
        calls: AtomicUsize,
    }

    impl Transport for Records {
        fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            if url.contains("/property/") {
                return Ok(HttpResponse::ok(
                    r#"{"PropertyTable":{"Properties":[{"CID":297,"MolecularFormula":"CH4"}]}}"#,
                ));
            }
            if url.ends_with("record_type=3d") && !self.has_3d {
                return Ok(HttpResponse {
                    status: 404,
                    body: r#"{"Fault":{"Code":"PUGREST.NotFound"}}"#.to_owned(),
                });
            }
            Ok(HttpResponse::ok(COMPOUND))
        }
    }

    #[test]
    fn prefers_3d_record() {
        let client = PubChemClient::new(Records {
            has_3d: true,
            calls: AtomicUsize::new(0),
        });
        let record = fetch_structure(&client, Cid(297)).unwrap();
        assert_eq!(record.geometry, Geometry::ThreeD);
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn falls_back_to_2d_record() {
        let client = PubChemClient::new(Records {
            has_3d: false,
            calls: AtomicUsize::new(0),
        });
        let record = fetch_structure(&client, Cid(297)).unwrap();
        assert_eq!(record.geometry, Geometry::TwoD);
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn fetches_both_halves() {
        let client = PubChemClient::new(Records {
            has_3d: true,
            calls: AtomicUsize::new(0),
        });
        let (structure, properties) = fetch_compound(&client, Cid(297));
        assert!(structure.is_some());
        assert_eq!(
            properties.unwrap().molecular_formula.as_deref(),
            Some("CH4")
        );
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 2);
    }
}
