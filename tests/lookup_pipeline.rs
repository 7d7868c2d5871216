//! End-to-end lookup pipeline against an in-memory PubChem.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use molstudio::options::SceneOptions;
use molstudio::pubchem::{
    CachedTransport, HttpResponse, LookupError, MoleculeLookup,
    MoleculeService, PubChemClient, Transport, TransportError,
};
use molstudio::renderer::PrimitiveInstances;
use molstudio::scene::{MoleculeScene, PrimitiveBackend};

const ETHANOL_CIDS: &str = r#"{"IdentifierList":{"CID":[702]}}"#;
const ETHANOL_PROPS: &str = r#"{"PropertyTable":{"Properties":[{"CID":702,
    "MolecularFormula":"C2H6O","MolecularWeight":"46.07","Title":"Ethanol"}]}}"#;
const ETHANOL_3D: &str = r#"{"PC_Compounds":[{
    "atoms":{"aid":[1,2,3],"element":[6,6,8]},
    "bonds":{"aid1":[1,2],"aid2":[2,3],"order":[1,1]},
    "coords":[{"aid":[1,2,3],"conformers":[
        {"x":[0,1.5,2.2],"y":[0,0,1.1],"z":[0,0.2,0]}]}]}]}"#;
const ETHENE_2D: &str = r#"{"PC_Compounds":[{
    "atoms":{"aid":[1,2],"element":[6,6]},
    "bonds":{"aid1":[1,1],"aid2":[2,9],"order":[5,1]},
    "coords":[{"aid":[1,2],"conformers":[{"x":[0,1.3],"y":[0,0]}]}]}]}"#;

/// Routes by URL suffix; first match wins, everything else is a 404.
struct FakePubChem {
    routes: Vec<(&'static str, &'static str)>,
    calls: AtomicUsize,
}

impl FakePubChem {
    fn new(routes: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            routes,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Transport for FakePubChem {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .routes
            .iter()
            .find(|(suffix, _)| url.ends_with(*suffix))
            .map_or_else(
                || HttpResponse {
                    status: 404,
                    body: String::new(),
                },
                |(_, body)| HttpResponse::ok(*body),
            ))
    }
}

type Service = MoleculeService<CachedTransport<FakePubChem>>;

fn service(routes: Vec<(&'static str, &'static str)>) -> Service {
    let transport = CachedTransport::new(
        FakePubChem::new(routes),
        Duration::from_secs(3600),
    );
    MoleculeService::new(PubChemClient::with_base_url(
        transport,
        "http://pubchem.test",
    ))
}

fn calls(service: &Service) -> usize {
    service.client().transport().inner().calls.load(Ordering::SeqCst)
}

fn ethanol_routes() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/name/ethanol/cids/JSON", ETHANOL_CIDS),
        (
            "/autocomplete/compound/ethyl%20alcohol/json?limit=1",
            r#"{"dictionary_terms":{"compound":["ethanol"]}}"#,
        ),
        ("/cid/702/JSON?record_type=3d", ETHANOL_3D),
        ("/cid/702/property/MolecularFormula,MolecularWeight,IUPACName,Title/JSON", ETHANOL_PROPS),
    ]
}

#[test]
fn blank_query_makes_no_calls() {
    let service = service(ethanol_routes());
    for query in ["", "   ", "\t\n"] {
        assert!(matches!(
            service.lookup(query),
            Err(LookupError::InvalidQuery(_))
        ));
    }
    assert_eq!(calls(&service), 0);
}

#[test]
fn exact_name_resolves_to_3d_molecule() {
    let service = service(ethanol_routes());
    let molecule = service.lookup("  ethanol ").unwrap();

    assert_eq!(molecule.name, "Ethanol");
    assert_eq!(molecule.formula, "C2H6O");
    assert_eq!(molecule.atoms.len(), 3);
    assert_eq!(molecule.bonds.len(), 2);
    assert_eq!(molecule.atoms[2].element, "O");
    assert!((molecule.atoms[1].z - 0.2).abs() < 1e-9);
    assert_eq!(molecule.metadata.cid, Some(702));
    assert_eq!(molecule.metadata.geometry.as_deref(), Some("3d"));
    assert_eq!(molecule.metadata.source.as_deref(), Some("PubChem"));
}

#[test]
fn repeated_query_is_served_from_cache() {
    let service = service(ethanol_routes());
    let first = service.lookup("ethanol").unwrap();
    let after_first = calls(&service);
    // Name lookup, 3D record, properties.
    assert_eq!(after_first, 3);

    let second = service.lookup("ethanol").unwrap();
    assert_eq!(first, second);
    assert_eq!(calls(&service), after_first);
}

#[test]
fn autocomplete_suggestion_is_tried_once() {
    let service = service(ethanol_routes());
    let molecule = service.lookup("ethyl alcohol").unwrap();
    assert_eq!(molecule.name, "Ethanol");
}

#[test]
fn unknown_query_is_not_found_and_cached() {
    let service = service(ethanol_routes());
    let err = service.lookup("xyznonexistentmolecule123").unwrap_err();
    assert_eq!(
        err,
        LookupError::NotFound {
            query: "xyznonexistentmolecule123".to_owned()
        }
    );
    assert_eq!(
        err.to_string(),
        "molecule 'xyznonexistentmolecule123' not found"
    );

    let before = calls(&service);
    let _ = service.lookup("xyznonexistentmolecule123");
    assert_eq!(calls(&service), before);
}

#[test]
fn flat_record_falls_back_to_2d() {
    let service = service(vec![
        ("/name/ethene/cids/JSON", r#"{"IdentifierList":{"CID":[6325]}}"#),
        ("/cid/6325/JSON", ETHENE_2D),
    ]);
    let molecule = service.lookup("ethene").unwrap();

    assert_eq!(molecule.metadata.geometry.as_deref(), Some("2d"));
    assert!(molecule.atoms.iter().all(|a| a.z == 0.0));
    // Order 5 clamps to 3; the bond to aid 9 is dropped.
    assert_eq!(molecule.bonds.len(), 1);
    assert_eq!(molecule.bonds[0].order, 3);
    // No property table: descriptive fields fall back.
    assert_eq!(molecule.name, "N/A");
    assert_eq!(molecule.formula, "N/A");
}

#[test]
fn missing_structure_is_reported() {
    let service = service(vec![("/name/ghost/cids/JSON", ETHANOL_CIDS)]);
    assert!(matches!(
        service.lookup("ghost"),
        Err(LookupError::StructureUnavailable { .. })
    ));
}

#[test]
fn looked_up_molecule_fills_and_empties_a_scene() {
    let service = service(ethanol_routes());
    let molecule = service.lookup("ethanol").unwrap();

    let mut scene =
        MoleculeScene::new(PrimitiveInstances::new(), SceneOptions::default());
    scene.replace(&molecule);
    // Three atoms, two single bonds.
    assert_eq!(scene.backend().live_count(), 5);
    assert_eq!(scene.backend().sphere_instances().len(), 3);
    assert_eq!(scene.backend().cylinder_instances().len(), 2);

    scene.replace(&molecule);
    assert_eq!(scene.backend().live_count(), 5);

    scene.clear();
    assert_eq!(scene.backend().live_count(), 0);
}
