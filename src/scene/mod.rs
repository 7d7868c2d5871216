//! Scene synthesis: molecule → primitives, and ownership of the primitives
//! currently on screen.
//!
//! [`primitive::synthesize`] is a pure function from a [`Molecule`] to a
//! list of [`PrimitiveDesc`]s. [`MoleculeScene`] pushes those through a
//! [`PrimitiveBackend`] and remembers every handle it got back, so the
//! previous molecule's resources are always released before the next one's
//! are created.

pub mod backend;
pub mod bond_frame;
pub mod primitive;
pub mod starfield;

pub use backend::{PrimitiveBackend, PrimitiveHandle};
pub use bond_frame::BondFrame;
pub use primitive::{synthesize, PrimitiveDesc, PrimitiveKind};
pub use starfield::Starfield;

use crate::chem::Molecule;
use crate::options::SceneOptions;

/// The single displayed molecule and the handles backing it.
pub struct MoleculeScene<B: PrimitiveBackend> {
    backend: B,
    handles: Vec<PrimitiveHandle>,
    options: SceneOptions,
    molecule_name: Option<String>,
}

impl<B: PrimitiveBackend> MoleculeScene<B> {
    /// Empty scene over `backend`.
    pub fn new(backend: B, options: SceneOptions) -> Self {
        Self {
            backend,
            handles: Vec::new(),
            options,
            molecule_name: None,
        }
    }

    /// Release everything currently shown, then create primitives for
    /// `molecule`.
    pub fn replace(&mut self, molecule: &Molecule) {
        self.clear();
        let prims = synthesize(molecule, &self.options);
        self.handles.reserve(prims.len());
        for desc in &prims {
            self.handles.push(self.backend.create(desc));
        }
        self.molecule_name = Some(molecule.name.clone());
        log::debug!(
            "scene now shows '{}' with {} primitives",
            molecule.name,
            self.handles.len()
        );
    }

    /// Release every primitive; the scene shows nothing afterwards.
    pub fn clear(&mut self) {
        for handle in self.handles.drain(..) {
            self.backend.release(handle);
        }
        self.molecule_name = None;
    }

    /// Name of the displayed molecule, if any.
    pub fn molecule_name(&self) -> Option<&str> {
        self.molecule_name.as_deref()
    }

    /// Number of primitives this scene owns.
    pub fn primitive_count(&self) -> usize {
        self.handles.len()
    }

    /// Whether nothing is displayed.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// The backend, e.g. for uploading instance data.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend access.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: PrimitiveBackend> Drop for MoleculeScene<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::backend::testing::CountingBackend;
    use super::*;
    use crate::chem::{Atom, Bond, MoleculeMetadata};

    fn chain(len: usize, order: u8) -> Molecule {
        let atoms = (0..len)
            .map(|id| Atom {
                id,
                element: "C".to_owned(),
                x: id as f64 * 1.5,
                y: 0.0,
                z: 0.0,
            })
            .collect();
        let bonds = (1..len)
            .map(|i| Bond {
                atom1: i - 1,
                atom2: i,
                order,
            })
            .collect();
        Molecule {
            name: format!("C{len}"),
            formula: format!("C{len}"),
            atoms,
            bonds,
            metadata: MoleculeMetadata::default(),
        }
    }

    #[test]
    fn replace_releases_previous_primitives() {
        let mut scene =
            MoleculeScene::new(CountingBackend::default(), SceneOptions::default());
        scene.replace(&chain(3, 1));
        assert_eq!(scene.primitive_count(), 5);
        assert_eq!(scene.backend().live_count(), 5);

        scene.replace(&chain(2, 3));
        assert_eq!(scene.primitive_count(), 5);
        assert_eq!(scene.backend().live_count(), 5);
        assert_eq!(scene.backend().released, 5);
        assert_eq!(scene.molecule_name(), Some("C2"));
    }

    #[test]
    fn clear_leaves_nothing_live() {
        let mut scene =
            MoleculeScene::new(CountingBackend::default(), SceneOptions::default());
        scene.replace(&chain(4, 2));
        assert_eq!(scene.backend().live_count(), 4 + 3 * 2);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.backend().live_count(), 0);
        assert_eq!(scene.molecule_name(), None);
        assert_eq!(scene.backend().created, scene.backend().released);
    }

    #[test]
    fn empty_molecule_creates_nothing() {
        let mut scene =
            MoleculeScene::new(CountingBackend::default(), SceneOptions::default());
        scene.replace(&chain(0, 1));
        assert!(scene.is_empty());
        assert_eq!(scene.backend().created, 0);
    }
}
