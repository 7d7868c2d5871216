//! Seam between the scene and whatever owns primitive resources.

use super::primitive::PrimitiveDesc;

/// Opaque reference to one created primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveHandle(pub u64);

/// Creates and releases primitive resources.
///
/// Every handle returned by [`create`](Self::create) must eventually be
/// passed to [`release`](Self::release) exactly once.
/// [`MoleculeScene`](super::MoleculeScene) enforces that discipline.
pub trait PrimitiveBackend {
    /// Allocate resources for `desc` and return a handle to them.
    fn create(&mut self, desc: &PrimitiveDesc) -> PrimitiveHandle;

    /// Free the resources behind `handle`. Unknown handles are ignored.
    fn release(&mut self, handle: PrimitiveHandle);

    /// Number of handles created and not yet released.
    fn live_count(&self) -> usize;
}

#[cfg(test)]
pub(crate) mod testing {
    use rustc_hash::FxHashSet;

    use super::{PrimitiveBackend, PrimitiveDesc, PrimitiveHandle};

    /// Backend that only tracks which handles are live.
    #[derive(Debug, Default)]
    pub(crate) struct CountingBackend {
        next: u64,
        live: FxHashSet<u64>,
        pub(crate) created: usize,
        pub(crate) released: usize,
    }

    impl PrimitiveBackend for CountingBackend {
        fn create(&mut self, _desc: &PrimitiveDesc) -> PrimitiveHandle {
            self.next += 1;
            self.created += 1;
            let _ = self.live.insert(self.next);
            PrimitiveHandle(self.next)
        }

        fn release(&mut self, handle: PrimitiveHandle) {
            if self.live.remove(&handle.0) {
                self.released += 1;
            }
        }

        fn live_count(&self) -> usize {
            self.live.len()
        }
    }
}
