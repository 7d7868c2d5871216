//! PubChem resolution and normalization pipeline.
//!
//! A free-text query flows through four stages:
//!
//! 1. [`resolver`] turns it into a [`Cid`] (exact name, then one
//!    autocomplete suggestion).
//! 2. [`fetcher`] pulls the 3D record (falling back to 2D) and the property
//!    table concurrently.
//! 3. [`normalize`] maps the raw record into a [`Molecule`](crate::chem::Molecule).
//! 4. [`service`] chains the stages and classifies failures.
//!
//! All network access goes through the [`Transport`] seam, normally a
//! [`CachedTransport`] over [`UreqTransport`].

pub mod cache;
pub mod client;
pub mod fetcher;
pub mod normalize;
pub mod record;
pub mod resolver;
pub mod service;
pub mod transport;

pub use cache::{CachedTransport, DEFAULT_TTL};
pub use client::{Cid, PubChemClient, RecordType, DEFAULT_BASE_URL};
pub use fetcher::{Geometry, StructureRecord};
pub use normalize::{normalize, NormalizeError, NOT_AVAILABLE};
pub use service::{LookupError, MoleculeLookup, MoleculeService, PubChemService};
pub use transport::{HttpResponse, Transport, TransportError, UreqTransport};
