//! Query → [`Molecule`] orchestration.

use std::fmt;
use std::time::Duration;

use super::cache::CachedTransport;
use super::client::{Cid, PubChemClient};
use super::fetcher::fetch_compound;
use super::normalize::{normalize, NormalizeError};
use super::resolver::resolve;
use super::transport::{Transport, UreqTransport};
use crate::chem::Molecule;
use crate::options::ServiceOptions;

/// Why a lookup produced no molecule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The query was empty after trimming.
    InvalidQuery(String),
    /// Neither the exact name nor the autocomplete suggestion resolved.
    NotFound {
        /// The trimmed query.
        query: String,
    },
    /// The CID resolved but no structure record could be fetched.
    StructureUnavailable {
        /// The resolved identifier.
        cid: Cid,
    },
    /// The structure record carried no usable coordinates.
    NoCoordinates,
    /// Anything else (worker panics, runtime failures).
    Internal(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuery(msg) | Self::Internal(msg) => write!(f, "{msg}"),
            Self::NotFound { query } => {
                write!(f, "molecule '{query}' not found")
            }
            Self::StructureUnavailable { .. } => {
                write!(f, "failed to fetch molecule structure")
            }
            Self::NoCoordinates => {
                write!(f, "molecule has no available coordinates")
            }
        }
    }
}

impl std::error::Error for LookupError {}

impl From<NormalizeError> for LookupError {
    fn from(e: NormalizeError) -> Self {
        match e {
            NormalizeError::NoCoordinates => Self::NoCoordinates,
        }
    }
}

/// Anything that can turn a free-text query into a molecule.
///
/// The HTTP handlers and the viewer's search workers depend on this rather
/// than on a concrete service, so tests can answer from memory.
pub trait MoleculeLookup: Send + Sync {
    /// Resolve, fetch and normalize `query`.
    ///
    /// # Errors
    ///
    /// See [`LookupError`] for the failure classes.
    fn lookup(&self, query: &str) -> Result<Molecule, LookupError>;
}

/// Production lookup over a cached `ureq` transport.
pub type PubChemService = MoleculeService<CachedTransport<UreqTransport>>;

/// The resolution and normalization pipeline over a PubChem client.
pub struct MoleculeService<T> {
    client: PubChemClient<T>,
}

impl<T: Transport> MoleculeService<T> {
    /// Wrap an existing client.
    pub fn new(client: PubChemClient<T>) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &PubChemClient<T> {
        &self.client
    }

    fn run(&self, query: &str) -> Result<Molecule, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::InvalidQuery(
                "query must be a non-empty string".to_owned(),
            ));
        }

        let cid = resolve(&self.client, query).ok_or_else(|| {
            LookupError::NotFound {
                query: query.to_owned(),
            }
        })?;

        let (structure, properties) = fetch_compound(&self.client, cid);
        let structure =
            structure.ok_or(LookupError::StructureUnavailable { cid })?;
        let molecule = normalize(&structure, properties.as_ref(), Some(cid))?;
        log::info!(
            "loaded '{}' (CID {cid}, {} atoms, {} bonds)",
            molecule.name,
            molecule.atoms.len(),
            molecule.bonds.len()
        );
        Ok(molecule)
    }
}

impl PubChemService {
    /// Build the production service from configuration.
    #[must_use]
    pub fn from_options(options: &ServiceOptions) -> Self {
        let transport = UreqTransport::new(
            options.timeout_secs.map(Duration::from_secs),
        );
        let cached = CachedTransport::new(
            transport,
            Duration::from_secs(options.cache_ttl_secs),
        );
        Self::new(PubChemClient::with_base_url(
            cached,
            options.base_url.as_str(),
        ))
    }
}

impl<T: Transport> MoleculeLookup for MoleculeService<T> {
    fn lookup(&self, query: &str) -> Result<Molecule, LookupError> {
        let result = self.run(query);
        if let Err(e) = &result {
            log::warn!("lookup '{}' failed: {e}", query.trim());
        }
        result
    }
}
