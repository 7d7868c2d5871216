//! Typed PUG-REST endpoints on top of a [`Transport`].
//!
//! Every call here degrades to `None` on failure: a transport error, a
//! non-2xx status and an unparseable body all mean "no result from this
//! endpoint" and are logged rather than returned.

use std::fmt;

use serde::de::DeserializeOwned;

use super::record::{
    AutocompleteResponse, CompoundResponse, IdentifierListResponse,
    PropertyTableResponse, RawCompound, RawProperties,
};
use super::transport::Transport;

/// Public PubChem host.
pub const DEFAULT_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov";

/// Properties requested for the descriptive metadata.
const PROPERTY_LIST: &str = "MolecularFormula,MolecularWeight,IUPACName,Title";

/// PubChem compound identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cid(pub u64);

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which record flavour to request for a CID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// Computed 3D conformer.
    ThreeD,
    /// Default (2D depiction) record.
    TwoD,
}

/// PUG-REST client generic over its transport.
pub struct PubChemClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> PubChemClient<T> {
    /// Client for the public PubChem host.
    pub fn new(transport: T) -> Self {
        Self::with_base_url(transport, DEFAULT_BASE_URL)
    }

    /// Client for a mirror or test server; trailing slashes are ignored.
    pub fn with_base_url(transport: T, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            let _ = base_url.pop();
        }
        Self {
            transport,
            base_url,
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// URL of the exact-name → CID lookup.
    pub fn name_lookup_url(&self, name: &str) -> String {
        format!(
            "{}/rest/pug/compound/name/{}/cids/JSON",
            self.base_url,
            encode_component(name)
        )
    }

    /// URL of the single-suggestion autocomplete lookup.
    pub fn autocomplete_url(&self, query: &str) -> String {
        format!(
            "{}/rest/autocomplete/compound/{}/json?limit=1",
            self.base_url,
            encode_component(query)
        )
    }

    /// URL of the full compound record.
    pub fn record_url(&self, cid: Cid, record_type: RecordType) -> String {
        match record_type {
            RecordType::ThreeD => format!(
                "{}/rest/pug/compound/cid/{cid}/JSON?record_type=3d",
                self.base_url
            ),
            RecordType::TwoD => {
                format!("{}/rest/pug/compound/cid/{cid}/JSON", self.base_url)
            }
        }
    }

    /// URL of the descriptive property table.
    pub fn properties_url(&self, cid: Cid) -> String {
        format!(
            "{}/rest/pug/compound/cid/{cid}/property/{PROPERTY_LIST}/JSON",
            self.base_url
        )
    }

    /// First CID registered under `name`.
    pub fn cid_for_name(&self, name: &str) -> Option<Cid> {
        self.get_json::<IdentifierListResponse>(&self.name_lookup_url(name))?
            .first_cid()
            .map(Cid)
    }

    /// Best autocomplete suggestion for `query`.
    pub fn suggest_name(&self, query: &str) -> Option<String> {
        self.get_json::<AutocompleteResponse>(&self.autocomplete_url(query))?
            .first_compound()
            .map(str::to_owned)
    }

    /// The compound record of the requested flavour.
    pub fn compound(
        &self,
        cid: Cid,
        record_type: RecordType,
    ) -> Option<RawCompound> {
        self.get_json::<CompoundResponse>(&self.record_url(cid, record_type))?
            .into_first()
    }

    /// The descriptive property row for `cid`.
    pub fn properties(&self, cid: Cid) -> Option<RawProperties> {
        self.get_json::<PropertyTableResponse>(&self.properties_url(cid))?
            .into_first()
    }

    fn get_json<D: DeserializeOwned>(&self, url: &str) -> Option<D> {
        let response = match self.transport.get(url) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("PubChem request {url} failed: {e}");
                return None;
            }
        };
        if !response.is_success() {
            log::debug!("PubChem request {url} returned {}", response.status);
            return None;
        }
        match serde_json::from_str(&response.body) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("PubChem response from {url} is not valid: {e}");
                None
            }
        }
    }
}

/// Percent-encode a path segment the way `encodeURIComponent` does:
/// ASCII alphanumerics and `-_.!~*'()` pass through, every other byte of
/// the UTF-8 encoding becomes `%XX`.
#[must_use]
pub fn encode_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0F) as usize] as char);
            }
        }
    }
    out
}
