use serde::{Deserialize, Serialize};

use crate::pubchem::{DEFAULT_BASE_URL, DEFAULT_TTL};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Upstream access and the local HTTP endpoint.
pub struct ServiceOptions {
    /// PubChem host, without a trailing `/rest`.
    pub base_url: String,
    /// Lifetime of cached upstream responses, in seconds.
    pub cache_ttl_secs: u64,
    /// Whole-request timeout for upstream calls; `None` uses the HTTP
    /// client's defaults.
    pub timeout_secs: Option<u64>,
    /// Address `molstudio serve` listens on.
    pub bind: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            cache_ttl_secs: DEFAULT_TTL.as_secs(),
            timeout_secs: Some(30),
            bind: "127.0.0.1:3000".to_owned(),
        }
    }
}
