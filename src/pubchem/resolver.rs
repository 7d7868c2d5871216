//! Free-text query → canonical compound identifier.

use super::client::{Cid, PubChemClient};
use super::transport::Transport;

/// Resolve `query` to a single CID.
///
/// Tries an exact-name lookup first. When that yields nothing, asks the
/// autocomplete dictionary for one corrected name and retries the exact
/// lookup with it. Failures at either stage fall through to the next; the
/// function never errors, it only reports absence.
pub fn resolve<T: Transport>(
    client: &PubChemClient<T>,
    query: &str,
) -> Option<Cid> {
    if let Some(cid) = client.cid_for_name(query) {
        log::debug!("resolved '{query}' to CID {cid}");
        return Some(cid);
    }

    let suggestion = client.suggest_name(query)?;
    log::info!("'{query}' not found by name, trying suggestion '{suggestion}'");
    let cid = client.cid_for_name(&suggestion)?;
    log::debug!("resolved '{suggestion}' to CID {cid}");
    Some(cid)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::pubchem::transport::{HttpResponse, TransportError};

    /// Answers by URL substring and records every request.
    struct Routes {
        routes: Vec<(&'static str, Result<HttpResponse, TransportError>)>,
        log: Mutex<Vec<String>>,
    }

    impl Routes {
        fn new(
            routes: Vec<(&'static str, Result<HttpResponse, TransportError>)>,
        ) -> Self {
            Self {
                routes,
                log: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    impl Transport for Routes {
        fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
            self.log.lock().unwrap().push(url.to_owned());
            self.routes
                .iter()
                .find(|(needle, _)| url.contains(needle))
                .map_or_else(
                    || {
                        Ok(HttpResponse {
                            status: 404,
                            body: String::new(),
                        })
                    },
                    |(_, r)| r.clone(),
                )
        }
    }

    fn cids(list: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::ok(format!(
            r#"{{"IdentifierList":{{"CID":[{list}]}}}}"#
        )))
    }

    #[test]
    fn exact_name_wins_without_autocomplete() {
        let client =
            PubChemClient::new(Routes::new(vec![("name/caffeine/", cids("2519"))]));
        assert_eq!(resolve(&client, "caffeine"), Some(Cid(2519)));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[test]
    fn falls_back_to_autocomplete_suggestion() {
        let client = PubChemClient::new(Routes::new(vec![
            (
                "autocomplete/compound/cafeine/",
                Ok(HttpResponse::ok(
                    r#"{"dictionary_terms":{"compound":["caffeine"]}}"#,
                )),
            ),
            ("name/caffeine/", cids("2519")),
        ]));
        assert_eq!(resolve(&client, "cafeine"), Some(Cid(2519)));
        let requests = client.transport().requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[0].contains("name/cafeine/"));
        assert!(requests[1].contains("autocomplete"));
        assert!(requests[2].contains("name/caffeine/"));
    }

    #[test]
    fn empty_identifier_list_counts_as_miss() {
        let client = PubChemClient::new(Routes::new(vec![(
            "name/nothing/",
            cids(""),
        )]));
        assert_eq!(resolve(&client, "nothing"), None);
        assert_eq!(client.transport().requests().len(), 2);
    }

    #[test]
    fn transport_errors_are_swallowed() {
        let client = PubChemClient::new(Routes::new(vec![
            (
                "name/",
                Err(TransportError::Request("connection reset".to_owned())),
            ),
            (
                "autocomplete/",
                Err(TransportError::Request("connection reset".to_owned())),
            ),
        ]));
        assert_eq!(resolve(&client, "water"), None);
    }
}
