//! HTTP lookup service.
//!
//! Endpoints:
//! - `POST /molecule` with `{"query": "<name>"}`: the normalized molecule,
//!   or `{"error": "..."}` with status 400, 404 or 500.
//! - `GET /molecule`: static service descriptor, never calls upstream.
//!
//! The lookup pipeline is blocking, so each request runs it on the tokio
//! blocking pool. Nothing a request does can take the server down: a
//! panicking lookup becomes a 500.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::MolstudioError;
use crate::pubchem::{LookupError, MoleculeLookup};

/// Shared handler state.
#[derive(Clone)]
struct AppState {
    lookup: Arc<dyn MoleculeLookup>,
}

/// Router exposing `/molecule` over `lookup`.
pub fn router(lookup: Arc<dyn MoleculeLookup>) -> Router {
    Router::new()
        .route("/molecule", get(describe).post(find_molecule))
        .with_state(AppState { lookup })
}

/// Bind `addr` and serve until the process exits.
///
/// # Errors
///
/// [`MolstudioError::Server`] if the address cannot be bound or the accept
/// loop fails.
pub async fn serve(
    addr: SocketAddr,
    lookup: Arc<dyn MoleculeLookup>,
) -> Result<(), MolstudioError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| MolstudioError::Server(format!("bind {addr}: {e}")))?;
    log::info!("lookup service listening on http://{addr}/molecule");
    axum::serve(listener, router(lookup))
        .await
        .map_err(|e| MolstudioError::Server(e.to_string()))
}

/// Failure reported to the client as `{"error": message}`.
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        let message = e.to_string();
        match e {
            LookupError::InvalidQuery(_) => Self::BadRequest(message),
            LookupError::NotFound { .. } => Self::NotFound(message),
            LookupError::StructureUnavailable { .. }
            | LookupError::NoCoordinates
            | LookupError::Internal(_) => Self::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(msg) => {
                log::error!("lookup failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Pull a string `query` out of a raw request body.
fn parse_query(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| {
        ApiError::BadRequest("request body must be JSON".to_owned())
    })?;
    value
        .get("query")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            ApiError::BadRequest(
                "query must be a non-empty string".to_owned(),
            )
        })
}

/// Handler for `POST /molecule`.
async fn find_molecule(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let query = parse_query(&body)?;
    log::info!("POST /molecule query='{query}'");

    let lookup = Arc::clone(&state.lookup);
    let molecule =
        tokio::task::spawn_blocking(move || lookup.lookup(&query))
            .await
            .map_err(|e| {
                ApiError::Internal(format!("lookup task failed: {e}"))
            })??;

    Ok((StatusCode::OK, Json(molecule)).into_response())
}

/// Handler for `GET /molecule`.
async fn describe() -> Json<Value> {
    log::info!("GET /molecule");
    Json(json!({
        "status": "ok",
        "service": "molstudio lookup API",
        "dataSource": "PubChem (NIH/NCBI)",
        "apiKey": "not required",
        "endpoints": {
            "POST": "look up a molecule by name",
        },
        "example": {
            "method": "POST",
            "body": { "query": "caffeine" },
        },
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::chem::{Atom, Molecule, MoleculeMetadata};
    use crate::pubchem::Cid;

    /// Answers "water", reports "missing" as not found, panics on "boom"
    /// and fails structure fetches for anything else.
    #[derive(Default)]
    struct FakeLookup {
        calls: AtomicUsize,
    }

    impl MoleculeLookup for FakeLookup {
        fn lookup(&self, query: &str) -> Result<Molecule, LookupError> {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            match query.trim() {
                "" => Err(LookupError::InvalidQuery(
                    "query must be a non-empty string".to_owned(),
                )),
                "water" => Ok(Molecule {
                    name: "Water".to_owned(),
                    formula: "H2O".to_owned(),
                    atoms: vec![Atom {
                        id: 0,
                        element: "O".to_owned(),
                        x: 0.0,
                        y: 0.0,
                        z: 0.0,
                    }],
                    bonds: Vec::new(),
                    metadata: MoleculeMetadata::default(),
                }),
                "missing" => Err(LookupError::NotFound {
                    query: "missing".to_owned(),
                }),
                "boom" => panic!("upstream exploded"),
                _ => Err(LookupError::StructureUnavailable { cid: Cid(1) }),
            }
        }
    }

    fn state() -> (Arc<FakeLookup>, State<AppState>) {
        let fake = Arc::new(FakeLookup::default());
        let lookup: Arc<dyn MoleculeLookup> = fake.clone();
        (fake, State(AppState { lookup }))
    }

    async fn post(body: &str) -> (StatusCode, Value) {
        let (_, state) = state();
        let response = find_molecule(state, Bytes::from(body.to_owned()))
            .await
            .into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn found_molecule_is_200() {
        let (status, body) = post(r#"{"query":"water"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Water");
        assert_eq!(body["atoms"][0]["element"], "O");
    }

    #[tokio::test]
    async fn malformed_bodies_are_400() {
        for body in ["not json", "{}", r#"{"query":42}"#, r#"{"query":"  "}"#]
        {
            let (status, json) = post(body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
            assert!(json["error"].is_string());
        }
    }

    #[tokio::test]
    async fn non_json_body_never_reaches_lookup() {
        let (fake, state) = state();
        let response = find_molecule(state, Bytes::from_static(b"{"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_molecule_is_404() {
        let (status, body) = post(r#"{"query":"missing"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "molecule 'missing' not found");
    }

    #[tokio::test]
    async fn upstream_failures_are_500() {
        let (status, body) = post(r#"{"query":"aspirin"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "failed to fetch molecule structure");

        let (status, _) = post(r#"{"query":"boom"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn descriptor_is_static() {
        let Json(body) = describe().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["example"]["body"]["query"], "caffeine");
    }
}
