// src/core/client.rs

use crate::core::error::{Result, ScanError};
use crate::core::models::{join_messages, ApiEnvelope, ScanResult};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// Path of the scan endpoint, relative to the API base URL.
pub const SCAN_ENDPOINT: &str = "api/v1/cfssl/scan";

/// Resolves the scan endpoint against the configured API base.
pub fn scan_endpoint(api_base: &Url) -> std::result::Result<Url, url::ParseError> {
    let mut base = api_base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SCAN_ENDPOINT)
}

/// Thin wrapper around the CFSSL scan endpoint.
#[derive(Debug, Clone)]
pub struct ScanClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ScanClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cfssl-scan-viewer/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, endpoint })
    }

    /// Asks the API to scan `domain` and maps the answer into a `ScanResult`.
    ///
    /// An empty domain is rejected without touching the network.
    pub async fn scan(&self, domain: &str) -> Result<ScanResult> {
        let domain = domain.trim();
        if domain.is_empty() {
            warn!("Refusing to scan an empty host.");
            return Err(ScanError::EmptyDomain);
        }

        info!(domain, endpoint = %self.endpoint, "Requesting scan.");
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("host", domain)])
            .send()
            .await
            .map_err(|e| {
                error!(domain, error = %e, "Scan request failed.");
                e
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(domain, status = %status, bytes = body.len(), "Received scan response.");

        let result = unwrap_envelope(status, &body)?;
        let scan = ScanResult::from_api(domain, result).map_err(|e| {
            error!(domain, error = %e, "Scan result did not match the expected shape.");
            ScanError::from(e)
        })?;
        info!(domain, "Scan completed.");
        Ok(scan)
    }
}

/// Unwraps the `{success, result, messages, errors}` envelope.
pub fn unwrap_envelope(status: StatusCode, body: &[u8]) -> Result<Value> {
    if !status.is_success() {
        let errors = match serde_json::from_slice::<ApiEnvelope>(body) {
            Ok(envelope) => describe_errors(&envelope),
            Err(_) => String::from_utf8_lossy(body).trim().to_string(),
        };
        let errors = if errors.is_empty() {
            status.canonical_reason().unwrap_or("no details").to_string()
        } else {
            errors
        };
        warn!(status = status.as_u16(), errors = %errors, "API returned an error status.");
        return Err(ScanError::Api { status: status.as_u16(), errors });
    }

    let envelope: ApiEnvelope = serde_json::from_slice(body)?;
    if !envelope.success {
        let messages = join_messages(&envelope.messages);
        warn!(messages = %messages, "API reported an unsuccessful scan.");
        return Err(ScanError::Rejected(messages));
    }

    envelope
        .result
        .ok_or_else(|| ScanError::Decode("response has no result".to_string()))
}

fn describe_errors(envelope: &ApiEnvelope) -> String {
    match &envelope.errors {
        Some(Value::Array(errors)) => join_messages(errors),
        Some(Value::Null) | None => join_messages(&envelope.messages),
        Some(other) => join_messages(std::slice::from_ref(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn client_for(base: &Url) -> ScanClient {
        ScanClient::new(scan_endpoint(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    fn scan_result() -> Value {
        json!({
            "Connectivity": { "DNSLookup": { "grade": "Good", "output": ["104.16.0.1"] } },
            "PKI": { "ChainExpiration": { "grade": "Good", "output": "2030-01-02T03:04:05Z" } },
            "TLSHandshake": { "CipherSuite": { "grade": "Warning" } },
            "TLSSession": { "SessionResume": { "grade": "Good", "output": { "104.16.0.1": true } } }
        })
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("https://api.example.com/cfssl").unwrap();
        assert_eq!(
            scan_endpoint(&base).unwrap().as_str(),
            "https://api.example.com/cfssl/api/v1/cfssl/scan"
        );
        let base = Url::parse("http://127.0.0.1:8888").unwrap();
        assert_eq!(
            scan_endpoint(&base).unwrap().as_str(),
            "http://127.0.0.1:8888/api/v1/cfssl/scan"
        );
    }

    #[test]
    fn unsuccessful_envelope_joins_messages() {
        let body = json!({
            "success": false,
            "result": null,
            "messages": ["host unreachable", "dns timeout"],
            "errors": []
        });
        let err = unwrap_envelope(StatusCode::OK, body.to_string().as_bytes()).unwrap_err();
        match err {
            ScanError::Rejected(messages) => assert_eq!(messages, "host unreachable, dns timeout"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_status_carries_errors_field() {
        let body = json!({
            "success": false,
            "errors": [{ "code": 400, "message": "missing parameter 'host'" }],
            "messages": []
        });
        let err = unwrap_envelope(StatusCode::BAD_REQUEST, body.to_string().as_bytes()).unwrap_err();
        match err {
            ScanError::Api { status, errors } => {
                assert_eq!(status, 400);
                assert_eq!(errors, "missing parameter 'host'");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = unwrap_envelope(StatusCode::BAD_GATEWAY, b"").unwrap_err();
        assert!(matches!(err, ScanError::Api { status: 502, ref errors } if errors == "Bad Gateway"));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = unwrap_envelope(StatusCode::OK, b"<html>").unwrap_err();
        assert!(matches!(err, ScanError::Decode(_)));

        let err = unwrap_envelope(StatusCode::OK, br#"{"success": true}"#).unwrap_err();
        assert!(matches!(err, ScanError::Decode(_)));
    }

    #[tokio::test]
    async fn empty_domain_is_rejected_without_a_request() {
        // Nothing listens here; a request would surface as a transport error.
        let client = client_for(&Url::parse("http://127.0.0.1:9/").unwrap());
        assert!(matches!(client.scan("").await, Err(ScanError::EmptyDomain)));
        assert!(matches!(client.scan("   ").await, Err(ScanError::EmptyDomain)));
    }

    #[tokio::test]
    async fn scan_sends_host_and_maps_result() {
        let router = Router::new().route(
            "/api/v1/cfssl/scan",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let mut result = scan_result();
                result["Connectivity"]["TCPDial"] = json!({ "grade": "Good", "output": params["host"] });
                Json(json!({ "success": true, "result": result, "messages": [], "errors": [] }))
            }),
        );
        let base = serve(router).await;

        let scan = client_for(&base).scan("cfssl.org").await.unwrap();
        assert_eq!(scan.domain, "cfssl.org");
        assert_eq!(scan.tcp_dial.output, Some(json!("cfssl.org")));
        assert_eq!(scan.dns_lookup.output, Some(vec!["104.16.0.1".to_string()]));
        assert!(!scan.intermediate_cas.is_graded());
    }

    #[tokio::test]
    async fn scan_surfaces_api_errors() {
        let router = Router::new().route(
            "/api/v1/cfssl/scan",
            get(|| async {
                (
                    AxumStatus::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "errors": [{ "code": 500, "message": "scanner crashed" }],
                        "messages": []
                    })),
                )
            }),
        );
        let base = serve(router).await;

        let err = client_for(&base).scan("cfssl.org").await.unwrap_err();
        assert_eq!(err.to_string(), "API error (500): scanner crashed");
    }

    #[tokio::test]
    async fn unreachable_api_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let err = client_for(&base).scan("cfssl.org").await.unwrap_err();
        assert!(matches!(err, ScanError::Transport(_)));
    }
}
