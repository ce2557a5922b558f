//! Production `ApplianceTransport` over HTTPS.
//!
//! One POST per host to the appliance management endpoint, basic auth from
//! the handle's credential, bounded by the handle's timeout. Everything
//! beyond this thin request/response mapping is the appliance's concern.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use crate::application::ports::{ApplianceTransport, RawResponse};
use crate::domain::action::ActionRequest;
use crate::domain::error::TransportError;
use crate::domain::target::ApplianceHandle;

/// HTTPS transport. Stateless — the client is built per call because timeout
/// and certificate policy are per-handle.
pub struct HttpTransport;

impl HttpTransport {
    fn client(handle: &ApplianceHandle) -> Result<reqwest::Client, TransportError> {
        reqwest::Client::builder()
            .timeout(handle.timeout)
            // rustls cannot relax hostname verification alone; lab appliances
            // with self-signed certificates need the full escape hatch.
            .danger_accept_invalid_certs(!handle.verify_hostname)
            .build()
            .map_err(|e| TransportError::Connect(format!("building client: {e}")))
    }
}

#[async_trait::async_trait]
impl ApplianceTransport for HttpTransport {
    async fn perform(
        &self,
        handle: &ApplianceHandle,
        request: &ActionRequest,
    ) -> Result<RawResponse, TransportError> {
        let client = Self::client(handle)?;
        let url = format!(
            "https://{}/mgmt/actions/{}",
            handle.address,
            request.action_name()
        );

        let mut body = serde_json::json!({ "parameters": request.parameters() });
        if let Some(bytes) = request.attachment() {
            body["attachment"] = serde_json::Value::String(BASE64.encode(bytes));
        }

        let response = client
            .post(&url)
            .basic_auth(&handle.credential.user, Some(&handle.credential.secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(handle.timeout)
                } else {
                    TransportError::Connect(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TransportError::Connect(format!(
                "authentication rejected (HTTP {status})"
            )));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));

        let bytes = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(handle.timeout)
                } else {
                    TransportError::Connect(format!("reading response: {e}"))
                }
            })?
            .to_vec();

        if !status.is_success() {
            return Err(TransportError::Malformed {
                message: format!("HTTP {status}"),
                body: bytes,
            });
        }

        if is_json {
            let document: serde_json::Value =
                serde_json::from_slice(&bytes).map_err(|e| TransportError::Malformed {
                    message: format!("invalid JSON body: {e}"),
                    body: bytes.clone(),
                })?;
            let ack = document.get("ok").and_then(serde_json::Value::as_bool);
            return Ok(RawResponse {
                ack,
                payload: None,
                document: Some(document),
            });
        }

        // Non-JSON bodies are opaque payloads: import reports (XML), export
        // packages (ZIP). Kept verbatim for the artifact writer.
        Ok(RawResponse {
            ack: None,
            payload: Some(bytes),
            document: None,
        })
    }
}
