//! HTTP transport implementing `amt_core::Session`.

use amt_core::request::MethodInvocation;
use amt_core::{AmtError, PropertySet, ResourceReference, ResponseDocument, Session};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, trace};

use super::{envelope, parse, ConnectionOptions};

const SOAP_CONTENT_TYPE: &str = "application/soap+xml;charset=UTF-8";

/// A WS-Management session over HTTP(S) with digest-capable basic auth.
///
/// Each operation is one POST to the controller's `/wsman` endpoint.
/// Faults ride back with HTTP 500, so the body is parsed regardless of
/// the status code; only connection-level failures surface as
/// [`AmtError::TransportUnavailable`].
pub struct WsmanClient {
    options: ConnectionOptions,
    endpoint: String,
    http: reqwest::Client,
}

impl WsmanClient {
    pub fn new(options: ConnectionOptions) -> Result<Self, AmtError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(|e| AmtError::TransportUnavailable(format!("http client setup: {e}")))?;
        let endpoint = options.endpoint_url();
        Ok(WsmanClient {
            options,
            endpoint,
            http,
        })
    }

    async fn post(&self, body: String) -> Result<ResponseDocument, AmtError> {
        trace!(envelope = %body, "sending request");
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .basic_auth(&self.options.username, Some(&self.options.password))
            .body(body)
            .send()
            .await
            .map_err(|e| AmtError::TransportUnavailable(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AmtError::TransportUnavailable(e.to_string()))?;
        debug!(%status, bytes = text.len(), "received response");
        trace!(envelope = %text, "response body");

        if text.is_empty() {
            return Err(AmtError::TransportUnavailable(format!(
                "empty response (HTTP {status})"
            )));
        }
        parse::parse_response(&text)
    }
}

fn envelope_error(e: quick_xml::Error) -> AmtError {
    AmtError::TransportUnavailable(format!("failed to build request envelope: {e}"))
}

#[async_trait]
impl Session for WsmanClient {
    async fn get(&self, resource: &ResourceReference) -> Result<ResponseDocument, AmtError> {
        debug!(uri = %resource.resource_uri(), "wsman get");
        let body = envelope::get_envelope(&self.endpoint, resource).map_err(envelope_error)?;
        self.post(body).await
    }

    async fn put(
        &self,
        resource: &ResourceReference,
        document: &PropertySet,
    ) -> Result<ResponseDocument, AmtError> {
        debug!(uri = %resource.resource_uri(), "wsman put");
        let body =
            envelope::put_envelope(&self.endpoint, resource, document).map_err(envelope_error)?;
        self.post(body).await
    }

    async fn invoke(&self, invocation: &MethodInvocation) -> Result<ResponseDocument, AmtError> {
        debug!(
            uri = %invocation.resource.resource_uri(),
            operation = %invocation.operation,
            "wsman invoke"
        );
        let body = envelope::invoke_envelope(&self.endpoint, invocation).map_err(envelope_error)?;
        self.post(body).await
    }

    async fn identify(&self) -> Result<ResponseDocument, AmtError> {
        debug!("wsman identify");
        let body = envelope::identify_envelope().map_err(envelope_error)?;
        self.post(body).await
    }
}
