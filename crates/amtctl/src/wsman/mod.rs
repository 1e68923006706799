//! WS-Management SOAP/HTTP transport.
//!
//! Implements the `amt_core::Session` collaborator: SOAP envelope
//! construction (`envelope`), response parsing (`parse`), and the HTTP
//! client (`client`). The core never sees any of this; it hands over
//! resource references and invocations and receives response documents.

pub mod client;
pub mod envelope;
pub mod parse;

pub use client::WsmanClient;

// ── Protocol namespaces and actions ───────────────────────────────────────────

pub const NS_SOAP: &str = "http://www.w3.org/2003/05/soap-envelope";
pub const NS_WSA: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing";
pub const NS_WSMAN: &str = "http://schemas.dmtf.org/wbem/wsman/1/wsman.xsd";
pub const NS_WSMAN_ID: &str = "http://schemas.dmtf.org/wbem/wsman/identity/1/wsmanidentity.xsd";

pub const ACTION_GET: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Get";
pub const ACTION_PUT: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Put";

/// WS-Addressing anonymous role, used for ReplyTo and embedded endpoint
/// references.
pub const WSA_ANONYMOUS: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous";

// ── Connection options ────────────────────────────────────────────────────────

/// Everything needed to reach one management controller.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub tls: bool,
    pub accept_invalid_certs: bool,
}

impl ConnectionOptions {
    /// The WS-Management endpoint URL, `http(s)://host:port/wsman`.
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{}://{}:{}/wsman", scheme, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_respects_tls() {
        let mut opts = ConnectionOptions {
            host: "10.0.0.5".to_string(),
            port: 16992,
            username: "admin".to_string(),
            password: "pw".to_string(),
            tls: false,
            accept_invalid_certs: false,
        };
        assert_eq!(opts.endpoint_url(), "http://10.0.0.5:16992/wsman");

        opts.tls = true;
        opts.port = 16993;
        assert_eq!(opts.endpoint_url(), "https://10.0.0.5:16993/wsman");
    }
}
