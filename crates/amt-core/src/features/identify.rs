//! WS-Management Identify: firmware vendor and version.

use std::fmt;

use crate::error::AmtError;
use crate::session::Session;

/// Product identity reported by the management controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub vendor: String,
    pub version: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vendor, self.version)
    }
}

/// Queries the endpoint's product vendor and version.
pub async fn identify(session: &dyn Session) -> Result<Identity, AmtError> {
    let props = session.identify().await?.into_properties("Identify")?;

    Ok(Identity {
        vendor: props.require("ProductVendor")?.to_string(),
        version: props.require("ProductVersion")?.to_string(),
    })
}
