//! KVM redirection controller.
//!
//! Settings live on `IPS_KVMRedirectionSettingData`; the redirection session
//! itself is started through the `CIM_KVMRedirectionSAP` service access
//! point. Enabling rewrites the settings document (port 5900 on, opt-in
//! policy off, no session timeout) and installs the RFB access password;
//! disabling terminates any active session.

use std::fmt;

use tracing::debug;

use crate::error::AmtError;
use crate::request::InvocationBuilder;
use crate::resource::ResourceReference;
use crate::session::Session;

const KVM_SETTINGS_CLASS: &str = "IPS_KVMRedirectionSettingData";
const KVM_SAP_CLASS: &str = "CIM_KVMRedirectionSAP";

/// `RequestedState` code that starts the redirection session.
const KVM_SAP_STATE_ENABLED: &str = "2";

/// KVM redirection settings, reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvmStatus {
    pub port_5900_enabled: String,
    pub opt_in_policy: String,
    pub session_timeout: String,
}

impl fmt::Display for KvmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Port 5900 Enabled: {}, Opt-In Policy: {}, session timeout {}",
            self.port_5900_enabled, self.opt_in_policy, self.session_timeout
        )
    }
}

/// Result of the session-start invocation, with KVM-specific messages for
/// the codes the firmware actually returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvmStartOutcome {
    pub return_code: i32,
}

impl KvmStartOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self.return_code, 0 | 4096)
    }
}

impl fmt::Display for KvmStartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.return_code {
            0 => write!(f, "KVM redirection started"),
            3 => write!(f, "KVM redirection could not be enabled before timeout"),
            5 => write!(
                f,
                "KVM redirection could not be enabled, invalid requested state"
            ),
            4096 => write!(f, "KVM redirection successfully initiated"),
            code => write!(f, "KVM redirection could not be started, error code {code}"),
        }
    }
}

/// Reads the KVM redirection settings.
pub async fn kvm_status(session: &dyn Session) -> Result<KvmStatus, AmtError> {
    let resource = ResourceReference::ips(KVM_SETTINGS_CLASS);
    let props = session
        .get(&resource)
        .await?
        .into_properties(KVM_SETTINGS_CLASS)?;

    Ok(KvmStatus {
        port_5900_enabled: props.require("Is5900PortEnabled")?.to_string(),
        opt_in_policy: props.require("OptInPolicy")?.to_string(),
        session_timeout: props.require("SessionTimeout")?.to_string(),
    })
}

/// Terminates any active KVM redirection session.
pub async fn kvm_disable(session: &dyn Session) -> Result<(), AmtError> {
    let invocation = InvocationBuilder::new(
        ResourceReference::ips(KVM_SETTINGS_CLASS),
        "TerminateSession",
    )
    .build();

    session
        .invoke(&invocation)
        .await?
        .into_properties("TerminateSession")?;
    Ok(())
}

/// Enables KVM redirection.
///
/// Each setting is only touched when it differs from the desired value; the
/// RFB access password is always set to `rfb_password`. The whole modified
/// document is written back in one PUT.
pub async fn kvm_enable(session: &dyn Session, rfb_password: &str) -> Result<(), AmtError> {
    let resource = ResourceReference::ips(KVM_SETTINGS_CLASS);
    let mut props = session
        .get(&resource)
        .await?
        .into_properties(KVM_SETTINGS_CLASS)?;

    if props.require("Is5900PortEnabled")? != "true" {
        props.set("Is5900PortEnabled", "true");
    }
    if props.require("OptInPolicy")? != "false" {
        props.set("OptInPolicy", "false");
    }
    if props.get_int("SessionTimeout")? != 0 {
        props.set("SessionTimeout", "0");
    }
    props.set("RFBPassword", rfb_password);

    debug!("writing KVM redirection settings");
    session
        .put(&resource, &props)
        .await?
        .into_properties(KVM_SETTINGS_CLASS)?;
    Ok(())
}

/// Starts the KVM redirection session through the service access point.
pub async fn kvm_start(session: &dyn Session) -> Result<KvmStartOutcome, AmtError> {
    let invocation = InvocationBuilder::new(
        ResourceReference::cim(KVM_SAP_CLASS),
        "RequestStateChange",
    )
    .text("RequestedState", KVM_SAP_STATE_ENABLED)
    .build();

    let props = session
        .invoke(&invocation)
        .await?
        .into_properties(KVM_SAP_CLASS)?;

    Ok(KvmStartOutcome {
        return_code: props.get_int("ReturnValue")?,
    })
}
