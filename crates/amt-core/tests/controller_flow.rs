//! Integration tests driving the feature controllers end to end through the
//! public API, with an in-memory session standing in for the WS-Management
//! transport.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use amt_core::features::{kvm, listener, power, redirection};
use amt_core::{
    AmtError, MethodInvocation, PropertySet, ResourceReference, ResponseDocument, Session,
};

/// Replays canned responses in order and records the wire traffic.
struct ReplaySession {
    responses: Mutex<VecDeque<ResponseDocument>>,
    log: Mutex<Vec<String>>,
}

impl ReplaySession {
    fn new(responses: Vec<ResponseDocument>) -> Self {
        ReplaySession {
            responses: Mutex::new(responses.into()),
            log: Mutex::new(Vec::new()),
        }
    }

    fn next(&self, entry: String) -> Result<ResponseDocument, AmtError> {
        self.log.lock().unwrap().push(entry);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AmtError::TransportUnavailable("no response".to_string()))
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Session for ReplaySession {
    async fn get(&self, resource: &ResourceReference) -> Result<ResponseDocument, AmtError> {
        self.next(format!("GET {}", resource.resource_uri()))
    }

    async fn put(
        &self,
        resource: &ResourceReference,
        _document: &PropertySet,
    ) -> Result<ResponseDocument, AmtError> {
        self.next(format!("PUT {}", resource.resource_uri()))
    }

    async fn invoke(&self, invocation: &MethodInvocation) -> Result<ResponseDocument, AmtError> {
        self.next(format!(
            "INVOKE {} {}",
            invocation.resource.resource_uri(),
            invocation.operation
        ))
    }

    async fn identify(&self) -> Result<ResponseDocument, AmtError> {
        self.next("IDENTIFY".to_string())
    }
}

fn doc(pairs: &[(&str, &str)]) -> ResponseDocument {
    let mut props = PropertySet::new();
    for (name, value) in pairs {
        props.push(*name, *value);
    }
    ResponseDocument::Success(props)
}

#[tokio::test]
async fn power_status_issues_a_single_get() {
    let session = ReplaySession::new(vec![doc(&[
        ("RequestedPowerState", "8"),
        ("PowerState", "2"),
        ("AvailableRequestedPowerStates", "2"),
        ("AvailableRequestedPowerStates", "8"),
    ])]);

    let status = power::power_status(&session).await.unwrap();
    assert_eq!(
        status.to_string(),
        "Power: on, Last Requested: soft-off, Available: on, soft-off"
    );
    assert_eq!(
        session.log(),
        ["GET http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_AssociatedPowerManagementService"]
    );
}

#[tokio::test]
async fn power_on_invokes_the_power_service() {
    let session = ReplaySession::new(vec![doc(&[("ReturnValue", "0")])]);

    let outcome = power::request_power_state(&session, "on").await.unwrap();
    assert!(outcome.succeeded());
    assert_eq!(
        outcome.to_string(),
        "Set powerstate to on: Completed with No Error"
    );
    assert_eq!(
        session.log(),
        ["INVOKE http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_PowerManagementService RequestPowerStateChange"]
    );
}

#[tokio::test]
async fn vendor_specific_return_code_is_labelled_with_code() {
    let session = ReplaySession::new(vec![doc(&[("ReturnValue", "50000")])]);

    let outcome = power::request_power_state(&session, "reset").await.unwrap();
    assert!(!outcome.succeeded());
    assert_eq!(
        outcome.to_string(),
        "Set powerstate to reset: Vendor Specific (50000)"
    );
}

#[tokio::test]
async fn serial_enable_is_get_then_invoke_on_the_redirection_service() {
    let session = ReplaySession::new(vec![
        doc(&[("EnabledState", "32768")]),
        doc(&[("ReturnValue", "0")]),
    ]);

    let outcome = redirection::set_redirection(&session, Some(true), None)
        .await
        .unwrap();
    assert!(outcome.changed());
    assert_eq!(outcome.to_string(), "SOL is enabled and IDER is disabled");
    assert_eq!(
        session.log(),
        [
            "GET http://intel.com/wbem/wscim/1/amt-schema/1/AMT_RedirectionService",
            "INVOKE http://intel.com/wbem/wscim/1/amt-schema/1/AMT_RedirectionService RequestStateChange",
        ]
    );
}

#[tokio::test]
async fn listener_toggle_is_one_get_one_put() {
    let session = ReplaySession::new(vec![
        doc(&[("ElementName", "svc"), ("ListenerEnabled", "true")]),
        doc(&[("ElementName", "svc"), ("ListenerEnabled", "false")]),
    ]);

    let outcome = listener::set_listener(&session, false).await.unwrap();
    assert_eq!(outcome.to_string(), "Listener changed to disabled");
    assert_eq!(
        session.log(),
        [
            "GET http://intel.com/wbem/wscim/1/amt-schema/1/AMT_RedirectionService",
            "PUT http://intel.com/wbem/wscim/1/amt-schema/1/AMT_RedirectionService",
        ]
    );
}

#[tokio::test]
async fn kvm_enable_then_start_full_flow() {
    let enable_session = ReplaySession::new(vec![
        doc(&[
            ("Is5900PortEnabled", "false"),
            ("OptInPolicy", "true"),
            ("SessionTimeout", "60"),
            ("RFBPassword", ""),
        ]),
        doc(&[]),
    ]);
    kvm::kvm_enable(&enable_session, "Passw0rd!").await.unwrap();
    assert_eq!(
        enable_session.log(),
        [
            "GET http://intel.com/wbem/wscim/1/ips-schema/1/IPS_KVMRedirectionSettingData",
            "PUT http://intel.com/wbem/wscim/1/ips-schema/1/IPS_KVMRedirectionSettingData",
        ]
    );

    let start_session = ReplaySession::new(vec![doc(&[("ReturnValue", "0")])]);
    let outcome = kvm::kvm_start(&start_session).await.unwrap();
    assert_eq!(outcome.to_string(), "KVM redirection started");
    assert_eq!(
        start_session.log(),
        ["INVOKE http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_KVMRedirectionSAP RequestStateChange"]
    );
}

#[tokio::test]
async fn kvm_start_timeout_message() {
    let session = ReplaySession::new(vec![doc(&[("ReturnValue", "3")])]);

    let outcome = kvm::kvm_start(&session).await.unwrap();
    assert!(!outcome.succeeded());
    assert_eq!(
        outcome.to_string(),
        "KVM redirection could not be enabled before timeout"
    );
}

#[tokio::test]
async fn transport_loss_is_fatal_and_not_retried() {
    // Empty script: the first call already finds no response.
    let session = ReplaySession::new(vec![]);

    let err = power::power_status(&session).await.unwrap_err();
    assert_eq!(err, AmtError::TransportUnavailable("no response".to_string()));
    assert_eq!(session.log().len(), 1);
}

#[tokio::test]
async fn fault_documents_short_circuit_with_verbatim_reason() {
    let session = ReplaySession::new(vec![ResponseDocument::Fault {
        reason: "The sender was not authorized to access the resource.".to_string(),
    }]);

    let err = redirection::redirection_status(&session).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "AMT_RedirectionService failed: The sender was not authorized to access the resource."
    );
}

#[tokio::test]
async fn serial_enable_noop_keeps_the_wire_quiet_after_the_read() {
    let session = ReplaySession::new(vec![doc(&[("EnabledState", "32770")])]);

    let outcome = redirection::set_redirection(&session, Some(true), None)
        .await
        .unwrap();
    assert!(!outcome.changed());
    assert_eq!(session.log().len(), 1);
}
