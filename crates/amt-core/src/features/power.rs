//! Power controller: status queries and power state transitions.
//!
//! Status reads `CIM_AssociatedPowerManagementService`; transitions invoke
//! `RequestPowerStateChange` on `CIM_PowerManagementService` with the managed
//! system as the nested `ManagedElement` target. Nothing is cached: every
//! status query hits the remote resource.

use std::fmt;

use tracing::debug;

use crate::codes::{
    encode_power_action, return_value::RETURN_SUCCESS, AVAILABLE_POWER_STATE, POWER_STATE,
    REQUESTED_POWER_STATE, RETURN_VALUE,
};
use crate::error::AmtError;
use crate::request::{EndpointReference, InvocationBuilder};
use crate::resource::{managed_system_reference, ResourceReference};
use crate::session::Session;

const POWER_STATUS_CLASS: &str = "CIM_AssociatedPowerManagementService";
const POWER_SERVICE_CLASS: &str = "CIM_PowerManagementService";

/// Sentinel the service reports when no power state was ever requested.
const NO_REQUESTED_STATE: &str = "None";

/// Decoded power status of the managed system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerStatus {
    pub power_state: String,
    pub requested_state: String,
    pub available_states: Vec<String>,
}

impl fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Power: {}, Last Requested: {}, Available: {}",
            self.power_state,
            self.requested_state,
            self.available_states.join(", ")
        )
    }
}

/// Result of a power state change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerChangeOutcome {
    pub action: String,
    pub return_code: i32,
    pub status: String,
}

impl PowerChangeOutcome {
    pub fn succeeded(&self) -> bool {
        self.return_code == RETURN_SUCCESS
    }
}

impl fmt::Display for PowerChangeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Set powerstate to {}: {}", self.action, self.status)
    }
}

/// Reads the current, last-requested, and available power states.
pub async fn power_status(session: &dyn Session) -> Result<PowerStatus, AmtError> {
    let resource = ResourceReference::cim(POWER_STATUS_CLASS);
    let props = session
        .get(&resource)
        .await?
        .into_properties(POWER_STATUS_CLASS)?;

    // "None" is a literal sentinel, not an index into the table.
    let requested_raw = props.require("RequestedPowerState")?;
    let requested_state = if requested_raw == NO_REQUESTED_STATE {
        NO_REQUESTED_STATE.to_string()
    } else {
        REQUESTED_POWER_STATE.decode(props.get_int("RequestedPowerState")?)
    };

    let power_state = POWER_STATE.decode(props.get_int("PowerState")?);

    let available_raw = props.get_all("AvailableRequestedPowerStates");
    if available_raw.is_empty() {
        return Err(AmtError::MissingProperty(
            "AvailableRequestedPowerStates".to_string(),
        ));
    }
    let mut available_states = Vec::with_capacity(available_raw.len());
    for raw in available_raw {
        let code = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| AmtError::MalformedProperty {
                name: "AvailableRequestedPowerStates".to_string(),
                value: raw.to_string(),
            })?;
        available_states.push(AVAILABLE_POWER_STATE.decode(code));
    }

    Ok(PowerStatus {
        power_state,
        requested_state,
        available_states,
    })
}

/// Requests a power state transition named by `action` (e.g. `"on"`,
/// `"graceful-reset"`).
///
/// The action word is encoded before any network call; an unknown word is
/// rejected with [`AmtError::UnknownAction`] without touching the wire.
pub async fn request_power_state(
    session: &dyn Session,
    action: &str,
) -> Result<PowerChangeOutcome, AmtError> {
    let code = encode_power_action(action)?;
    debug!(action, code, "requesting power state change");

    let invocation = InvocationBuilder::new(
        ResourceReference::cim(POWER_SERVICE_CLASS),
        "RequestPowerStateChange",
    )
    .text("PowerState", code.to_string())
    .reference(
        "ManagedElement",
        EndpointReference::from(&managed_system_reference()),
    )
    .build();

    let props = session
        .invoke(&invocation)
        .await?
        .into_properties(POWER_SERVICE_CLASS)?;

    let return_code = props.get_int("ReturnValue")?;
    Ok(PowerChangeOutcome {
        action: action.to_string(),
        return_code,
        status: RETURN_VALUE.decode(return_code),
    })
}
