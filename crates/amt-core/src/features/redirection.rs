//! Serial-over-LAN / IDE-redirection controller.
//!
//! The AMT redirection service packs both channels into one `EnabledState`
//! code in 32768..=32771: bit 0 is IDER, bit 1 is SOL. Setting one channel
//! preserves the other's current bit unless the caller overrides it. A
//! reported state outside the packed range aborts the call before any write.

use std::fmt;

use tracing::debug;

use crate::codes::{return_value::RETURN_SUCCESS, ENABLED_STATE, RETURN_VALUE};
use crate::error::AmtError;
use crate::request::InvocationBuilder;
use crate::resource::ResourceReference;
use crate::session::Session;

pub(crate) const REDIRECTION_CLASS: &str = "AMT_RedirectionService";

/// Lowest packed redirection code: both channels disabled.
pub const REDIRECTION_STATE_BASE: i32 = 32768;
/// Highest packed redirection code: both channels enabled.
pub const REDIRECTION_STATE_MAX: i32 = 32771;

/// The two independently toggleable redirection channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectionState {
    /// Serial-over-LAN, bit 1.
    pub sol: bool,
    /// IDE redirection, bit 0.
    pub ider: bool,
}

impl RedirectionState {
    /// Unpacks a raw `EnabledState` code.
    ///
    /// Codes outside 32768..=32771 are not a redirection state at all and
    /// yield [`AmtError::InvalidRedirectionState`].
    pub fn from_enabled_state(code: i32) -> Result<Self, AmtError> {
        if !(REDIRECTION_STATE_BASE..=REDIRECTION_STATE_MAX).contains(&code) {
            return Err(AmtError::InvalidRedirectionState(code));
        }
        let bits = code - REDIRECTION_STATE_BASE;
        Ok(RedirectionState {
            sol: (bits >> 1) & 1 == 1,
            ider: bits & 1 == 1,
        })
    }

    /// Packs back into the wire encoding.
    pub fn encoded(&self) -> i32 {
        REDIRECTION_STATE_BASE + ((self.sol as i32) << 1) + self.ider as i32
    }

    /// The exact status sentence for this state.
    pub fn describe(&self) -> String {
        ENABLED_STATE.decode(self.encoded())
    }
}

/// Status of the redirection service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectionStatus {
    pub element_name: String,
    pub enabled_state: String,
    pub listener_enabled: bool,
}

impl fmt::Display for RedirectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}, Listener is {}",
            self.element_name,
            self.enabled_state,
            if self.listener_enabled {
                "enabled"
            } else {
                "disabled"
            }
        )
    }
}

/// Outcome of a redirection change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetRedirectionOutcome {
    /// Target state equals the current state; no invocation was sent.
    NothingToDo { state: RedirectionState },
    /// The service accepted the new state.
    Changed { state: RedirectionState },
    /// The service rejected the transition; `status` is the decoded
    /// `ReturnValue`.
    Failed {
        target: RedirectionState,
        status: String,
    },
}

impl SetRedirectionOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, SetRedirectionOutcome::Changed { .. })
    }
}

impl fmt::Display for SetRedirectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetRedirectionOutcome::NothingToDo { state } => {
                write!(f, "Nothing to do: {}", state.describe())
            }
            SetRedirectionOutcome::Changed { state } => write!(f, "{}", state.describe()),
            SetRedirectionOutcome::Failed { target, status } => write!(
                f,
                "Setting redirection to {} failed, {}",
                target.describe(),
                status
            ),
        }
    }
}

/// Reads the redirection service status: element name, decoded enabled
/// state, and the listener flag.
pub async fn redirection_status(session: &dyn Session) -> Result<RedirectionStatus, AmtError> {
    let resource = ResourceReference::amt(REDIRECTION_CLASS);
    let props = session
        .get(&resource)
        .await?
        .into_properties(REDIRECTION_CLASS)?;

    let element_name = props.require("ElementName")?.to_string();
    let enabled_state = ENABLED_STATE.decode(props.get_int("EnabledState")?);
    let listener_enabled = props.require("ListenerEnabled")? == "true";

    Ok(RedirectionStatus {
        element_name,
        enabled_state,
        listener_enabled,
    })
}

/// Sets the SOL and/or IDER channels.
///
/// A channel passed as `None` keeps its current bit. If the computed target
/// equals the current state no invocation is sent and
/// [`SetRedirectionOutcome::NothingToDo`] is returned.
pub async fn set_redirection(
    session: &dyn Session,
    serial: Option<bool>,
    ider: Option<bool>,
) -> Result<SetRedirectionOutcome, AmtError> {
    let resource = ResourceReference::amt(REDIRECTION_CLASS);
    let props = session
        .get(&resource)
        .await?
        .into_properties(REDIRECTION_CLASS)?;

    let raw = props.get_int("EnabledState")?;
    let current = RedirectionState::from_enabled_state(raw)?;

    let target = RedirectionState {
        sol: serial.unwrap_or(current.sol),
        ider: ider.unwrap_or(current.ider),
    };

    if target == current {
        debug!(state = raw, "redirection already in requested state");
        return Ok(SetRedirectionOutcome::NothingToDo { state: current });
    }

    let invocation = InvocationBuilder::new(resource, "RequestStateChange")
        .text("RequestedState", target.encoded().to_string())
        .build();

    let props = session
        .invoke(&invocation)
        .await?
        .into_properties(REDIRECTION_CLASS)?;

    let return_code = props.get_int("ReturnValue")?;
    if return_code == RETURN_SUCCESS {
        Ok(SetRedirectionOutcome::Changed { state: target })
    } else {
        Ok(SetRedirectionOutcome::Failed {
            target,
            status: RETURN_VALUE.decode(return_code),
        })
    }
}
