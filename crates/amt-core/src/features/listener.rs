//! Redirection listener controller.
//!
//! The listener is a plain boolean (`ListenerEnabled`) on the redirection
//! service. Toggling reads the full document, skips the write when the flag
//! already matches, and otherwise PUTs the whole updated document back.
//! Success is confirmed by comparing `ListenerEnabled` in the PUT response
//! against the written target, not by trusting the PUT's return status.

use std::fmt;

use tracing::debug;

use crate::error::AmtError;
use crate::features::redirection::REDIRECTION_CLASS;
use crate::resource::ResourceReference;
use crate::session::Session;

/// Outcome of a listener toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerOutcome {
    /// The flag already matched; no PUT was issued.
    AlreadyInState { enabled: bool },
    /// The PUT response confirmed the new flag value.
    Changed { enabled: bool },
    /// The PUT went through but the response still showed the old value.
    NotConfirmed { requested: bool },
}

fn state_word(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

impl fmt::Display for ListenerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerOutcome::AlreadyInState { enabled } => {
                write!(f, "Listener already in state {}", state_word(*enabled))
            }
            ListenerOutcome::Changed { enabled } => {
                write!(f, "Listener changed to {}", state_word(*enabled))
            }
            ListenerOutcome::NotConfirmed { requested } => {
                write!(f, "Failed to change listener to {}", state_word(*requested))
            }
        }
    }
}

/// Enables or disables the redirection listener.
pub async fn set_listener(
    session: &dyn Session,
    enable: bool,
) -> Result<ListenerOutcome, AmtError> {
    let resource = ResourceReference::amt(REDIRECTION_CLASS);
    let mut props = session
        .get(&resource)
        .await?
        .into_properties(REDIRECTION_CLASS)?;

    let desired = if enable { "true" } else { "false" };
    if props.require("ListenerEnabled")? == desired {
        debug!(enable, "listener already in requested state");
        return Ok(ListenerOutcome::AlreadyInState { enabled: enable });
    }

    props.set("ListenerEnabled", desired);
    let confirmed = session
        .put(&resource, &props)
        .await?
        .into_properties(REDIRECTION_CLASS)?;

    if confirmed.require("ListenerEnabled")? == desired {
        Ok(ListenerOutcome::Changed { enabled: enable })
    } else {
        Ok(ListenerOutcome::NotConfirmed { requested: enable })
    }
}
