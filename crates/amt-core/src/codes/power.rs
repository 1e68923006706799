//! Power state tables and the action-word encoder.
//!
//! Three related but distinct DMTF tables: the current `PowerState`, the
//! `RequestedPowerState` (which has an extra `n/a` entry at index 12 and may
//! carry a literal `None` sentinel on the wire), and the
//! `AvailableRequestedPowerStates` set. Above the named range each decodes
//! to a reserved-band label carrying the numeric code.

use super::{Band, CodeTable};
use crate::error::AmtError;

/// Current power state of the managed system (18 named values).
pub static POWER_STATE: CodeTable = CodeTable::new(
    &[
        "unknown",
        "other",
        "on",
        "sleep",
        "deep-sleep",
        "soft-reset",
        "off",
        "hibernate",
        "soft-off",
        "reset",
        "bus-reset",
        "nmi",
        "graceful-soft-off",
        "graceful-off",
        "graceful-bus-reset",
        "graceful-soft-reset",
        "graceful-reset",
        "diag",
    ],
    &[],
    &[
        Band::new(18, 32767, "DMTF Reserved", true),
        Band::new(32768, i32::MAX, "Vendor Reserved", true),
    ],
    "Vendor Reserved",
);

/// Last requested power state (19 named values; index 12 is `n/a`).
pub static REQUESTED_POWER_STATE: CodeTable = CodeTable::new(
    &[
        "unknown",
        "other",
        "on",
        "sleep",
        "deep-sleep",
        "soft-reset",
        "off",
        "hibernate",
        "soft-off",
        "reset",
        "bus-reset",
        "nmi",
        "n/a",
        "graceful-soft-off",
        "graceful-off",
        "graceful-bus-reset",
        "graceful-soft-reset",
        "graceful-reset",
        "diag",
    ],
    &[],
    &[
        Band::new(19, 32767, "DMTF Reserved", true),
        Band::new(32768, i32::MAX, "Vendor Reserved", true),
    ],
    "Vendor Reserved",
);

/// Power states the service advertises as requestable (17 named values).
pub static AVAILABLE_POWER_STATE: CodeTable = CodeTable::new(
    &[
        "unknown",
        "other",
        "on",
        "sleep",
        "deep-sleep",
        "soft-reset",
        "off",
        "hibernate",
        "soft-off",
        "reset",
        "bus-reset",
        "nmi",
        "graceful-soft-off",
        "graceful-off",
        "graceful-bus-reset",
        "graceful-soft-reset",
        "graceful-reset",
    ],
    &[],
    &[
        Band::new(17, 32767, "DMTF Reserved", true),
        Band::new(32768, i32::MAX, "Vendor Reserved", true),
    ],
    "Vendor Reserved",
);

/// Encodes a power action word into the `RequestPowerStateChange` code.
///
/// Unrecognized words are an [`AmtError::UnknownAction`], raised before any
/// network call.
pub fn encode_power_action(action: &str) -> Result<i32, AmtError> {
    let code = match action {
        "on" => 2,
        "sleep" => 3,
        "deep-sleep" => 4,
        "soft-reset" => 5,
        "off" => 6,
        "hibernate" => 7,
        "soft-off" => 8,
        "reset" => 9,
        "bus-reset" => 10,
        "nmi" => 11,
        "graceful-soft-off" => 12,
        "graceful-off" => 13,
        "graceful-bus-reset" => 14,
        "graceful-soft-reset" => 15,
        "graceful-reset" => 16,
        _ => return Err(AmtError::UnknownAction(action.to_string())),
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_state_named_range_includes_diag() {
        assert_eq!(POWER_STATE.decode(2), "on");
        assert_eq!(POWER_STATE.decode(16), "graceful-reset");
        assert_eq!(POWER_STATE.decode(17), "diag");
        assert_eq!(POWER_STATE.decode(18), "DMTF Reserved (18)");
    }

    #[test]
    fn requested_state_has_na_slot() {
        assert_eq!(REQUESTED_POWER_STATE.decode(12), "n/a");
        assert_eq!(REQUESTED_POWER_STATE.decode(18), "diag");
        assert_eq!(REQUESTED_POWER_STATE.decode(19), "DMTF Reserved (19)");
    }

    #[test]
    fn available_state_reserved_bands() {
        assert_eq!(AVAILABLE_POWER_STATE.decode(16), "graceful-reset");
        assert_eq!(AVAILABLE_POWER_STATE.decode(17), "DMTF Reserved (17)");
        assert_eq!(
            AVAILABLE_POWER_STATE.decode(40000),
            "Vendor Reserved (40000)"
        );
    }

    #[test]
    fn action_words_encode() {
        assert_eq!(encode_power_action("on").unwrap(), 2);
        assert_eq!(encode_power_action("graceful-reset").unwrap(), 16);
        assert_eq!(encode_power_action("nmi").unwrap(), 11);
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert_eq!(
            encode_power_action("warp-speed"),
            Err(AmtError::UnknownAction("warp-speed".to_string()))
        );
    }
}
