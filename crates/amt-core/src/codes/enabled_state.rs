//! The DMTF `EnabledState` table, extended with Intel's packed redirection
//! codes.
//!
//! Codes 32768..=32771 are the AMT redirection service's bit-packed state:
//! bit 0 is IDE redirection (IDER), bit 1 is Serial-over-LAN (SOL). The four
//! sentences below are the exact renderings expected in status output.

use super::{Band, CodeTable};

/// Generic DMTF `EnabledState` with the AMT redirection vendor codes.
pub static ENABLED_STATE: CodeTable = CodeTable::new(
    &[
        "Unknown",
        "Other",
        "Enabled",
        "Disabled",
        "Shutting Down",
        "Not Applicable",
        "Enabled but Offline",
        "In Test",
        "Deferred",
        "Quiesce",
        "Starting",
    ],
    &[
        (32768, "IDER and SOL are disabled"),
        (32769, "IDER is enabled and SOL is disabled"),
        (32770, "SOL is enabled and IDER is disabled"),
        (32771, "IDER and SOL are enabled"),
    ],
    &[
        Band::new(11, 32767, "DMTF Reserved", false),
        Band::new(32772, i32::MAX, "Vendor Reserved", false),
    ],
    "Vendor Reserved",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_range() {
        assert_eq!(ENABLED_STATE.decode(0), "Unknown");
        assert_eq!(ENABLED_STATE.decode(2), "Enabled");
        assert_eq!(ENABLED_STATE.decode(10), "Starting");
    }

    #[test]
    fn dmtf_reserved_band() {
        assert_eq!(ENABLED_STATE.decode(11), "DMTF Reserved");
        assert_eq!(ENABLED_STATE.decode(32767), "DMTF Reserved");
    }

    #[test]
    fn redirection_bit_pair_sentences() {
        assert_eq!(ENABLED_STATE.decode(32768), "IDER and SOL are disabled");
        assert_eq!(
            ENABLED_STATE.decode(32769),
            "IDER is enabled and SOL is disabled"
        );
        assert_eq!(
            ENABLED_STATE.decode(32770),
            "SOL is enabled and IDER is disabled"
        );
        assert_eq!(ENABLED_STATE.decode(32771), "IDER and SOL are enabled");
    }

    #[test]
    fn vendor_reserved_above_packed_range() {
        assert_eq!(ENABLED_STATE.decode(32772), "Vendor Reserved");
        assert_eq!(ENABLED_STATE.decode(i32::MAX), "Vendor Reserved");
    }
}
