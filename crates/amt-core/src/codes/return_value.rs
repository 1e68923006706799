//! The DMTF method `ReturnValue` / job status table.
//!
//! Used for `RequestStateChange` and `RequestPowerStateChange` results.
//! Code 0 is the only unconditional success.

use super::{Band, CodeTable};

/// Method return codes per the DMTF power and state management profiles.
pub static RETURN_VALUE: CodeTable = CodeTable::new(
    &[
        "Completed with No Error",
        "Not Supported",
        "Unknown or Unspecified Error",
        "Cannot complete within Timeout Period",
        "Failed",
        "Invalid Parameter",
        "In Use",
    ],
    &[
        (4096, "Method Parameters Checked - Job Started"),
        (4097, "Invalid State Transition"),
        (4098, "Use of Timeout Parameter Not Supported"),
        (4099, "Busy"),
    ],
    &[
        Band::new(7, 4095, "DMTF Reserved", true),
        Band::new(4100, 32767, "Method Reserved", false),
        Band::new(32768, i32::MAX, "Vendor Specific", true),
    ],
    "Vendor Specific",
);

/// The method return code meaning unconditional success.
pub const RETURN_SUCCESS: i32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_range() {
        assert_eq!(RETURN_VALUE.decode(0), "Completed with No Error");
        assert_eq!(RETURN_VALUE.decode(6), "In Use");
    }

    #[test]
    fn dmtf_reserved_carries_code() {
        assert_eq!(RETURN_VALUE.decode(7), "DMTF Reserved (7)");
        assert_eq!(RETURN_VALUE.decode(4095), "DMTF Reserved (4095)");
    }

    #[test]
    fn job_codes() {
        assert_eq!(
            RETURN_VALUE.decode(4096),
            "Method Parameters Checked - Job Started"
        );
        assert_eq!(RETURN_VALUE.decode(4097), "Invalid State Transition");
        assert_eq!(
            RETURN_VALUE.decode(4098),
            "Use of Timeout Parameter Not Supported"
        );
        assert_eq!(RETURN_VALUE.decode(4099), "Busy");
    }

    #[test]
    fn method_reserved_band() {
        assert_eq!(RETURN_VALUE.decode(4100), "Method Reserved");
        assert_eq!(RETURN_VALUE.decode(32767), "Method Reserved");
    }

    #[test]
    fn vendor_specific_carries_code() {
        assert_eq!(RETURN_VALUE.decode(32768), "Vendor Specific (32768)");
        assert_eq!(RETURN_VALUE.decode(50000), "Vendor Specific (50000)");
    }
}
