//! Enumeration tables mapping DMTF/vendor integer codes to labels.
//!
//! Every decoder in this crate goes through [`CodeTable::decode`], which is
//! total over `i32`: a named index, an explicitly named vendor code, a
//! reserved band, or the table's fallback — never a panic. The band layout
//! follows the DMTF profiles: a contiguous run of named values starting at 0,
//! a DMTF-reserved band up to 32767, and vendor territory above that.

pub mod enabled_state;
pub mod power;
pub mod return_value;

pub use enabled_state::ENABLED_STATE;
pub use power::{
    encode_power_action, AVAILABLE_POWER_STATE, POWER_STATE, REQUESTED_POWER_STATE,
};
pub use return_value::RETURN_VALUE;

/// A contiguous range of codes sharing one reserved-band label.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub lo: i32,
    pub hi: i32,
    pub label: &'static str,
    /// Whether the rendered label carries the numeric code, e.g.
    /// `"DMTF Reserved (4097)"` vs. plain `"DMTF Reserved"`.
    pub with_code: bool,
}

impl Band {
    const fn new(lo: i32, hi: i32, label: &'static str, with_code: bool) -> Self {
        Band {
            lo,
            hi,
            label,
            with_code,
        }
    }

    fn contains(&self, code: i32) -> bool {
        self.lo <= code && code <= self.hi
    }

    fn render(&self, code: i32) -> String {
        if self.with_code {
            format!("{} ({})", self.label, code)
        } else {
            self.label.to_string()
        }
    }
}

/// One enumeration table: named values indexed from 0, explicit vendor
/// codes, and reserved bands.
///
/// Process-wide constant; every instance in this crate is `static`.
#[derive(Debug)]
pub struct CodeTable {
    /// Labels for codes `0..named.len()`.
    named: &'static [&'static str],
    /// Exact vendor/feature codes with their own label, e.g. 4099 → `Busy`.
    codes: &'static [(i32, &'static str)],
    /// Reserved bands checked in order after `named` and `codes`.
    bands: &'static [Band],
    /// Applied when nothing else matches (including negative codes).
    /// Always rendered with the numeric code.
    fallback: &'static str,
}

impl CodeTable {
    pub const fn new(
        named: &'static [&'static str],
        codes: &'static [(i32, &'static str)],
        bands: &'static [Band],
        fallback: &'static str,
    ) -> Self {
        CodeTable {
            named,
            codes,
            bands,
            fallback,
        }
    }

    /// Decodes `code` into a label. Total over all of `i32`.
    pub fn decode(&self, code: i32) -> String {
        if code >= 0 && (code as usize) < self.named.len() {
            return self.named[code as usize].to_string();
        }
        if let Some((_, label)) = self.codes.iter().find(|(c, _)| *c == code) {
            return (*label).to_string();
        }
        if let Some(band) = self.bands.iter().find(|b| b.contains(code)) {
            return band.render(code);
        }
        format!("{} ({})", self.fallback, code)
    }

    /// Number of named values at the start of the table.
    pub fn named_len(&self) -> usize {
        self.named.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: CodeTable = CodeTable::new(
        &["Zero", "One"],
        &[(100, "Exactly One Hundred")],
        &[Band::new(2, 99, "Low Reserved", false), Band::new(101, 200, "High Reserved", true)],
        "Out of Range",
    );

    #[test]
    fn named_index_wins() {
        assert_eq!(TABLE.decode(0), "Zero");
        assert_eq!(TABLE.decode(1), "One");
    }

    #[test]
    fn explicit_code_beats_band() {
        assert_eq!(TABLE.decode(100), "Exactly One Hundred");
    }

    #[test]
    fn band_rendering_with_and_without_code() {
        assert_eq!(TABLE.decode(50), "Low Reserved");
        assert_eq!(TABLE.decode(150), "High Reserved (150)");
    }

    #[test]
    fn fallback_is_total() {
        assert_eq!(TABLE.decode(-1), "Out of Range (-1)");
        assert_eq!(TABLE.decode(i32::MIN), format!("Out of Range ({})", i32::MIN));
        assert_eq!(TABLE.decode(i32::MAX), format!("Out of Range ({})", i32::MAX));
    }
}
