//! Response documents and named-property decoding.
//!
//! The transport parses each SOAP response into a [`ResponseDocument`]:
//! either a fault carrying its reason string, or a success carrying the
//! payload element's properties in document order. Property values arrive as
//! strings; numeric range checks must go through [`PropertySet::get_int`] so
//! comparisons are numeric, never lexical.

use crate::error::AmtError;

/// Insertion-ordered set of `(name, value)` string properties.
///
/// Order is preserved so a modified document can be PUT back whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: Vec<(String, String)>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a property, keeping document order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replaces the value of `name` in place, or appends if absent.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Looks up a property; `None` if absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Looks up a required property.
    pub fn require(&self, name: &str) -> Result<&str, AmtError> {
        self.get(name)
            .ok_or_else(|| AmtError::MissingProperty(name.to_string()))
    }

    /// Looks up a required property and parses it as `i32`.
    pub fn get_int(&self, name: &str) -> Result<i32, AmtError> {
        let raw = self.require(name)?;
        raw.trim()
            .parse::<i32>()
            .map_err(|_| AmtError::MalformedProperty {
                name: name.to_string(),
                value: raw.to_string(),
            })
    }

    /// All values recorded under `name`, in document order. CIM properties
    /// such as `AvailableRequestedPowerStates` are multi-valued and repeat
    /// the element once per value.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for PropertySet {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        PropertySet {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A parsed response from the controller: success with properties, or a
/// protocol-level fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseDocument {
    Success(PropertySet),
    Fault { reason: String },
}

impl ResponseDocument {
    pub fn is_fault(&self) -> bool {
        matches!(self, ResponseDocument::Fault { .. })
    }

    /// Unwraps the success properties, or maps a fault to
    /// [`AmtError::OperationFailed`] tagged with `subject`.
    ///
    /// A fault short-circuits: no property extraction is ever attempted on
    /// the fault variant.
    pub fn into_properties(self, subject: &str) -> Result<PropertySet, AmtError> {
        match self {
            ResponseDocument::Success(props) => Ok(props),
            ResponseDocument::Fault { reason } => Err(AmtError::operation_failed(subject, reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> PropertySet {
        let mut props = PropertySet::new();
        props.push("ElementName", "Intel(r) AMT Redirection Service");
        props.push("EnabledState", "32770");
        props.push("ListenerEnabled", "true");
        props
    }

    #[test]
    fn get_int_is_numeric_not_lexical() {
        // "9" < "32768" lexically is false; numerically it must be true.
        let mut props = PropertySet::new();
        props.push("EnabledState", "9");
        assert!(props.get_int("EnabledState").unwrap() < 32768);
    }

    #[test]
    fn missing_property_is_an_error() {
        let props = doc();
        assert_eq!(
            props.require("PowerState"),
            Err(AmtError::MissingProperty("PowerState".to_string()))
        );
    }

    #[test]
    fn malformed_int_is_reported() {
        let props = doc();
        assert!(matches!(
            props.get_int("ListenerEnabled"),
            Err(AmtError::MalformedProperty { .. })
        ));
    }

    #[test]
    fn set_replaces_in_place_preserving_order() {
        let mut props = doc();
        props.set("EnabledState", "32771");
        let names: Vec<_> = props.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["ElementName", "EnabledState", "ListenerEnabled"]);
        assert_eq!(props.get("EnabledState"), Some("32771"));
    }

    #[test]
    fn fault_short_circuits_property_access() {
        let doc = ResponseDocument::Fault {
            reason: "access denied".to_string(),
        };
        assert!(doc.is_fault());
        assert_eq!(
            doc.into_properties("AMT_RedirectionService"),
            Err(AmtError::OperationFailed {
                subject: "AMT_RedirectionService".to_string(),
                reason: "access denied".to_string(),
            })
        );
    }
}
