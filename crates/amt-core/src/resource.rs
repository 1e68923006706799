//! Resource addressing: namespace URIs, class references, selector sets.
//!
//! A [`ResourceReference`] identifies one manageable object or service on
//! the AMT controller. The resource URI is always `<base>/<class>` where the
//! base is the DMTF CIM schema or one of Intel's vendor schemas. Pure
//! construction, no network or parsing logic.

/// DMTF CIM schema base namespace.
pub const NS_CIM_BASE: &str = "http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2";
/// Intel AMT schema base namespace.
pub const NS_AMT_BASE: &str = "http://intel.com/wbem/wscim/1/amt-schema/1";
/// Intel IPS schema base namespace.
pub const NS_IPS_BASE: &str = "http://intel.com/wbem/wscim/1/ips-schema/1";

/// One key/value pair identifying an instance among many of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub name: String,
    pub value: String,
}

impl Selector {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Selector {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Identifies one manageable object or service.
///
/// Constructed per call and discarded when the call completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReference {
    base: &'static str,
    class_name: String,
    selectors: Vec<Selector>,
}

impl ResourceReference {
    /// A DMTF CIM class reference.
    pub fn cim(class_name: impl Into<String>) -> Self {
        Self::with_base(NS_CIM_BASE, class_name)
    }

    /// An Intel AMT vendor class reference.
    pub fn amt(class_name: impl Into<String>) -> Self {
        Self::with_base(NS_AMT_BASE, class_name)
    }

    /// An Intel IPS vendor class reference.
    pub fn ips(class_name: impl Into<String>) -> Self {
        Self::with_base(NS_IPS_BASE, class_name)
    }

    fn with_base(base: &'static str, class_name: impl Into<String>) -> Self {
        ResourceReference {
            base,
            class_name: class_name.into(),
            selectors: Vec::new(),
        }
    }

    /// Appends a selector. Order is preserved and significant on the wire.
    pub fn selector(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.selectors.push(Selector::new(name, value));
        self
    }

    /// The full resource URI, `<base>/<class>`.
    pub fn resource_uri(&self) -> String {
        format!("{}/{}", self.base, self.class_name)
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }
}

/// The fixed reference to the managed computer-system instance, used as the
/// `ManagedElement` target of a power state change.
pub fn managed_system_reference() -> ResourceReference {
    ResourceReference::cim("CIM_ComputerSystem")
        .selector("CreationClassName", "CIM_ComputerSystem")
        .selector("Name", "ManagedSystem")
}
