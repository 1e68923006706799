//! Method-invocation payload construction.
//!
//! A [`MethodInvocation`] pairs a target resource with an operation name and
//! its input parameters. It is immutable once built and consumed exactly once
//! by the transport, which renders it as an `<Operation>_INPUT` body element.
//! The builder performs no validation of operation semantics; the feature
//! controllers own that.

use crate::resource::{ResourceReference, Selector};

/// A WS-Addressing endpoint reference embedded as a method parameter.
///
/// Rendered by the transport with the anonymous Address, the resource URI,
/// and the selectors in order, each carrying a `Name` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointReference {
    pub resource_uri: String,
    pub selectors: Vec<Selector>,
}

impl From<&ResourceReference> for EndpointReference {
    fn from(resource: &ResourceReference) -> Self {
        EndpointReference {
            resource_uri: resource.resource_uri(),
            selectors: resource.selectors().to_vec(),
        }
    }
}

/// One input parameter of a method invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// A plain text-valued parameter.
    Text { name: String, value: String },
    /// A nested endpoint reference, e.g. `ManagedElement`.
    Reference {
        name: String,
        reference: EndpointReference,
    },
}

/// A fully built method invocation, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInvocation {
    pub resource: ResourceReference,
    pub operation: String,
    pub params: Vec<Param>,
}

/// Fluent builder for [`MethodInvocation`].
#[derive(Debug)]
pub struct InvocationBuilder {
    resource: ResourceReference,
    operation: String,
    params: Vec<Param>,
}

impl InvocationBuilder {
    pub fn new(resource: ResourceReference, operation: impl Into<String>) -> Self {
        InvocationBuilder {
            resource,
            operation: operation.into(),
            params: Vec::new(),
        }
    }

    /// Adds a text parameter. Parameter order is preserved on the wire.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(Param::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a nested endpoint-reference parameter.
    pub fn reference(mut self, name: impl Into<String>, reference: EndpointReference) -> Self {
        self.params.push(Param::Reference {
            name: name.into(),
            reference,
        });
        self
    }

    pub fn build(self) -> MethodInvocation {
        MethodInvocation {
            resource: self.resource,
            operation: self.operation,
            params: self.params,
        }
    }
}
