//! The transport seam.
//!
//! The core never touches the network itself; it hands resource references
//! and invocations to a [`Session`] and gets [`ResponseDocument`]s back.
//! The production implementation lives in the `amtctl` binary crate
//! (WS-Management over HTTP); tests drive the controllers through scripted
//! in-memory sessions.
//!
//! A session covers exactly one feature-controller operation: at most one
//! read followed by at most one write, strictly sequential. Timeout and
//! retry policy belong entirely to the implementor; the core treats a
//! missing response as [`crate::AmtError::TransportUnavailable`] and stops.

use async_trait::async_trait;

use crate::error::AmtError;
use crate::request::MethodInvocation;
use crate::resource::ResourceReference;
use crate::response::{PropertySet, ResponseDocument};

/// Generic get/put/invoke/identify primitives against one endpoint.
#[async_trait]
pub trait Session: Send + Sync {
    /// Retrieves the single instance of `resource`.
    async fn get(&self, resource: &ResourceReference) -> Result<ResponseDocument, AmtError>;

    /// Writes a full document back to `resource`.
    async fn put(
        &self,
        resource: &ResourceReference,
        document: &PropertySet,
    ) -> Result<ResponseDocument, AmtError>;

    /// Invokes a method on the invocation's target resource.
    async fn invoke(&self, invocation: &MethodInvocation) -> Result<ResponseDocument, AmtError>;

    /// WS-Management Identify: firmware vendor and version.
    async fn identify(&self) -> Result<ResponseDocument, AmtError>;
}
