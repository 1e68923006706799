//! # amt-core
//!
//! Protocol-semantics layer for managing Intel AMT out-of-band features:
//! power state, Serial-over-LAN and IDE redirection, the redirection
//! listener, and KVM redirection.
//!
//! This crate knows the DMTF/vendor enumeration space and the per-feature
//! state machines, but never touches the network. It defines:
//!
//! - **`codes`** – Enumeration tables mapping integer status/return codes to
//!   labels, with reserved-band and vendor-code handling. Decoding is total:
//!   any `i32` produces a label.
//!
//! - **`resource`** / **`request`** – Resource addressing (namespace URIs,
//!   class names, selector sets) and method-invocation payload construction.
//!
//! - **`response`** – The response document model: success with ordered named
//!   properties, or a fault carrying its reason. Numeric properties are
//!   parsed before comparison, never compared as strings.
//!
//! - **`session`** – The transport seam. Implementors provide generic
//!   get/put/invoke/identify primitives; the WS-Management HTTP transport
//!   lives in the `amtctl` binary crate.
//!
//! - **`features`** – One controller per feature, each a small
//!   read-then-conditionally-write state machine with idempotent no-op
//!   detection.

pub mod codes;
pub mod error;
pub mod features;
pub mod request;
pub mod resource;
pub mod response;
pub mod session;

pub use error::AmtError;
pub use request::{EndpointReference, InvocationBuilder, MethodInvocation, Param};
pub use resource::{ResourceReference, Selector};
pub use response::{PropertySet, ResponseDocument};
pub use session::Session;
