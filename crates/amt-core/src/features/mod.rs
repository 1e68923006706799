//! Feature controllers: one small state machine per controllable feature.
//!
//! Each controller performs read-then-conditionally-write against the remote
//! resource: read the current state, compute the target, skip the write when
//! the target already matches (a distinct no-op outcome, not an error), and
//! otherwise issue exactly one PUT or INVOKE and validate the result. No
//! feature state is cached between operations.

pub mod identify;
pub mod kvm;
pub mod listener;
pub mod power;
pub mod redirection;

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted [`Session`] used by the controller unit tests: plays back a
    //! queue of canned responses and records every call it receives.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::AmtError;
    use crate::request::MethodInvocation;
    use crate::resource::ResourceReference;
    use crate::response::{PropertySet, ResponseDocument};
    use crate::session::Session;

    /// One recorded call against the scripted session.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Get(String),
        Put(String, PropertySet),
        Invoke(MethodInvocation),
        Identify,
    }

    impl Call {
        /// Whether this call mutates remote state.
        pub fn is_write(&self) -> bool {
            matches!(self, Call::Put(..) | Call::Invoke(..))
        }
    }

    pub struct ScriptedSession {
        responses: Mutex<VecDeque<Result<ResponseDocument, AmtError>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl ScriptedSession {
        pub fn new(responses: Vec<Result<ResponseDocument, AmtError>>) -> Self {
            ScriptedSession {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn write_count(&self) -> usize {
            self.calls().iter().filter(|c| c.is_write()).count()
        }

        fn record(&self, call: Call) -> Result<ResponseDocument, AmtError> {
            self.calls.lock().unwrap().push(call);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(AmtError::TransportUnavailable(
                    "script exhausted".to_string(),
                )))
        }
    }

    #[async_trait]
    impl Session for ScriptedSession {
        async fn get(&self, resource: &ResourceReference) -> Result<ResponseDocument, AmtError> {
            self.record(Call::Get(resource.resource_uri()))
        }

        async fn put(
            &self,
            resource: &ResourceReference,
            document: &PropertySet,
        ) -> Result<ResponseDocument, AmtError> {
            self.record(Call::Put(resource.resource_uri(), document.clone()))
        }

        async fn invoke(
            &self,
            invocation: &MethodInvocation,
        ) -> Result<ResponseDocument, AmtError> {
            self.record(Call::Invoke(invocation.clone()))
        }

        async fn identify(&self) -> Result<ResponseDocument, AmtError> {
            self.record(Call::Identify)
        }
    }

    /// Builds a success document from `(name, value)` pairs.
    pub fn success(pairs: &[(&str, &str)]) -> Result<ResponseDocument, AmtError> {
        let mut props = PropertySet::new();
        for (name, value) in pairs {
            props.push(*name, *value);
        }
        Ok(ResponseDocument::Success(props))
    }

    /// Builds a fault document.
    pub fn fault(reason: &str) -> Result<ResponseDocument, AmtError> {
        Ok(ResponseDocument::Fault {
            reason: reason.to_string(),
        })
    }
}
