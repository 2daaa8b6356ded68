//! Typed identifier newtypes.
//!
//! Backend-issued identifiers are opaque strings; locally generated ones
//! (operation handles) are UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_backend_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier issued by the backend.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

define_backend_id!(
    /// Identifier of a [`ScheduledTask`](crate::scheduler::ScheduledTask).
    ScheduledTaskId
);

define_backend_id!(
    /// Identifier of a [`TaskExecution`](crate::scheduler::TaskExecution).
    ExecutionId
);

/// Handle for one in-flight or finished store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(uuid::Uuid);

impl Default for OperationId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl OperationId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
