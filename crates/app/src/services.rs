//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod scheduler_store;
pub mod schema_store;
pub mod task_runner;

pub use scheduler_store::{
    OperationKind, OperationState, OperationStatus, RECENT_EXECUTIONS, SchedulerStore,
};
pub use schema_store::SchemaStore;
pub use task_runner::TaskRunner;
