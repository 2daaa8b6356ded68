//! Interface gateway port — the schema source and the run controls.

use std::future::Future;
use std::sync::Arc;

use autopanel_domain::builder::StartRequest;
use autopanel_domain::error::PanelError;
use autopanel_domain::schema::InterfaceSchema;

/// Backend calls around the interface schema and task execution.
pub trait InterfaceGateway {
    /// Fetch the interface schema, already normalized to the canonical model.
    fn fetch_interface(&self) -> impl Future<Output = Result<InterfaceSchema, PanelError>> + Send;

    /// Begin executing the given tasks with their option values.
    fn start(&self, request: StartRequest) -> impl Future<Output = Result<(), PanelError>> + Send;

    /// Abort the running execution.
    fn stop(&self) -> impl Future<Output = Result<(), PanelError>> + Send;
}

impl<T: InterfaceGateway + Send + Sync> InterfaceGateway for Arc<T> {
    fn fetch_interface(&self) -> impl Future<Output = Result<InterfaceSchema, PanelError>> + Send {
        (**self).fetch_interface()
    }

    fn start(&self, request: StartRequest) -> impl Future<Output = Result<(), PanelError>> + Send {
        (**self).start(request)
    }

    fn stop(&self) -> impl Future<Output = Result<(), PanelError>> + Send {
        (**self).stop()
    }
}
