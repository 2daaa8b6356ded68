//! Task runner — submit or abort a run on the backend.

use autopanel_domain::builder::StartRequest;
use autopanel_domain::error::{PanelError, ValidationError};

use crate::ports::InterfaceGateway;

/// Application service for the start and stop calls.
pub struct TaskRunner<G> {
    gateway: G,
}

impl<G: InterfaceGateway> TaskRunner<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Start executing the request's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] for an empty task list without
    /// calling the backend, or the gateway error.
    #[tracing::instrument(skip(self, request), fields(tasks = request.tasks.len()))]
    pub async fn start(&self, request: StartRequest) -> Result<(), PanelError> {
        if request.tasks.is_empty() {
            return Err(ValidationError::EmptyTaskList.into());
        }
        self.gateway.start(request).await?;
        tracing::info!("run started");
        Ok(())
    }

    /// Abort the running execution.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn stop(&self) -> Result<(), PanelError> {
        self.gateway.stop().await?;
        tracing::info!("run stopped");
        Ok(())
    }
}
