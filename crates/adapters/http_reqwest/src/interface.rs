//! [`InterfaceGateway`] over `/api/interface`, `/api/start` and `/api/stop`.

use reqwest::Method;

use autopanel_app::ports::InterfaceGateway;
use autopanel_domain::builder::StartRequest;
use autopanel_domain::error::PanelError;
use autopanel_domain::schema::{InterfaceDocument, InterfaceSchema};

use crate::client::HttpBackend;

impl InterfaceGateway for HttpBackend {
    async fn fetch_interface(&self) -> Result<InterfaceSchema, PanelError> {
        let value: serde_json::Value = self
            .fetch_json(self.request(Method::GET, &["api", "interface"]))
            .await?;
        let document = InterfaceDocument::from_value(value)?;
        tracing::debug!(version = document.version(), "decoded interface document");
        Ok(document.normalize()?)
    }

    async fn start(&self, request: StartRequest) -> Result<(), PanelError> {
        self.call(self.request(Method::POST, &["api", "start"]).json(&request))
            .await?;
        Ok(())
    }

    async fn stop(&self) -> Result<(), PanelError> {
        self.call(self.request(Method::POST, &["api", "stop"])).await?;
        Ok(())
    }
}
