//! [`DeviceGateway`] over `/api/get_device` and `/api/connect_device`.

use reqwest::Method;
use serde::Deserialize;

use autopanel_app::ports::DeviceGateway;
use autopanel_domain::device::Device;
use autopanel_domain::error::PanelError;

use crate::client::{HttpBackend, check_status};
use crate::error::HttpError;

/// Discovery answers `{"devices": [...]}` without a status on success.
#[derive(Debug, Deserialize)]
struct DeviceList {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    devices: Option<Vec<Device>>,
}

impl DeviceGateway for HttpBackend {
    async fn list_devices(&self) -> Result<Vec<Device>, PanelError> {
        let list: DeviceList = self
            .fetch_json(self.request(Method::GET, &["api", "get_device"]))
            .await?;
        if let Some(status) = &list.status {
            check_status(status, list.message)?;
        }
        Ok(list.devices.ok_or(HttpError::MissingField("devices"))?)
    }

    async fn connect_device(&self, device: Device) -> Result<(), PanelError> {
        tracing::debug!(name = %device.name, address = %device.address, "connecting device");
        self.call(
            self.request(Method::POST, &["api", "connect_device"])
                .json(&device),
        )
        .await?;
        Ok(())
    }
}
