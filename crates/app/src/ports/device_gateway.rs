//! Device gateway port — discovery and connection.

use std::future::Future;

use autopanel_domain::device::Device;
use autopanel_domain::error::PanelError;

pub trait DeviceGateway {
    /// Devices currently visible to the backend.
    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, PanelError>> + Send;

    /// Connect the backend to `device`; later runs use it.
    fn connect_device(&self, device: Device)
    -> impl Future<Output = Result<(), PanelError>> + Send;
}
