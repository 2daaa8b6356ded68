//! Settings gateway port — panel-wide settings.

use std::future::Future;

use autopanel_domain::error::PanelError;
use autopanel_domain::settings::Settings;

/// Storage of the panel [`Settings`].
pub trait SettingsGateway {
    /// Load the settings; omitted fields come back as their defaults.
    fn load_settings(&self) -> impl Future<Output = Result<Settings, PanelError>> + Send;

    /// Replace the stored settings.
    fn save_settings(&self, settings: Settings)
    -> impl Future<Output = Result<(), PanelError>> + Send;
}
