//! [`SettingsGateway`] over `/api/settings`.

use reqwest::Method;

use autopanel_app::ports::SettingsGateway;
use autopanel_domain::error::PanelError;
use autopanel_domain::settings::Settings;

use crate::client::HttpBackend;
use crate::error::HttpError;

const PATH: &[&str] = &["api", "settings"];

impl SettingsGateway for HttpBackend {
    async fn load_settings(&self) -> Result<Settings, PanelError> {
        let envelope = self.call(self.request(Method::GET, PATH)).await?;
        Ok(envelope.data.ok_or(HttpError::MissingField("data"))?)
    }

    async fn save_settings(&self, settings: Settings) -> Result<(), PanelError> {
        self.call(self.request(Method::POST, PATH).json(&settings))
            .await?;
        Ok(())
    }
}
