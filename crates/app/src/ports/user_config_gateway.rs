//! User config gateway port — persisted session preferences.

use std::future::Future;

use autopanel_domain::error::PanelError;
use autopanel_domain::user_config::UserConfig;

/// Storage of the saved [`UserConfig`].
pub trait UserConfigGateway {
    /// Load the saved configuration; empty when nothing was saved.
    fn load_user_config(&self) -> impl Future<Output = Result<UserConfig, PanelError>> + Send;

    /// Replace the saved configuration.
    fn save_user_config(
        &self,
        config: UserConfig,
    ) -> impl Future<Output = Result<(), PanelError>> + Send;

    /// Forget the saved configuration.
    fn reset_user_config(&self) -> impl Future<Output = Result<(), PanelError>> + Send;
}
