//! Panel-wide settings — updates, notifications, appearance and runtime knobs.
//!
//! Every section and field falls back to its default when the backend omits
//! it, so a partial document loads as the defaults merged with what was sent.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub update: UpdateSettings,
    pub notification: NotificationSettings,
    pub ui: UiSettings,
    pub runtime: RuntimeSettings,
    /// Informational; never changed from the panel.
    pub about: AboutInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSettings {
    pub auto_update: bool,
    pub update_channel: UpdateChannel,
    pub proxy: String,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            auto_update: true,
            update_channel: UpdateChannel::Stable,
            proxy: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateChannel {
    #[default]
    Stable,
    Beta,
    Dev,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub enabled: bool,
    pub webhook: String,
    pub notify_on_complete: bool,
    pub notify_on_error: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            webhook: String::new(),
            notify_on_complete: true,
            notify_on_error: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiSettings {
    pub dark_mode: DarkMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

/// `true`/`false` on the wire, or the string `"auto"` to follow the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DarkModeRepr", into = "DarkModeRepr")]
pub enum DarkMode {
    #[default]
    Auto,
    On,
    Off,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DarkModeRepr {
    Flag(bool),
    Keyword(String),
}

impl TryFrom<DarkModeRepr> for DarkMode {
    type Error = String;

    fn try_from(repr: DarkModeRepr) -> Result<Self, Self::Error> {
        match repr {
            DarkModeRepr::Flag(true) => Ok(Self::On),
            DarkModeRepr::Flag(false) => Ok(Self::Off),
            DarkModeRepr::Keyword(keyword) if keyword == "auto" => Ok(Self::Auto),
            DarkModeRepr::Keyword(other) => Err(format!("unknown dark mode `{other}`")),
        }
    }
}

impl From<DarkMode> for DarkModeRepr {
    fn from(mode: DarkMode) -> Self {
        match mode {
            DarkMode::Auto => Self::Keyword("auto".to_string()),
            DarkMode::On => Self::Flag(true),
            DarkMode::Off => Self::Flag(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeSettings {
    /// Seconds.
    pub timeout: u32,
    /// Minutes.
    pub reminder_interval: u32,
    pub auto_retry: bool,
    pub max_retry_count: u32,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            timeout: 300,
            reminder_interval: 30,
            auto_retry: true,
            max_retry_count: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutInfo {
    pub version: String,
    pub author: String,
    pub github: String,
    pub license: String,
    pub description: String,
    pub contact: String,
    pub issue_url: String,
}

impl Settings {
    /// Defaults for every editable section; `about` is kept.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            about: self.about.clone(),
            ..Self::default()
        }
    }

    /// Change one field addressed as `section.field`, using wire names
    /// (`runtime.maxRetryCount`).
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownSetting`] for an unknown or `about.*` key,
    /// [`ValidationError::InvalidInput`] when `value` does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        match key {
            "update.autoUpdate" => self.update.auto_update = parse_bool(key, value)?,
            "update.updateChannel" => {
                self.update.update_channel = match value {
                    "stable" => UpdateChannel::Stable,
                    "beta" => UpdateChannel::Beta,
                    "dev" => UpdateChannel::Dev,
                    _ => return Err(invalid(key, "expected stable, beta or dev")),
                }
            }
            "update.proxy" => self.update.proxy = value.to_string(),
            "notification.enabled" => self.notification.enabled = parse_bool(key, value)?,
            "notification.webhook" => self.notification.webhook = value.to_string(),
            "notification.notifyOnComplete" => {
                self.notification.notify_on_complete = parse_bool(key, value)?;
            }
            "notification.notifyOnError" => {
                self.notification.notify_on_error = parse_bool(key, value)?;
            }
            "ui.darkMode" => {
                self.ui.dark_mode = match value {
                    "auto" => DarkMode::Auto,
                    "true" => DarkMode::On,
                    "false" => DarkMode::Off,
                    _ => return Err(invalid(key, "expected auto, true or false")),
                }
            }
            "ui.language" => self.ui.language = Some(value.to_string()),
            "ui.fontSize" => self.ui.font_size = Some(parse_number(key, value)?),
            "runtime.timeout" => self.runtime.timeout = parse_number(key, value)?,
            "runtime.reminderInterval" => self.runtime.reminder_interval = parse_number(key, value)?,
            "runtime.autoRetry" => self.runtime.auto_retry = parse_bool(key, value)?,
            "runtime.maxRetryCount" => self.runtime.max_retry_count = parse_number(key, value)?,
            _ => return Err(ValidationError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ValidationError {
    ValidationError::InvalidInput {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ValidationError> {
    value
        .parse()
        .map_err(|_| invalid(key, "expected true or false"))
}

fn parse_number(key: &str, value: &str) -> Result<u32, ValidationError> {
    value
        .parse()
        .map_err(|_| invalid(key, "expected a non-negative integer"))
}
