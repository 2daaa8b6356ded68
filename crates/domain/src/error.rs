//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PanelError`]
//! via `#[from]` (or an explicit `From` impl for adapter errors).

/// Message surfaced to users when a request never produced a response.
pub const NETWORK_ERROR_MESSAGE: &str = "network error, please try again later";

/// Base error for every fallible operation in autopanel.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The backend answered, but with `status != "success"`.
    #[error("rejected by backend")]
    Rejected(#[from] RejectedError),

    /// The request failed before a usable answer was received.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PanelError {
    /// Text to show the user for this failure.
    ///
    /// Backend messages are returned verbatim; `fallback` is used when the
    /// backend rejected the call without saying why.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::NotFound(err) => err.to_string(),
            Self::Rejected(err) => err
                .message
                .clone()
                .unwrap_or_else(|| fallback.to_string()),
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("task list must not be empty")]
    EmptyTaskList,

    #[error("cron expression must not be empty")]
    EmptyCron,

    #[error("a trigger is required")]
    MissingTrigger,

    #[error("interval end date precedes its start date")]
    InvalidTriggerWindow,

    #[error("switch option `{option}` must have exactly 2 cases, found {found}")]
    SwitchCaseCount { option: String, found: usize },

    #[error("unsupported interface version {0}")]
    UnsupportedSchemaVersion(u64),

    #[error("malformed interface schema: {0}")]
    MalformedSchema(String),

    #[error("invalid value for `{key}`: {message}")]
    InvalidInput { key: String, message: String },

    #[error("invalid timestamp")]
    InvalidTimestamp,

    #[error("unknown or read-only setting `{0}`")]
    UnknownSetting(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Application-level failure reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", message.as_deref().unwrap_or("request rejected"))]
pub struct RejectedError {
    pub message: Option<String>,
}

impl RejectedError {
    #[must_use]
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }
}
