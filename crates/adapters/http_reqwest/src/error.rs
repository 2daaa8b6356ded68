//! HTTP adapter error types.

use autopanel_domain::error::PanelError;

/// Errors specific to the HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The configured base URL is unusable.
    #[error("invalid backend base URL `{0}`")]
    InvalidBaseUrl(String),

    /// The request never produced a response.
    #[error("HTTP request failed")]
    Request(#[source] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// The response body is not the expected JSON.
    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),

    /// A successful envelope lacks its payload field.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    /// A domain-level error (rejection, malformed schema, etc.).
    #[error("domain error")]
    Domain(#[source] PanelError),
}

impl HttpError {
    /// Convert into a [`PanelError`] for propagation across port boundaries.
    ///
    /// Everything but a domain error is a transport failure.
    #[must_use]
    pub fn into_domain(self) -> PanelError {
        match self {
            Self::Domain(err) => err,
            other => PanelError::Transport(Box::new(other)),
        }
    }
}

impl From<HttpError> for PanelError {
    fn from(err: HttpError) -> Self {
        err.into_domain()
    }
}

impl From<PanelError> for HttpError {
    fn from(err: PanelError) -> Self {
        Self::Domain(err)
    }
}
