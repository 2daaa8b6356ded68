//! Shared reqwest client and the backend response envelope.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use autopanel_domain::error::RejectedError;
use autopanel_domain::scheduler::{ScheduledTask, TaskExecution};
use autopanel_domain::settings::Settings;
use autopanel_domain::user_config::UserConfig;

use crate::config::HttpConfig;
use crate::error::HttpError;

/// Common wrapper of backend answers: `{"status": "success" | "failed", ...}`.
///
/// Only the payload field relevant to the call is expected to be present.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tasks: Option<Vec<ScheduledTask>>,
    #[serde(default)]
    pub task: Option<ScheduledTask>,
    #[serde(default)]
    pub executions: Option<Vec<TaskExecution>>,
    #[serde(default)]
    pub config: Option<UserConfig>,
    #[serde(default)]
    pub data: Option<Settings>,
}

impl Envelope {
    /// Turn a non-`success` status into a rejection.
    fn accepted(self) -> Result<Self, HttpError> {
        check_status(&self.status, self.message.clone())?;
        Ok(self)
    }
}

/// Reject any `status` other than `"success"`, carrying the server message.
pub(crate) fn check_status(status: &str, message: Option<String>) -> Result<(), HttpError> {
    if status == "success" {
        return Ok(());
    }
    tracing::debug!(%status, ?message, "backend rejected request");
    Err(HttpError::Domain(RejectedError::new(message).into()))
}

/// Client for the backend REST API; implements every gateway port.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build a backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidBaseUrl`] if the base URL cannot carry a
    /// path, or [`HttpError::Client`] if the reqwest client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| HttpError::InvalidBaseUrl(format!("{}: {err}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(HttpError::InvalidBaseUrl(config.base_url.clone()));
        }
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build().map_err(HttpError::Client)?,
            base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL extended by `segments`, each percent-encoded as one segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        tracing::debug!(%method, %url, "sending request");
        self.client.request(method, url)
    }

    /// Send and decode a raw JSON body.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, HttpError> {
        let response = request.send().await.map_err(HttpError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status));
        }
        let body = response.bytes().await.map_err(HttpError::Request)?;
        serde_json::from_slice(&body).map_err(HttpError::Decode)
    }

    /// Send, decode the envelope and check its status.
    pub(crate) async fn call(&self, request: RequestBuilder) -> Result<Envelope, HttpError> {
        self.fetch_json::<Envelope>(request).await?.accepted()
    }
}
