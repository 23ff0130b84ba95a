pub mod site_api;

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, StatusCode, Url,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::sync::fetch_state::StateError;
use crate::sync::form_edit::FormError;

const APPLICATION_JSON: &str = "application/json";
pub const INVALID_SERVER_RESPONSE: &str = "Invalid server response, expected JSON";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Api error {0}: {1}")]
    Api(StatusCode, String),
    #[error("Server rejected the request: {0}")]
    Rejected(String),
    #[error("Deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not load the list: {0}")]
    RemoteFetch(String),
    #[error("Could not save the record: {0}")]
    RemoteSave(String),
    #[error("Could not delete the record: {0}")]
    RemoteDelete(String),
    #[error("Invalid username or password")]
    Authentication,
    #[error("Admin session required, run `webfolio login` first")]
    NotAuthenticated,
    #[error("Could not send the message: {0}")]
    Contact(String),
    #[error("Another operation is still in progress")]
    Busy,
    #[error("Operation is not supported for {0}")]
    Unsupported(&'static str),
    #[error("Record with ID == {0} not found")]
    NotFound(String),
    #[error("Price must be a non-negative number, got {0}")]
    InvalidPrice(String),
    #[error("Delete cancelled by user")]
    DeleteCancelledByUser,
    #[error("The string entered must be a URL")]
    InvalidUrl,
    #[error("Failed to retrieve the user's directories")]
    NotFoundUserDir,
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Form(#[from] FormError),
}

impl ApiError {
    /// Human readable message without the error category prefix.
    ///
    /// For server failures this is the raw response body (or the `error` field),
    /// which is what the site shows in its notifications.
    pub fn message(&self) -> String {
        match self {
            ApiError::Api(_, body) => body.clone(),
            ApiError::Rejected(message)
            | ApiError::RemoteFetch(message)
            | ApiError::RemoteSave(message)
            | ApiError::RemoteDelete(message)
            | ApiError::Contact(message) => message.clone(),
            ApiError::Reqwest(e) => e.to_string(),
            ApiError::Serde(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Text of a non-null `error` field
fn error_field(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Basic api client
pub struct BaseApiClient {
    client: Client,
    pub base_url: Url,
}

impl BaseApiClient {
    fn build_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn get_default_headers() -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers
    }

    /// Normalize a response into the decoded payload or an error message.
    ///
    /// Non-2xx or non-JSON responses keep the body text as the message, a JSON
    /// object with an `error` field is a rejection even on 200.
    ///
    /// With `require_json` unset the content type is not checked, the body only
    /// has to parse as JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        require_json: bool,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let is_json = !require_json
            || response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.contains(APPLICATION_JSON));
        let body = response.text().await?;

        if !status.is_success() || !is_json {
            warn!(%status, is_json, "unexpected response from server");
            let message = if body.trim().is_empty() {
                INVALID_SERVER_RESPONSE.to_string()
            } else {
                serde_json::from_str::<Value>(&body)
                    .ok()
                    .as_ref()
                    .and_then(error_field)
                    .unwrap_or(body)
            };
            return Err(ApiError::Api(status, message));
        }

        let value: Value = serde_json::from_str(&body)?;
        if let Some(message) = error_field(&value) {
            return Err(ApiError::Rejected(message));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .default_headers(Self::get_default_headers())
            .timeout(timeout)
            .build()?;

        // Url::join drops the last path segment unless the base ends with a slash
        let parse_base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(Self {
            client,
            base_url: parse_base_url,
        })
    }

    pub async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        self.handle_response(response, true).await
    }

    pub async fn post_json<T: serde::de::DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        self.handle_response(response, true).await
    }

    /// `post_json` for scripts that answer JSON without labelling it as such
    pub async fn post_json_unlabelled<T: serde::de::DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        self.handle_response(response, false).await
    }
}
