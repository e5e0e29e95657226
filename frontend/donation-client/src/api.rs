// frontend/donation-client/src/api.rs
//
// One request path for every widget: build the endpoint, send, read the body
// once, keep it as JSON when it parses and as text otherwise. Widgets then
// interpret the typed `ApiResponse` for their own region.

use reqwest::{multipart::Form, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{config::Config, error::ClientError};

// ─────────────────────────────────────────────────────────
// Response
// ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

/// Status and body of a finished call.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    status: StatusCode,
    body: Body,
}

impl ApiResponse {
    pub fn new(status: StatusCode, text: String) -> Self {
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(json) => Body::Json(json),
            Err(_) => Body::Text(text),
        };
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Decode the body as `T`. A text body is a decode error.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        let decoded = match &self.body {
            Body::Json(json) => serde_json::from_value(json.clone())?,
            Body::Text(text) => serde_json::from_str(text)?,
        };
        Ok(decoded)
    }

    /// Human readable message carried by the body, if any.
    pub fn message(&self) -> Option<String> {
        let message = match &self.body {
            Body::Json(Value::Object(fields)) => fields.get("message")?.as_str()?.to_string(),
            Body::Json(Value::String(text)) => text.clone(),
            Body::Json(_) => return None,
            Body::Text(text) => text.clone(),
        };
        let message = message.trim();
        (!message.is_empty()).then(|| message.to_string())
    }
}

// ─────────────────────────────────────────────────────────
// Backend
// ─────────────────────────────────────────────────────────

/// Handle on the donation backend. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Backend {
    http: reqwest::Client,
    base: Url,
}

impl Backend {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, config.backend_url.clone()))
    }

    pub fn with_client(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base` with `segments` appended, each percent-encoded as a single
    /// path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "Backend responded");
        Ok(ApiResponse::new(status, text))
    }

    /// `POST /donate` with a multipart body.
    pub async fn post_donation(&self, form: Form) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(&["donate"])?;
        debug!(%url, "Posting donation");
        self.send(self.http.post(url).multipart(form)).await
    }

    /// `GET /bank-accounts`.
    pub async fn list_bank_accounts(&self) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(&["bank-accounts"])?;
        debug!(%url, "Fetching bank accounts");
        self.send(self.http.get(url)).await
    }

    /// `GET /donation-status/{reference}`.
    pub async fn donation_status(&self, reference: &str) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(&["donation-status", reference])?;
        debug!(%url, "Fetching donation status");
        self.send(self.http.get(url)).await
    }
}
