//! Reqwest-backed resource source adapter.
//!
//! This adapter owns transport details only: the GET itself, HTTP error
//! mapping and JSON decoding into the domain payload. It sends no query
//! parameters, custom headers or credentials.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use super::dto::RecordsDto;
use crate::domain::ports::{NamedResourceSource, ResourcePayload, ResourceSourceError};

/// Resource source performing one HTTP GET per fetch.
#[derive(Debug, Clone)]
pub struct HttpNamedResourceSource {
    client: Client,
}

impl HttpNamedResourceSource {
    /// Build an adapter without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(None)
    }

    /// Build an adapter, optionally bounding each request by `timeout`.
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use data_access::domain::{LoadingStatusRegistry, OperationName};
    /// use data_access::outbound::http::HttpNamedResourceSource;
    ///
    /// let source = HttpNamedResourceSource::with_timeout(Some(Duration::from_secs(5)))?;
    /// let registry = LoadingStatusRegistry::new(Arc::new(source));
    /// assert!(!registry.is_loading(&OperationName::sf_street_names()));
    /// # Ok::<(), reqwest::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let builder = Client::builder();
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl NamedResourceSource for HttpNamedResourceSource {
    async fn fetch(&self, uri: &Url) -> Result<ResourcePayload, ResourceSourceError> {
        let response = self
            .client
            .get(uri.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_records(body.as_ref())
    }
}

fn parse_records(body: &[u8]) -> Result<ResourcePayload, ResourceSourceError> {
    let decoded: RecordsDto = serde_json::from_slice(body).map_err(|error| {
        ResourceSourceError::decode(format!("expected a JSON array of records: {error}"))
    })?;
    Ok(decoded.into_domain_payload())
}

fn map_transport_error(error: reqwest::Error) -> ResourceSourceError {
    if error.is_timeout() {
        ResourceSourceError::transport(format!("request timed out: {error}"))
    } else {
        ResourceSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ResourceSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        preview
    };
    ResourceSourceError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
