//! Driven port for fetching a named remote resource.
//!
//! The domain owns the payload shape and the failure taxonomy so the
//! registry and the controllers stay adapter-agnostic.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::define_port_error;

/// Records returned by a successful fetch, in response order.
///
/// Records are opaque JSON values; street-name entries such as
/// `{"street":"Market St"}` are passed through untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourcePayload {
    records: Vec<Value>,
}

impl ResourcePayload {
    /// Wrap decoded records.
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Borrow the records.
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the payload holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the payload and return its records.
    pub fn into_records(self) -> Vec<Value> {
        self.records
    }
}

impl From<Vec<Value>> for ResourcePayload {
    fn from(records: Vec<Value>) -> Self {
        Self::new(records)
    }
}

define_port_error! {
    /// Errors surfaced while fetching a resource.
    pub enum ResourceSourceError {
        /// The request never produced a response (connection, DNS, timeout).
        Transport { message: String } =>
            "resource transport failed: {message}",
        /// The endpoint answered with a non-success status.
        Status { status: u16, message: String } =>
            "resource request returned status {status}: {message}",
        /// The response body was not a JSON array.
        Decode { message: String } =>
            "resource response decode failed: {message}",
    }
}

/// Port for issuing one GET against a resource URI.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NamedResourceSource: Send + Sync {
    /// Fetch and decode the JSON array served at `uri`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use data_access::domain::ports::{FixtureNamedResourceSource, NamedResourceSource};
    ///
    /// let source = FixtureNamedResourceSource;
    /// let uri = url::Url::parse("http://data.sfgov.org/resource/6d9h-4u5v.json")?;
    /// let payload = source.fetch(&uri).await?;
    /// assert!(payload.is_empty());
    /// ```
    async fn fetch(&self, uri: &Url) -> Result<ResourcePayload, ResourceSourceError>;
}

/// Fixture implementation returning an empty payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureNamedResourceSource;

#[async_trait]
impl NamedResourceSource for FixtureNamedResourceSource {
    async fn fetch(&self, _uri: &Url) -> Result<ResourcePayload, ResourceSourceError> {
        Ok(ResourcePayload::default())
    }
}
