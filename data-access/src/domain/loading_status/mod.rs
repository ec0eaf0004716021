//! Named, queryable loading-status registry.
//!
//! Views poll the registry by operation name to decide whether to render a
//! loading indicator; the registry performs the fetch through the injected
//! [`NamedResourceSource`] and keeps the last outcome per name so the
//! payload can be read back alongside the flag.
//!
//! Each name carries an in-flight count rather than a bare boolean, so
//! overlapping loads under one name keep the flag raised until the last of
//! them completes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::OperationName;
use crate::domain::ports::{NamedResourceSource, ResourcePayload, ResourceSourceError};

mod guard;

use guard::{InFlightGuard, StatusTable, lock};

/// Result of one completed fetch, stored under its operation name.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The fetch succeeded with this payload.
    Loaded(ResourcePayload),
    /// The fetch failed.
    Failed(ResourceSourceError),
}

impl FetchOutcome {
    fn from_result(result: &Result<ResourcePayload, ResourceSourceError>) -> Self {
        match result {
            Ok(payload) => Self::Loaded(payload.clone()),
            Err(error) => Self::Failed(error.clone()),
        }
    }
}

/// Registry mapping operation names to their loading state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use data_access::domain::ports::FixtureNamedResourceSource;
/// use data_access::domain::{LoadingStatusRegistry, OperationName};
///
/// let registry = LoadingStatusRegistry::new(Arc::new(FixtureNamedResourceSource));
/// let name = OperationName::sf_street_names();
/// assert!(!registry.is_loading(&name));
///
/// registry.set_loading(&name, true);
/// assert!(registry.is_loading(&name));
/// ```
pub struct LoadingStatusRegistry {
    source: Arc<dyn NamedResourceSource>,
    statuses: StatusTable,
}

impl LoadingStatusRegistry {
    /// Build an empty registry fetching through `source`.
    pub fn new(source: Arc<dyn NamedResourceSource>) -> Self {
        Self {
            source,
            statuses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Overwrite the loading flag for `name`.
    ///
    /// `true` sets the in-flight count to one and `false` clears it,
    /// regardless of any loads still outstanding.
    pub fn set_loading(&self, name: &OperationName, value: bool) {
        let mut statuses = lock(&self.statuses);
        statuses.entry(name.clone()).or_default().in_flight = u32::from(value);
    }

    /// Whether `name` has at least one outstanding load.
    ///
    /// Names that were never set report `false`.
    pub fn is_loading(&self, name: &OperationName) -> bool {
        self.in_flight(name) > 0
    }

    /// Number of outstanding loads for `name`.
    pub fn in_flight(&self, name: &OperationName) -> u32 {
        lock(&self.statuses)
            .get(name)
            .map_or(0, |status| status.in_flight)
    }

    /// Outcome of the most recently completed load for `name`.
    pub fn outcome(&self, name: &OperationName) -> Option<FetchOutcome> {
        lock(&self.statuses)
            .get(name)
            .and_then(|status| status.outcome.clone())
    }

    /// Payload of the most recently completed load when it succeeded.
    pub fn payload(&self, name: &OperationName) -> Option<ResourcePayload> {
        match self.outcome(name)? {
            FetchOutcome::Loaded(payload) => Some(payload),
            FetchOutcome::Failed(_) => None,
        }
    }

    /// Mark `name` loading, fetch `uri`, store the outcome and clear the mark.
    ///
    /// The mark is also cleared when the returned future is dropped before
    /// completion.
    ///
    /// # Errors
    ///
    /// Returns the source's [`ResourceSourceError`] when the fetch fails; the
    /// same error is stored as [`FetchOutcome::Failed`].
    pub async fn load_named_resource(
        &self,
        name: &OperationName,
        uri: &Url,
    ) -> Result<ResourcePayload, ResourceSourceError> {
        let guard = InFlightGuard::enter(&self.statuses, name.clone());
        self.fetch_under(guard, uri).await
    }

    /// Load the street-name records from `uri` under [`OperationName::sf_street_names`].
    ///
    /// # Errors
    ///
    /// See [`Self::load_named_resource`].
    pub async fn load_sf_street_names(
        &self,
        uri: &Url,
    ) -> Result<ResourcePayload, ResourceSourceError> {
        self.load_named_resource(&OperationName::sf_street_names(), uri)
            .await
    }

    /// Start a load on the Tokio runtime and return without waiting for it.
    ///
    /// `name` reports loading as soon as this returns.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn spawn_named_resource(
        self: &Arc<Self>,
        name: OperationName,
        uri: Url,
    ) -> JoinHandle<Result<ResourcePayload, ResourceSourceError>> {
        let guard = InFlightGuard::enter(&self.statuses, name);
        let registry = Arc::clone(self);
        tokio::spawn(async move { registry.fetch_under(guard, &uri).await })
    }

    async fn fetch_under(
        &self,
        guard: InFlightGuard,
        uri: &Url,
    ) -> Result<ResourcePayload, ResourceSourceError> {
        debug!(operation = %guard.name(), %uri, "named resource load started");
        let result = self.source.fetch(uri).await;
        match &result {
            Ok(payload) => info!(
                operation = %guard.name(),
                record_count = payload.len(),
                "named resource loaded"
            ),
            Err(error) => warn!(
                operation = %guard.name(),
                %uri,
                error = %error,
                "named resource load failed"
            ),
        }
        guard.complete(FetchOutcome::from_result(&result));
        result
    }
}
