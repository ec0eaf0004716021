//! Controller that delegates loading to the shared registry.

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use url::Url;

use super::StreetNamesView;
use crate::domain::ports::{ResourcePayload, ResourceSourceError};
use crate::domain::{FetchOutcome, LoadingStatusRegistry, OperationName};

/// Street-name controller backed by [`LoadingStatusRegistry`].
///
/// The controller keeps no state of its own: the flag and the records are
/// both read from the registry under [`OperationName::sf_street_names`].
pub struct BetterExampleController {
    registry: Arc<LoadingStatusRegistry>,
    name: OperationName,
}

impl BetterExampleController {
    /// Wrap the registry without starting a load.
    pub fn new(registry: Arc<LoadingStatusRegistry>) -> Self {
        Self {
            registry,
            name: OperationName::sf_street_names(),
        }
    }

    /// Kick off the street-name load in the registry and return immediately.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn start(
        registry: Arc<LoadingStatusRegistry>,
        uri: Url,
    ) -> (
        Self,
        JoinHandle<Result<ResourcePayload, ResourceSourceError>>,
    ) {
        let controller = Self::new(registry);
        let handle = controller
            .registry
            .spawn_named_resource(controller.name.clone(), uri);
        (controller, handle)
    }

    /// Failure stored for the most recent load, if it failed.
    pub fn last_error(&self) -> Option<ResourceSourceError> {
        match self.registry.outcome(&self.name)? {
            FetchOutcome::Failed(error) => Some(error),
            FetchOutcome::Loaded(_) => None,
        }
    }
}

impl StreetNamesView for BetterExampleController {
    fn street_names_loading(&self) -> bool {
        self.registry.is_loading(&self.name)
    }

    fn street_names(&self) -> Vec<Value> {
        self.registry
            .payload(&self.name)
            .map(ResourcePayload::into_records)
            .unwrap_or_default()
    }
}
