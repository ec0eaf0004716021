//! Controller that fetches for itself and settles on every outcome.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use url::Url;

use super::{SharedScope, StreetNamesView, ViewScope, lock_scope};
use crate::domain::ports::{NamedResourceSource, ResourceSourceError};

/// Street-name controller that lowers its indicator on success and failure.
pub struct SimpleGoodExampleController {
    scope: SharedScope,
}

impl SimpleGoodExampleController {
    /// Raise the indicator and start fetching `uri` on the Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn start(source: Arc<dyn NamedResourceSource>, uri: Url) -> (Self, JoinHandle<()>) {
        let scope = Arc::new(Mutex::new(ViewScope::loading()));
        let task_scope = Arc::clone(&scope);
        let handle = tokio::spawn(async move {
            let result = source.fetch(&uri).await;
            let mut view = lock_scope(&task_scope);
            match result {
                Ok(payload) => {
                    info!(record_count = payload.len(), "street names loaded");
                    view.street_names = payload.into_records();
                    view.last_error = None;
                }
                Err(error) => {
                    warn!(%uri, error = %error, "street names fetch failed");
                    view.last_error = Some(error);
                }
            }
            view.street_names_loading = false;
        });
        (Self { scope }, handle)
    }

    /// Failure from the fetch, if it failed.
    pub fn last_error(&self) -> Option<ResourceSourceError> {
        lock_scope(&self.scope).last_error.clone()
    }
}

impl StreetNamesView for SimpleGoodExampleController {
    fn street_names_loading(&self) -> bool {
        lock_scope(&self.scope).street_names_loading
    }

    fn street_names(&self) -> Vec<Value> {
        lock_scope(&self.scope).street_names.clone()
    }
}
