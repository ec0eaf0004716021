//! Controller that fetches for itself and ignores failures.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

use super::{SharedScope, StreetNamesView, ViewScope, lock_scope};
use crate::domain::ports::NamedResourceSource;

/// Street-name controller with fetch logic embedded in the view layer.
///
/// The indicator starts raised and is only lowered by a successful fetch.
/// A failed fetch changes nothing, so the view keeps showing the indicator
/// with an empty list.
pub struct BadExampleController {
    scope: SharedScope,
}

impl BadExampleController {
    /// Raise the indicator and start fetching `uri` on the Tokio runtime.
    ///
    /// The returned handle resolves once the fetch has finished, whatever
    /// its outcome.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn start(source: Arc<dyn NamedResourceSource>, uri: Url) -> (Self, JoinHandle<()>) {
        let scope = Arc::new(Mutex::new(ViewScope::loading()));
        let task_scope = Arc::clone(&scope);
        let handle = tokio::spawn(async move {
            match source.fetch(&uri).await {
                Ok(payload) => {
                    let mut view = lock_scope(&task_scope);
                    view.street_names = payload.into_records();
                    view.street_names_loading = false;
                }
                Err(error) => {
                    debug!(%uri, error = %error, "street names fetch failed; ignored");
                }
            }
        });
        (Self { scope }, handle)
    }
}

impl StreetNamesView for BadExampleController {
    fn street_names_loading(&self) -> bool {
        lock_scope(&self.scope).street_names_loading
    }

    fn street_names(&self) -> Vec<Value> {
        lock_scope(&self.scope).street_names.clone()
    }
}
