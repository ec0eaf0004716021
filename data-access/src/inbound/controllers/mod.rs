//! View-level controllers contrasting three ways of loading street names.
//!
//! - [`BadExampleController`] fetches inside the controller and swallows
//!   failures, leaving its loading indicator raised.
//! - [`SimpleGoodExampleController`] still fetches inside the controller but
//!   clears the indicator on every completion and keeps the error.
//! - [`BetterExampleController`] delegates to the shared
//!   [`LoadingStatusRegistry`](crate::domain::LoadingStatusRegistry) and
//!   reads both the flag and the payload back from it.
//!
//! Every controller exposes the same [`StreetNamesView`] to the rendering
//! layer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::domain::ports::ResourceSourceError;

mod bad_example;
mod better_example;
mod simple_good_example;

pub use bad_example::BadExampleController;
pub use better_example::BetterExampleController;
pub use simple_good_example::SimpleGoodExampleController;

/// Fields a view reads to render the street-name list.
pub trait StreetNamesView: Send + Sync {
    /// Whether the loading indicator should be shown.
    fn street_names_loading(&self) -> bool;

    /// Records to render; empty until a load succeeds.
    fn street_names(&self) -> Vec<Value>;
}

/// Controller-owned view state for the variants that fetch themselves.
#[derive(Debug, Clone)]
struct ViewScope {
    street_names_loading: bool,
    street_names: Vec<Value>,
    last_error: Option<ResourceSourceError>,
}

impl ViewScope {
    fn loading() -> Self {
        Self {
            street_names_loading: true,
            street_names: Vec::new(),
            last_error: None,
        }
    }
}

type SharedScope = Arc<Mutex<ViewScope>>;

fn lock_scope(scope: &SharedScope) -> MutexGuard<'_, ViewScope> {
    scope.lock().unwrap_or_else(PoisonError::into_inner)
}
