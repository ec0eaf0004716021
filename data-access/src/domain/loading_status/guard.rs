//! Per-key in-flight accounting shared by the registry and its spawned fetches.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::FetchOutcome;
use crate::domain::OperationName;

/// Loading state tracked for one operation name.
#[derive(Debug, Default)]
pub(super) struct OperationStatus {
    pub(super) in_flight: u32,
    pub(super) outcome: Option<FetchOutcome>,
}

impl OperationStatus {
    fn release(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

type StatusMap = HashMap<OperationName, OperationStatus>;

pub(super) type StatusTable = Arc<Mutex<StatusMap>>;

/// Every update is a single assignment, so a poisoned table is still
/// consistent and is recovered instead of propagated.
pub(super) fn lock(table: &StatusTable) -> MutexGuard<'_, StatusMap> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds one unit of the in-flight count for `name` until completed or dropped.
pub(super) struct InFlightGuard {
    table: StatusTable,
    name: OperationName,
    released: bool,
}

impl InFlightGuard {
    pub(super) fn enter(table: &StatusTable, name: OperationName) -> Self {
        {
            let mut statuses = lock(table);
            let status = statuses.entry(name.clone()).or_default();
            status.in_flight = status.in_flight.saturating_add(1);
        }
        Self {
            table: Arc::clone(table),
            name,
            released: false,
        }
    }

    pub(super) fn name(&self) -> &OperationName {
        &self.name
    }

    /// Store the outcome and release the count under one lock so readers
    /// never observe an idle key without its result.
    pub(super) fn complete(mut self, outcome: FetchOutcome) {
        let mut statuses = lock(&self.table);
        let status = statuses.entry(self.name.clone()).or_default();
        status.outcome = Some(outcome);
        status.release();
        self.released = true;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Some(status) = lock(&self.table).get_mut(&self.name) {
            status.release();
        }
    }
}
