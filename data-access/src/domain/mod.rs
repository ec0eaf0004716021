//! Domain primitives and services.
//!
//! Purpose: model named fetch operations and their loading state
//! independently of the HTTP transport and of any view layer.
//!
//! Public surface:
//! - `OperationName` — validated key for one logical fetch.
//! - `LoadingStatusRegistry` — per-name loading flags and stored outcomes.
//! - `FetchOutcome` — the result stored for a completed load.
//! - `ports` — the driven `NamedResourceSource` port and its payload/error types.

pub mod loading_status;
pub mod operation_name;
pub mod ports;

pub use self::loading_status::{FetchOutcome, LoadingStatusRegistry};
pub use self::operation_name::{OperationName, OperationNameValidationError, SF_STREET_NAMES};
