//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed GET of open-data resources
//!
//! Adapters are thin translators between transport representations and
//! domain types. They contain no loading-state logic.

pub mod http;
