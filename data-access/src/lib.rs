//! Street-name data access: a named loading-status registry, its HTTP
//! source adapter and the view controllers built on top of them.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
