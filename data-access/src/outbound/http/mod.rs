//! HTTP outbound adapters.
//!
//! This module provides a thin reqwest implementation of the
//! `NamedResourceSource` port.

mod dto;
mod http_source;

pub use http_source::HttpNamedResourceSource;
