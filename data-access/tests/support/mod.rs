//! Shared helpers for integration tests.

#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

pub mod stub_server;

pub use stub_server::{CannedResponse, StubServer};
