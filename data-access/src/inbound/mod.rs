//! Inbound adapters driving the domain from a view layer.

pub mod controllers;
