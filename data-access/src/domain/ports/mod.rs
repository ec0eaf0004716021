//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod named_resource_source;

#[cfg(test)]
pub use named_resource_source::MockNamedResourceSource;
pub use named_resource_source::{
    FixtureNamedResourceSource, NamedResourceSource, ResourcePayload, ResourceSourceError,
};
