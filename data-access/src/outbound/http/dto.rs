//! DTOs for decoding resource JSON responses.
//!
//! Records stay opaque; the DTO only enforces the top-level array shape.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::ResourcePayload;

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(super) struct RecordsDto(Vec<Value>);

impl RecordsDto {
    pub(super) fn into_domain_payload(self) -> ResourcePayload {
        ResourcePayload::new(self.0)
    }
}
