//! Keys identifying one logical fetch in the loading-status registry.

use std::fmt;

use thiserror::Error;

/// Key under which the San Francisco street-name fetch is tracked.
pub const SF_STREET_NAMES: &str = "SFStreetNames";

/// Name of a logical fetch, such as `SFStreetNames`.
///
/// ## Invariants
/// - non-empty after trimming whitespace;
/// - no leading or trailing whitespace.
///
/// # Examples
/// ```
/// use data_access::domain::OperationName;
///
/// let name = OperationName::new("SFStreetNames").expect("valid name");
/// assert_eq!(name.as_str(), "SFStreetNames");
/// assert_eq!(name, OperationName::sf_street_names());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationName(String);

impl OperationName {
    /// Validate and wrap an operation name.
    pub fn new(value: impl Into<String>) -> Result<Self, OperationNameValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(OperationNameValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(OperationNameValidationError::SurroundingWhitespace);
        }
        Ok(Self(raw))
    }

    /// The predefined street-name operation.
    pub fn sf_street_names() -> Self {
        Self(SF_STREET_NAMES.to_owned())
    }

    /// Borrow the underlying name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for OperationName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for OperationName {
    type Error = OperationNameValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validation errors returned when constructing [`OperationName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationNameValidationError {
    /// Name is empty after trimming whitespace.
    #[error("operation name must not be empty")]
    Empty,
    /// Name has leading or trailing whitespace.
    #[error("operation name must not contain surrounding whitespace")]
    SurroundingWhitespace,
}
