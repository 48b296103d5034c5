//! Lifecycle unit names
//!
//! A unit name identifies one lifecycle folder under `.lifecycle/`. It must
//! be a single path segment: anything with a separator could escape the
//! lifecycle root.

use crate::error::HandoffError;
use serde::Serialize;

/// Validated name of a lifecycle unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UnitName(String);

impl UnitName {
    /// Validate a caller-supplied unit name.
    ///
    /// Rejects empty names, names containing `/` or `\` (either platform's
    /// separator), and the `.`/`..` segments.
    pub fn new(name: impl Into<String>) -> Result<Self, HandoffError> {
        let name = name.into();

        if name.is_empty() {
            return Err(HandoffError::invalid_unit_name(name, "name is empty"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(HandoffError::invalid_unit_name(
                name,
                "name must be a single path segment (no '/' or '\\')",
            ));
        }
        if name == "." || name == ".." {
            return Err(HandoffError::invalid_unit_name(
                name,
                "name must not be '.' or '..'",
            ));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
