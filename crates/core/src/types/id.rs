//! Newtype ID for type-safe car references.

use serde::{Deserialize, Serialize};

/// Identifier of a car record in the catalog.
///
/// IDs are opaque strings assigned by the dataset (e.g. `"car-001"`). They
/// uniquely determine a record and never change for the lifetime of the
/// catalog, which is what makes them safe to persist in the wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(String);

impl CarId {
    /// Create a new ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CarId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CarId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<CarId> for String {
    fn from(id: CarId) -> Self {
        id.0
    }
}
