use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a venue in the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub i64);

impl VenueId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer id.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VenueId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
