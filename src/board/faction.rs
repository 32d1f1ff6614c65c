//! Faction identity.
//!
//! A faction is the "color" shared by every territory under common control.
//! It carries no state of its own and only serves as a grouping key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque faction label such as `blue` or `red`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Faction(String);

impl Faction {
    /// Creates a faction from any string-like label.
    pub fn new(label: impl Into<String>) -> Self {
        Faction(label.into())
    }

    /// Returns the faction label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Faction {
    fn from(label: &str) -> Self {
        Faction(label.to_string())
    }
}

impl From<String> for Faction {
    fn from(label: String) -> Self {
        Faction(label)
    }
}
