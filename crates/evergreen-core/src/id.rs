//! Stable element identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a placed tree element for the lifetime of a session.
///
/// The value is the element's index in the generated layout, so it is dense
/// and stable until the scene is rebuilt.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Create an ElementId from a layout index
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the raw u32 value
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Layout index this id was created from
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
