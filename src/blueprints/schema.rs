//! Blueprint data model
//!
//! A blueprint is an author's named drawing: an ordered path of points plus a
//! revision counter. The (author, name) pair is its only identity.

use serde::{Deserialize, Serialize};

use crate::core::types::{BlueprintKey, Point, Version, INITIAL_VERSION};

/// A named, versioned path of points owned by an author
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blueprint {
    pub author: String,
    pub name: String,
    /// Drawing order matters; consecutive points form the path
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub version: Version,
}

impl Blueprint {
    /// Create a blueprint at the initial version
    pub fn new(author: impl Into<String>, name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
            points,
            version: INITIAL_VERSION,
        }
    }

    /// Convenience constructor from raw coordinate pairs
    pub fn from_coords(
        author: impl Into<String>,
        name: impl Into<String>,
        coords: &[(i32, i32)],
    ) -> Self {
        Self::new(author, name, coords.iter().copied().map(Point::from).collect())
    }

    /// Identity key of this blueprint
    pub fn key(&self) -> BlueprintKey {
        BlueprintKey::new(self.author.as_str(), self.name.as_str())
    }

    /// True if this blueprint lives under the given key
    pub fn matches(&self, author: &str, name: &str) -> bool {
        self.author == author && self.name == name
    }

    /// One-line description used by catalogue listings
    pub fn summary(&self) -> String {
        format!(
            "{} by {} ({} points, v{})",
            self.name,
            self.author,
            self.points.len(),
            self.version
        )
    }
}

impl std::fmt::Display for Blueprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} v{} [", self.author, self.name, self.version)?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", point)?;
        }
        write!(f, "]")
    }
}
