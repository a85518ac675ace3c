//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 2D integer coordinate on a blueprint canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when the two points share neither coordinate
    pub fn differs_on_both_axes(&self, other: &Self) -> bool {
        self.x != other.x && self.y != other.y
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Composite identity of a blueprint: (author, name)
///
/// Ordering is author first, then name, which gives listings a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display(fmt = "{}/{}", author, name)]
pub struct BlueprintKey {
    pub author: String,
    pub name: String,
}

impl BlueprintKey {
    pub fn new(author: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
        }
    }
}

/// Blueprint revision counter
pub type Version = u64;

/// Version assigned to a freshly created blueprint
pub const INITIAL_VERSION: Version = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_value_semantics() {
        let a = Point::new(10, 20);
        let b: Point = (10, 20).into();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "(10, 20)");
    }

    #[test]
    fn test_differs_on_both_axes() {
        let origin = Point::new(10, 10);
        assert!(origin.differs_on_both_axes(&Point::new(20, 20)));
        assert!(!origin.differs_on_both_axes(&Point::new(10, 20)));
        assert!(!origin.differs_on_both_axes(&Point::new(20, 10)));
        assert!(!origin.differs_on_both_axes(&origin));
    }

    #[test]
    fn test_key_ordering() {
        let mut keys = vec![
            BlueprintKey::new("juan", "MyPlane"),
            BlueprintKey::new("andres", "MyPlane2"),
            BlueprintKey::new("andres", "MyPlane"),
        ];
        keys.sort();
        assert_eq!(keys[0], BlueprintKey::new("andres", "MyPlane"));
        assert_eq!(keys[1], BlueprintKey::new("andres", "MyPlane2"));
        assert_eq!(keys[2].author, "juan");
    }
}
