//! Point-reduction filters
//!
//! Each filter rewrites a blueprint's point path in place. Filters know
//! nothing about the store; the service decides which blueprint to feed them
//! and whether the result is written back.

use serde::{Deserialize, Serialize};

use super::schema::Blueprint;
use crate::core::types::Point;

/// A point-reduction strategy
pub trait PointFilter: Send + Sync {
    /// Reduce a point sequence, returning the kept points in input order
    fn reduce(&self, points: &[Point]) -> Vec<Point>;

    /// Tag identifying this strategy
    fn kind(&self) -> FilterKind;

    /// Replace the blueprint's points with the reduced sequence
    fn apply(&self, blueprint: &mut Blueprint) {
        blueprint.points = self.reduce(&blueprint.points);
    }
}

/// Keeps only odd-indexed points (1, 3, 5, ...)
///
/// Purely positional: index 0 is always dropped, so a single-point path
/// becomes empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripEven;

impl PointFilter for StripEven {
    fn reduce(&self, points: &[Point]) -> Vec<Point> {
        points.iter().skip(1).step_by(2).copied().collect()
    }

    fn kind(&self) -> FilterKind {
        FilterKind::StripEven
    }
}

/// Drops points that share a coordinate with their predecessor
///
/// The first point is always kept. A later point survives only when both its
/// x and y differ from the previous *input* point, not the previous kept one.
/// Paths of zero or one point are returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupeAdjacent;

impl PointFilter for DedupeAdjacent {
    fn reduce(&self, points: &[Point]) -> Vec<Point> {
        let Some(first) = points.first() else {
            return Vec::new();
        };

        let mut kept = Vec::with_capacity(points.len());
        kept.push(*first);
        kept.extend(
            points
                .windows(2)
                .filter(|pair| pair[1].differs_on_both_axes(&pair[0]))
                .map(|pair| pair[1]),
        );
        kept
    }

    fn kind(&self) -> FilterKind {
        FilterKind::DedupeAdjacent
    }
}

/// Caller-facing tag selecting a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    StripEven,
    #[default]
    DedupeAdjacent,
}

impl FilterKind {
    pub const ALL: [FilterKind; 2] = [FilterKind::StripEven, FilterKind::DedupeAdjacent];

    /// Instantiate the filter this tag names
    pub fn build(self) -> Box<dyn PointFilter> {
        match self {
            FilterKind::StripEven => Box::new(StripEven),
            FilterKind::DedupeAdjacent => Box::new(DedupeAdjacent),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::StripEven => "strip-even",
            FilterKind::DedupeAdjacent => "dedupe-adjacent",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown filter '{}' (expected one of: strip-even, dedupe-adjacent)",
                    s
                )
            })
    }
}
