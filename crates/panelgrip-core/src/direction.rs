//! Resize directions and the per-edge geometry table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Attribute carrying a bar's direction (`"top"`, `"right"`, `"bottom"`, `"left"`).
pub const DIRECTION_ATTR: &str = "data-adjust-resize-direction";
/// Attribute carrying the cursor style assigned to a bar.
pub const CURSOR_ATTR: &str = "data-adjust-resize-cursor";

/// The edge of the target a bar is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

/// Axis a direction resizes along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left and right edges; changes width.
    Horizontal,
    /// Top and bottom edges; changes height.
    Vertical,
}

/// Static geometry for one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSpec {
    pub axis: Axis,
    /// Multiplier applied to the pointer delta along `axis`.
    pub sign: f64,
    /// CSS property the bar is offset along (`top`, `right`, ...).
    pub edge: &'static str,
    /// CSS property pinned to zero on the cross axis.
    pub anchor: &'static str,
}

const EDGES: [EdgeSpec; 4] = [
    EdgeSpec {
        axis: Axis::Vertical,
        sign: -1.0,
        edge: "top",
        anchor: "left",
    },
    EdgeSpec {
        axis: Axis::Horizontal,
        sign: 1.0,
        edge: "right",
        anchor: "top",
    },
    EdgeSpec {
        axis: Axis::Vertical,
        sign: 1.0,
        edge: "bottom",
        anchor: "left",
    },
    EdgeSpec {
        axis: Axis::Horizontal,
        sign: -1.0,
        edge: "left",
        anchor: "top",
    },
];

impl Direction {
    /// All directions in bar creation order.
    pub const ALL: [Direction; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Geometry for this edge.
    pub fn spec(self) -> &'static EdgeSpec {
        &EDGES[self.index()]
    }

    pub fn axis(self) -> Axis {
        self.spec().axis
    }

    /// The identity-attribute value for this direction.
    pub fn as_str(self) -> &'static str {
        self.spec().edge
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four direction names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown resize direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// Raw direction input: a single edge or a list of edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Directions {
    One(Direction),
    Many(Vec<Direction>),
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        Self::One(direction)
    }
}

impl From<Vec<Direction>> for Directions {
    fn from(directions: Vec<Direction>) -> Self {
        Self::Many(directions)
    }
}

impl<const N: usize> From<[Direction; N]> for Directions {
    fn from(directions: [Direction; N]) -> Self {
        Self::Many(directions.to_vec())
    }
}

impl From<&[Direction]> for Directions {
    fn from(directions: &[Direction]) -> Self {
        Self::Many(directions.to_vec())
    }
}

/// A normalized, non-empty, deduplicated set of directions in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectionSet {
    directions: Vec<Direction>,
}

impl DirectionSet {
    /// Normalize raw input. Returns `None` if no direction was given.
    pub fn normalize(input: &Directions) -> Option<Self> {
        let mut directions = match input {
            Directions::One(d) => vec![*d],
            Directions::Many(list) => list.clone(),
        };
        directions.sort();
        directions.dedup();
        if directions.is_empty() {
            None
        } else {
            Some(Self { directions })
        }
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.directions.contains(&direction)
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.directions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}
