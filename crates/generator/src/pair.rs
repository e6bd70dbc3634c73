use std::fmt;

use serde::{Deserialize, Serialize};
use tetra_kernel::Tetrahedron;

/// Topological class of the intersection of two tetrahedra.
///
/// The declaration order fixes the label indices `0..=4` written to
/// datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionClass {
    None,
    Point,
    Segment,
    Polygon,
    Polyhedron,
}

impl IntersectionClass {
    /// Every class in label order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Point,
        Self::Segment,
        Self::Polygon,
        Self::Polyhedron,
    ];

    /// Dataset label, `0..=4`.
    pub fn label(self) -> u8 {
        self as u8
    }

    pub fn from_label(label: u8) -> Option<Self> {
        Self::ALL.get(label as usize).copied()
    }

    /// Generator dispatch numbering: `1..=5` in label order.
    pub fn from_dispatch_index(index: i64) -> Option<Self> {
        match index {
            1..=5 => Self::from_label((index - 1) as u8),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Point => "point",
            Self::Segment => "segment",
            Self::Polygon => "polygon",
            Self::Polyhedron => "polyhedron",
        }
    }

    /// Whether pairs of this class share at least one point.
    pub fn intersects(self) -> bool {
        self != Self::None
    }
}

impl fmt::Display for IntersectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An accepted pair together with its labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TetrahedronPair {
    first: Tetrahedron,
    second: Tetrahedron,
    intersects: bool,
    class: IntersectionClass,
    volume: f64,
}

impl TetrahedronPair {
    pub fn new(
        first: Tetrahedron,
        second: Tetrahedron,
        intersects: bool,
        class: IntersectionClass,
        volume: f64,
    ) -> Self {
        Self {
            first,
            second,
            intersects,
            class,
            volume,
        }
    }

    pub fn first(&self) -> &Tetrahedron {
        &self.first
    }

    pub fn second(&self) -> &Tetrahedron {
        &self.second
    }

    pub fn intersects(&self) -> bool {
        self.intersects
    }

    pub fn class(&self) -> IntersectionClass {
        self.class
    }

    /// Intersection volume; zero unless the class is a polyhedron.
    pub fn volume(&self) -> f64 {
        self.volume
    }
}
