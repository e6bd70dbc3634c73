pub mod geometry;
pub mod intersection;

// Re-export key types at crate root for convenience.
pub use geometry::bounds::BoundingBox;
pub use geometry::frame::LocalFrame;
pub use geometry::plane::Plane;
pub use geometry::point::Point3d;
pub use geometry::tetrahedron::Tetrahedron;
pub use geometry::vector::Vec3;
pub use intersection::{BoundaryComplex, BoundedSide, ConvexKernel, GeometryKernel};

/// Tolerance configuration for the floating-point predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Points closer than this are coincident, and points within this
    /// distance of a plane lie on it.
    pub coincidence: f64,
    /// Tetrahedra whose volume does not exceed this are degenerate.
    pub volume: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            volume: 1e-10,
        }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.distance_to(b) <= self.coincidence
    }

    pub fn is_zero_volume(&self, volume: f64) -> bool {
        volume.abs() <= self.volume
    }
}

/// Default tolerance.
pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
