pub mod polytope;
pub mod separation;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::Tolerance;
use crate::geometry::bounds::BoundingBox;
use crate::geometry::plane::Plane;
use crate::geometry::point::Point3d;
use crate::geometry::tetrahedron::Tetrahedron;
use crate::geometry::vector::Vec3;
use polytope::ConvexPolytope;

/// Location of a point relative to a tetrahedron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundedSide {
    Inside,
    OnBoundary,
    Outside,
}

/// Vertex, edge and face counts of an intersection's boundary complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryComplex {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
}

impl BoundaryComplex {
    pub fn new(vertices: usize, edges: usize, faces: usize) -> Self {
        Self {
            vertices,
            edges,
            faces,
        }
    }

    /// `V - E + F`.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }
}

/// Geometric predicates and constructions consumed by the pair generators.
///
/// Implement this trait to swap in an exact-arithmetic backend or a mock.
pub trait GeometryKernel {
    /// Whether the four vertices fail to span a positive volume.
    fn is_degenerate(&self, tetrahedron: &Tetrahedron) -> bool;

    /// Whether the closed tetrahedra share at least one point.
    fn do_intersect(&self, a: &Tetrahedron, b: &Tetrahedron) -> bool;

    /// Counts of the intersection's boundary complex, `None` when empty.
    fn boundary_complex(&self, a: &Tetrahedron, b: &Tetrahedron) -> Option<BoundaryComplex>;

    /// Volume of the intersection solid (zero for lower-dimensional contact).
    fn intersection_volume(&self, a: &Tetrahedron, b: &Tetrahedron) -> f64;

    /// Vertices of the intersection, empty when the tetrahedra are disjoint.
    fn intersection_vertices(&self, a: &Tetrahedron, b: &Tetrahedron) -> Vec<Point3d>;

    fn bounded_side(&self, point: &Point3d, tetrahedron: &Tetrahedron) -> BoundedSide;

    fn project_onto_plane(&self, point: &Point3d, plane: &Plane) -> Point3d;

    /// Unnormalized normal `(p1 - p0) x (p2 - p0)`.
    fn face_normal(&self, p0: &Point3d, p1: &Point3d, p2: &Point3d) -> Vec3;
}

/// Default kernel: tolerance-guarded `f64` predicates on convex cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexKernel {
    tolerance: Tolerance,
}

impl ConvexKernel {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// Full intersection polytope, `None` when empty.
    #[instrument(level = "trace", skip_all)]
    pub fn intersection(&self, a: &Tetrahedron, b: &Tetrahedron) -> Option<ConvexPolytope> {
        if !self.bounding_boxes_overlap(a, b) {
            return None;
        }
        ConvexPolytope::from_tetrahedra(a, b, self.tolerance.coincidence)
    }

    fn bounding_boxes_overlap(&self, a: &Tetrahedron, b: &Tetrahedron) -> bool {
        let bb_a = BoundingBox::from_points(a.vertices());
        let bb_b = BoundingBox::from_points(b.vertices());
        bb_a.intersects(&bb_b, self.tolerance.coincidence)
    }
}

impl GeometryKernel for ConvexKernel {
    fn is_degenerate(&self, tetrahedron: &Tetrahedron) -> bool {
        self.tolerance.is_zero_volume(tetrahedron.signed_volume())
    }

    fn do_intersect(&self, a: &Tetrahedron, b: &Tetrahedron) -> bool {
        self.bounding_boxes_overlap(a, b)
            && separation::tetrahedra_overlap(a, b, self.tolerance.coincidence)
    }

    fn boundary_complex(&self, a: &Tetrahedron, b: &Tetrahedron) -> Option<BoundaryComplex> {
        self.intersection(a, b).map(|poly| poly.boundary_complex())
    }

    fn intersection_volume(&self, a: &Tetrahedron, b: &Tetrahedron) -> f64 {
        self.intersection(a, b).map_or(0.0, |poly| poly.volume())
    }

    fn intersection_vertices(&self, a: &Tetrahedron, b: &Tetrahedron) -> Vec<Point3d> {
        self.intersection(a, b)
            .map(|poly| poly.vertices().to_vec())
            .unwrap_or_default()
    }

    fn bounded_side(&self, point: &Point3d, tetrahedron: &Tetrahedron) -> BoundedSide {
        let Some(planes) = tetrahedron.face_planes() else {
            return BoundedSide::Outside;
        };
        let tol = self.tolerance.coincidence;
        let mut on_boundary = false;
        for plane in &planes {
            let d = plane.signed_distance(point);
            if d > tol {
                return BoundedSide::Outside;
            }
            if d >= -tol {
                on_boundary = true;
            }
        }
        if on_boundary {
            BoundedSide::OnBoundary
        } else {
            BoundedSide::Inside
        }
    }

    fn project_onto_plane(&self, point: &Point3d, plane: &Plane) -> Point3d {
        plane.project_point(point)
    }

    fn face_normal(&self, p0: &Point3d, p1: &Point3d, p2: &Point3d) -> Vec3 {
        (*p1 - *p0).cross(&(*p2 - *p0))
    }
}
