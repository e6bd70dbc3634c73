use serde::{Deserialize, Serialize};

use super::plane::Plane;
use super::point::Point3d;
use super::vector::Vec3;

/// Vertex indices of each face; face `i` is the one opposite vertex `i`.
pub const FACES: [[usize; 3]; 4] = [[1, 2, 3], [0, 3, 2], [0, 1, 3], [0, 2, 1]];

/// Vertex index pairs of the six edges.
pub const EDGES: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// A tetrahedron given by its four vertices.
///
/// Construction does not check degeneracy; that is the kernel's call (see
/// [`crate::GeometryKernel::is_degenerate`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tetrahedron {
    vertices: [Point3d; 4],
}

impl Tetrahedron {
    pub fn new(a: Point3d, b: Point3d, c: Point3d, d: Point3d) -> Self {
        Self {
            vertices: [a, b, c, d],
        }
    }

    pub fn from_vertices(vertices: [Point3d; 4]) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point3d; 4] {
        &self.vertices
    }

    pub fn vertex(&self, i: usize) -> Point3d {
        self.vertices[i]
    }

    /// Signed volume; positive when `d` lies on the side of `(a, b, c)`
    /// that `(b - a) x (c - a)` points to.
    pub fn signed_volume(&self) -> f64 {
        let [a, b, c, d] = self.vertices;
        (d - a).triple(&(b - a), &(c - a)) / 6.0
    }

    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    pub fn centroid(&self) -> Point3d {
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc + p.to_vec3());
        Point3d::ORIGIN + sum / 4.0
    }

    pub fn face(&self, face: usize) -> [Point3d; 3] {
        let [i, j, k] = FACES[face];
        [self.vertices[i], self.vertices[j], self.vertices[k]]
    }

    /// The vertex not on `face`.
    pub fn opposite_vertex(&self, face: usize) -> Point3d {
        self.vertices[face]
    }

    pub fn edge(&self, edge: usize) -> (Point3d, Point3d) {
        let [i, j] = EDGES[edge];
        (self.vertices[i], self.vertices[j])
    }

    /// Unit normal of `face` pointing away from the opposite vertex.
    pub fn outward_normal(&self, face: usize) -> Option<Vec3> {
        self.face_plane(face).map(|plane| plane.normal)
    }

    /// Supporting plane of `face`, oriented outward.
    pub fn face_plane(&self, face: usize) -> Option<Plane> {
        let [p0, p1, p2] = self.face(face);
        let plane = Plane::from_points(p0, p1, p2)?;
        if plane.signed_distance(&self.opposite_vertex(face)) > 0.0 {
            Some(plane.flipped())
        } else {
            Some(plane)
        }
    }

    /// All four outward face planes, `None` when any face is degenerate.
    pub fn face_planes(&self) -> Option<[Plane; 4]> {
        Some([
            self.face_plane(0)?,
            self.face_plane(1)?,
            self.face_plane(2)?,
            self.face_plane(3)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_corner() -> Tetrahedron {
        Tetrahedron::new(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            Point3d::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_volume() {
        let t = unit_corner();
        assert!((t.volume() - 1.0 / 6.0).abs() < 1e-12);
        assert!(t.signed_volume() > 0.0);

        let swapped = Tetrahedron::new(t.vertex(1), t.vertex(0), t.vertex(2), t.vertex(3));
        assert!((swapped.signed_volume() + 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_tetrahedron_has_zero_volume() {
        let flat = Tetrahedron::new(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            Point3d::new(0.5, 0.5, 0.0),
        );
        assert!(flat.volume() < 1e-15);
    }

    #[test]
    fn test_outward_normals_point_away_from_opposite_vertex() {
        let t = unit_corner();
        for face in 0..4 {
            let n = t.outward_normal(face).unwrap();
            let on_face = t.face(face)[0];
            assert!((t.opposite_vertex(face) - on_face).dot(&n) < 0.0);
        }
        // Face opposite the origin vertex is x + y + z = 1.
        let n = t.outward_normal(0).unwrap();
        let k = 1.0 / 3.0_f64.sqrt();
        assert!((n.x - k).abs() < 1e-12 && (n.y - k).abs() < 1e-12 && (n.z - k).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_is_inside_every_face_plane() {
        let t = unit_corner();
        let c = t.centroid();
        for plane in t.face_planes().unwrap() {
            assert!(plane.signed_distance(&c) < 0.0);
        }
    }

    #[test]
    fn test_edges_cover_all_vertex_pairs() {
        let t = unit_corner();
        let total: f64 = (0..6).map(|e| {
            let (a, b) = t.edge(e);
            a.distance_to(&b)
        }).sum();
        assert!((total - (3.0 + 3.0 * 2.0_f64.sqrt())).abs() < 1e-12);
    }
}
