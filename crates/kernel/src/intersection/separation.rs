use crate::geometry::tetrahedron::{EDGES, Tetrahedron};
use crate::geometry::vector::Vec3;

/// Cross products shorter than this come from (nearly) parallel edges and
/// add no new candidate axis.
const MIN_AXIS_LENGTH: f64 = 1e-12;

/// Separating-axis test for two tetrahedra.
///
/// Candidate axes are the four face normals of each tetrahedron plus the 36
/// pairwise edge cross products. Touching (a gap no larger than `tolerance`)
/// counts as overlapping.
pub fn tetrahedra_overlap(a: &Tetrahedron, b: &Tetrahedron, tolerance: f64) -> bool {
    !candidate_axes(a, b)
        .iter()
        .any(|axis| separated_along(axis, a, b, tolerance))
}

fn candidate_axes(a: &Tetrahedron, b: &Tetrahedron) -> Vec<Vec3> {
    let mut axes = Vec::with_capacity(44);

    for t in [a, b] {
        for face in 0..4 {
            if let Some(n) = t.outward_normal(face) {
                axes.push(n);
            }
        }
    }

    for [i, j] in EDGES {
        let da = a.vertex(j) - a.vertex(i);
        for [k, l] in EDGES {
            let db = b.vertex(l) - b.vertex(k);
            let axis = da.cross(&db);
            if axis.length() > MIN_AXIS_LENGTH {
                if let Some(unit) = axis.normalized() {
                    axes.push(unit);
                }
            }
        }
    }

    axes
}

fn separated_along(axis: &Vec3, a: &Tetrahedron, b: &Tetrahedron, tolerance: f64) -> bool {
    let (a_min, a_max) = project(axis, a);
    let (b_min, b_max) = project(axis, b);
    a_max < b_min - tolerance || b_max < a_min - tolerance
}

fn project(axis: &Vec3, t: &Tetrahedron) -> (f64, f64) {
    t.vertices()
        .iter()
        .map(|p| p.to_vec3().dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s), hi.max(s))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::Point3d;

    fn corner(offset: Vec3, scale: f64) -> Tetrahedron {
        let o = Point3d::ORIGIN + offset;
        Tetrahedron::new(
            o,
            o + Vec3::X * scale,
            o + Vec3::Y * scale,
            o + Vec3::Z * scale,
        )
    }

    #[test]
    fn test_overlapping_corners() {
        let a = corner(Vec3::ZERO, 1.0);
        let b = corner(Vec3::new(0.1, 0.1, 0.1), 1.0);
        assert!(tetrahedra_overlap(&a, &b, 1e-9));
    }

    #[test]
    fn test_far_apart() {
        let a = corner(Vec3::ZERO, 1.0);
        let b = corner(Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(!tetrahedra_overlap(&a, &b, 1e-9));
    }

    #[test]
    fn test_separated_by_slanted_face_only() {
        // Bounding boxes overlap but the slanted face x + y + z = 1 separates.
        let a = corner(Vec3::ZERO, 1.0);
        let b = corner(Vec3::new(0.4, 0.4, 0.4), 0.5);
        assert!(!tetrahedra_overlap(&a, &b, 1e-9));
    }

    #[test]
    fn test_touching_at_a_vertex_counts() {
        let a = corner(Vec3::ZERO, 1.0);
        let b = Tetrahedron::new(
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(2.0, 0.0, 0.0),
            Point3d::new(1.5, 1.0, 0.0),
            Point3d::new(1.5, 0.0, 1.0),
        );
        assert!(tetrahedra_overlap(&a, &b, 1e-9));
    }

    #[test]
    fn test_edge_edge_separation() {
        // Two tetrahedra whose only separating axis is an edge cross product.
        let a = Tetrahedron::new(
            Point3d::new(-1.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, -1.0, -1.0),
            Point3d::new(0.0, 1.0, -1.0),
        );
        let b = Tetrahedron::new(
            Point3d::new(0.0, -1.0, 0.1),
            Point3d::new(0.0, 1.0, 0.1),
            Point3d::new(-1.0, 0.0, 1.1),
            Point3d::new(1.0, 0.0, 1.1),
        );
        assert!(!tetrahedra_overlap(&a, &b, 1e-9));
    }
}
