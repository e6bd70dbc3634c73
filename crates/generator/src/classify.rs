use tetra_kernel::{BoundaryComplex, GeometryKernel, Tetrahedron};

use crate::error::GenerationError;
use crate::pair::IntersectionClass;

/// Map the boundary complex of an intersection to its class.
///
/// `None` stands for an empty intersection. Open patches have Euler
/// characteristic 1, closed surfaces 2; anything else is reported as
/// [`GenerationError::Unclassifiable`].
pub fn classify(complex: Option<BoundaryComplex>) -> Result<IntersectionClass, GenerationError> {
    let Some(c) = complex else {
        return Ok(IntersectionClass::None);
    };

    if c.vertices == 1 {
        return Ok(IntersectionClass::Point);
    }
    if c.vertices == 2 && c.edges == 1 {
        return Ok(IntersectionClass::Segment);
    }
    if c.faces > 0 {
        match c.euler_characteristic() {
            1 => return Ok(IntersectionClass::Polygon),
            2 => return Ok(IntersectionClass::Polyhedron),
            _ => {}
        }
    }

    Err(GenerationError::Unclassifiable {
        vertices: c.vertices,
        edges: c.edges,
        faces: c.faces,
    })
}

/// Classify the intersection of `a` and `b` as computed by `kernel`.
pub fn classify_pair<K: GeometryKernel + ?Sized>(
    kernel: &K,
    a: &Tetrahedron,
    b: &Tetrahedron,
) -> Result<IntersectionClass, GenerationError> {
    classify(kernel.boundary_complex(a, b))
}
