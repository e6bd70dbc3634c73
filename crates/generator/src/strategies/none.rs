use std::time::Instant;

use rand::Rng;
use tetra_kernel::GeometryKernel;

use super::{Candidate, PairGenerator};
use crate::error::GenerationError;

/// Redraw both tetrahedra until they are disjoint.
pub(super) fn attempt<K: GeometryKernel, R: Rng + ?Sized>(
    generator: &PairGenerator<K>,
    rng: &mut R,
    deadline: Instant,
) -> Result<Option<Candidate>, GenerationError> {
    let builder = generator.builder();
    while Instant::now() < deadline {
        let first = builder.random_tetrahedron(rng)?;
        let second = builder.random_tetrahedron(rng)?;
        if !generator.kernel.do_intersect(&first, &second) {
            return Ok(Some((first, second)));
        }
    }
    Ok(None)
}
