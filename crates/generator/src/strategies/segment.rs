use std::time::Instant;

use rand::Rng;
use tetra_kernel::{GeometryKernel, Tetrahedron};
use tracing::trace;

use super::{Candidate, PairGenerator, SamplingAttempt};
use crate::error::GenerationError;
use crate::pair::IntersectionClass;

/// Lay one edge of the second tetrahedron in the plane of a seed face.
///
/// The edge runs from an anchor on the face to a projected domain point;
/// the remaining two vertices lie beyond the face, so the contact is the
/// part of that edge covered by the face.
pub(super) fn attempt<K: GeometryKernel, R: Rng + ?Sized>(
    generator: &PairGenerator<K>,
    rng: &mut R,
    deadline: Instant,
) -> Result<Option<Candidate>, GenerationError> {
    let Some(attempt) = SamplingAttempt::start(generator, rng, deadline)? else {
        return Ok(None);
    };
    let source = generator.point_source();

    while !attempt.expired() {
        let anchor = attempt.anchor(&source, rng);
        let Some(projected) = attempt.projected_point(generator, rng) else {
            continue;
        };
        let Some([v1, v2]) = attempt.spherical_samples::<2, _, _>(generator, &anchor, rng) else {
            continue;
        };

        let candidate = Tetrahedron::new(anchor, projected, v1, v2);
        if generator.accepts(&attempt.seed, &candidate, IntersectionClass::Segment)? {
            return Ok(Some((attempt.seed, candidate)));
        }
        trace!("segment candidate rejected");
    }
    Ok(None)
}
