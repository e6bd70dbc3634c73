use std::time::Instant;

use rand::Rng;
use tetra_kernel::{GeometryKernel, Tetrahedron};
use tracing::trace;

use super::{Candidate, PairGenerator, SamplingAttempt};
use crate::error::GenerationError;
use crate::pair::IntersectionClass;

/// Touch one face of the seed at a single point.
///
/// The second tetrahedron has one vertex on the face and the other three in
/// the open half-space beyond it, so the two can only meet at that vertex.
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
        let Some([v1, v2, v3]) = attempt.spherical_samples::<3, _, _>(generator, &anchor, rng)
        else {
            continue;
        };

        let candidate = Tetrahedron::new(anchor, v1, v2, v3);
        if generator.accepts(&attempt.seed, &candidate, IntersectionClass::Point)? {
            return Ok(Some((attempt.seed, candidate)));
        }
        trace!("point candidate rejected");
    }
    Ok(None)
}
