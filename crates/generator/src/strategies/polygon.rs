use std::time::Instant;

use rand::Rng;
use tetra_kernel::{GeometryKernel, Point3d, Tetrahedron};
use tracing::trace;

use super::{Candidate, PairGenerator, SamplingAttempt};
use crate::error::GenerationError;
use crate::pair::IntersectionClass;

/// Put a whole face of the second tetrahedron in the plane of a seed face.
///
/// Three projected domain points span a triangle in the face plane and the
/// apex is sampled beyond it from their centroid. The contact is the overlap
/// of the two coplanar triangles.
pub(super) fn attempt<K: GeometryKernel, R: Rng + ?Sized>(
    generator: &PairGenerator<K>,
    rng: &mut R,
    deadline: Instant,
) -> Result<Option<Candidate>, GenerationError> {
    let Some(attempt) = SamplingAttempt::start(generator, rng, deadline)? else {
        return Ok(None);
    };

    while !attempt.expired() {
        let (Some(p1), Some(p2), Some(p3)) = (
            attempt.projected_point(generator, rng),
            attempt.projected_point(generator, rng),
            attempt.projected_point(generator, rng),
        ) else {
            continue;
        };
        let base = [p1, p2, p3];
        let Some(centroid) = Point3d::centroid(&base) else {
            continue;
        };
        let Some(apex) = attempt.spherical_sample(generator, &centroid, rng) else {
            continue;
        };

        let candidate = Tetrahedron::new(p1, p2, p3, apex);
        if generator.accepts(&attempt.seed, &candidate, IntersectionClass::Polygon)? {
            return Ok(Some((attempt.seed, candidate)));
        }
        trace!("polygon candidate rejected");
    }
    Ok(None)
}
