use rand::Rng;
use tetra_kernel::{BoundingBox, GeometryKernel, Point3d, Tetrahedron};
use tracing::trace;

use crate::error::GenerationError;

/// Uniform point draws inside a domain box.
#[derive(Debug, Clone, Copy)]
pub struct RandomPointSource {
    domain: BoundingBox,
}

impl RandomPointSource {
    pub fn new(domain: BoundingBox) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &BoundingBox {
        &self.domain
    }

    /// Independent uniform draw on each axis.
    pub fn uniform_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3d {
        let lerp = |lo: f64, hi: f64, t: f64| lo + (hi - lo) * t;
        let (min, max) = (self.domain.min, self.domain.max);
        Point3d::new(
            lerp(min.x, max.x, rng.random()),
            lerp(min.y, max.y, rng.random()),
            lerp(min.z, max.z, rng.random()),
        )
    }

    /// Uniform draw over the area of triangle `abc`.
    pub fn uniform_point_on_triangle<R: Rng + ?Sized>(
        &self,
        a: &Point3d,
        b: &Point3d,
        c: &Point3d,
        rng: &mut R,
    ) -> Point3d {
        let mut u: f64 = rng.random();
        let mut v: f64 = rng.random();
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }
        *a + (*b - *a) * u + (*c - *a) * v
    }
}

/// Rejection sampler for non-degenerate tetrahedra.
pub struct TetrahedronBuilder<'a, K> {
    kernel: &'a K,
    points: RandomPointSource,
    max_draws: usize,
}

impl<'a, K: GeometryKernel> TetrahedronBuilder<'a, K> {
    pub fn new(kernel: &'a K, points: RandomPointSource, max_draws: usize) -> Self {
        Self {
            kernel,
            points,
            max_draws,
        }
    }

    /// Draw four uniform points until the kernel accepts them as a solid.
    pub fn random_tetrahedron<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Tetrahedron, GenerationError> {
        for draw in 0..self.max_draws {
            let candidate = Tetrahedron::new(
                self.points.uniform_point(rng),
                self.points.uniform_point(rng),
                self.points.uniform_point(rng),
                self.points.uniform_point(rng),
            );
            if !self.kernel.is_degenerate(&candidate) {
                return Ok(candidate);
            }
            trace!(draw, "degenerate tetrahedron rejected");
        }
        Err(GenerationError::DegenerateSampling {
            attempts: self.max_draws,
        })
    }
}
