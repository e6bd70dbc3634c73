//! Per-class pair generators and the retry discipline they share.
//!
//! Every class runs the same outer loop: take a fresh seed, sample candidates
//! until the attempt's deadline passes, then reseed. The directed classes
//! (point, segment, polygon) sample around one face of the seed through a
//! [`SamplingAttempt`].

mod none;
mod point;
mod polygon;
mod polyhedron;
mod segment;

use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Instant;

use rand::Rng;
use tetra_kernel::{
    BoundedSide, ConvexKernel, GeometryKernel, LocalFrame, Plane, Point3d, Tetrahedron, Vec3,
};
use tracing::{debug, instrument};

use crate::classify::classify_pair;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::pair::{IntersectionClass, TetrahedronPair};
use crate::sampling::{RandomPointSource, TetrahedronBuilder};

type Candidate = (Tetrahedron, Tetrahedron);

/// Generates tetrahedron pairs of a requested intersection class.
#[derive(Debug, Clone)]
pub struct PairGenerator<K = ConvexKernel> {
    kernel: K,
    config: GeneratorConfig,
}

impl Default for PairGenerator<ConvexKernel> {
    fn default() -> Self {
        Self {
            kernel: ConvexKernel::default(),
            config: GeneratorConfig::default(),
        }
    }
}

impl<K: GeometryKernel> PairGenerator<K> {
    pub fn new(kernel: K, config: GeneratorConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self { kernel, config })
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn point_source(&self) -> RandomPointSource {
        RandomPointSource::new(self.config.domain)
    }

    pub fn builder(&self) -> TetrahedronBuilder<'_, K> {
        TetrahedronBuilder::new(
            &self.kernel,
            self.point_source(),
            self.config.max_degenerate_draws,
        )
    }

    /// Generate one pair of the requested class.
    ///
    /// The returned pair carries the requested class as its label, the
    /// kernel's intersection predicate and, for polyhedra, the intersection
    /// volume.
    #[instrument(skip(self, rng))]
    pub fn generate_pair<R: Rng + ?Sized>(
        &self,
        class: IntersectionClass,
        rng: &mut R,
    ) -> Result<TetrahedronPair, GenerationError> {
        let (first, second) = self.with_restarts(class, rng)?;

        let intersects = self.kernel.do_intersect(&first, &second);
        let volume = match class {
            IntersectionClass::Polyhedron => self.kernel.intersection_volume(&first, &second),
            _ => 0.0,
        };
        debug!(intersects, volume, "pair accepted");

        Ok(TetrahedronPair::new(first, second, intersects, class, volume))
    }

    /// Dispatch on a class index: `1..=5` select the classes in label order,
    /// `0` picks one uniformly at random.
    pub fn generate_by_index<R: Rng + ?Sized>(
        &self,
        index: i64,
        rng: &mut R,
    ) -> Result<TetrahedronPair, GenerationError> {
        let class = if index == 0 {
            IntersectionClass::ALL[rng.random_range(0..IntersectionClass::ALL.len())]
        } else {
            IntersectionClass::from_dispatch_index(index)
                .ok_or(GenerationError::InvalidClass(index))?
        };
        self.generate_pair(class, rng)
    }

    /// Classify the intersection of an arbitrary pair.
    pub fn classify(
        &self,
        a: &Tetrahedron,
        b: &Tetrahedron,
    ) -> Result<IntersectionClass, GenerationError> {
        classify_pair(&self.kernel, a, b)
    }

    fn with_restarts<R: Rng + ?Sized>(
        &self,
        class: IntersectionClass,
        rng: &mut R,
    ) -> Result<Candidate, GenerationError> {
        for restart in 0..self.config.max_restarts {
            let deadline = Instant::now() + self.config.attempt_timeout;
            let found = match class {
                IntersectionClass::None => none::attempt(self, rng, deadline)?,
                IntersectionClass::Point => point::attempt(self, rng, deadline)?,
                IntersectionClass::Segment => segment::attempt(self, rng, deadline)?,
                IntersectionClass::Polygon => polygon::attempt(self, rng, deadline)?,
                IntersectionClass::Polyhedron => polyhedron::attempt(self, rng, deadline)?,
            };
            if let Some(pair) = found {
                return Ok(pair);
            }
            debug!(restart, "attempt timed out, reseeding");
        }

        Err(GenerationError::Exhausted {
            class,
            restarts: self.config.max_restarts,
        })
    }

    /// Final check for a directed candidate: solid, touching the seed, and
    /// classified exactly as `class`.
    fn accepts(
        &self,
        seed: &Tetrahedron,
        candidate: &Tetrahedron,
        class: IntersectionClass,
    ) -> Result<bool, GenerationError> {
        if self.kernel.is_degenerate(candidate) || !self.kernel.do_intersect(seed, candidate) {
            return Ok(false);
        }
        Ok(classify_pair(&self.kernel, seed, candidate)? == class)
    }

    /// Normal of `face` pointing away from the opposite vertex.
    fn outward_face_normal(&self, tetrahedron: &Tetrahedron, face: usize) -> Vec3 {
        let [p0, p1, p2] = tetrahedron.face(face);
        let normal = self.kernel.face_normal(&p0, &p1, &p2);
        if normal.dot(&(tetrahedron.opposite_vertex(face) - p0)) > 0.0 {
            -normal
        } else {
            normal
        }
    }
}

/// State of one seeded attempt of a directed strategy.
struct SamplingAttempt {
    seed: Tetrahedron,
    face: usize,
    plane: Plane,
    frame: LocalFrame,
    deadline: Instant,
}

impl SamplingAttempt {
    /// Draw a seed and pick one of its faces uniformly. `Ok(None)` when the
    /// face yields no usable frame.
    fn start<K: GeometryKernel, R: Rng + ?Sized>(
        generator: &PairGenerator<K>,
        rng: &mut R,
        deadline: Instant,
    ) -> Result<Option<Self>, GenerationError> {
        let seed = generator.builder().random_tetrahedron(rng)?;
        let face = rng.random_range(0..4);
        let normal = generator.outward_face_normal(&seed, face);

        let Some(frame) = LocalFrame::new(normal) else {
            return Ok(None);
        };
        let Some(plane) = Plane::new(seed.face(face)[0], frame.normal) else {
            return Ok(None);
        };

        Ok(Some(Self {
            seed,
            face,
            plane,
            frame,
            deadline,
        }))
    }

    fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Uniform point on the chosen face.
    fn anchor<R: Rng + ?Sized>(&self, source: &RandomPointSource, rng: &mut R) -> Point3d {
        let [a, b, c] = self.seed.face(self.face);
        source.uniform_point_on_triangle(&a, &b, &c, rng)
    }

    /// A domain point projected onto the chosen face's plane, `None` when
    /// the projection leaves the domain.
    fn projected_point<K: GeometryKernel, R: Rng + ?Sized>(
        &self,
        generator: &PairGenerator<K>,
        rng: &mut R,
    ) -> Option<Point3d> {
        let p = generator.point_source().uniform_point(rng);
        let projected = generator.kernel.project_onto_plane(&p, &self.plane);
        generator.config.domain.contains_point(&projected).then_some(projected)
    }

    /// One point in the open hemisphere above the face, seen from `origin`.
    ///
    /// `None` when the direction leaves no room before the domain wall or
    /// the point is not strictly outside the seed.
    fn spherical_sample<K: GeometryKernel, R: Rng + ?Sized>(
        &self,
        generator: &PairGenerator<K>,
        origin: &Point3d,
        rng: &mut R,
    ) -> Option<Point3d> {
        let config = &generator.config;
        let theta = rng.random_range(0.0..TAU);
        let phi = rng.random_range(config.angular_margin..FRAC_PI_2 - config.angular_margin);

        let r_max = self
            .frame
            .max_radius(origin, theta, phi, &config.domain, config.min_radius);
        if r_max <= config.min_radius {
            return None;
        }
        let r = rng.random_range(config.min_radius..r_max);
        let point = self.frame.spherical_to_global(origin, r, theta, phi);

        (generator.kernel.bounded_side(&point, &self.seed) == BoundedSide::Outside).then_some(point)
    }

    /// `N` spherical samples around `origin`, or `None` if any is rejected.
    fn spherical_samples<const N: usize, K: GeometryKernel, R: Rng + ?Sized>(
        &self,
        generator: &PairGenerator<K>,
        origin: &Point3d,
        rng: &mut R,
    ) -> Option<[Point3d; N]> {
        let mut samples = [*origin; N];
        for slot in &mut samples {
            *slot = self.spherical_sample(generator, origin, rng)?;
        }
        Some(samples)
    }
}
