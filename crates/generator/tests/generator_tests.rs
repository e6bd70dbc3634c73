//! Seeded scenarios for every intersection class.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tetra_generator::{GeneratorConfig, IntersectionClass, PairGenerator, TetrahedronPair};
use tetra_kernel::{BoundingBox, ConvexKernel, GeometryKernel, Point3d, Tetrahedron};

fn generate(class: IntersectionClass, count: usize, seed: u64) -> Vec<TetrahedronPair> {
    let generator = PairGenerator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| generator.generate_pair(class, &mut rng).unwrap())
        .collect()
}

fn assert_solid(kernel: &ConvexKernel, pair: &TetrahedronPair) {
    assert!(!kernel.is_degenerate(pair.first()));
    assert!(!kernel.is_degenerate(pair.second()));
}

fn vertices_in(domain: &BoundingBox, t: &Tetrahedron) -> bool {
    t.vertices()
        .iter()
        .all(|p| domain.contains_point_within(p, 1e-9))
}

// ---------------------------------------------------------------------------
// 1. Rejection-sampled classes
// ---------------------------------------------------------------------------

#[test]
fn test_no_intersection_hundred_pairs() {
    let kernel = ConvexKernel::default();
    let pairs = generate(IntersectionClass::None, 100, 42);
    assert_eq!(pairs.len(), 100);
    for pair in &pairs {
        assert_solid(&kernel, pair);
        assert!(!kernel.do_intersect(pair.first(), pair.second()));
        assert!(!pair.intersects());
        assert_eq!(pair.class(), IntersectionClass::None);
        assert_eq!(pair.volume(), 0.0);
    }
}

#[test]
fn test_polyhedron_hundred_pairs() {
    let kernel = ConvexKernel::default();
    let generator = PairGenerator::default();
    let pairs = generate(IntersectionClass::Polyhedron, 100, 43);
    assert_eq!(pairs.len(), 100);

    let mut solid = 0;
    for pair in &pairs {
        assert_solid(&kernel, pair);
        assert!(kernel.do_intersect(pair.first(), pair.second()));
        assert!(pair.intersects());
        assert_eq!(pair.class(), IntersectionClass::Polyhedron);

        let bound = pair.first().volume().min(pair.second().volume());
        assert!(pair.volume() >= 0.0 && pair.volume() <= bound + 1e-9);

        if generator.classify(pair.first(), pair.second()) == Ok(IntersectionClass::Polyhedron) {
            solid += 1;
        }
    }
    // Touching or sliver contacts may classify lower; they are rare.
    assert!(solid >= 95, "only {solid} of 100 overlaps were solid");
}

#[test]
fn test_rejection_sampled_pairs_stay_in_domain() {
    let domain = BoundingBox::unit();
    for class in [IntersectionClass::None, IntersectionClass::Polyhedron] {
        for pair in generate(class, 20, 44) {
            assert!(vertices_in(&domain, pair.first()));
            assert!(vertices_in(&domain, pair.second()));
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Directed classes are classified exactly
// ---------------------------------------------------------------------------

fn assert_directed(class: IntersectionClass, seed: u64) {
    let kernel = ConvexKernel::default();
    let generator = PairGenerator::default();
    let domain = BoundingBox::unit();
    for pair in generate(class, 50, seed) {
        assert_solid(&kernel, &pair);
        assert!(vertices_in(&domain, pair.first()));
        assert!(vertices_in(&domain, pair.second()), "{class} pair left the domain");
        assert!(pair.intersects());
        assert_eq!(pair.class(), class);
        assert_eq!(pair.volume(), 0.0);
        assert_eq!(generator.classify(pair.first(), pair.second()), Ok(class));
    }
}

#[test]
fn test_point_pairs_classify_as_point() {
    assert_directed(IntersectionClass::Point, 7);
}

#[test]
fn test_segment_pairs_classify_as_segment() {
    assert_directed(IntersectionClass::Segment, 8);
}

#[test]
fn test_polygon_pairs_classify_as_polygon() {
    assert_directed(IntersectionClass::Polygon, 9);
}

#[test]
fn test_point_pairs_share_a_vertex_on_the_seed() {
    let kernel = ConvexKernel::default();
    let domain = BoundingBox::unit();
    for pair in generate(IntersectionClass::Point, 20, 10) {
        // The contact vertex is the first vertex of the second tetrahedron.
        let anchor = pair.second().vertex(0);
        assert_ne!(
            kernel.bounded_side(&anchor, pair.first()),
            tetra_kernel::BoundedSide::Outside
        );
        assert!(vertices_in(&domain, pair.second()));
    }
}

// ---------------------------------------------------------------------------
// 3. Configuration and reproducibility
// ---------------------------------------------------------------------------

#[test]
fn test_same_seed_same_pairs() {
    let a = generate(IntersectionClass::None, 10, 1234);
    let b = generate(IntersectionClass::None, 10, 1234);
    assert_eq!(a, b);
}

#[test]
fn test_custom_domain_is_respected() {
    let domain = BoundingBox::new(Point3d::new(2.0, -1.0, 5.0), Point3d::new(3.0, 0.0, 6.0));
    let config = GeneratorConfig {
        domain,
        ..Default::default()
    };
    let generator = PairGenerator::new(ConvexKernel::default(), config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for class in [
        IntersectionClass::None,
        IntersectionClass::Point,
        IntersectionClass::Segment,
        IntersectionClass::Polygon,
        IntersectionClass::Polyhedron,
    ] {
        for _ in 0..10 {
            let pair = generator.generate_pair(class, &mut rng).unwrap();
            assert!(vertices_in(&domain, pair.first()));
            assert!(vertices_in(&domain, pair.second()));
        }
    }
}

#[test]
fn test_random_dispatch_covers_every_class() {
    let generator = PairGenerator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..60 {
        seen.insert(generator.generate_by_index(0, &mut rng).unwrap().class());
    }
    assert_eq!(seen.len(), IntersectionClass::ALL.len());
}
