use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    /// The unit cube `[0,1]^3`.
    pub fn unit() -> Self {
        Self {
            min: Point3d::ORIGIN,
            max: Point3d::new(1.0, 1.0, 1.0),
        }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3d]) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Overlap test with `tolerance` slack on every axis.
    pub fn intersects(&self, other: &Self, tolerance: f64) -> bool {
        (0..3).all(|axis| {
            self.min.coord(axis) <= other.max.coord(axis) + tolerance
                && other.min.coord(axis) <= self.max.coord(axis) + tolerance
        })
    }

    pub fn contains_point(&self, p: &Point3d) -> bool {
        self.contains_point_within(p, 0.0)
    }

    /// Containment test against the box grown by `tolerance` on every side.
    pub fn contains_point_within(&self, p: &Point3d, tolerance: f64) -> bool {
        (0..3).all(|axis| {
            let c = p.coord(axis);
            c >= self.min.coord(axis) - tolerance && c <= self.max.coord(axis) + tolerance
        })
    }

    /// Finite with a strictly positive extent on every axis.
    pub fn is_valid(&self) -> bool {
        (0..3).all(|axis| {
            let lo = self.min.coord(axis);
            let hi = self.max.coord(axis);
            lo.is_finite() && hi.is_finite() && lo < hi
        })
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bb = BoundingBox::from_points(&[
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 2.0, 3.0),
            Point3d::new(-1.0, 0.5, 1.0),
        ]);
        assert_eq!(bb.min, Point3d::new(-1.0, 0.0, 0.0));
        assert_eq!(bb.max, Point3d::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_intersects_with_tolerance() {
        let a = BoundingBox::new(Point3d::ORIGIN, Point3d::new(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Point3d::new(1.0 + 1e-12, 0.0, 0.0), Point3d::new(2.0, 1.0, 1.0));
        let c = BoundingBox::new(Point3d::new(5.0, 5.0, 5.0), Point3d::new(6.0, 6.0, 6.0));
        assert!(!a.intersects(&b, 0.0));
        assert!(a.intersects(&b, 1e-9));
        assert!(!a.intersects(&c, 1e-9));
    }

    #[test]
    fn test_unit_cube_containment() {
        let unit = BoundingBox::unit();
        assert!(unit.contains_point(&Point3d::new(0.5, 0.0, 1.0)));
        assert!(!unit.contains_point(&Point3d::new(1.0 + 1e-9, 0.5, 0.5)));
        assert!(unit.contains_point_within(&Point3d::new(1.0 + 1e-9, 0.5, 0.5), 1e-6));
    }

    #[test]
    fn test_validity() {
        assert!(BoundingBox::unit().is_valid());
        assert!(!BoundingBox::empty().is_valid());
        let flat = BoundingBox::new(Point3d::ORIGIN, Point3d::new(1.0, 0.0, 1.0));
        assert!(!flat.is_valid());
    }
}
