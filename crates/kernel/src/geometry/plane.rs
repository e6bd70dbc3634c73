use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// An infinite oriented plane; `normal` is unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3d,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(origin: Point3d, normal: Vec3) -> Option<Self> {
        Some(Self {
            origin,
            normal: normal.normalized()?,
        })
    }

    /// Plane through three points, oriented by `(b - a) x (c - a)`.
    pub fn from_points(a: Point3d, b: Point3d, c: Point3d) -> Option<Self> {
        Self::new(a, (b - a).cross(&(c - a)))
    }

    /// `d` in the half-space form `normal . x <= d`.
    pub fn offset(&self) -> f64 {
        self.normal.dot(&self.origin.to_vec3())
    }

    /// Signed distance; positive on the side the normal points to.
    pub fn signed_distance(&self, p: &Point3d) -> f64 {
        (*p - self.origin).dot(&self.normal)
    }

    pub fn project_point(&self, p: &Point3d) -> Point3d {
        *p - self.normal * self.signed_distance(p)
    }

    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            normal: -self.normal,
        }
    }
}
