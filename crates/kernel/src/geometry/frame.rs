//! Orthonormal local frames for directional sampling.
//!
//! A frame is built around a normal direction (usually an outward face
//! normal). Spherical coordinates are expressed in the frame: `phi` is the
//! polar angle measured from `normal`, `theta` the azimuth measured from
//! `tangent1` towards `tangent2`.

use super::bounds::BoundingBox;
use super::point::Point3d;
use super::vector::Vec3;

/// Above this `|normal.x|` the x axis is too close to the normal to serve as
/// the helper axis.
const HELPER_SWITCH: f64 = 0.99;

/// Ray components smaller than this never reach a domain wall.
const RAY_EPSILON: f64 = 1e-12;

/// Orthonormal basis `{normal, tangent1, tangent2}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    /// Local z axis.
    pub normal: Vec3,
    /// Local x axis.
    pub tangent1: Vec3,
    /// Local y axis.
    pub tangent2: Vec3,
}

impl LocalFrame {
    /// Build a frame around `seed`. Returns `None` for a near-zero seed.
    pub fn new(seed: Vec3) -> Option<Self> {
        let normal = seed.normalized()?;
        let helper = if normal.x.abs() > HELPER_SWITCH {
            Vec3::Y
        } else {
            Vec3::X
        };
        let tangent1 = normal.cross(&helper).normalized()?;
        let tangent2 = normal.cross(&tangent1);
        Some(Self {
            normal,
            tangent1,
            tangent2,
        })
    }

    /// Map local cartesian components to a global vector.
    pub fn to_global(&self, x: f64, y: f64, z: f64) -> Vec3 {
        self.tangent1 * x + self.tangent2 * y + self.normal * z
    }

    /// Coordinates of `v` in the tangent plane `(tangent1, tangent2)`.
    pub fn tangent_coordinates(&self, v: &Vec3) -> (f64, f64) {
        (v.dot(&self.tangent1), v.dot(&self.tangent2))
    }

    pub fn spherical_to_global(&self, origin: &Point3d, r: f64, theta: f64, phi: f64) -> Point3d {
        let x = r * theta.cos() * phi.sin();
        let y = r * theta.sin() * phi.sin();
        let z = r * phi.cos();
        *origin + self.to_global(x, y, z)
    }

    /// Largest radius along direction `(theta, phi)` from `origin` that keeps
    /// the point inside `domain`, never less than `floor`.
    pub fn max_radius(
        &self,
        origin: &Point3d,
        theta: f64,
        phi: f64,
        domain: &BoundingBox,
        floor: f64,
    ) -> f64 {
        let ray = self.spherical_to_global(origin, 1.0, theta, phi) - *origin;
        let mut radius = f64::INFINITY;

        for axis in 0..3 {
            let d = ray.component(axis);
            if d.abs() < RAY_EPSILON {
                continue;
            }
            let o = origin.coord(axis);
            let bound = if d > 0.0 {
                (domain.max.coord(axis) - o) / d
            } else {
                (domain.min.coord(axis) - o) / d
            };
            radius = radius.min(bound);
        }

        if radius.is_finite() {
            radius.max(floor)
        } else {
            floor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_orthonormal(frame: &LocalFrame) {
        for v in [frame.normal, frame.tangent1, frame.tangent2] {
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
        assert!(frame.normal.dot(&frame.tangent1).abs() < 1e-12);
        assert!(frame.normal.dot(&frame.tangent2).abs() < 1e-12);
        assert!(frame.tangent1.dot(&frame.tangent2).abs() < 1e-12);
    }

    #[test]
    fn test_frame_from_z_seed() {
        let frame = LocalFrame::new(Vec3::new(0.0, 0.0, 3.0)).unwrap();
        assert_eq!(frame.normal, Vec3::Z);
        assert_orthonormal(&frame);
    }

    #[test]
    fn test_frame_switches_helper_near_x() {
        let frame = LocalFrame::new(Vec3::new(1.0, 1e-3, 0.0)).unwrap();
        assert_orthonormal(&frame);

        let frame = LocalFrame::new(-Vec3::X).unwrap();
        assert_orthonormal(&frame);
    }

    #[test]
    fn test_zero_seed_is_rejected() {
        assert!(LocalFrame::new(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_spherical_pole_follows_normal() {
        let frame = LocalFrame::new(Vec3::Y).unwrap();
        let origin = Point3d::new(0.5, 0.5, 0.5);
        let p = frame.spherical_to_global(&origin, 0.25, 1.234, 0.0);
        assert!(p.distance_to(&Point3d::new(0.5, 0.75, 0.5)) < 1e-12);
    }

    #[test]
    fn test_spherical_equator_is_tangent() {
        let frame = LocalFrame::new(Vec3::Z).unwrap();
        let origin = Point3d::ORIGIN;
        let p = frame.spherical_to_global(&origin, 2.0, 0.0, FRAC_PI_2);
        assert!((p - origin).dot(&frame.normal).abs() < 1e-12);
        assert!(((p - origin).dot(&frame.tangent1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_radius_straight_up() {
        let frame = LocalFrame::new(Vec3::Z).unwrap();
        let origin = Point3d::new(0.5, 0.5, 0.25);
        let r = frame.max_radius(&origin, 0.0, 0.0, &BoundingBox::unit(), 1e-9);
        assert!((r - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_max_radius_negative_direction() {
        let frame = LocalFrame::new(Vec3::Z).unwrap();
        let origin = Point3d::new(0.5, 0.5, 0.25);
        let r = frame.max_radius(&origin, 0.0, PI, &BoundingBox::unit(), 1e-9);
        assert!((r - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_max_radius_is_floored() {
        let frame = LocalFrame::new(Vec3::Z).unwrap();
        let origin = Point3d::new(0.5, 0.5, 1.0);
        let r = frame.max_radius(&origin, 0.0, 0.0, &BoundingBox::unit(), 1e-6);
        assert_eq!(r, 1e-6);
    }

    #[test]
    fn test_max_radius_lands_on_boundary() {
        let frame = LocalFrame::new(Vec3::new(0.3, -0.2, 0.9)).unwrap();
        let origin = Point3d::new(0.2, 0.6, 0.4);
        let domain = BoundingBox::unit();
        let r = frame.max_radius(&origin, 0.7, 0.4, &domain, 1e-9);
        let p = frame.spherical_to_global(&origin, r, 0.7, 0.4);
        assert!(domain.contains_point_within(&p, 1e-9));
        let on_wall = (0..3).any(|axis| {
            p.coord(axis).abs() < 1e-9 || (p.coord(axis) - 1.0).abs() < 1e-9
        });
        assert!(on_wall);
    }
}
