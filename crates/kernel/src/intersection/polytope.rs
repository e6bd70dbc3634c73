//! Convex intersection of two tetrahedra.
//!
//! The intersection is the solution set of the eight outward half-spaces
//! `n . x <= d`. Its vertices are found by solving every triple of bounding
//! planes and keeping solutions that satisfy all eight constraints. The
//! affine dimension of the vertex set then decides the shape of the boundary
//! complex.

use std::collections::HashSet;

use nalgebra::{Matrix3, Vector3};
use tracing::trace;

use super::BoundaryComplex;
use crate::geometry::frame::LocalFrame;
use crate::geometry::plane::Plane;
use crate::geometry::point::Point3d;
use crate::geometry::tetrahedron::Tetrahedron;
use crate::geometry::vector::Vec3;

/// Plane triples whose normal matrix has a smaller determinant are treated
/// as having no unique intersection point.
const MIN_DETERMINANT: f64 = 1e-12;

/// Intersection of two tetrahedra as a convex point set.
#[derive(Debug, Clone)]
pub struct ConvexPolytope {
    vertices: Vec<Point3d>,
    /// Facets as cyclically ordered vertex indices. Empty below dimension 2.
    facets: Vec<Vec<usize>>,
    dimension: usize,
}

impl ConvexPolytope {
    /// Intersect `a` and `b`. `None` when the intersection is empty or either
    /// tetrahedron is degenerate.
    pub fn from_tetrahedra(a: &Tetrahedron, b: &Tetrahedron, tolerance: f64) -> Option<Self> {
        let planes: Vec<Plane> = a
            .face_planes()?
            .into_iter()
            .chain(b.face_planes()?)
            .collect();

        let candidates = enumerate_vertices(&planes, tolerance);
        if candidates.is_empty() {
            return None;
        }

        let dimension = affine_dimension(&candidates, tolerance);
        let (vertices, facets) = match dimension {
            0 => (vec![candidates[0]], Vec::new()),
            1 => (segment_endpoints(&candidates).to_vec(), Vec::new()),
            2 => {
                let hull = planar_hull(&candidates, tolerance);
                let facet = (0..hull.len()).collect();
                (hull, vec![facet])
            }
            _ => {
                let facets = supporting_facets(&candidates, &planes, tolerance);
                (candidates, facets)
            }
        };

        trace!(
            dimension,
            vertices = vertices.len(),
            facets = facets.len(),
            "intersection polytope"
        );

        Some(Self {
            vertices,
            facets,
            dimension,
        })
    }

    pub fn vertices(&self) -> &[Point3d] {
        &self.vertices
    }

    pub fn facets(&self) -> &[Vec<usize>] {
        &self.facets
    }

    /// Affine dimension: 0 point, 1 segment, 2 polygon, 3 solid.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn boundary_complex(&self) -> BoundaryComplex {
        match self.dimension {
            0 => BoundaryComplex::new(1, 0, 0),
            1 => BoundaryComplex::new(2, 1, 0),
            2 => BoundaryComplex::new(self.vertices.len(), self.vertices.len(), 1),
            _ => {
                let mut edges = HashSet::new();
                for facet in &self.facets {
                    for (k, &i) in facet.iter().enumerate() {
                        let j = facet[(k + 1) % facet.len()];
                        edges.insert((i.min(j), i.max(j)));
                    }
                }
                BoundaryComplex::new(self.vertices.len(), edges.len(), self.facets.len())
            }
        }
    }

    /// Enclosed volume; zero below dimension 3.
    pub fn volume(&self) -> f64 {
        if self.dimension < 3 {
            return 0.0;
        }
        let Some(center) = Point3d::centroid(&self.vertices) else {
            return 0.0;
        };

        let mut volume = 0.0;
        for facet in &self.facets {
            let apex = self.vertices[facet[0]];
            for w in facet[1..].windows(2) {
                let b = self.vertices[w[0]];
                let c = self.vertices[w[1]];
                volume += (apex - center).triple(&(b - center), &(c - center)).abs() / 6.0;
            }
        }
        volume
    }
}

fn enumerate_vertices(planes: &[Plane], tolerance: f64) -> Vec<Point3d> {
    let mut vertices: Vec<Point3d> = Vec::new();
    let n = planes.len();

    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let Some(p) = intersect_three(&planes[i], &planes[j], &planes[k]) else {
                    continue;
                };
                let feasible = planes.iter().all(|pl| pl.signed_distance(&p) <= tolerance);
                if feasible && !vertices.iter().any(|q| q.distance_to(&p) <= tolerance) {
                    vertices.push(p);
                }
            }
        }
    }

    vertices
}

fn intersect_three(a: &Plane, b: &Plane, c: &Plane) -> Option<Point3d> {
    let m = Matrix3::new(
        a.normal.x, a.normal.y, a.normal.z,
        b.normal.x, b.normal.y, b.normal.z,
        c.normal.x, c.normal.y, c.normal.z,
    );
    if m.determinant().abs() < MIN_DETERMINANT {
        return None;
    }
    let rhs = Vector3::new(a.offset(), b.offset(), c.offset());
    let x = m.lu().solve(&rhs)?;
    Some(Point3d::new(x[0], x[1], x[2]))
}

fn farthest<F: Fn(&Point3d) -> f64>(points: &[Point3d], metric: F) -> (Point3d, f64) {
    points
        .iter()
        .map(|p| (*p, metric(p)))
        .fold((points[0], f64::NEG_INFINITY), |best, cur| {
            if cur.1 > best.1 { cur } else { best }
        })
}

fn affine_dimension(points: &[Point3d], tolerance: f64) -> usize {
    let p0 = points[0];
    let (p1, spread) = farthest(points, |p| p.distance_to(&p0));
    if spread <= tolerance {
        return 0;
    }

    let Some(dir) = (p1 - p0).normalized() else {
        return 0;
    };
    let (p2, off_line) = farthest(points, |p| (*p - p0).cross(&dir).length());
    if off_line <= tolerance {
        return 1;
    }

    let Some(normal) = (p1 - p0).cross(&(p2 - p0)).normalized() else {
        return 1;
    };
    let (_, off_plane) = farthest(points, |p| (*p - p0).dot(&normal).abs());
    if off_plane <= tolerance { 2 } else { 3 }
}

fn segment_endpoints(points: &[Point3d]) -> [Point3d; 2] {
    let mut best = [points[0], points[0]];
    let mut best_d = f64::NEG_INFINITY;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = a.distance_squared_to(b);
            if d > best_d {
                best_d = d;
                best = [*a, *b];
            }
        }
    }
    best
}

/// Convex hull of coplanar points (Andrew's monotone chain in the plane's
/// tangent coordinates), counter-clockwise without collinear points.
fn planar_hull(points: &[Point3d], tolerance: f64) -> Vec<Point3d> {
    let Some(normal) = plane_normal_of(points) else {
        return points.to_vec();
    };
    let Some(frame) = LocalFrame::new(normal) else {
        return points.to_vec();
    };

    let origin = points[0];
    let mut pts: Vec<(f64, f64, Point3d)> = points
        .iter()
        .map(|p| {
            let (u, v) = frame.tangent_coordinates(&(*p - origin));
            (u, v, *p)
        })
        .collect();
    pts.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let turn = |o: &(f64, f64, Point3d), a: &(f64, f64, Point3d), b: &(f64, f64, Point3d)| {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    };
    // Twice the triangle area, compared against a length-scaled tolerance.
    let min_turn = tolerance * tolerance;

    let mut lower: Vec<(f64, f64, Point3d)> = Vec::new();
    for p in &pts {
        while lower.len() >= 2 && turn(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= min_turn {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<(f64, f64, Point3d)> = Vec::new();
    for p in pts.iter().rev() {
        while upper.len() >= 2 && turn(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= min_turn {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower.into_iter().map(|(_, _, p)| p).collect()
}

fn plane_normal_of(points: &[Point3d]) -> Option<Vec3> {
    let p0 = points[0];
    let (p1, _) = farthest(points, |p| p.distance_to(&p0));
    let dir = (p1 - p0).normalized()?;
    let (p2, _) = farthest(points, |p| (*p - p0).cross(&dir).length());
    (p1 - p0).cross(&(p2 - p0)).normalized()
}

fn supporting_facets(vertices: &[Point3d], planes: &[Plane], tolerance: f64) -> Vec<Vec<usize>> {
    let mut facets: Vec<Vec<usize>> = Vec::new();
    let mut seen: HashSet<Vec<usize>> = HashSet::new();

    for plane in planes {
        let on_plane: Vec<usize> = (0..vertices.len())
            .filter(|&i| plane.signed_distance(&vertices[i]).abs() <= tolerance)
            .collect();
        if on_plane.len() < 3 || !seen.insert(on_plane.clone()) {
            continue;
        }
        facets.push(order_cyclically(vertices, on_plane, &plane.normal));
    }

    facets
}

fn order_cyclically(vertices: &[Point3d], mut indices: Vec<usize>, normal: &Vec3) -> Vec<usize> {
    let Some(frame) = LocalFrame::new(*normal) else {
        return indices;
    };
    let points: Vec<Point3d> = indices.iter().map(|&i| vertices[i]).collect();
    let Some(center) = Point3d::centroid(&points) else {
        return indices;
    };
    let angle = |i: usize| {
        let (u, v) = frame.tangent_coordinates(&(vertices[i] - center));
        v.atan2(u)
    };
    indices.sort_by(|&a, &b| angle(a).total_cmp(&angle(b)));
    indices
}
