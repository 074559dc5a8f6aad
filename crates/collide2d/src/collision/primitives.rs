//! Primitive 2D shapes and intersection helpers
//!
//! Provides the geometric value types the narrow phase is built from
//! (boxes, circles, capsules, rays, triangles, point figures) together
//! with the closest-point and segment-distance math they share.
//!
//! Numeric policy: all overlap comparisons use strict inequality, so
//! shapes that exactly touch at a boundary do not collide. No epsilon
//! tolerance is applied.

use crate::collision::shape::ShapeError;
use crate::foundation::math::{rotate, Transform2, Vec2};

/// An axis-aligned bounding box in its own local space
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxBounds {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl BoxBounds {
    /// Creates a box from its corners; fails when `min` is not strictly
    /// below `max` on both axes
    pub fn new(min: Vec2, max: Vec2) -> Result<Self, ShapeError> {
        if min.x < max.x && min.y < max.y {
            Ok(Self { min, max })
        } else {
            Err(ShapeError::InvalidBounds)
        }
    }

    /// Creates a box from a center point and full extents
    pub fn from_center_size(center: Vec2, size: Vec2) -> Result<Self, ShapeError> {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Center of the box
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// The point inside or on the box closest to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Strict interior test: points on the boundary are outside
    pub fn contains(&self, p: Vec2) -> bool {
        self.min.x < p.x && p.x < self.max.x && self.min.y < p.y && p.y < self.max.y
    }

    /// Corners in counter-clockwise order starting at `min`
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// The four boundary edges as segments
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let [a, b, c, d] = self.corners();
        [(a, b), (b, c), (c, d), (d, a)]
    }

    /// The box split into two triangles, for tests against triangle soups
    pub fn triangles(&self) -> [Triangle2; 2] {
        let [a, b, c, d] = self.corners();
        [Triangle2::new(a, b, c), Triangle2::new(a, c, d)]
    }
}

/// A circle (or ellipse, when the radius components differ)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// Center position in world space
    pub position: Vec2,
    /// Radius along the local X and Y axes; equal components give a true circle
    pub radius: Vec2,
    /// Local rotation in radians, meaningful only for elliptical radii
    pub rotation: f32,
}

impl Circle {
    /// Creates a circle; fails when either radius component is not positive
    pub fn new(position: Vec2, radius: Vec2, rotation: f32) -> Result<Self, ShapeError> {
        if radius.x > 0.0 && radius.y > 0.0 {
            Ok(Self {
                position,
                radius,
                rotation,
            })
        } else {
            Err(ShapeError::DegenerateRadius)
        }
    }

    /// Creates a true circle with a scalar radius
    pub fn circular(position: Vec2, radius: f32) -> Result<Self, ShapeError> {
        Self::new(position, Vec2::new(radius, radius), 0.0)
    }

    /// The effective scalar radius sampled toward another point
    ///
    /// For a true circle this is just the radius. For an ellipse it is the
    /// boundary distance along the direction from this center to `toward`,
    /// accounting for the local rotation.
    pub fn effective_radius(&self, toward: Vec2) -> f32 {
        let a = self.radius.x;
        let b = self.radius.y;
        let delta = rotate(toward - self.position, -self.rotation);
        if delta.norm_squared() < f32::EPSILON {
            // Degenerate direction (concentric centers); any boundary sample works
            return a.max(b);
        }
        let theta = delta.y.atan2(delta.x);
        let (sin, cos) = theta.sin_cos();
        (a * b) / ((b * cos).powi(2) + (a * sin).powi(2)).sqrt()
    }
}

/// A capsule: a core segment inflated by half its width
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Capsule {
    /// Center of the core segment in world space
    pub position: Vec2,
    /// Full width (diameter of the rounded ends)
    pub width: f32,
    /// Length of the core segment
    pub length: f32,
    /// Orientation of the core segment in radians
    pub angle: f32,
    /// Additional local rotation applied on top of `angle`
    pub rotation: f32,
}

impl Capsule {
    /// Creates a capsule; fails when width or length is not positive
    pub fn new(position: Vec2, width: f32, length: f32, angle: f32) -> Result<Self, ShapeError> {
        if width > 0.0 && length > 0.0 {
            Ok(Self {
                position,
                width,
                length,
                angle,
                rotation: 0.0,
            })
        } else {
            Err(ShapeError::DegenerateCapsule)
        }
    }

    /// Sets the local rotation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Radius of the inflated boundary around the core segment
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    /// Endpoints of the core segment in world space
    pub fn segment(&self) -> (Vec2, Vec2) {
        let orientation = self.angle + self.rotation;
        let dir = Vec2::new(orientation.cos(), orientation.sin());
        let half = dir * (self.length * 0.5);
        (self.position - half, self.position + half)
    }
}

/// A finite ray (a directed segment) for raycasts
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ray {
    /// Origin of the ray in world space
    pub position: Vec2,
    /// Maximum travel distance
    pub length: f32,
    /// Direction in radians
    pub angle: f32,
}

impl Ray {
    /// Creates a ray; fails when the length is not positive
    pub fn new(position: Vec2, length: f32, angle: f32) -> Result<Self, ShapeError> {
        if length > 0.0 {
            Ok(Self {
                position,
                length,
                angle,
            })
        } else {
            Err(ShapeError::DegenerateRay)
        }
    }

    /// Unit direction vector
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// The far end of the ray
    pub fn endpoint(&self) -> Vec2 {
        self.position + self.direction() * self.length
    }

    /// Point along the ray at distance `t` from the origin
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.position + self.direction() * t
    }
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// `distance` normalized by the ray length, in `[0, 1]`
    pub fraction: f32,
    /// The point of intersection in world space
    pub point: Vec2,
    /// The surface normal at the intersection point
    pub normal: Vec2,
}

/// A triangle in world space
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Triangle2 {
    /// First vertex
    pub a: Vec2,
    /// Second vertex
    pub b: Vec2,
    /// Third vertex
    pub c: Vec2,
}

impl Triangle2 {
    /// Creates a new triangle
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Edges as segments in winding order
    pub fn edges(&self) -> [(Vec2, Vec2); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// Strict interior test: points on an edge or vertex are outside
    pub fn contains(&self, p: Vec2) -> bool {
        let d1 = (self.b - self.a).perp(&(p - self.a));
        let d2 = (self.c - self.b).perp(&(p - self.b));
        let d3 = (self.a - self.c).perp(&(p - self.c));
        (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
    }

    /// The point on or inside the triangle closest to `p`
    ///
    /// Voronoi-region walk: vertex regions first, then edge regions, then
    /// the interior (in which case `p` itself is returned).
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let ap = p - self.a;

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return self.a;
        }

        let bp = p - self.b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return self.b;
        }

        let cp = p - self.c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return self.c;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return self.a + ab * v;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return self.a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return self.b + (self.c - self.b) * w;
        }

        // Inside all edge regions: p projects into the triangle itself
        p
    }

    /// Separating-axis overlap test against another triangle
    ///
    /// Tests the edge normals of both triangles (6 axes). Strict
    /// inequality: triangles sharing only an edge or vertex do not overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        let vertices_a = [self.a, self.b, self.c];
        let vertices_b = [other.a, other.b, other.c];

        fn project(vertices: &[Vec2; 3], axis: Vec2) -> (f32, f32) {
            let p0 = axis.dot(&vertices[0]);
            let p1 = axis.dot(&vertices[1]);
            let p2 = axis.dot(&vertices[2]);
            (p0.min(p1).min(p2), p0.max(p1).max(p2))
        }

        for (start, end) in self.edges().into_iter().chain(other.edges()) {
            let edge = end - start;
            if edge.norm_squared() < f32::EPSILON {
                continue; // Degenerate edge, no axis to test
            }
            let axis = Vec2::new(-edge.y, edge.x);
            let (min_a, max_a) = project(&vertices_a, axis);
            let (min_b, max_b) = project(&vertices_b, axis);
            if max_a <= min_b || max_b <= min_a {
                return false; // Separating axis found
            }
        }

        true
    }
}

/// A dynamic point list with a local transform
///
/// The point list is triangulated as a fan from the first point, which is
/// exact for convex outlines; concave outlines should be pre-triangulated
/// and stored as a [`Polygon`] instead.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Figure {
    points: Vec<Vec2>,
    /// Local transform applied to the point list
    pub transform: Transform2,
}

impl Figure {
    /// Creates a figure; fails when fewer than three points are given
    pub fn new(points: Vec<Vec2>, transform: Transform2) -> Result<Self, ShapeError> {
        if points.len() < 3 {
            return Err(ShapeError::DegeneratePointList { len: points.len() });
        }
        Ok(Self { points, transform })
    }

    /// The local-space point list
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// World-space fan triangulation of the point list
    pub fn triangles(&self) -> Vec<Triangle2> {
        let world: Vec<Vec2> = self.points.iter().map(|&p| self.transform.apply(p)).collect();
        world
            .windows(2)
            .skip(1)
            .map(|pair| Triangle2::new(world[0], pair[0], pair[1]))
            .collect()
    }
}

/// A pre-triangulated polygon with a local transform
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    /// Local transform applied to every triangle
    pub transform: Transform2,
    triangles: Vec<Triangle2>,
}

impl Polygon {
    /// Creates a polygon; fails when the triangle list is empty
    pub fn new(transform: Transform2, triangles: Vec<Triangle2>) -> Result<Self, ShapeError> {
        if triangles.is_empty() {
            return Err(ShapeError::EmptyTriangleList);
        }
        Ok(Self {
            transform,
            triangles,
        })
    }

    /// The local-space triangle list
    pub fn triangles(&self) -> &[Triangle2] {
        &self.triangles
    }

    /// Triangles with the local transform applied
    pub fn world_triangles(&self) -> Vec<Triangle2> {
        self.triangles
            .iter()
            .map(|t| {
                Triangle2::new(
                    self.transform.apply(t.a),
                    self.transform.apply(t.b),
                    self.transform.apply(t.c),
                )
            })
            .collect()
    }
}

/// The point on segment `ab` closest to `p`
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Distance from point `p` to segment `ab`
pub fn point_segment_distance(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p - closest_point_on_segment(a, b, p)).norm()
}

/// Whether segments `a1a2` and `b1b2` intersect (endpoints included)
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
        (b - a).perp(&(c - a))
    }
    fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
        p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
    }

    let d1 = orient(b1, b2, a1);
    let d2 = orient(b1, b2, a2);
    let d3 = orient(a1, a2, b1);
    let d4 = orient(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b1, b2, a1))
        || (d2 == 0.0 && on_segment(b1, b2, a2))
        || (d3 == 0.0 && on_segment(a1, a2, b1))
        || (d4 == 0.0 && on_segment(a1, a2, b2))
}

/// Minimum distance between segments `a1a2` and `b1b2` (zero when they touch)
pub fn segment_distance(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> f32 {
    if segments_intersect(a1, a2, b1, b2) {
        return 0.0;
    }
    point_segment_distance(b1, b2, a1)
        .min(point_segment_distance(b1, b2, a2))
        .min(point_segment_distance(a1, a2, b1))
        .min(point_segment_distance(a1, a2, b2))
}

/// Parametric intersection of segment `p -> p + r` with segment `q -> q + s`
///
/// Returns `(t, u)`, both in `[0, 1]`, when the segments cross; `None` for
/// parallel segments (collinear overlap is not reported here).
pub fn segment_segment_params(p: Vec2, r: Vec2, q: Vec2, s: Vec2) -> Option<(f32, f32)> {
    let denom = r.perp(&s);
    if denom.abs() < 1e-12 {
        return None;
    }
    let qp = q - p;
    let t = qp.perp(&s) / denom;
    let u = qp.perp(&r) / denom;
    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then_some((t, u))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    #[test]
    fn box_rejects_inverted_bounds() {
        assert!(BoxBounds::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)).is_err());
        assert!(BoxBounds::new(Vec2::zeros(), Vec2::zeros()).is_err());
    }

    #[test]
    fn box_contains_is_strict() {
        let b = BoxBounds::new(Vec2::zeros(), Vec2::new(2.0, 2.0)).unwrap();
        assert!(b.contains(Vec2::new(1.0, 1.0)));
        assert!(!b.contains(Vec2::new(0.0, 1.0)));
        assert!(!b.contains(Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn circle_rejects_degenerate_radius() {
        assert!(Circle::circular(Vec2::zeros(), 0.0).is_err());
        assert!(Circle::new(Vec2::zeros(), Vec2::new(1.0, -1.0), 0.0).is_err());
    }

    #[test]
    fn effective_radius_of_true_circle_is_constant() {
        let c = Circle::circular(Vec2::zeros(), 2.0).unwrap();
        assert_relative_eq!(c.effective_radius(Vec2::new(5.0, 0.0)), 2.0);
        assert_relative_eq!(c.effective_radius(Vec2::new(3.0, 4.0)), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn effective_radius_of_ellipse_follows_axes() {
        let c = Circle::new(Vec2::zeros(), Vec2::new(3.0, 1.0), 0.0).unwrap();
        assert_relative_eq!(c.effective_radius(Vec2::new(10.0, 0.0)), 3.0, epsilon = 1e-6);
        assert_relative_eq!(c.effective_radius(Vec2::new(0.0, 10.0)), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn effective_radius_respects_rotation() {
        let c = Circle::new(
            Vec2::zeros(),
            Vec2::new(3.0, 1.0),
            std::f32::consts::FRAC_PI_2,
        )
        .unwrap();
        // Long axis now points along +Y
        assert_relative_eq!(c.effective_radius(Vec2::new(0.0, 10.0)), 3.0, epsilon = 1e-5);
    }

    #[test]
    fn capsule_segment_orientation() {
        let cap = Capsule::new(Vec2::zeros(), 1.0, 4.0, 0.0).unwrap();
        let (s, e) = cap.segment();
        assert_relative_eq!(s.x, -2.0, epsilon = 1e-6);
        assert_relative_eq!(e.x, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn triangle_contains_is_strict() {
        let t = Triangle2::new(Vec2::zeros(), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        assert!(t.contains(Vec2::new(1.0, 1.0)));
        assert!(!t.contains(Vec2::new(2.0, 0.0))); // on an edge
        assert!(!t.contains(Vec2::new(4.0, 0.0))); // on a vertex
        assert!(!t.contains(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn triangle_closest_point_regions() {
        let t = Triangle2::new(Vec2::zeros(), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        // Vertex region
        let p = t.closest_point(Vec2::new(-1.0, -1.0));
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);
        // Edge region below the base
        let p = t.closest_point(Vec2::new(2.0, -3.0));
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 0.0);
        // Interior point maps to itself
        let p = t.closest_point(Vec2::new(1.0, 1.0));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 1.0);
    }

    #[test]
    fn triangle_sat_shared_edge_is_not_overlap() {
        let t1 = Triangle2::new(Vec2::zeros(), Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0));
        let t2 = Triangle2::new(Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0), Vec2::new(2.0, 2.0));
        assert!(!t1.intersects(&t2));
        // Nudge the far vertex across the shared edge
        let t3 = Triangle2::new(Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0), Vec2::new(0.5, 0.5));
        assert!(t1.intersects(&t3));
    }

    #[test]
    fn figure_requires_three_points() {
        let err = Figure::new(vec![Vec2::zeros(), Vec2::new(1.0, 0.0)], Transform2::identity());
        assert!(matches!(err, Err(ShapeError::DegeneratePointList { len: 2 })));
    }

    #[test]
    fn figure_fan_triangulation() {
        let square = Figure::new(
            vec![
                Vec2::zeros(),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            Transform2::identity(),
        )
        .unwrap();
        assert_eq!(square.triangles().len(), 2);
    }

    #[test]
    fn segment_distance_parallel() {
        let d = segment_distance(
            Vec2::zeros(),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 3.0),
            Vec2::new(4.0, 3.0),
        );
        assert_relative_eq!(d, 3.0);
    }

    #[test]
    fn segment_distance_crossing_is_zero() {
        let d = segment_distance(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
        );
        assert_relative_eq!(d, 0.0);
    }

    #[test]
    fn segment_params_cross() {
        let (t, u) = segment_segment_params(
            Vec2::new(-1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 2.0),
        )
        .unwrap();
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(u, 0.5);
    }

    #[test]
    fn segment_params_parallel_is_none() {
        assert!(segment_segment_params(
            Vec2::zeros(),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
        )
        .is_none());
    }
}
