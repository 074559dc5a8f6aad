//! Narrow-phase pairwise overlap tests
//!
//! [`within_bounds`] covers every ordered pair of shape kinds through one
//! exhaustive match: each unordered pair is implemented exactly once in a
//! canonical order and the mirrored arm forwards with swapped arguments,
//! so `within_bounds(a, b) == within_bounds(b, a)` holds for all kind
//! combinations without duplicated logic.
//!
//! All comparisons use strict inequality: shapes that exactly touch at a
//! boundary are not colliding. The ray family additionally produces a
//! [`RayHit`] record through [`raycast`] for callers that need the hit
//! point, normal and fraction.

use crate::collision::primitives::{
    closest_point_on_segment, point_segment_distance, segment_distance, segment_segment_params,
    segments_intersect, BoxBounds, Capsule, Circle, Ray, RayHit, Triangle2,
};
use crate::collision::shape::Shape;
use crate::foundation::math::Vec2;

/// Geometric overlap test between two shapes of any kind
pub fn within_bounds(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        // Same-kind pairs
        (Shape::Box(x), Shape::Box(y)) => box_box(x, y),
        (Shape::Circle(x), Shape::Circle(y)) => circle_circle(x, y),
        (Shape::Capsule(x), Shape::Capsule(y)) => capsule_capsule(x, y),
        (Shape::Ray(x), Shape::Ray(y)) => raycast_ray(x, y).is_some(),
        (Shape::Figure(x), Shape::Figure(y)) => triangles_overlap(&x.triangles(), &y.triangles()),
        (Shape::Polygon(x), Shape::Polygon(y)) => {
            triangles_overlap(&x.world_triangles(), &y.world_triangles())
        }

        // Mixed pairs: one canonical implementation, mirrored arm swaps
        (Shape::Circle(c), Shape::Box(bx)) | (Shape::Box(bx), Shape::Circle(c)) => {
            circle_box(c, bx)
        }
        (Shape::Capsule(cp), Shape::Box(bx)) | (Shape::Box(bx), Shape::Capsule(cp)) => {
            box_capsule(bx, cp)
        }
        (Shape::Capsule(cp), Shape::Circle(c)) | (Shape::Circle(c), Shape::Capsule(cp)) => {
            circle_capsule(c, cp)
        }
        (Shape::Ray(r), Shape::Box(bx)) | (Shape::Box(bx), Shape::Ray(r)) => {
            raycast_box(r, bx).is_some()
        }
        (Shape::Ray(r), Shape::Circle(c)) | (Shape::Circle(c), Shape::Ray(r)) => {
            raycast_circle(r, c).is_some()
        }
        (Shape::Ray(r), Shape::Capsule(cp)) | (Shape::Capsule(cp), Shape::Ray(r)) => {
            raycast_capsule(r, cp).is_some()
        }
        (Shape::Ray(r), Shape::Figure(f)) | (Shape::Figure(f), Shape::Ray(r)) => {
            raycast_triangles(r, &f.triangles()).is_some()
        }
        (Shape::Ray(r), Shape::Polygon(p)) | (Shape::Polygon(p), Shape::Ray(r)) => {
            raycast_triangles(r, &p.world_triangles()).is_some()
        }
        (Shape::Figure(f), Shape::Box(bx)) | (Shape::Box(bx), Shape::Figure(f)) => {
            box_triangles(bx, &f.triangles())
        }
        (Shape::Figure(f), Shape::Circle(c)) | (Shape::Circle(c), Shape::Figure(f)) => {
            circle_triangles(c, &f.triangles())
        }
        (Shape::Figure(f), Shape::Capsule(cp)) | (Shape::Capsule(cp), Shape::Figure(f)) => {
            capsule_triangles(cp, &f.triangles())
        }
        (Shape::Polygon(p), Shape::Box(bx)) | (Shape::Box(bx), Shape::Polygon(p)) => {
            box_triangles(bx, &p.world_triangles())
        }
        (Shape::Polygon(p), Shape::Circle(c)) | (Shape::Circle(c), Shape::Polygon(p)) => {
            circle_triangles(c, &p.world_triangles())
        }
        (Shape::Polygon(p), Shape::Capsule(cp)) | (Shape::Capsule(cp), Shape::Polygon(p)) => {
            capsule_triangles(cp, &p.world_triangles())
        }
        (Shape::Figure(f), Shape::Polygon(p)) | (Shape::Polygon(p), Shape::Figure(f)) => {
            triangles_overlap(&f.triangles(), &p.world_triangles())
        }
    }
}

/// Cast a ray against any shape, producing a hit record on intersection
///
/// Hits beyond the ray's length are misses. When the ray origin starts
/// inside the target, the hit is reported at distance zero with the
/// normal opposing the ray direction.
pub fn raycast(ray: &Ray, target: &Shape) -> Option<RayHit> {
    match target {
        Shape::Box(b) => raycast_box(ray, b),
        Shape::Circle(c) => raycast_circle(ray, c),
        Shape::Capsule(c) => raycast_capsule(ray, c),
        Shape::Ray(r) => raycast_ray(ray, r),
        Shape::Figure(f) => raycast_triangles(ray, &f.triangles()),
        Shape::Polygon(p) => raycast_triangles(ray, &p.world_triangles()),
    }
}

/// Separating-interval test on both axes independently
fn box_box(a: &BoxBounds, b: &BoxBounds) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// Center distance against the sum of effective radii
fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let distance = (b.position - a.position).norm();
    let combined = a.effective_radius(b.position) + b.effective_radius(a.position);
    distance < combined
}

/// Closest point on the box against the circle's effective radius
fn circle_box(c: &Circle, b: &BoxBounds) -> bool {
    let closest = b.closest_point(c.position);
    (c.position - closest).norm() < c.effective_radius(closest)
}

/// Point-to-core-segment distance against the inflated boundary
fn circle_capsule(c: &Circle, cap: &Capsule) -> bool {
    let (s1, s2) = cap.segment();
    let closest = closest_point_on_segment(s1, s2, c.position);
    (c.position - closest).norm() < c.effective_radius(closest) + cap.half_width()
}

/// Core segment against the box: containment or edge distance
fn box_capsule(b: &BoxBounds, cap: &Capsule) -> bool {
    let (s1, s2) = cap.segment();
    if b.contains(s1) || b.contains(s2) {
        return true;
    }
    let half_width = cap.half_width();
    b.edges()
        .into_iter()
        .any(|(e1, e2)| segment_distance(s1, s2, e1, e2) < half_width)
}

/// Segment-to-segment distance against the combined widths
fn capsule_capsule(a: &Capsule, b: &Capsule) -> bool {
    let (a1, a2) = a.segment();
    let (b1, b2) = b.segment();
    segment_distance(a1, a2, b1, b2) < a.half_width() + b.half_width()
}

/// Box against a triangle soup via the box's own two triangles
fn box_triangles(b: &BoxBounds, triangles: &[Triangle2]) -> bool {
    let box_tris = b.triangles();
    triangles
        .iter()
        .any(|t| box_tris.iter().any(|bt| bt.intersects(t)))
}

/// Circle against a triangle soup via per-triangle closest points
fn circle_triangles(c: &Circle, triangles: &[Triangle2]) -> bool {
    triangles.iter().any(|t| {
        let closest = t.closest_point(c.position);
        (c.position - closest).norm() < c.effective_radius(closest)
    })
}

/// Capsule core segment against a triangle soup
fn capsule_triangles(cap: &Capsule, triangles: &[Triangle2]) -> bool {
    let (s1, s2) = cap.segment();
    let half_width = cap.half_width();
    triangles.iter().any(|t| {
        if t.contains(s1) || t.contains(s2) {
            return true;
        }
        t.edges()
            .into_iter()
            .any(|(e1, e2)| segment_distance(s1, s2, e1, e2) < half_width)
    })
}

/// All-triangle-pairs separating-axis test (the most expensive path)
fn triangles_overlap(a: &[Triangle2], b: &[Triangle2]) -> bool {
    a.iter().any(|ta| b.iter().any(|tb| ta.intersects(tb)))
}

fn hit_at_origin(ray: &Ray) -> RayHit {
    RayHit {
        distance: 0.0,
        fraction: 0.0,
        point: ray.position,
        normal: -ray.direction(),
    }
}

fn hit_at(ray: &Ray, distance: f32, normal: Vec2) -> RayHit {
    RayHit {
        distance,
        fraction: distance / ray.length,
        point: ray.point_at(distance),
        normal,
    }
}

/// Slab test against an axis-aligned box
fn raycast_box(ray: &Ray, b: &BoxBounds) -> Option<RayHit> {
    if b.contains(ray.position) {
        return Some(hit_at_origin(ray));
    }

    let dir = ray.direction();
    let mut t_entry = 0.0f32;
    let mut t_exit = ray.length;
    let mut normal = Vec2::zeros();

    for axis in 0..2 {
        let (origin, d, min, max, axis_normal) = if axis == 0 {
            (ray.position.x, dir.x, b.min.x, b.max.x, Vec2::new(1.0, 0.0))
        } else {
            (ray.position.y, dir.y, b.min.y, b.max.y, Vec2::new(0.0, 1.0))
        };

        if d.abs() < 1e-12 {
            // Parallel to this slab: must already lie strictly inside it
            if origin <= min || origin >= max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min - origin) * inv;
        let mut t2 = (max - origin) * inv;
        let mut slab_normal = axis_normal * -d.signum();
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
            slab_normal = -slab_normal;
        }
        if t1 > t_entry {
            t_entry = t1;
            normal = slab_normal;
        }
        t_exit = t_exit.min(t2);
        // Strict: a ray grazing a corner or edge does not hit
        if t_entry >= t_exit {
            return None;
        }
    }

    Some(hit_at(ray, t_entry, normal))
}

/// Entry distance of the ray into a circle of scalar radius, if any
fn ray_circle_entry(ray: &Ray, center: Vec2, radius: f32) -> Option<f32> {
    let oc = ray.position - center;
    let b = 2.0 * oc.dot(&ray.direction());
    let c = oc.norm_squared() - radius * radius;

    let discriminant = b * b - 4.0 * c;
    // Strict: a tangent ray does not hit
    if discriminant <= 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t = (-b - sqrt_d) * 0.5;
    (t >= 0.0 && t < ray.length).then_some(t)
}

/// Quadratic ray-circle intersection
///
/// Elliptical radii are approximated by the effective radius sampled
/// toward the ray origin; for true circles the test is exact.
fn raycast_circle(ray: &Ray, c: &Circle) -> Option<RayHit> {
    let radius = c.effective_radius(ray.position);
    if (ray.position - c.position).norm() < radius {
        return Some(hit_at_origin(ray));
    }
    let t = ray_circle_entry(ray, c.position, radius)?;
    let point = ray.point_at(t);
    let normal = (point - c.position).normalize();
    Some(hit_at(ray, t, normal))
}

/// Ray against a capsule: end circles plus the two offset sides
fn raycast_capsule(ray: &Ray, cap: &Capsule) -> Option<RayHit> {
    let (s1, s2) = cap.segment();
    let half_width = cap.half_width();

    if point_segment_distance(s1, s2, ray.position) < half_width {
        return Some(hit_at_origin(ray));
    }

    let mut best: Option<(f32, Vec2)> = None;
    let mut consider = |t: f32, normal: Vec2| {
        if best.map_or(true, |(bt, _)| t < bt) {
            best = Some((t, normal));
        }
    };

    for end in [s1, s2] {
        if let Some(t) = ray_circle_entry(ray, end, half_width) {
            let normal = (ray.point_at(t) - end).normalize();
            consider(t, normal);
        }
    }

    let axis = (s2 - s1).normalize();
    let side_normal = Vec2::new(-axis.y, axis.x);
    let ray_vec = ray.direction() * ray.length;
    for sign in [1.0f32, -1.0] {
        let offset = side_normal * (half_width * sign);
        let start = s1 + offset;
        let side = s2 - s1;
        if let Some((t, _u)) = segment_segment_params(ray.position, ray_vec, start, side) {
            consider(t * ray.length, side_normal * sign);
        }
    }

    best.map(|(t, normal)| hit_at(ray, t, normal))
}

/// Ray against another ray: segment-segment crossing
///
/// Parallel rays fall back to the collinear-overlap test, so two rays
/// lying through each other on the same line still count as a hit.
fn raycast_ray(ray: &Ray, target: &Ray) -> Option<RayHit> {
    let r = ray.direction() * ray.length;
    let s = target.direction() * target.length;
    if let Some((t, _u)) = segment_segment_params(ray.position, r, target.position, s) {
        let distance = t * ray.length;
        let target_dir = target.direction();
        let mut normal = Vec2::new(-target_dir.y, target_dir.x);
        if normal.dot(&ray.direction()) > 0.0 {
            normal = -normal;
        }
        return Some(hit_at(ray, distance, normal));
    }
    collinear_ray_overlap(ray, target)
}

/// Overlap of two collinear rays along their shared line
///
/// Parallel but non-collinear rays are rejected by the segment test.
/// The hit is the nearest shared point: distance zero when the origin
/// already lies inside the target's span, the span's near end
/// otherwise, with the normal opposing the ray as for origin hits.
fn collinear_ray_overlap(ray: &Ray, target: &Ray) -> Option<RayHit> {
    if !segments_intersect(
        ray.position,
        ray.endpoint(),
        target.position,
        target.endpoint(),
    ) {
        return None;
    }

    let dir = ray.direction();
    let t1 = (target.position - ray.position).dot(&dir);
    let t2 = (target.endpoint() - ray.position).dot(&dir);
    let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
    if lo <= 0.0 && hi >= 0.0 {
        return Some(hit_at_origin(ray));
    }

    let entry = lo.max(0.0);
    (entry <= ray.length).then(|| hit_at(ray, entry, -dir))
}

/// Ray against a triangle soup: nearest edge crossing
fn raycast_triangles(ray: &Ray, triangles: &[Triangle2]) -> Option<RayHit> {
    if triangles.iter().any(|t| t.contains(ray.position)) {
        return Some(hit_at_origin(ray));
    }

    let ray_vec = ray.direction() * ray.length;
    let mut best: Option<(f32, Vec2)> = None;
    for triangle in triangles {
        for (e1, e2) in triangle.edges() {
            let Some((t, _u)) = segment_segment_params(ray.position, ray_vec, e1, e2 - e1) else {
                continue;
            };
            if best.map_or(true, |(bt, _)| t < bt) {
                let edge = e2 - e1;
                let mut normal = Vec2::new(-edge.y, edge.x).normalize();
                if normal.dot(&ray.direction()) > 0.0 {
                    normal = -normal;
                }
                best = Some((t, normal));
            }
        }
    }

    best.map(|(t, normal)| hit_at(ray, t * ray.length, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::primitives::{Figure, Polygon};
    use crate::foundation::math::Transform2;
    use approx::assert_relative_eq;

    fn sample_shapes() -> Vec<Shape> {
        vec![
            Shape::Box(BoxBounds::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)).unwrap()),
            Shape::Circle(Circle::circular(Vec2::new(0.5, 0.0), 1.0).unwrap()),
            Shape::Capsule(Capsule::new(Vec2::new(0.0, 0.5), 0.5, 2.0, 0.3).unwrap()),
            Shape::Ray(Ray::new(Vec2::new(-3.0, 0.1), 10.0, 0.0).unwrap()),
            Shape::Figure(
                Figure::new(
                    vec![
                        Vec2::new(-0.5, -0.5),
                        Vec2::new(0.5, -0.5),
                        Vec2::new(0.5, 0.5),
                        Vec2::new(-0.5, 0.5),
                    ],
                    Transform2::identity(),
                )
                .unwrap(),
            ),
            Shape::Polygon(
                Polygon::new(
                    Transform2::from_position(Vec2::new(0.2, 0.2)),
                    vec![Triangle2::new(
                        Vec2::new(-1.0, -1.0),
                        Vec2::new(1.0, -1.0),
                        Vec2::new(0.0, 1.0),
                    )],
                )
                .unwrap(),
            ),
        ]
    }

    #[test]
    fn symmetry_across_all_kind_pairs() {
        let shapes = sample_shapes();
        for a in &shapes {
            for b in &shapes {
                assert_eq!(
                    within_bounds(a, b),
                    within_bounds(b, a),
                    "asymmetric result for {:?} vs {:?}",
                    a.kind(),
                    b.kind()
                );
            }
        }
    }

    #[test]
    fn overlapping_cluster_actually_overlaps() {
        // The sample shapes all crowd the origin; every pair should hit
        let shapes = sample_shapes();
        for (i, a) in shapes.iter().enumerate() {
            for b in shapes.iter().skip(i + 1) {
                assert!(
                    within_bounds(a, b),
                    "expected overlap for {:?} vs {:?}",
                    a.kind(),
                    b.kind()
                );
            }
        }
    }

    #[test]
    fn box_box_shared_edge_does_not_collide() {
        let a = Shape::Box(BoxBounds::new(Vec2::zeros(), Vec2::new(1.0, 1.0)).unwrap());
        let b = Shape::Box(BoxBounds::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0)).unwrap());
        assert!(!within_bounds(&a, &b));

        let b_shrunk =
            Shape::Box(BoxBounds::new(Vec2::new(0.99, 0.0), Vec2::new(2.0, 1.0)).unwrap());
        assert!(within_bounds(&a, &b_shrunk));
    }

    #[test]
    fn circle_circle_exact_distance_does_not_collide() {
        let a = Shape::Circle(Circle::circular(Vec2::zeros(), 1.5).unwrap());
        let b = Shape::Circle(Circle::circular(Vec2::new(3.0, 0.0), 1.5).unwrap());
        assert!(!within_bounds(&a, &b));

        let b_closer = Shape::Circle(Circle::circular(Vec2::new(2.875, 0.0), 1.5).unwrap());
        assert!(within_bounds(&a, &b_closer));
    }

    #[test]
    fn concentric_circles_collide() {
        let a = Shape::Circle(Circle::circular(Vec2::zeros(), 1.0).unwrap());
        let b = Shape::Circle(Circle::circular(Vec2::zeros(), 2.0).unwrap());
        assert!(within_bounds(&a, &b));
    }

    #[test]
    fn elliptical_circles_use_directional_radius() {
        // Long axis along X reaches the other circle; short axis would not
        let ellipse = Shape::Circle(Circle::new(Vec2::zeros(), Vec2::new(3.0, 0.5), 0.0).unwrap());
        let near_x = Shape::Circle(Circle::circular(Vec2::new(3.5, 0.0), 1.0).unwrap());
        let near_y = Shape::Circle(Circle::circular(Vec2::new(0.0, 3.5), 1.0).unwrap());
        assert!(within_bounds(&ellipse, &near_x));
        assert!(!within_bounds(&ellipse, &near_y));
    }

    #[test]
    fn circle_box_touching_edge_does_not_collide() {
        let b = Shape::Box(BoxBounds::new(Vec2::zeros(), Vec2::new(2.0, 2.0)).unwrap());
        let touching = Shape::Circle(Circle::circular(Vec2::new(3.0, 1.0), 1.0).unwrap());
        assert!(!within_bounds(&b, &touching));
        let overlapping = Shape::Circle(Circle::circular(Vec2::new(2.9, 1.0), 1.0).unwrap());
        assert!(within_bounds(&b, &overlapping));
    }

    #[test]
    fn capsule_capsule_parallel_gap() {
        // Horizontal capsules, cores 2.0 apart, combined width 1.0: gap
        let a = Shape::Capsule(Capsule::new(Vec2::zeros(), 1.0, 4.0, 0.0).unwrap());
        let b = Shape::Capsule(Capsule::new(Vec2::new(0.0, 2.0), 1.0, 4.0, 0.0).unwrap());
        assert!(!within_bounds(&a, &b));

        let b_close = Shape::Capsule(Capsule::new(Vec2::new(0.0, 0.9), 1.0, 4.0, 0.0).unwrap());
        assert!(within_bounds(&a, &b_close));
    }

    #[test]
    fn box_capsule_core_through_box() {
        let b = Shape::Box(BoxBounds::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)).unwrap());
        // Vertical capsule passing straight through
        let cap = Shape::Capsule(
            Capsule::new(Vec2::zeros(), 0.5, 6.0, std::f32::consts::FRAC_PI_2).unwrap(),
        );
        assert!(within_bounds(&b, &cap));

        // Same capsule far to the right
        let far = Shape::Capsule(
            Capsule::new(Vec2::new(5.0, 0.0), 0.5, 6.0, std::f32::consts::FRAC_PI_2).unwrap(),
        );
        assert!(!within_bounds(&b, &far));
    }

    #[test]
    fn raycast_box_reports_entry_face() {
        let b = BoxBounds::new(Vec2::new(1.0, -1.0), Vec2::new(3.0, 1.0)).unwrap();
        let ray = Ray::new(Vec2::zeros(), 10.0, 0.0).unwrap();
        let hit = raycast_box(&ray, &b).unwrap();
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-6);
        assert_relative_eq!(hit.fraction, 0.1, epsilon = 1e-6);
        assert_relative_eq!(hit.point.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(hit.normal.x, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn raycast_box_miss_when_too_short() {
        let b = BoxBounds::new(Vec2::new(5.0, -1.0), Vec2::new(7.0, 1.0)).unwrap();
        let ray = Ray::new(Vec2::zeros(), 4.0, 0.0).unwrap();
        assert!(raycast_box(&ray, &b).is_none());
    }

    #[test]
    fn raycast_circle_entry_point_and_normal() {
        let c = Circle::circular(Vec2::new(5.0, 0.0), 1.0).unwrap();
        let ray = Ray::new(Vec2::zeros(), 10.0, 0.0).unwrap();
        let hit = raycast_circle(&ray, &c).unwrap();
        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.x, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn raycast_circle_tangent_misses() {
        let c = Circle::circular(Vec2::new(5.0, 1.0), 1.0).unwrap();
        let ray = Ray::new(Vec2::zeros(), 10.0, 0.0).unwrap();
        assert!(raycast_circle(&ray, &c).is_none());
    }

    #[test]
    fn raycast_from_inside_hits_at_origin() {
        let shape = Shape::Circle(Circle::circular(Vec2::zeros(), 2.0).unwrap());
        let ray = Ray::new(Vec2::new(0.5, 0.0), 10.0, 0.0).unwrap();
        let hit = raycast(&ray, &shape).unwrap();
        assert_relative_eq!(hit.distance, 0.0);
        assert_relative_eq!(hit.fraction, 0.0);
    }

    #[test]
    fn raycast_capsule_side_hit() {
        // Vertical capsule at x=5, half width 0.5: side plane at x=4.5
        let cap = Capsule::new(Vec2::new(5.0, 0.0), 1.0, 4.0, std::f32::consts::FRAC_PI_2).unwrap();
        let ray = Ray::new(Vec2::zeros(), 10.0, 0.0).unwrap();
        let hit = raycast_capsule(&ray, &cap).unwrap();
        assert_relative_eq!(hit.distance, 4.5, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.x, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn raycast_capsule_end_cap_hit() {
        // Horizontal capsule from x=4 to x=8, half width 0.5: cap apex at x=3.5
        let cap = Capsule::new(Vec2::new(6.0, 0.0), 1.0, 4.0, 0.0).unwrap();
        let ray = Ray::new(Vec2::zeros(), 10.0, 0.0).unwrap();
        let hit = raycast_capsule(&ray, &cap).unwrap();
        assert_relative_eq!(hit.distance, 3.5, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.x, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn raycast_figure_nearest_edge() {
        let figure = Figure::new(
            vec![
                Vec2::new(2.0, -1.0),
                Vec2::new(4.0, -1.0),
                Vec2::new(4.0, 1.0),
                Vec2::new(2.0, 1.0),
            ],
            Transform2::identity(),
        )
        .unwrap();
        let ray = Ray::new(Vec2::zeros(), 10.0, 0.0).unwrap();
        let hit = raycast_triangles(&ray, &figure.triangles()).unwrap();
        assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn ray_ray_crossing() {
        let a = Shape::Ray(Ray::new(Vec2::new(-1.0, 0.0), 2.0, 0.0).unwrap());
        let b = Shape::Ray(
            Ray::new(Vec2::new(0.0, -1.0), 2.0, std::f32::consts::FRAC_PI_2).unwrap(),
        );
        assert!(within_bounds(&a, &b));

        let parallel = Shape::Ray(Ray::new(Vec2::new(-1.0, 1.0), 2.0, 0.0).unwrap());
        assert!(!within_bounds(&a, &parallel));
    }

    #[test]
    fn collinear_overlapping_rays_collide() {
        let a = Shape::Ray(Ray::new(Vec2::zeros(), 2.0, 0.0).unwrap());
        let b = Shape::Ray(Ray::new(Vec2::new(1.0, 0.0), 2.0, 0.0).unwrap());
        assert!(within_bounds(&a, &b));
        assert!(within_bounds(&b, &a));

        // Same line, disjoint spans
        let disjoint = Shape::Ray(Ray::new(Vec2::new(3.0, 0.0), 2.0, 0.0).unwrap());
        assert!(!within_bounds(&a, &disjoint));
    }

    #[test]
    fn collinear_ray_hit_record() {
        let target = Shape::Ray(Ray::new(Vec2::new(1.0, 0.0), 2.0, 0.0).unwrap());

        // Span starts ahead of the origin: hit at its near end
        let ray = Ray::new(Vec2::zeros(), 4.0, 0.0).unwrap();
        let hit = raycast(&ray, &target).unwrap();
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-6);
        assert_relative_eq!(hit.fraction, 0.25, epsilon = 1e-6);

        // Origin inside the target's span: zero-distance hit
        let from_inside = Ray::new(Vec2::new(2.0, 0.0), 4.0, 0.0).unwrap();
        let hit = raycast(&from_inside, &target).unwrap();
        assert_relative_eq!(hit.distance, 0.0);
        assert_relative_eq!(hit.fraction, 0.0);
    }

    #[test]
    fn figure_figure_separated_and_overlapping() {
        let unit_square = |offset: Vec2| {
            Shape::Figure(
                Figure::new(
                    vec![
                        Vec2::zeros(),
                        Vec2::new(1.0, 0.0),
                        Vec2::new(1.0, 1.0),
                        Vec2::new(0.0, 1.0),
                    ],
                    Transform2::from_position(offset),
                )
                .unwrap(),
            )
        };
        assert!(!within_bounds(
            &unit_square(Vec2::zeros()),
            &unit_square(Vec2::new(2.0, 0.0))
        ));
        assert!(within_bounds(
            &unit_square(Vec2::zeros()),
            &unit_square(Vec2::new(0.5, 0.5))
        ));
    }
}
