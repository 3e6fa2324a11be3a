//! Ray-scene intersection.
//!
//! Closest-hit query of one ray against the whole triangle list, using the
//! Möller-Trumbore ray-triangle test. Every triangle is visited in index
//! order; there is no acceleration structure.

use ember_core::Triangle;
use ember_math::{Interval, Ray, Vec3};

/// Smallest accepted hit distance, keeps bounce rays off their own surface.
pub const T_MIN: f32 = 1e-6;

/// Determinant magnitude below which a ray counts as parallel to a triangle.
pub const PARALLEL_EPSILON: f32 = 1e-8;

/// Result of an intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayPayload {
    /// World-space hit point
    pub position: Vec3,
    /// Barycentric weight of `vertex1`
    pub u: f32,
    /// Barycentric weight of `vertex2`
    pub v: f32,
    /// Index of the hit triangle, or [`RayPayload::MISS_ID`]
    pub primitive_id: u32,
}

impl RayPayload {
    /// Primitive id reported when nothing was hit.
    pub const MISS_ID: u32 = u32::MAX;

    /// The payload of a ray that hit nothing.
    pub const MISS: RayPayload = RayPayload {
        position: Vec3::ZERO,
        u: 0.0,
        v: 0.0,
        primitive_id: Self::MISS_ID,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.primitive_id != Self::MISS_ID
    }

    /// The hit primitive id, or `None` on a miss.
    #[inline]
    pub fn hit_id(&self) -> Option<u32> {
        self.is_hit().then_some(self.primitive_id)
    }

    /// Barycentric coordinates `(1 - u - v, u, v)`.
    #[inline]
    pub fn barycentric(&self) -> Vec3 {
        Vec3::new(1.0 - self.u - self.v, self.u, self.v)
    }
}

impl Default for RayPayload {
    fn default() -> Self {
        Self::MISS
    }
}

/// Find the closest triangle hit by `ray` with `T_MIN < t`.
///
/// Returns [`RayPayload::MISS`] when no triangle is hit.
pub fn intersect(ray: &Ray, triangles: &[Triangle]) -> RayPayload {
    let mut ray_t = Interval::new(T_MIN, f32::MAX);
    let mut payload = RayPayload::MISS;

    for (primitive_id, triangle) in triangles.iter().enumerate() {
        if let Some((t, u, v)) = hit_triangle(ray, triangle, ray_t) {
            ray_t = ray_t.with_max(t);
            payload = RayPayload {
                position: ray.at(t),
                u,
                v,
                primitive_id: primitive_id as u32,
            };
        }
    }

    payload
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns `(t, u, v)` when the ray hits the triangle with `t` strictly
/// inside `ray_t`.
#[inline]
fn hit_triangle(ray: &Ray, triangle: &Triangle, ray_t: Interval) -> Option<(f32, f32, f32)> {
    let (edge1, edge2) = triangle.edges();

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to the triangle plane
    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - triangle.vertex0;
    let u = f * s.dot(h);
    if !Interval::UNIT.contains(u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray_t.surrounds(t).then_some((t, u, v))
}
