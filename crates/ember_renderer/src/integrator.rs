//! Unidirectional path tracing.
//!
//! Estimates the radiance arriving along a ray by following a single random
//! diffuse path through the scene. Paths longer than
//! [`PathConfig::roulette_depth`] bounces are terminated by Russian roulette,
//! with surviving paths reweighted so the estimate stays unbiased.

use ember_core::{Scene, Triangle};
use ember_math::{Ray, Vec3, XorShift32};
use serde::{Deserialize, Serialize};

use crate::trace::intersect;

/// Tuning constants for the path integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Russian roulette starts once the depth exceeds this many bounces
    pub roulette_depth: u32,
    /// Hard cap on the number of bounces, reached only by pathological scenes
    pub max_depth: u32,
    /// Albedo max-channel below which roulette always terminates
    pub min_roulette_probability: f32,
    /// Bounce directions shorter than this fall back to the surface normal
    pub min_direction_length: f32,
    /// Distance along the normal that bounce rays start above the surface
    pub surface_offset: f32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            roulette_depth: 5,
            max_depth: 256,
            min_roulette_probability: 1e-6,
            min_direction_length: 1e-6,
            surface_offset: 1e-6,
        }
    }
}

/// Geometric normal of `triangle`, flipped to face against `direction`.
#[inline]
pub fn facing_normal(triangle: &Triangle, direction: Vec3) -> Vec3 {
    let normal = triangle.geometric_normal();
    if normal.dot(direction) < 0.0 {
        normal
    } else {
        -normal
    }
}

/// Radiance estimate along `ray` with the default [`PathConfig`].
pub fn radiance(scene: &Scene, ray: &Ray, rng: &mut XorShift32) -> Vec3 {
    radiance_with(scene, ray, &PathConfig::default(), rng)
}

/// Radiance estimate along `ray`.
///
/// Consumes random numbers from `rng`; the same scene, ray, config and
/// starting state always give the same result.
pub fn radiance_with(scene: &Scene, ray: &Ray, config: &PathConfig, rng: &mut XorShift32) -> Vec3 {
    let mut accumulated_color = Vec3::ZERO;
    let mut accumulated_reflectance = Vec3::ONE;
    let mut ray = *ray;

    for depth in 0..config.max_depth {
        let payload = intersect(&ray, scene.triangles());
        let Some(primitive_id) = payload.hit_id() else {
            return scene.background_color();
        };

        let material = scene.material_of(primitive_id);
        let normal = facing_normal(scene.triangle(primitive_id), ray.direction);

        accumulated_color += accumulated_reflectance * material.emissivity;

        let mut albedo = material.albedo;
        if depth > config.roulette_depth {
            let p = albedo.max_element();
            if rng.next_f32() >= p || p < config.min_roulette_probability {
                return accumulated_color;
            }
            albedo /= p;
        }
        accumulated_reflectance *= albedo;

        let offset_direction = normal + rng.random_unit_vector();
        let length = offset_direction.length();
        let direction = if length < config.min_direction_length {
            normal
        } else {
            offset_direction / length
        };

        ray = Ray::new(payload.position + config.surface_offset * normal, direction);
    }

    log::trace!("Path reached max depth {}", config.max_depth);
    accumulated_color
}
