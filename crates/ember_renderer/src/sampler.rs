//! Per-pixel sampling.
//!
//! Turns a pixel and a random jitter into a camera ray, then either runs the
//! full radiance estimate or one of the diagnostic visualizations.

use std::fmt;
use std::str::FromStr;

use ember_core::Scene;
use ember_math::{Ray, Vec3, XorShift32};
use serde::{Deserialize, Serialize};

use crate::integrator::{radiance_with, PathConfig};
use crate::trace::intersect;
use crate::RenderError;

/// What a pixel sample computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    /// Full Monte Carlo radiance
    #[default]
    Color,
    /// Albedo of the first hit
    Albedo,
    /// Geometric normal of the first hit, remapped to [0, 1]
    Normal,
    /// Barycentric coordinates of the first hit
    Barycentric,
    /// Pseudo-random color per triangle
    PrimitiveId,
    /// Pseudo-random color per material
    MaterialId,
}

impl SampleType {
    pub const ALL: [SampleType; 6] = [
        SampleType::Color,
        SampleType::Albedo,
        SampleType::Normal,
        SampleType::Barycentric,
        SampleType::PrimitiveId,
        SampleType::MaterialId,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SampleType::Color => "color",
            SampleType::Albedo => "albedo",
            SampleType::Normal => "normal",
            SampleType::Barycentric => "barycentric",
            SampleType::PrimitiveId => "primitive_id",
            SampleType::MaterialId => "material_id",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleType {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SampleType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| RenderError::UnknownSampleType(s.to_string()))
    }
}

/// Deterministic pseudo-random color for an id.
///
/// Only meant for telling primitives or materials apart on screen.
pub fn random_color(base_seed: u32, id: u32) -> Vec3 {
    let mut rng = XorShift32::from_seed_u32(base_seed.wrapping_add(id));
    Vec3::new(rng.next_f32(), rng.next_f32(), rng.next_f32())
}

/// Samples pixels of one image of one scene.
///
/// Holds no mutable state; randomness comes from the generator passed to
/// each call, so one sampler can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct PixelSampler<'a> {
    scene: &'a Scene,
    width: u32,
    height: u32,
    sample_type: SampleType,
    color_seed: u32,
    path: PathConfig,
}

impl<'a> PixelSampler<'a> {
    pub fn new(scene: &'a Scene, width: u32, height: u32, sample_type: SampleType) -> Self {
        Self {
            scene,
            width,
            height,
            sample_type,
            color_seed: 0,
            path: PathConfig::default(),
        }
    }

    /// Base seed for the id visualizations.
    pub fn with_color_seed(mut self, color_seed: u32) -> Self {
        self.color_seed = color_seed;
        self
    }

    pub fn with_path_config(mut self, path: PathConfig) -> Self {
        self.path = path;
        self
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// Camera ray through pixel (`row`, `col`) offset by `jitter` in [0, 1)^2.
    ///
    /// Row 0 is the top of the image; screen y points up.
    ///
    /// # Panics
    ///
    /// In debug builds, if the pixel lies outside the image.
    pub fn camera_ray(&self, row: u32, col: u32, jitter_x: f32, jitter_y: f32) -> Ray {
        debug_assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) outside {}x{} image",
            self.width,
            self.height
        );
        let width = self.width as f32;
        let height = self.height as f32;
        let x = (col as f32 + jitter_x) / width - 0.5;
        let y = ((self.height - 1 - row) as f32 + jitter_y) / height - 0.5;
        self.scene.camera().ray_through(x, y)
    }

    /// One sample of pixel (`row`, `col`).
    ///
    /// # Panics
    ///
    /// In debug builds, if the pixel lies outside the image.
    pub fn sample(&self, row: u32, col: u32, rng: &mut XorShift32) -> Vec3 {
        let jitter_x = rng.next_f32();
        let jitter_y = rng.next_f32();
        let ray = self.camera_ray(row, col, jitter_x, jitter_y);
        self.sample_ray(&ray, rng)
    }

    fn sample_ray(&self, ray: &Ray, rng: &mut XorShift32) -> Vec3 {
        let scene = self.scene;
        let first_hit = || intersect(ray, scene.triangles()).hit_id();

        match self.sample_type {
            SampleType::Color => radiance_with(scene, ray, &self.path, rng),
            SampleType::Albedo => first_hit()
                .map_or(scene.background_color(), |id| scene.material_of(id).albedo),
            SampleType::Normal => first_hit().map_or(Vec3::ZERO, |id| {
                (scene.triangle(id).geometric_normal() + Vec3::ONE) * 0.5
            }),
            SampleType::Barycentric => {
                let payload = intersect(ray, scene.triangles());
                if payload.is_hit() {
                    payload.barycentric()
                } else {
                    Vec3::ZERO
                }
            }
            SampleType::PrimitiveId => {
                first_hit().map_or(Vec3::ZERO, |id| random_color(self.color_seed, id))
            }
            SampleType::MaterialId => first_hit().map_or(Vec3::ZERO, |id| {
                random_color(self.color_seed, scene.triangle(id).material_id)
            }),
        }
    }
}

/// One sample of pixel (`row`, `col`) of a `width` x `height` image.
///
/// Draws the pixel jitter and, for [`SampleType::Color`], the path from
/// `rng`. `color_seed` keys the id visualizations.
///
/// # Panics
///
/// In debug builds, if `row >= height` or `col >= width`.
#[allow(clippy::too_many_arguments)]
pub fn sample_pixel(
    scene: &Scene,
    row: u32,
    col: u32,
    width: u32,
    height: u32,
    sample_type: SampleType,
    rng: &mut XorShift32,
    color_seed: u32,
) -> Vec3 {
    PixelSampler::new(scene, width, height, sample_type)
        .with_color_seed(color_seed)
        .sample(row, col, rng)
}
