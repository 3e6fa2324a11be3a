//! Surface materials.

use ember_math::Vec3;

/// A diffuse (Lambertian) surface that may also emit light.
///
/// - `albedo`: reflectance per channel, in [0, 1]
/// - `emissivity`: emitted radiance per channel, non-negative, unbounded
///
/// Zero albedo with non-zero emissivity is a pure light source; non-zero
/// albedo with zero emissivity is a pure diffuse reflector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material {
    pub albedo: Vec3,
    pub emissivity: Vec3,
}

impl Material {
    /// Create a material from albedo and emissivity.
    pub const fn new(albedo: Vec3, emissivity: Vec3) -> Self {
        Self { albedo, emissivity }
    }

    /// A non-emissive diffuse reflector.
    pub const fn diffuse(albedo: Vec3) -> Self {
        Self::new(albedo, Vec3::ZERO)
    }

    /// A pure emitter that reflects nothing.
    pub const fn emissive(radiance: Vec3) -> Self {
        Self::new(Vec3::ZERO, radiance)
    }

    /// True if any channel of the emissivity is positive.
    pub fn is_emissive(&self) -> bool {
        self.emissivity.max_element() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diffuse_is_not_emissive() {
        let m = Material::diffuse(Vec3::splat(0.75));
        assert_eq!(m.emissivity, Vec3::ZERO);
        assert!(!m.is_emissive());
    }

    #[test]
    fn test_emissive_has_no_albedo() {
        let m = Material::emissive(Vec3::splat(12.0));
        assert_eq!(m.albedo, Vec3::ZERO);
        assert!(m.is_emissive());
    }
}
