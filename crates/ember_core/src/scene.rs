//! Scene container.
//!
//! A `Scene` owns everything the renderer reads while tracing: the camera,
//! the triangle list, the material list and the background color. It is
//! validated once in [`Scene::new`] and never mutated afterwards.

use ember_math::Vec3;

use crate::{Camera, Material, SceneError, SceneResult, Triangle};

/// An immutable triangle scene.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    /// Index = primitive id
    triangles: Vec<Triangle>,
    /// Index = material id
    materials: Vec<Material>,
    background_color: Vec3,
}

impl Scene {
    /// Build a scene, checking that every triangle references a material.
    pub fn new(
        camera: Camera,
        triangles: Vec<Triangle>,
        materials: Vec<Material>,
        background_color: Vec3,
    ) -> SceneResult<Self> {
        // u32::MAX is reserved for "no hit"
        if triangles.len() >= u32::MAX as usize {
            return Err(SceneError::TooManyTriangles(triangles.len()));
        }

        if let Some((primitive_id, triangle)) = triangles
            .iter()
            .enumerate()
            .find(|(_, t)| t.material_id as usize >= materials.len())
        {
            return Err(SceneError::InvalidMaterialId {
                primitive_id,
                material_id: triangle.material_id,
                material_count: materials.len(),
            });
        }

        log::debug!(
            "Built scene with {} triangles, {} materials",
            triangles.len(),
            materials.len()
        );

        Ok(Self {
            camera,
            triangles,
            materials,
            background_color,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Color returned for rays that hit nothing.
    pub fn background_color(&self) -> Vec3 {
        self.background_color
    }

    /// Triangle by primitive id.
    #[inline]
    pub fn triangle(&self, primitive_id: u32) -> &Triangle {
        &self.triangles[primitive_id as usize]
    }

    /// Material of the triangle with the given primitive id.
    ///
    /// Panics if `primitive_id` is out of range. Material ids were checked
    /// when the scene was built.
    #[inline]
    pub fn material_of(&self, primitive_id: u32) -> &Material {
        let triangle = self.triangle(primitive_id);
        &self.materials[triangle.material_id as usize]
    }

    /// Number of triangles whose material emits light.
    pub fn emissive_triangle_count(&self) -> usize {
        self.triangles
            .iter()
            .filter(|t| self.materials[t.material_id as usize].is_emissive())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y, 1.0, 1.0, 1.0).expect("valid camera")
    }

    fn unit_triangle(material_id: u32) -> Triangle {
        Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, material_id)
    }

    #[test]
    fn test_valid_scene() {
        let scene = Scene::new(
            camera(),
            vec![unit_triangle(0), unit_triangle(1)],
            vec![
                Material::diffuse(Vec3::splat(0.5)),
                Material::emissive(Vec3::ONE),
            ],
            Vec3::new(0.1, 0.2, 0.3),
        )
        .expect("valid scene");

        assert_eq!(scene.triangles().len(), 2);
        assert_eq!(scene.background_color(), Vec3::new(0.1, 0.2, 0.3));
        assert!(scene.material_of(1).is_emissive());
        assert_eq!(scene.emissive_triangle_count(), 1);
    }

    #[test]
    fn test_invalid_material_id_fails_fast() {
        let err = Scene::new(
            camera(),
            vec![unit_triangle(0), unit_triangle(3)],
            vec![Material::default()],
            Vec3::ZERO,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SceneError::InvalidMaterialId {
                primitive_id: 1,
                material_id: 3,
                material_count: 1,
            }
        );
    }

    #[test]
    fn test_empty_scene_is_valid() {
        let scene = Scene::new(camera(), Vec::new(), Vec::new(), Vec3::ZERO).expect("valid scene");
        assert!(scene.triangles().is_empty());
        assert_eq!(scene.emissive_triangle_count(), 0);
    }
}
