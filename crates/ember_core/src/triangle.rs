//! Triangle primitive.

use ember_math::Vec3;

/// A triangle with a material reference.
///
/// Winding defines the geometric normal `cross(v1 - v0, v2 - v0)`. Shading
/// is two-sided: the renderer flips the normal towards the incoming ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertex0: Vec3,
    pub vertex1: Vec3,
    pub vertex2: Vec3,
    /// Index into the owning scene's material list.
    pub material_id: u32,
}

impl Triangle {
    /// Create a new triangle from three vertices and a material id.
    pub const fn new(vertex0: Vec3, vertex1: Vec3, vertex2: Vec3, material_id: u32) -> Self {
        Self {
            vertex0,
            vertex1,
            vertex2,
            material_id,
        }
    }

    /// Edge vectors `(v1 - v0, v2 - v0)`.
    #[inline]
    pub fn edges(&self) -> (Vec3, Vec3) {
        (self.vertex1 - self.vertex0, self.vertex2 - self.vertex0)
    }

    /// Unit normal from the winding order.
    ///
    /// Not defined for zero-area triangles.
    #[inline]
    pub fn geometric_normal(&self) -> Vec3 {
        let (edge1, edge2) = self.edges();
        edge1.cross(edge2).normalize()
    }

    /// Point at barycentric coordinates `(1 - u - v, u, v)`.
    #[inline]
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        (1.0 - u - v) * self.vertex0 + u * self.vertex1 + v * self.vertex2
    }

    pub fn centroid(&self) -> Vec3 {
        (self.vertex0 + self.vertex1 + self.vertex2) / 3.0
    }
}
