//! Pinhole camera.

use crate::{SceneError, SceneResult};
use ember_math::{Ray, Vec3};

/// Squared length below which the camera basis is considered degenerate.
const MIN_BASIS_LENGTH_SQ: f32 = 1e-12;

/// A pinhole camera with a rectangular sensor.
///
/// `direction`, `local_x` and `local_y` form an orthonormal frame that is
/// computed once in [`Camera::new`]; the `up` hint is not stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    local_x: Vec3,
    local_y: Vec3,
    focal_length: f32,
    sensor_width: f32,
    sensor_height: f32,
}

impl Camera {
    /// Create a camera looking along `direction`, oriented by `up`.
    ///
    /// `direction` is normalized. Fails if it is zero or parallel to `up`,
    /// or if any of the lens/sensor dimensions is not positive.
    pub fn new(
        position: Vec3,
        direction: Vec3,
        up: Vec3,
        focal_length: f32,
        sensor_width: f32,
        sensor_height: f32,
    ) -> SceneResult<Self> {
        for (name, value) in [
            ("focal_length", focal_length),
            ("sensor_width", sensor_width),
            ("sensor_height", sensor_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidCamera { name, value });
            }
        }

        let degenerate = SceneError::DegenerateCamera { direction, up };
        if direction.length_squared() < MIN_BASIS_LENGTH_SQ {
            return Err(degenerate);
        }
        let direction = direction.normalize();
        let side = direction.cross(up);
        if side.length_squared() < MIN_BASIS_LENGTH_SQ {
            return Err(degenerate);
        }
        let local_x = side.normalize();
        let local_y = local_x.cross(direction);

        Ok(Self {
            position,
            direction,
            local_x,
            local_y,
            focal_length,
            sensor_width,
            sensor_height,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn local_x(&self) -> Vec3 {
        self.local_x
    }

    pub fn local_y(&self) -> Vec3 {
        self.local_y
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    pub fn sensor_width(&self) -> f32 {
        self.sensor_width
    }

    pub fn sensor_height(&self) -> f32 {
        self.sensor_height
    }

    /// Primary ray through screen coordinates `x, y` in [-0.5, 0.5].
    ///
    /// `(0, 0)` is the sensor centre, `+x` is `local_x` and `+y` is `local_y`.
    pub fn ray_through(&self, x: f32, y: f32) -> Ray {
        let direction = self.focal_length * self.direction
            + x * self.sensor_width * self.local_x
            + y * self.sensor_height * self.local_y;
        Ray::new(self.position, direction.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), Vec3::Y, 0.035, 0.025, 0.025)
            .expect("valid camera")
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = forward_camera();
        let (d, x, y) = (camera.direction(), camera.local_x(), camera.local_y());

        for v in [d, x, y] {
            assert!((v.length() - 1.0).abs() < 1e-6);
        }
        assert!(d.dot(x).abs() < 1e-6);
        assert!(d.dot(y).abs() < 1e-6);
        assert!(x.dot(y).abs() < 1e-6);
    }

    #[test]
    fn test_basis_matches_cross_products() {
        let camera = forward_camera();
        // cross(+z, +y) = -x, and local_y recovers the up direction
        assert!((camera.local_x() - Vec3::NEG_X).length() < 1e-6);
        assert!((camera.local_y() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_center_ray_follows_direction() {
        let camera = forward_camera();
        let ray = camera.ray_through(0.0, 0.0);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_corner_ray_is_normalized() {
        let camera = forward_camera();
        let ray = camera.ray_through(0.5, -0.5);
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!(ray.direction.y < 0.0);
    }

    #[test]
    fn test_parallel_up_is_rejected() {
        let err = Camera::new(Vec3::ZERO, Vec3::Y, Vec3::Y, 1.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, SceneError::DegenerateCamera { .. }));
    }

    #[test]
    fn test_zero_direction_is_rejected() {
        let err = Camera::new(Vec3::ZERO, Vec3::ZERO, Vec3::Y, 1.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, SceneError::DegenerateCamera { .. }));
    }

    #[test]
    fn test_non_positive_sensor_is_rejected() {
        let err = Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y, 1.0, 0.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            SceneError::InvalidCamera {
                name: "sensor_width",
                value: 0.0
            }
        );
    }
}
