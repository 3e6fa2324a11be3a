//! The built-in Cornell box.
//!
//! Geometry follows the measured data published by the Cornell graphics
//! group (<http://www.graphics.cornell.edu/online/box/data.html>), in
//! millimetres:
//!
//! - x towards the left wall
//! - y towards the ceiling
//! - z towards the back wall
//! - (0, 0, 0) is the front bottom right corner

use ember_math::Vec3;

use crate::{Camera, Material, Scene, Triangle};

pub const WHITE: u32 = 0;
pub const GREEN: u32 = 1;
pub const RED: u32 = 2;
pub const LIGHT: u32 = 3;

const FLOOR: [Vec3; 4] = [
    Vec3::new(552.8, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 559.2),
    Vec3::new(549.6, 0.0, 559.2),
];

const LIGHT_QUAD: [Vec3; 4] = [
    Vec3::new(343.0, 520.0, 227.0),
    Vec3::new(343.0, 520.0, 332.0),
    Vec3::new(213.0, 520.0, 332.0),
    Vec3::new(213.0, 520.0, 227.0),
];

const CEILING: [Vec3; 4] = [
    Vec3::new(556.0, 548.8, 0.0),
    Vec3::new(556.0, 548.8, 559.2),
    Vec3::new(0.0, 548.8, 559.2),
    Vec3::new(0.0, 548.8, 0.0),
];

const BACK_WALL: [Vec3; 4] = [
    Vec3::new(549.6, 0.0, 559.2),
    Vec3::new(0.0, 0.0, 559.2),
    Vec3::new(0.0, 548.8, 559.2),
    Vec3::new(556.0, 548.8, 559.2),
];

const GREEN_WALL: [Vec3; 4] = [
    Vec3::new(0.0, 0.0, 559.2),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 548.8, 0.0),
    Vec3::new(0.0, 548.8, 559.2),
];

const RED_WALL: [Vec3; 4] = [
    Vec3::new(552.8, 0.0, 0.0),
    Vec3::new(549.6, 0.0, 559.2),
    Vec3::new(556.0, 548.8, 559.2),
    Vec3::new(556.0, 548.8, 0.0),
];

/// Five quads: top, then four sides.
const SHORT_BLOCK: [[Vec3; 4]; 5] = [
    [
        Vec3::new(130.0, 165.0, 65.0),
        Vec3::new(82.0, 165.0, 225.0),
        Vec3::new(240.0, 165.0, 272.0),
        Vec3::new(290.0, 165.0, 114.0),
    ],
    [
        Vec3::new(290.0, 0.0, 114.0),
        Vec3::new(290.0, 165.0, 114.0),
        Vec3::new(240.0, 165.0, 272.0),
        Vec3::new(240.0, 0.0, 272.0),
    ],
    [
        Vec3::new(130.0, 0.0, 65.0),
        Vec3::new(130.0, 165.0, 65.0),
        Vec3::new(290.0, 165.0, 114.0),
        Vec3::new(290.0, 0.0, 114.0),
    ],
    [
        Vec3::new(82.0, 0.0, 225.0),
        Vec3::new(82.0, 165.0, 225.0),
        Vec3::new(130.0, 165.0, 65.0),
        Vec3::new(130.0, 0.0, 65.0),
    ],
    [
        Vec3::new(240.0, 0.0, 272.0),
        Vec3::new(240.0, 165.0, 272.0),
        Vec3::new(82.0, 165.0, 225.0),
        Vec3::new(82.0, 0.0, 225.0),
    ],
];

const TALL_BLOCK: [[Vec3; 4]; 5] = [
    [
        Vec3::new(423.0, 330.0, 247.0),
        Vec3::new(265.0, 330.0, 296.0),
        Vec3::new(314.0, 330.0, 456.0),
        Vec3::new(472.0, 330.0, 406.0),
    ],
    [
        Vec3::new(423.0, 0.0, 247.0),
        Vec3::new(423.0, 330.0, 247.0),
        Vec3::new(472.0, 330.0, 406.0),
        Vec3::new(472.0, 0.0, 406.0),
    ],
    [
        Vec3::new(472.0, 0.0, 406.0),
        Vec3::new(472.0, 330.0, 406.0),
        Vec3::new(314.0, 330.0, 456.0),
        Vec3::new(314.0, 0.0, 456.0),
    ],
    [
        Vec3::new(314.0, 0.0, 456.0),
        Vec3::new(314.0, 330.0, 456.0),
        Vec3::new(265.0, 330.0, 296.0),
        Vec3::new(265.0, 0.0, 296.0),
    ],
    [
        Vec3::new(265.0, 0.0, 296.0),
        Vec3::new(265.0, 330.0, 296.0),
        Vec3::new(423.0, 330.0, 247.0),
        Vec3::new(423.0, 0.0, 247.0),
    ],
];

/// Split a quad into the fan `(q0, q1, q2)`, `(q0, q2, q3)`.
fn push_quad(triangles: &mut Vec<Triangle>, quad: &[Vec3; 4], material_id: u32) {
    triangles.push(Triangle::new(quad[0], quad[1], quad[2], material_id));
    triangles.push(Triangle::new(quad[0], quad[2], quad[3], material_id));
}

/// Build the Cornell box: 32 triangles, 4 materials, one area light.
///
/// Triangle order is fixed (floor, light, ceiling, back, green, red, short
/// block, tall block), so primitive ids are stable across runs. The light
/// quad is primitives 2 and 3.
pub fn cornell_box() -> Scene {
    let mut triangles = Vec::with_capacity(32);
    push_quad(&mut triangles, &FLOOR, WHITE);
    push_quad(&mut triangles, &LIGHT_QUAD, LIGHT);
    push_quad(&mut triangles, &CEILING, WHITE);
    push_quad(&mut triangles, &BACK_WALL, WHITE);
    push_quad(&mut triangles, &GREEN_WALL, GREEN);
    push_quad(&mut triangles, &RED_WALL, RED);
    for quad in SHORT_BLOCK.iter().chain(TALL_BLOCK.iter()) {
        push_quad(&mut triangles, quad, WHITE);
    }

    let materials = vec![
        Material::diffuse(Vec3::new(0.75, 0.75, 0.75)),
        Material::diffuse(Vec3::new(0.25, 0.75, 0.25)),
        Material::diffuse(Vec3::new(0.75, 0.25, 0.25)),
        Material::emissive(Vec3::new(12.0, 12.0, 12.0)),
    ];

    let camera = Camera::new(
        Vec3::new(278.0, 273.0, -800.0),
        Vec3::Z,
        Vec3::Y,
        0.035,
        0.025,
        0.025,
    )
    .expect("built-in Cornell box camera is valid");

    Scene::new(camera, triangles, materials, Vec3::ZERO)
        .expect("built-in Cornell box material ids are valid")
}
