use polybounce_core::viewport::{FIELD_OF_VIEW_DEG, SHAPE_DEPTH};
use polybounce_core::{Transform, Vec2};

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub type Mat4 = [[f32; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3], // x, y, z coordinates
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, PartialEq)]
pub struct ShapeUniform {
    pub transform: Mat4, // projection * model, column-major
    pub color: [f32; 4],
}

impl ShapeUniform {
    pub fn new(transform: &Transform, aspect: f32, color_cycle_time: f32) -> Self {
        let projection = perspective(FIELD_OF_VIEW_DEG.to_radians(), aspect, NEAR_PLANE, FAR_PLANE);
        let [r, g, b] = rainbow(color_cycle_time);
        Self {
            transform: mat_mul(&projection, &model_matrix(transform)),
            color: [r, g, b, 1.0],
        }
    }
}

pub fn vertices_from_outline(points: &[Vec2]) -> Vec<Vertex> {
    points
        .iter()
        .map(|p| Vertex {
            position: [p.x, p.y, 0.0],
        })
        .collect()
}

/// Right-handed perspective projection into wgpu's 0..1 depth range.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range = near - far;
    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far / range, -1.0],
        [0.0, 0.0, near * far / range, 0.0],
    ]
}

/// translate(x, y, depth) * rotate_z(angle) * scale
pub fn model_matrix(transform: &Transform) -> Mat4 {
    let (sin, cos) = transform.rotation_angle.sin_cos();
    let s = transform.scale;
    [
        [s * cos, s * sin, 0.0, 0.0],
        [-s * sin, s * cos, 0.0, 0.0],
        [0.0, 0.0, s, 0.0],
        [transform.position.x, transform.position.y, SHAPE_DEPTH, 1.0],
    ]
}

pub fn mat_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0; 4]; 4];
    for (col, out_col) in out.iter_mut().enumerate() {
        for (row, cell) in out_col.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    out
}

pub fn transform_point(m: &Mat4, p: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (row, cell) in out.iter_mut().enumerate() {
        *cell = (0..4).map(|k| m[k][row] * p[k]).sum();
    }
    out
}

/// Six-segment hue cycle: red, yellow, green, cyan, blue, magenta and back.
/// Only the fractional part of `t` matters.
pub fn rainbow(t: f32) -> [f32; 3] {
    let t = t.rem_euclid(1.0);
    if t < 0.167 {
        [1.0, t * 6.0, 0.0]
    } else if t < 0.333 {
        [1.0 - (t - 0.167) * 6.0, 1.0, 0.0]
    } else if t < 0.5 {
        [0.0, 1.0, (t - 0.333) * 6.0]
    } else if t < 0.667 {
        [0.0, 1.0 - (t - 0.5) * 6.0, 1.0]
    } else if t < 0.833 {
        [(t - 0.667) * 6.0, 0.0, 1.0]
    } else {
        [1.0, 0.0, 1.0 - (t - 0.833) * 6.0]
    }
}
