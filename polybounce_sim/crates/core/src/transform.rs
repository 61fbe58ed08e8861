use crate::utils::Vec2;
use std::f32::consts::TAU;

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 3.0;
pub const MAX_ROTATION_SPEED: f32 = 10.0;

/// Everything the renderer needs to place the shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    /// Radians, kept in [0, 2π).
    pub rotation_angle: f32,
    pub position: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_angle: 0.0,
            position: Vec2::ZERO,
        }
    }
}

impl Transform {
    pub fn advance_rotation(&mut self, rotation_speed: f32, delta_seconds: f32) {
        self.rotation_angle = wrap_angle(self.rotation_angle + rotation_speed * delta_seconds);
    }
}

pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

pub fn clamp_scale(scale: f32) -> f32 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

pub fn clamp_rotation_speed(speed: f32) -> f32 {
    speed.clamp(0.0, MAX_ROTATION_SPEED)
}
