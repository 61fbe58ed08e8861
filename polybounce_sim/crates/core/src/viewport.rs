//! Visible region of the scene at the depth plane the shape lives on.

use crate::utils::Vec2;

/// Depth of the shape plane in front of the camera.
pub const SHAPE_DEPTH: f32 = -6.0;
/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEG: f32 = 45.0;
/// Depth the screen-to-world approximation is normalized against.
pub const REFERENCE_DEPTH: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub depth: f32,
    pub aspect: f32,
}

/// Half-extents of the visible region at the shape plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Viewport {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_y: FIELD_OF_VIEW_DEG.to_radians(),
            depth: SHAPE_DEPTH,
            aspect: sanitize_aspect(aspect),
        }
    }

    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(aspect_of(width, height))
    }

    /// A zero-sized surface (minimized window) keeps the previous aspect.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = aspect_of(width, height);
    }

    pub fn bounds(&self) -> Bounds {
        let half_height = (self.fov_y / 2.0).tan() * self.depth.abs();
        Bounds {
            half_width: half_height * self.aspect,
            half_height,
        }
    }

    /// Ratio applied to clip-space pointer coordinates to land on the shape plane.
    pub fn depth_ratio(&self) -> f32 {
        self.depth.abs() / REFERENCE_DEPTH
    }
}

impl Bounds {
    /// Largest absolute position per axis for a shape of the given scale.
    /// Never negative: a shape larger than the view is pinned to the center.
    pub fn limits(&self, scale: f32) -> Vec2 {
        Vec2::new(
            (self.half_width - scale).max(0.0),
            (self.half_height - scale).max(0.0),
        )
    }

    pub fn clamp(&self, position: Vec2, scale: f32) -> Vec2 {
        let limit = self.limits(scale);
        Vec2::new(
            position.x.clamp(-limit.x, limit.x),
            position.y.clamp(-limit.y, limit.y),
        )
    }

    pub fn contains(&self, position: Vec2, scale: f32) -> bool {
        let limit = self.limits(scale);
        position.x.abs() <= limit.x && position.y.abs() <= limit.y
    }
}

fn aspect_of(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        sanitize_aspect(width as f32 / height as f32)
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
