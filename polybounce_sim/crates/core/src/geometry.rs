use crate::utils::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Radius of the generated circle and custom polygon outlines, in model units.
pub const OUTLINE_RADIUS: f32 = 0.75;
pub const CIRCLE_SEGMENTS: u32 = 50;
pub const MIN_CUSTOM_VERTICES: u32 = 3;
pub const MAX_CUSTOM_VERTICES: u32 = 100;
pub const DEFAULT_CUSTOM_VERTICES: u32 = 6;

const TRIANGLE: [Vec2; 4] = [
    Vec2::new(0.0, 0.95),
    Vec2::new(-0.823, -0.475),
    Vec2::new(0.823, -0.475),
    Vec2::new(0.0, 0.95),
];

const SQUARE: [Vec2; 5] = [
    Vec2::new(-0.75, 0.75),
    Vec2::new(0.75, 0.75),
    Vec2::new(0.75, -0.75),
    Vec2::new(-0.75, -0.75),
    Vec2::new(-0.75, 0.75),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("custom shape needs at least 3 vertices, got {0}")]
    InvalidVertexCount(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Triangle,
    Square,
    Circle,
    Custom(u32),
}

impl Shape {
    /// Builds a custom polygon, clamping the vertex count into the supported range.
    pub fn custom(vertices: u32) -> Self {
        Shape::Custom(clamp_vertex_count(vertices))
    }

    /// Resolves a shape by its name; `vertices` is only consulted for `custom`.
    pub fn from_name(name: &str, vertices: u32) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "triangle" => Some(Shape::Triangle),
            "square" => Some(Shape::Square),
            "circle" => Some(Shape::Circle),
            "custom" => Some(Shape::custom(vertices)),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Triangle => "triangle",
            Shape::Square => "square",
            Shape::Circle => "circle",
            Shape::Custom(_) => "custom",
        }
    }

    /// Number of points in the closed outline, closing point included.
    pub fn point_count(self) -> usize {
        match self {
            Shape::Triangle => TRIANGLE.len(),
            Shape::Square => SQUARE.len(),
            Shape::Circle => CIRCLE_SEGMENTS as usize + 1,
            Shape::Custom(n) => n as usize + 1,
        }
    }

    pub fn label(self) -> String {
        match self {
            Shape::Custom(n) => format!("custom ({n}-gon)"),
            other => other.name().to_string(),
        }
    }
}

pub fn clamp_vertex_count(vertices: u32) -> u32 {
    vertices.clamp(MIN_CUSTOM_VERTICES, MAX_CUSTOM_VERTICES)
}

/// Produces the closed outline for `shape`. The first point is repeated as the last.
pub fn outline(shape: Shape) -> Result<Vec<Vec2>, GeometryError> {
    match shape {
        Shape::Triangle => Ok(TRIANGLE.to_vec()),
        Shape::Square => Ok(SQUARE.to_vec()),
        Shape::Circle => Ok(ring(CIRCLE_SEGMENTS)),
        Shape::Custom(n) if n < MIN_CUSTOM_VERTICES => Err(GeometryError::InvalidVertexCount(n)),
        Shape::Custom(n) => Ok(ring(n)),
    }
}

fn ring(segments: u32) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * TAU;
            Vec2::new(OUTLINE_RADIUS * angle.cos(), OUTLINE_RADIUS * angle.sin())
        })
        .collect();
    // i == segments lands on angle 2π; reuse the first point so the loop closes exactly
    points.push(points[0]);
    points
}
