//! Math utilities and types
//!
//! Provides the fundamental 2D math types the collision system builds on.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Rotate a vector counter-clockwise by `angle` radians
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Transform representing position, rotation, and scale in 2D
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2 {
    /// Position in world space
    pub position: Vec2,

    /// Rotation in radians, counter-clockwise
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2 {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Apply this transform to a local-space point (scale, then rotate, then translate)
    pub fn apply(&self, point: Vec2) -> Vec2 {
        let scaled = Vec2::new(point.x * self.scale.x, point.y * self.scale.y);
        self.position + rotate(scaled, self.rotation)
    }

    /// Apply this transform to a local-space direction (scale and rotate, no translation)
    pub fn apply_vector(&self, vector: Vec2) -> Vec2 {
        let scaled = Vec2::new(vector.x * self.scale.x, vector.y * self.scale.y);
        rotate(scaled, self.rotation)
    }
}
