//! The closed set of collision shape kinds
//!
//! A [`Shape`] holds exactly one kind of geometry behind a single tagged
//! value. Payload access is checked: requesting the wrong kind is an
//! explicit [`ShapeError::KindMismatch`], never a reinterpretation. A
//! wrapped shape is immutable; replacing the geometry means constructing
//! a new `Shape`.
//!
//! Every match over `Shape` in this crate is exhaustive with no wildcard
//! arm, so adding a kind fails compilation at each site that must learn
//! about it, starting with the narrow-phase matrix.

use std::fmt;

use thiserror::Error;

use super::primitives::{BoxBounds, Capsule, Circle, Figure, Polygon, Ray};

/// Discriminator for the shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    /// Axis-aligned box
    Box,
    /// Circle or ellipse
    Circle,
    /// Segment inflated by a width
    Capsule,
    /// Finite directed segment
    Ray,
    /// Dynamic point list
    Figure,
    /// Pre-triangulated polygon
    Polygon,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Box => "Box",
            Self::Circle => "Circle",
            Self::Capsule => "Capsule",
            Self::Ray => "Ray",
            Self::Figure => "Figure",
            Self::Polygon => "Polygon",
        };
        f.write_str(name)
    }
}

/// Errors from shape construction and tagged payload access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A payload was requested as a kind that does not match the tag
    #[error("shape kind mismatch: requested {expected}, found {actual}")]
    KindMismatch {
        /// The kind the caller asked for
        expected: ShapeKind,
        /// The kind actually stored
        actual: ShapeKind,
    },

    /// A figure needs at least three points
    #[error("figure point list is degenerate ({len} points, need at least 3)")]
    DegeneratePointList {
        /// Number of points supplied
        len: usize,
    },

    /// Circle radius components must be positive
    #[error("circle radius components must be positive")]
    DegenerateRadius,

    /// Capsule width and length must be positive
    #[error("capsule width and length must be positive")]
    DegenerateCapsule,

    /// Ray length must be positive
    #[error("ray length must be positive")]
    DegenerateRay,

    /// A polygon needs at least one triangle
    #[error("polygon triangle list is empty")]
    EmptyTriangleList,

    /// Box bounds must satisfy min < max on both axes
    #[error("box bounds are inverted or empty")]
    InvalidBounds,
}

/// A collision shape: exactly one of the supported kinds
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    /// Axis-aligned box in its own local space
    Box(BoxBounds),
    /// Circle or ellipse
    Circle(Circle),
    /// Capsule around a core segment
    Capsule(Capsule),
    /// Finite directed segment for raycasts
    Ray(Ray),
    /// Dynamic point list with a local transform
    Figure(Figure),
    /// Triangle list with a local transform
    Polygon(Polygon),
}

impl Shape {
    /// The kind tag of the contained geometry
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Box(_) => ShapeKind::Box,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Capsule(_) => ShapeKind::Capsule,
            Self::Ray(_) => ShapeKind::Ray,
            Self::Figure(_) => ShapeKind::Figure,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// The box payload, or a kind mismatch error
    pub fn as_box(&self) -> Result<&BoxBounds, ShapeError> {
        match self {
            Self::Box(b) => Ok(b),
            other => Err(ShapeError::KindMismatch {
                expected: ShapeKind::Box,
                actual: other.kind(),
            }),
        }
    }

    /// The circle payload, or a kind mismatch error
    pub fn as_circle(&self) -> Result<&Circle, ShapeError> {
        match self {
            Self::Circle(c) => Ok(c),
            other => Err(ShapeError::KindMismatch {
                expected: ShapeKind::Circle,
                actual: other.kind(),
            }),
        }
    }

    /// The capsule payload, or a kind mismatch error
    pub fn as_capsule(&self) -> Result<&Capsule, ShapeError> {
        match self {
            Self::Capsule(c) => Ok(c),
            other => Err(ShapeError::KindMismatch {
                expected: ShapeKind::Capsule,
                actual: other.kind(),
            }),
        }
    }

    /// The ray payload, or a kind mismatch error
    pub fn as_ray(&self) -> Result<&Ray, ShapeError> {
        match self {
            Self::Ray(r) => Ok(r),
            other => Err(ShapeError::KindMismatch {
                expected: ShapeKind::Ray,
                actual: other.kind(),
            }),
        }
    }

    /// The figure payload, or a kind mismatch error
    pub fn as_figure(&self) -> Result<&Figure, ShapeError> {
        match self {
            Self::Figure(f) => Ok(f),
            other => Err(ShapeError::KindMismatch {
                expected: ShapeKind::Figure,
                actual: other.kind(),
            }),
        }
    }

    /// The polygon payload, or a kind mismatch error
    pub fn as_polygon(&self) -> Result<&Polygon, ShapeError> {
        match self {
            Self::Polygon(p) => Ok(p),
            other => Err(ShapeError::KindMismatch {
                expected: ShapeKind::Polygon,
                actual: other.kind(),
            }),
        }
    }
}

impl From<BoxBounds> for Shape {
    fn from(b: BoxBounds) -> Self {
        Self::Box(b)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Capsule> for Shape {
    fn from(c: Capsule) -> Self {
        Self::Capsule(c)
    }
}

impl From<Ray> for Shape {
    fn from(r: Ray) -> Self {
        Self::Ray(r)
    }
}

impl From<Figure> for Shape {
    fn from(f: Figure) -> Self {
        Self::Figure(f)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    fn unit_circle() -> Shape {
        Shape::Circle(Circle::circular(Vec2::zeros(), 1.0).unwrap())
    }

    #[test]
    fn kind_tag_matches_payload() {
        assert_eq!(unit_circle().kind(), ShapeKind::Circle);
        let b = Shape::Box(BoxBounds::new(Vec2::zeros(), Vec2::new(1.0, 1.0)).unwrap());
        assert_eq!(b.kind(), ShapeKind::Box);
    }

    #[test]
    fn matching_accessor_returns_payload() {
        let shape = unit_circle();
        let circle = shape.as_circle().unwrap();
        assert_eq!(circle.radius, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn mismatched_accessor_fails_loudly() {
        let shape = unit_circle();
        let err = shape.as_box().unwrap_err();
        assert_eq!(
            err,
            ShapeError::KindMismatch {
                expected: ShapeKind::Box,
                actual: ShapeKind::Circle,
            }
        );
    }

    #[test]
    fn error_message_names_both_kinds() {
        let err = unit_circle().as_ray().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Ray"));
        assert!(message.contains("Circle"));
    }
}
