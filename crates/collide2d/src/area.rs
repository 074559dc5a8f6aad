//! Areas and direction resolution
//!
//! An [`Area`] pairs a shape with an enabled flag and two layer masks:
//! `affects` (layers it broadcasts into) and `affected_by` (layers it
//! listens to). [`Area::colliding`] combines the mask relationship with
//! one geometric test into a [`CollisionDirection`], always checking the
//! cheap mask gates before any geometry.

use crate::collision::shape::Shape;
use crate::collision::within_bounds;
use crate::collision_layers::LayerMask;

/// Which side(s) of a pair get notified of an overlap
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum CollisionDirection {
    /// No notification: disabled, mask-gated, or geometrically apart
    None,
    /// Only the first area affects the second
    Forwards,
    /// Only the second area affects the first
    Backwards,
    /// Both areas affect each other
    Both,
}

impl CollisionDirection {
    /// The same relationship seen from the other side of the pair
    pub fn reversed(self) -> Self {
        match self {
            Self::Forwards => Self::Backwards,
            Self::Backwards => Self::Forwards,
            other => other,
        }
    }
}

/// A collidable region: shape, enabled flag, and two layer masks
///
/// Plain value type, safe to copy; it has no lifecycle of its own beyond
/// its owner. Gameplay code toggles `enabled` and the masks directly.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Area {
    /// The collision geometry
    pub shape: Shape,
    /// Disabled areas never produce a direction
    pub enabled: bool,
    /// Layers this area broadcasts into
    pub affects: LayerMask,
    /// Layers this area listens to
    pub affected_by: LayerMask,
}

impl Area {
    /// Create an enabled area broadcasting into and listening to all layers
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            enabled: true,
            affects: LayerMask::ALL,
            affected_by: LayerMask::ALL,
        }
    }

    /// Set both masks
    pub fn with_layers(mut self, affects: LayerMask, affected_by: LayerMask) -> Self {
        self.affects = affects;
        self.affected_by = affected_by;
        self
    }

    /// Set the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Resolve the collision direction against another area
    ///
    /// Order matters for performance: the enabled flags and the mask
    /// relationship are checked before any geometry work, so a pair that
    /// cannot notify anyone costs two bitwise ANDs and nothing more.
    /// Self-pairs are not filtered here; the broad phase excludes an area
    /// from colliding with itself.
    pub fn colliding(&self, other: &Self) -> CollisionDirection {
        if !self.enabled || !other.enabled {
            return CollisionDirection::None;
        }

        let forwards = self.affects.overlaps(other.affected_by);
        let backwards = other.affects.overlaps(self.affected_by);
        if !forwards && !backwards {
            return CollisionDirection::None;
        }

        if !within_bounds(&self.shape, &other.shape) {
            return CollisionDirection::None;
        }

        match (forwards, backwards) {
            (true, true) => CollisionDirection::Both,
            (true, false) => CollisionDirection::Forwards,
            (false, true) => CollisionDirection::Backwards,
            (false, false) => unreachable!("mask gate returned early"),
        }
    }
}
