//! Collision layer masks for filtering collision detection
//!
//! Every [`Area`](crate::area::Area) carries two masks: `affects` (the layers
//! it broadcasts into) and `affected_by` (the layers it listens to). A pair of
//! shapes may only interact when one side's `affects` overlaps the other
//! side's `affected_by`; the cheap mask check always runs before any geometry.

use std::ops::{BitOr, BitOrAssign};

/// Fixed-width 64-layer bit-set.
///
/// All operations are pure; a mask is a plain value and safe to copy.
/// "Overlap" between two masks means their bitwise AND is nonzero, so the
/// empty mask never overlaps anything, including itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct LayerMask(pub u64);

impl LayerMask {
    /// The empty mask: member of no layer, overlaps nothing
    pub const NONE: Self = Self(0);

    /// All 64 layers
    pub const ALL: Self = Self(u64::MAX);

    /// Mask containing the single layer `index` (0..=63)
    pub fn layer(index: u32) -> Self {
        debug_assert!(index < 64, "layer index out of range: {index}");
        Self(1u64 << (index & 63))
    }

    /// Union of several single layers
    ///
    /// # Example
    /// ```
    /// use collide2d::collision_layers::LayerMask;
    ///
    /// let mask = LayerMask::from_layers(&[0, 3, 7]);
    /// assert!(mask.contains(LayerMask::layer(3)));
    /// ```
    pub fn from_layers(layers: &[u32]) -> Self {
        layers
            .iter()
            .fold(Self::NONE, |acc, &index| acc | Self::layer(index))
    }

    /// Check whether two masks share at least one layer
    pub fn overlaps(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Check whether every layer in `other` is also in this mask
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of two masks
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True if the mask has no layers set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for LayerMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
