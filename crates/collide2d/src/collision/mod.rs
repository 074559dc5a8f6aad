//! Shape model and narrow-phase geometry
//!
//! The shape variant, the primitive geometry it is built from, and the
//! pairwise overlap matrix. Broad-phase sweeping and dispatch live in
//! [`collision_server`](crate::collision_server).

pub mod narrow_phase;
pub mod primitives;
pub mod shape;

pub use narrow_phase::{raycast, within_bounds};
pub use primitives::{BoxBounds, Capsule, Circle, Figure, Polygon, Ray, RayHit, Triangle2};
pub use shape::{Shape, ShapeError, ShapeKind};
