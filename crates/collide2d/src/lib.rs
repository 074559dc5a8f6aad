//! # collide2d
//!
//! A 2D collision-detection core for real-time simulations. Every tick it
//! decides which pairs of registered shapes overlap and which sides of
//! each pair are permitted, by layer rules, to notify each other.
//!
//! ## Features
//!
//! - **Closed shape set**: box, circle/ellipse, capsule, ray, point
//!   figure and triangulated polygon behind one tagged [`Shape`] value
//!   with checked payload access
//! - **Symmetric narrow phase**: one overlap test per unordered kind
//!   pair, with automatic forwarding for the mirrored order
//! - **Layer-filtered dispatch**: per-area `affects`/`affected_by`
//!   masks resolve each pair to a [`CollisionDirection`] before any
//!   geometry is touched
//! - **Live registry**: a [`CollisionServer`] sweeps all pairs once per
//!   tick and invokes per-collider callbacks; registry mutation from
//!   inside callbacks is deferred to end-of-tick
//!
//! ## Quick Start
//!
//! ```rust
//! use collide2d::prelude::*;
//!
//! let mut server = CollisionServer::new();
//!
//! let wall = Area::new(BoxBounds::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 1.0))?)
//!     .with_layers(LayerMask::layer(0), LayerMask::NONE);
//! server.create_instance(wall);
//!
//! let player = Area::new(Circle::circular(Vec2::new(1.0, 0.5), 0.5)?)
//!     .with_layers(LayerMask::NONE, LayerMask::layer(0));
//! server.create_instance_with(player, |event, _commands| {
//!     println!("player touched {:?}", event.other);
//! });
//!
//! server.process(); // once per simulation tick
//! # Ok::<(), collide2d::collision::ShapeError>(())
//! ```
//!
//! [`Shape`]: collision::Shape
//! [`CollisionDirection`]: area::CollisionDirection
//! [`CollisionServer`]: collision_server::CollisionServer

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod area;
pub mod collision;
pub mod collision_layers;
pub mod collision_server;
pub mod foundation;

pub use area::{Area, CollisionDirection};
pub use collision::{raycast, within_bounds, Shape, ShapeError, ShapeKind};
pub use collision_layers::LayerMask;
pub use collision_server::{ColliderKey, CollisionEvent, CollisionServer, ServerCommands};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        area::{Area, CollisionDirection},
        collision::{
            raycast, within_bounds, BoxBounds, Capsule, Circle, Figure, Polygon, Ray, RayHit,
            Shape, ShapeError, ShapeKind, Triangle2,
        },
        collision_layers::LayerMask,
        collision_server::{
            ColliderKey, CollisionCallback, CollisionEvent, CollisionServer, ServerCommands,
        },
        foundation::math::{Point2, Transform2, Vec2},
    };
}
