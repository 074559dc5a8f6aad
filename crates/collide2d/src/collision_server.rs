//! Collider registry and per-tick broad-phase sweep
//!
//! A [`CollisionServer`] owns the registry of live colliders. Colliders
//! are bound with [`CollisionServer::create_instance`] and unbound with
//! [`CollisionServer::destroy`]; that pairing is their entire lifecycle.
//! Once per tick [`CollisionServer::process`] evaluates every unordered
//! pair exactly once (a flat O(n²) sweep, N(N−1)/2 resolutions) and
//! dispatches callbacks for the side(s) the resolved direction names.
//!
//! Reentrancy: callbacks run synchronously inside the sweep, so they are
//! not handed the registry. Mutations a callback wants (destroying a
//! collider, spawning a new one) go through [`ServerCommands`] and are
//! applied after the sweep finishes. `process` also iterates a snapshot
//! of the key list taken at tick start, so the pair order for one tick is
//! fixed by registration order.
//!
//! Servers are plain constructible values; independent simulations use
//! independent instances. Everything here is single-threaded and
//! synchronous.

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

use crate::area::{Area, CollisionDirection};
use crate::collision_layers::LayerMask;

new_key_type! {
    /// Stable handle to a registered collider
    pub struct ColliderKey;
}

/// The argument handed to collision callbacks
#[derive(Debug, Clone)]
pub struct CollisionEvent {
    /// Key of the other collider, or `None` when the overlap came from an
    /// unregistered probe passed to [`CollisionServer::check`]
    pub other: Option<ColliderKey>,
    /// Copy of the other side's area at dispatch time
    pub other_area: Area,
    /// The pair resolution with the receiver as the first operand: a
    /// one-way contact reaches its receiver as `Backwards`, a mutual
    /// one as `Both`
    pub direction: CollisionDirection,
}

/// Callback invoked when a collider is notified of an overlap
pub type CollisionCallback = Box<dyn FnMut(&CollisionEvent, &mut ServerCommands)>;

/// Registry mutations queued by callbacks, applied after the sweep
#[derive(Default)]
pub struct ServerCommands {
    queue: Vec<Command>,
}

enum Command {
    Destroy(ColliderKey),
    Create(Area, Option<CollisionCallback>),
}

impl ServerCommands {
    /// Queue a collider for destruction at end-of-tick
    pub fn destroy(&mut self, key: ColliderKey) {
        self.queue.push(Command::Destroy(key));
    }

    /// Queue a new collider for registration at end-of-tick
    pub fn create(&mut self, area: Area) {
        self.queue.push(Command::Create(area, None));
    }

    /// Queue a new collider with a callback for registration at end-of-tick
    pub fn create_with(
        &mut self,
        area: Area,
        callback: impl FnMut(&CollisionEvent, &mut ServerCommands) + 'static,
    ) {
        self.queue.push(Command::Create(area, Some(Box::new(callback))));
    }
}

struct Collider {
    area: Area,
    on_collision: Option<CollisionCallback>,
}

/// The live collider registry and broad-phase sweep
#[derive(Default)]
pub struct CollisionServer {
    colliders: SlotMap<ColliderKey, Collider>,
    /// Registration order; the sweep and `check` scan in this order
    order: Vec<ColliderKey>,
}

impl CollisionServer {
    /// Create an empty server
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate and register a collider without a callback
    pub fn create_instance(&mut self, area: Area) -> ColliderKey {
        self.insert(area, None)
    }

    /// Allocate and register a collider with a collision callback
    pub fn create_instance_with(
        &mut self,
        area: Area,
        callback: impl FnMut(&CollisionEvent, &mut ServerCommands) + 'static,
    ) -> ColliderKey {
        self.insert(area, Some(Box::new(callback)))
    }

    fn insert(&mut self, area: Area, callback: Option<CollisionCallback>) -> ColliderKey {
        let key = self.colliders.insert(Collider {
            area,
            on_collision: callback,
        });
        self.order.push(key);
        debug!("registered collider {key:?} ({} live)", self.order.len());
        key
    }

    /// Unregister a collider; returns whether it was live
    pub fn destroy(&mut self, key: ColliderKey) -> bool {
        let removed = self.colliders.remove(key).is_some();
        if removed {
            self.order.retain(|&k| k != key);
            debug!("destroyed collider {key:?} ({} live)", self.order.len());
        }
        removed
    }

    /// Whether a key refers to a live collider
    pub fn contains(&self, key: ColliderKey) -> bool {
        self.colliders.contains_key(key)
    }

    /// A live collider's area
    pub fn area(&self, key: ColliderKey) -> Option<&Area> {
        self.colliders.get(key).map(|c| &c.area)
    }

    /// Mutable access to a live collider's area (toggle `enabled`, masks)
    pub fn area_mut(&mut self, key: ColliderKey) -> Option<&mut Area> {
        self.colliders.get_mut(key).map(|c| &mut c.area)
    }

    /// Replace a live collider's callback
    pub fn set_callback(
        &mut self,
        key: ColliderKey,
        callback: impl FnMut(&CollisionEvent, &mut ServerCommands) + 'static,
    ) -> bool {
        match self.colliders.get_mut(key) {
            Some(collider) => {
                collider.on_collision = Some(Box::new(callback));
                true
            }
            None => false,
        }
    }

    /// Number of live colliders
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Unregister everything
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.order.clear();
        debug!("cleared collider registry");
    }

    /// The per-tick entry point: sweep all unordered pairs once
    pub fn process(&mut self) {
        let snapshot = self.order.clone();
        trace!("collision sweep over {} colliders", snapshot.len());

        let mut commands = ServerCommands::default();
        for i in 0..snapshot.len() {
            for j in (i + 1)..snapshot.len() {
                let (key_a, key_b) = (snapshot[i], snapshot[j]);
                let direction = match (self.colliders.get(key_a), self.colliders.get(key_b)) {
                    (Some(a), Some(b)) => a.area.colliding(&b.area),
                    _ => continue,
                };
                self.handle_collision(key_a, key_b, direction, &mut commands);
            }
        }
        self.apply_commands(commands);
    }

    /// Scan the registry against a probe area, pre-filtered by `mask`
    ///
    /// Only colliders whose `affected_by` overlaps `mask` are considered.
    /// A collider's callback fires when the probe affects it (`Forwards`
    /// or `Both`); the returned list carries every non-`None` direction so
    /// the caller can act on the `Backwards` side of the probe.
    pub fn check(
        &mut self,
        area: &Area,
        mask: LayerMask,
    ) -> Vec<(ColliderKey, CollisionDirection)> {
        self.check_filtered(area, Some(mask))
    }

    /// Scan the registry against a probe area with no mask pre-filter
    pub fn check_all(&mut self, area: &Area) -> Vec<(ColliderKey, CollisionDirection)> {
        self.check_filtered(area, None)
    }

    fn check_filtered(
        &mut self,
        area: &Area,
        mask: Option<LayerMask>,
    ) -> Vec<(ColliderKey, CollisionDirection)> {
        let snapshot = self.order.clone();
        let mut hits = Vec::new();
        let mut commands = ServerCommands::default();

        for key in snapshot {
            let direction = {
                let Some(collider) = self.colliders.get(key) else {
                    continue;
                };
                if let Some(mask) = mask {
                    if !collider.area.affected_by.overlaps(mask) {
                        continue;
                    }
                }
                area.colliding(&collider.area)
            };
            if direction == CollisionDirection::None {
                continue;
            }
            hits.push((key, direction));
            if matches!(
                direction,
                CollisionDirection::Forwards | CollisionDirection::Both
            ) {
                self.dispatch_probe(key, area, direction.reversed(), &mut commands);
            }
        }

        self.apply_commands(commands);
        hits
    }

    /// Invoke callbacks for the side(s) named by a resolved direction
    fn handle_collision(
        &mut self,
        key_a: ColliderKey,
        key_b: ColliderKey,
        direction: CollisionDirection,
        commands: &mut ServerCommands,
    ) {
        match direction {
            CollisionDirection::None => {}
            CollisionDirection::Forwards => {
                self.dispatch(key_b, key_a, direction.reversed(), commands);
            }
            CollisionDirection::Backwards => self.dispatch(key_a, key_b, direction, commands),
            CollisionDirection::Both => {
                self.dispatch(key_b, key_a, direction, commands);
                self.dispatch(key_a, key_b, direction, commands);
            }
        }
    }

    fn dispatch(
        &mut self,
        receiver: ColliderKey,
        other: ColliderKey,
        direction: CollisionDirection,
        commands: &mut ServerCommands,
    ) {
        let Some(other_area) = self.colliders.get(other).map(|c| c.area.clone()) else {
            return;
        };
        if let Some(collider) = self.colliders.get_mut(receiver) {
            if let Some(callback) = collider.on_collision.as_mut() {
                let event = CollisionEvent {
                    other: Some(other),
                    other_area,
                    direction,
                };
                callback(&event, commands);
            }
        }
    }

    fn dispatch_probe(
        &mut self,
        receiver: ColliderKey,
        probe: &Area,
        direction: CollisionDirection,
        commands: &mut ServerCommands,
    ) {
        if let Some(collider) = self.colliders.get_mut(receiver) {
            if let Some(callback) = collider.on_collision.as_mut() {
                let event = CollisionEvent {
                    other: None,
                    other_area: probe.clone(),
                    direction,
                };
                callback(&event, commands);
            }
        }
    }

    fn apply_commands(&mut self, commands: ServerCommands) {
        for command in commands.queue {
            match command {
                Command::Destroy(key) => {
                    self.destroy(key);
                }
                Command::Create(area, callback) => {
                    self.insert(area, callback);
                }
            }
        }
    }
}
