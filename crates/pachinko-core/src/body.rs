//! Body data model and the rigid body store.
//!
//! Every simulated entity (ball, bouncer, slot, obstacle, boundary) is a
//! [`Body`] owned by the [`BodyStore`], which maps store-level ids to the
//! underlying rapier handles.

use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::physics::PhysicsWorld;

/// Unique identifier for a body within a store.
pub type BodyId = u32;

/// Ball radius in pixels.
pub const BALL_RADIUS: f32 = 32.0;

/// Restitution applied to player-spawned balls.
pub const BALL_RESTITUTION: f32 = 0.4;

/// Collision group for balls.
pub const BALL_GROUP: Group = Group::GROUP_1;

/// Collision group for static geometry (bouncers, slots, obstacles, boundary).
pub const STATIC_GROUP: Group = Group::GROUP_2;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const PINK: Color = Color::rgb(255, 192, 203);

    /// Returns the fixed palette used for random obstacle colors.
    pub fn palette() -> Vec<Color> {
        vec![
            Self::RED,
            Self::BLUE,
            Self::GREEN,
            Self::YELLOW,
            Self::PURPLE,
            Self::ORANGE,
            Self::CYAN,
            Self::PINK,
        ]
    }
}

/// The domain role of a body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Ball,
    Bouncer,
    Slot,
    Obstacle,
    Boundary,
}

/// Scoring tag carried only by slot bodies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotTag {
    Good,
    Bad,
}

impl SlotTag {
    /// Score delta resolved when a ball lands in a slot with this tag.
    pub fn score_delta(self) -> i64 {
        match self {
            Self::Good => 1,
            Self::Bad => -1,
        }
    }
}

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyShape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
    /// Open edge chain around a `width` x `height` field: left wall, floor,
    /// right wall. The top stays open.
    EdgeChain { width: f32, height: f32 },
}

/// Full description of a body to spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub shape: BodyShape,
    pub position: [f32; 2],
    /// Rotation in radians.
    pub rotation: f32,
    pub is_static: bool,
    pub restitution: f32,
    pub density: f32,
    pub tag: Option<SlotTag>,
    pub color: Option<Color>,
}

impl BodySpec {
    /// A dynamic ball at the given position.
    pub fn ball(x: f32, y: f32) -> Self {
        Self {
            kind: BodyKind::Ball,
            shape: BodyShape::Circle {
                radius: BALL_RADIUS,
            },
            position: [x, y],
            rotation: 0.0,
            is_static: false,
            restitution: BALL_RESTITUTION,
            density: 1.0,
            tag: None,
            color: None,
        }
    }

    /// A static, perfectly bouncy circular bouncer.
    pub fn bouncer(x: f32, y: f32, radius: f32) -> Self {
        Self {
            kind: BodyKind::Bouncer,
            shape: BodyShape::Circle { radius },
            position: [x, y],
            rotation: 0.0,
            is_static: true,
            restitution: 1.0,
            density: 1.0,
            tag: None,
            color: None,
        }
    }

    /// A static tagged scoring slot.
    pub fn slot(x: f32, y: f32, width: f32, height: f32, tag: SlotTag) -> Self {
        Self {
            kind: BodyKind::Slot,
            shape: BodyShape::Rectangle { width, height },
            position: [x, y],
            rotation: 0.0,
            is_static: true,
            restitution: 0.0,
            density: 1.0,
            tag: Some(tag),
            color: None,
        }
    }

    /// A static untagged obstacle placed in edit mode.
    pub fn obstacle(x: f32, y: f32, width: f32, height: f32, rotation: f32, color: Color) -> Self {
        Self {
            kind: BodyKind::Obstacle,
            shape: BodyShape::Rectangle { width, height },
            position: [x, y],
            rotation,
            is_static: true,
            restitution: 0.5,
            density: 1.0,
            tag: None,
            color: Some(color),
        }
    }

    /// The playfield boundary: left wall, floor, and right wall of a
    /// `width` x `height` rectangle with its bottom-left corner at the
    /// origin. The top stays open; balls spawn on the top edge.
    pub fn boundary(width: f32, height: f32) -> Self {
        Self {
            kind: BodyKind::Boundary,
            shape: BodyShape::EdgeChain { width, height },
            position: [0.0, 0.0],
            rotation: 0.0,
            is_static: true,
            restitution: 0.2,
            density: 1.0,
            tag: None,
            color: None,
        }
    }

    /// Panics when the spec violates a data-model invariant.
    ///
    /// These are programming defects, not runtime conditions, so they fail
    /// fast at spawn time instead of leaking inconsistent state into the
    /// simulation.
    fn validate(&self) {
        match self.kind {
            BodyKind::Ball => {
                assert!(!self.is_static, "ball bodies must be dynamic");
                assert!(self.tag.is_none(), "ball bodies carry no tag");
            }
            BodyKind::Slot => {
                assert!(self.is_static, "slot bodies must be static");
                assert!(self.tag.is_some(), "slot bodies require a tag");
            }
            BodyKind::Bouncer | BodyKind::Obstacle | BodyKind::Boundary => {
                assert!(self.is_static, "{:?} bodies must be static", self.kind);
                assert!(self.tag.is_none(), "{:?} bodies carry no tag", self.kind);
            }
        }
        assert!(
            (0.0..=1.0).contains(&self.restitution),
            "restitution must lie in [0, 1], got {}",
            self.restitution
        );
        assert!(self.density > 0.0, "density must be positive");
    }
}

/// A live body in the scene, owning its rapier handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub shape: BodyShape,
    pub is_static: bool,
    pub tag: Option<SlotTag>,
    pub color: Option<Color>,
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Owns all simulated bodies and their mapping to physics handles.
#[derive(Debug, Default)]
pub struct BodyStore {
    bodies: HashMap<BodyId, Body>,
    by_collider: HashMap<ColliderHandle, BodyId>,
    next_id: BodyId,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a body into the physics world and returns its fresh id.
    ///
    /// Panics when `spec` violates a data-model invariant; see
    /// `BodySpec::validate`.
    pub fn spawn(&mut self, world: &mut PhysicsWorld, spec: BodySpec) -> BodyId {
        spec.validate();

        let id = self.next_id;
        self.next_id += 1;

        let rigid_body = if spec.is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic().ccd_enabled(true)
        }
        .translation(Vector::new(spec.position[0], spec.position[1]))
        .rotation(spec.rotation)
        .build();

        let body_handle = world.add_rigid_body(rigid_body);

        let groups = if spec.kind == BodyKind::Ball {
            // Balls must report contact with every other group.
            InteractionGroups::new(BALL_GROUP, Group::ALL, InteractionTestMode::And)
        } else {
            InteractionGroups::new(STATIC_GROUP, Group::ALL, InteractionTestMode::And)
        };

        let collider = Self::build_collider(&spec)
            .restitution(spec.restitution)
            .friction(0.3)
            .density(spec.density)
            .collision_groups(groups)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let collider_handle = world.add_collider(collider, body_handle);

        let body = Body {
            id,
            kind: spec.kind,
            shape: spec.shape,
            is_static: spec.is_static,
            tag: spec.tag,
            color: spec.color,
            body_handle,
            collider_handle,
        };
        self.by_collider.insert(collider_handle, id);
        self.bodies.insert(id, body);

        id
    }

    fn build_collider(spec: &BodySpec) -> ColliderBuilder {
        match spec.shape {
            BodyShape::Circle { radius } => ColliderBuilder::ball(radius),
            BodyShape::Rectangle { width, height } => {
                ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            }
            BodyShape::EdgeChain { width, height } => {
                let vertices = vec![
                    Vector::new(0.0, height),
                    Vector::new(0.0, 0.0),
                    Vector::new(width, 0.0),
                    Vector::new(width, height),
                ];
                let indices = vec![[0, 1], [1, 2], [2, 3]];
                ColliderBuilder::polyline(vertices, Some(indices))
            }
        }
    }

    /// Removes a body from the store and the physics world.
    ///
    /// Idempotent: removing an id that is already gone returns `false` and
    /// has no effect. This tolerates a contact being reported from both
    /// sides within one step.
    pub fn remove(&mut self, world: &mut PhysicsWorld, id: BodyId) -> bool {
        let Some(body) = self.bodies.remove(&id) else {
            return false;
        };
        self.by_collider.remove(&body.collider_handle);
        world.remove_rigid_body(body.body_handle);
        true
    }

    /// Gets a body by id.
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Resolves a collider handle back to the owning body id.
    pub fn id_by_collider(&self, handle: ColliderHandle) -> Option<BodyId> {
        self.by_collider.get(&handle).copied()
    }

    /// Iterates over all live bodies in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Counts live bodies of the given kind.
    pub fn count_kind(&self, kind: BodyKind) -> usize {
        self.bodies.values().filter(|b| b.kind == kind).count()
    }

    /// Removes every body from the store and the physics world.
    pub fn clear(&mut self, world: &mut PhysicsWorld) {
        for (_, body) in self.bodies.drain() {
            world.remove_rigid_body(body.body_handle);
        }
        self.by_collider.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut world = PhysicsWorld::new();
        let mut store = BodyStore::new();

        let a = store.spawn(&mut world, BodySpec::ball(100.0, 700.0));
        let b = store.spawn(&mut world, BodySpec::ball(200.0, 700.0));
        let c = store.spawn(&mut world, BodySpec::bouncer(512.0, 0.0, 64.0));

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_ball_spec_is_dynamic_with_fixed_restitution() {
        let spec = BodySpec::ball(500.0, 768.0);
        assert!(!spec.is_static);
        assert_eq!(spec.restitution, BALL_RESTITUTION);
        assert_eq!(spec.position, [500.0, 768.0]);
    }

    #[test]
    fn test_spawned_ball_collider_properties() {
        let mut world = PhysicsWorld::new();
        let mut store = BodyStore::new();

        let id = store.spawn(&mut world, BodySpec::ball(500.0, 768.0));
        let body = store.get(id).unwrap();
        let collider = world.collider_set.get(body.collider_handle).unwrap();

        assert_eq!(collider.restitution(), BALL_RESTITUTION);
        assert_eq!(collider.collision_groups().filter, Group::ALL);
        let rigid = world.get_rigid_body(body.body_handle).unwrap();
        assert!(rigid.is_dynamic());
        assert_eq!(rigid.translation().y, 768.0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut world = PhysicsWorld::new();
        let mut store = BodyStore::new();

        let id = store.spawn(&mut world, BodySpec::ball(100.0, 700.0));

        assert!(store.remove(&mut world, id));
        assert!(!store.remove(&mut world, id));
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_collider_reverse_lookup() {
        let mut world = PhysicsWorld::new();
        let mut store = BodyStore::new();

        let id = store.spawn(&mut world, BodySpec::slot(128.0, 8.0, 128.0, 16.0, SlotTag::Good));
        let handle = store.get(id).unwrap().collider_handle;

        assert_eq!(store.id_by_collider(handle), Some(id));

        store.remove(&mut world, id);
        assert_eq!(store.id_by_collider(handle), None);
    }

    #[test]
    fn test_slot_tag_determines_score_sign() {
        assert_eq!(SlotTag::Good.score_delta(), 1);
        assert_eq!(SlotTag::Bad.score_delta(), -1);
    }

    #[test]
    #[should_panic(expected = "slot bodies require a tag")]
    fn test_untagged_slot_fails_fast() {
        let mut world = PhysicsWorld::new();
        let mut store = BodyStore::new();

        let mut spec = BodySpec::slot(128.0, 8.0, 128.0, 16.0, SlotTag::Good);
        spec.tag = None;
        store.spawn(&mut world, spec);
    }

    #[test]
    #[should_panic(expected = "ball bodies must be dynamic")]
    fn test_static_ball_fails_fast() {
        let mut world = PhysicsWorld::new();
        let mut store = BodyStore::new();

        let mut spec = BodySpec::ball(100.0, 700.0);
        spec.is_static = true;
        store.spawn(&mut world, spec);
    }

    #[test]
    fn test_obstacle_spec_is_static_and_untagged() {
        let spec = BodySpec::obstacle(200.0, 300.0, 64.0, 16.0, 1.2, Color::PURPLE);
        assert!(spec.is_static);
        assert!(spec.tag.is_none());
        assert_eq!(spec.color, Some(Color::PURPLE));
    }

    #[test]
    fn test_boundary_shape_matches_its_collider() {
        let spec = BodySpec::boundary(1024.0, 768.0);
        assert_eq!(
            spec.shape,
            BodyShape::EdgeChain {
                width: 1024.0,
                height: 768.0
            }
        );

        let mut world = PhysicsWorld::new();
        let mut store = BodyStore::new();
        let id = store.spawn(&mut world, spec);
        let body = store.get(id).unwrap();

        // The data model advertises an edge chain and the collider is one,
        // not a solid box.
        let collider = world.collider_set.get(body.collider_handle).unwrap();
        assert!(collider.shape().as_polyline().is_some());
        assert!(collider.shape().as_cuboid().is_none());
    }

    #[test]
    fn test_collision_groups_let_balls_hit_everything() {
        let mut world = PhysicsWorld::new();
        let mut store = BodyStore::new();

        let ball = store.spawn(&mut world, BodySpec::ball(100.0, 700.0));
        let bouncer = store.spawn(&mut world, BodySpec::bouncer(256.0, 0.0, 64.0));

        let ball_groups = world
            .collider_set
            .get(store.get(ball).unwrap().collider_handle)
            .unwrap()
            .collision_groups();
        let bouncer_groups = world
            .collider_set
            .get(store.get(bouncer).unwrap().collider_handle)
            .unwrap()
            .collision_groups();

        assert!(ball_groups.test(bouncer_groups));
        assert!(bouncer_groups.test(ball_groups));
    }

    #[test]
    fn test_clear_empties_store_and_world() {
        let mut world = PhysicsWorld::new();
        let mut store = BodyStore::new();

        store.spawn(&mut world, BodySpec::ball(100.0, 700.0));
        store.spawn(&mut world, BodySpec::bouncer(256.0, 0.0, 64.0));
        assert_eq!(world.rigid_body_set.len(), 2);

        store.clear(&mut world);
        assert!(store.is_empty());
        assert_eq!(world.rigid_body_set.len(), 0);
    }
}
