//! Scene state and the frame-driven simulation loop.
//!
//! A [`Scene`] owns the physics world, the body store, the score, and the
//! placement controller. Everything runs on one logical thread: pointer
//! input is applied between steps, never during one, so a spawn is always
//! visible to the very next contact-resolution pass.

use serde::{Deserialize, Serialize};

use crate::body::{BodyId, BodySpec, BodyStore};
use crate::contact::{ContactEffect, classify};
use crate::layout::{LayoutHandles, SceneLayout};
use crate::physics::PhysicsWorld;
use crate::placement::{Mode, PlacementController};

/// Outward-facing notification produced by a scene mutation.
///
/// `ScoreChanged` fires once per unit scoring contact, never coalesced, so
/// an observer sees the full audit trail of individual scoring events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SceneEvent {
    ScoreChanged { delta: i64, score: i64 },
    BallSpawned { id: BodyId },
    BallDestroyed { id: BodyId },
    ObstaclePlaced { id: BodyId },
    ModeChanged { mode: Mode },
}

/// Complete scene: live bodies, score, and input mode.
#[derive(Debug)]
pub struct Scene {
    pub physics: PhysicsWorld,
    pub store: BodyStore,
    pub layout: SceneLayout,
    pub handles: LayoutHandles,
    pub placement: PlacementController,
    score: i64,
}

impl Scene {
    /// Creates a scene on the classic board.
    pub fn new(seed: u64) -> Self {
        Self::with_layout(SceneLayout::default_classic(), seed)
    }

    /// Creates a scene from a custom layout.
    pub fn with_layout(layout: SceneLayout, seed: u64) -> Self {
        let mut physics = PhysicsWorld::new();
        let mut store = BodyStore::new();
        let handles = layout.apply_to_store(&mut store, &mut physics);

        tracing::info!(
            "[scene] initialized '{}' with {} bodies",
            layout.name,
            store.len()
        );

        Self {
            physics,
            store,
            layout,
            handles,
            placement: PlacementController::new(seed),
            score: 0,
        }
    }

    /// Spawns a ball at the top of the playfield.
    ///
    /// The horizontal position follows the pointer; the vertical position is
    /// pinned to the top edge regardless of where the press landed.
    pub fn spawn_ball(&mut self, x: f32) -> BodyId {
        let id = self
            .store
            .spawn(&mut self.physics, BodySpec::ball(x, self.layout.height));
        tracing::debug!("[scene] spawned ball {} at x={}", id, x);
        id
    }

    /// Spawns a static obstacle at the pointer location with randomized
    /// width, rotation, and color.
    pub fn spawn_obstacle(&mut self, x: f32, y: f32) -> BodyId {
        let params = self.placement.obstacle_params();
        let id = self.store.spawn(
            &mut self.physics,
            BodySpec::obstacle(x, y, params.width, params.height, params.rotation, params.color),
        );
        tracing::debug!(
            "[scene] placed obstacle {} at ({}, {}) width={}",
            id,
            x,
            y,
            params.width
        );
        id
    }

    /// Flips `Play` ⇄ `Edit` and returns the new mode.
    pub fn toggle_edit_mode(&mut self) -> Mode {
        let mode = self.placement.toggle();
        tracing::info!("[scene] mode changed to {:?}", mode);
        mode
    }

    /// Current score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Current input mode.
    pub fn mode(&self) -> Mode {
        self.placement.mode()
    }

    /// Handles a pointer press at scene-space coordinates.
    ///
    /// A press on the edit-toggle affordance flips the mode and does
    /// nothing else; any other location resolves to exactly one spawn
    /// branch depending on the mode. There is no invalid location.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Vec<SceneEvent> {
        if self.layout.edit_toggle.contains(x, y) {
            let mode = self.toggle_edit_mode();
            return vec![SceneEvent::ModeChanged { mode }];
        }

        match self.placement.mode() {
            Mode::Play => {
                let id = self.spawn_ball(x);
                vec![SceneEvent::BallSpawned { id }]
            }
            Mode::Edit => {
                let id = self.spawn_obstacle(x, y);
                vec![SceneEvent::ObstaclePlaced { id }]
            }
        }
    }

    /// Resolves one contact reported by the physics substrate.
    ///
    /// Both effects of a scoring contact (score delta and ball removal) are
    /// applied before this returns, so no later step can observe one
    /// without the other.
    pub fn on_contact(&mut self, id_a: BodyId, id_b: BodyId) -> Vec<SceneEvent> {
        let effects = classify(&self.store, id_a, id_b);
        let mut events = Vec::with_capacity(effects.len());

        for effect in effects {
            match effect {
                ContactEffect::ScoreChanged { delta } => {
                    self.score += delta;
                    tracing::info!("[scene] score {:+} -> {}", delta, self.score);
                    events.push(SceneEvent::ScoreChanged {
                        delta,
                        score: self.score,
                    });
                }
                ContactEffect::DestroyBody { id } => {
                    if self.store.remove(&mut self.physics, id) {
                        tracing::debug!("[scene] destroyed ball {}", id);
                        events.push(SceneEvent::BallDestroyed { id });
                    }
                }
            }
        }

        events
    }

    /// Advances the simulation by one frame.
    ///
    /// Steps the physics world, then feeds every contact reported during
    /// that step through [`Scene::on_contact`] exactly once. Contacts whose
    /// collider no longer resolves to a body are dropped silently; an
    /// earlier contact in the same batch already destroyed that body.
    pub fn update(&mut self) -> Vec<SceneEvent> {
        let contacts = self.physics.step();
        let mut events = Vec::new();

        for contact in contacts {
            let Some(id_a) = self.store.id_by_collider(contact.first) else {
                continue;
            };
            let Some(id_b) = self.store.id_by_collider(contact.second) else {
                continue;
            };
            events.extend(self.on_contact(id_a, id_b));
        }

        events
    }

    /// Returns the current frame number.
    pub fn current_frame(&self) -> u64 {
        self.physics.current_frame()
    }
}
