//! Scene layout configuration.
//!
//! A [`SceneLayout`] describes the static board: playfield dimensions, the
//! fixed bouncers and scoring slots along the bottom, and the rectangle the
//! input layer hit-tests for the edit-mode toggle. Layouts load from JSON
//! and are applied to a fresh store/world pair at scene initialization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::body::{BodyId, BodySpec, BodyStore, SlotTag};
use crate::physics::PhysicsWorld;

/// Errors raised while loading or validating a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to parse layout JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("playfield dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("layout defines no slots")]
    NoSlots,
    #[error("bouncer radius must be positive, got {0}")]
    InvalidBouncerRadius(f32),
}

/// A fixed circular bouncer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BouncerDef {
    pub position: [f32; 2],
    pub radius: f32,
}

/// A tagged scoring slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotDef {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub tag: SlotTag,
}

/// Axis-aligned rectangle, anchored at its bottom-left corner, that toggles
/// edit mode when a pointer-down lands inside it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToggleRegion {
    pub position: [f32; 2],
    pub size: [f32; 2],
}

impl ToggleRegion {
    /// Whether a scene-space point lies inside the region.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.position[0]
            && x <= self.position[0] + self.size[0]
            && y >= self.position[1]
            && y <= self.position[1] + self.size[1]
    }
}

/// Complete static scene description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneLayout {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub bouncers: Vec<BouncerDef>,
    pub slots: Vec<SlotDef>,
    pub edit_toggle: ToggleRegion,
}

/// Ids of the bodies a layout created.
#[derive(Debug, Clone)]
pub struct LayoutHandles {
    pub boundary: BodyId,
    pub bouncers: Vec<BodyId>,
    pub slots: Vec<BodyId>,
}

impl SceneLayout {
    /// Loads and validates a layout from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Serializes the layout to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The classic pachinko board, embedded at compile time.
    pub fn default_classic() -> Self {
        const CLASSIC_LAYOUT_JSON: &str = include_str!("../layouts/classic.json");
        Self::from_json(CLASSIC_LAYOUT_JSON).expect("Failed to parse classic layout JSON")
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LayoutError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.slots.is_empty() {
            return Err(LayoutError::NoSlots);
        }
        if let Some(bouncer) = self.bouncers.iter().find(|b| b.radius <= 0.0) {
            return Err(LayoutError::InvalidBouncerRadius(bouncer.radius));
        }
        Ok(())
    }

    /// Spawns the boundary, bouncers, and slots into the given store.
    ///
    /// These bodies persist for the scene's lifetime.
    pub fn apply_to_store(
        &self,
        store: &mut BodyStore,
        world: &mut PhysicsWorld,
    ) -> LayoutHandles {
        let boundary = store.spawn(world, BodySpec::boundary(self.width, self.height));

        let bouncers = self
            .bouncers
            .iter()
            .map(|b| {
                store.spawn(
                    world,
                    BodySpec::bouncer(b.position[0], b.position[1], b.radius),
                )
            })
            .collect();

        let slots = self
            .slots
            .iter()
            .map(|s| {
                store.spawn(
                    world,
                    BodySpec::slot(s.position[0], s.position[1], s.size[0], s.size[1], s.tag),
                )
            })
            .collect();

        LayoutHandles {
            boundary,
            bouncers,
            slots,
        }
    }
}
