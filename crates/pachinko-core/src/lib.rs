//! Pachinko Game Core
//!
//! Physics-driven game core for a 2D pachinko-style arcade simulation:
//! balls fall under gravity, bounce off fixed bouncers and player-placed
//! obstacles, and score by landing in tagged goal/penalty slots.
//!
//! Rendering, asset loading, and input-device handling live outside this
//! crate; it consumes pre-resolved scene-space pointer coordinates and
//! exposes scene mutation commands plus score/mode observations.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod contact;
pub mod layout;
pub mod physics;
pub mod placement;
pub mod scene;

pub use body::{
    BALL_RADIUS, BALL_RESTITUTION, Body, BodyId, BodyKind, BodyShape, BodySpec, BodyStore, Color,
    SlotTag,
};
pub use contact::{ContactEffect, classify};
pub use layout::{BouncerDef, LayoutError, LayoutHandles, SceneLayout, SlotDef, ToggleRegion};
pub use physics::{ContactEvent, PHYSICS_DT, PhysicsWorld, default_gravity};
pub use placement::{
    Mode, OBSTACLE_HEIGHT, OBSTACLE_MAX_ROTATION, OBSTACLE_MAX_WIDTH, OBSTACLE_MIN_WIDTH,
    ObstacleParams, PlacementController,
};
pub use scene::{Scene, SceneEvent};
