//=========================================================================
// Engine Core
//
// Scene and game-object lifecycle plus the narrow interfaces the core
// consumes (rendering, input actions, textures, host messages).
//
// Layout:
// - `object`: GameObject, components, per-scene ObjectRegistry
// - `scene`: Scene trait, SceneBase, SceneManager
// - `event`: queued publish/subscribe bus and lifecycle events
// - `ui`: per-scene UI layer
// - `render` / `input` / `resource`: collaborator interfaces
// - `host_bridge`: channel from the host thread into the frame
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod error;

pub mod event;
pub mod host_bridge;
pub mod input;
pub mod object;
pub mod render;
pub mod resource;
pub mod scene;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use context::{Context, ContextBuilder};
pub use error::EngineError;
pub use host_bridge::{HostEvent, HostHandle, TickControl};

/// 2D vector used for positions, sizes and scales.
pub type Vec2 = nalgebra::Vector2<f32>;
