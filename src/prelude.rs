//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use strata_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{Engine, EngineBuilder};

// Shared context and host bridge
pub use crate::core::{Context, ContextBuilder, EngineError, HostEvent, HostHandle, TickControl, Vec2};

// Game objects
pub use crate::core::object::{
    Alignment, Component, FrameContext, GameObject, ObjectCommands, ObjectId, ObjectRegistry, SpriteComponent,
    TransformComponent,
};

// Scenes
pub use crate::core::scene::{BasicScene, Scene, SceneBase, SceneManager, TransitionPolicy};

// Events
pub use crate::core::event::{EventDispatcher, PopSceneEvent, PushSceneEvent, QuitEvent, ReplaceSceneEvent};

// Collaborator interfaces
pub use crate::core::input::{ActionEvent, ActionState, ActionUpdate};
pub use crate::core::render::{Camera, Rect, Renderer, Sprite};
pub use crate::core::resource::TextureRegistry;
pub use crate::core::ui::{UiElement, UiImage, UiLayer};
