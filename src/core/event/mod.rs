//=========================================================================
// Event Channel
//=========================================================================
//
// Process-wide publish/subscribe bus plus the lifecycle events the scene
// core publishes on it.
//
// Flow:
//   Scene::request_*() → publish(PushSceneEvent { .. })
//                              ↓
//   SceneManager::update() → take() → pending slot → apply
//
//=========================================================================

//=== Module Declarations =================================================

mod dispatcher;
mod event_queue;

//=== Public API ==========================================================

pub use dispatcher::{Event, EventDispatcher, Stamped, SubscriberId};

//=== Internal Dependencies ===============================================

use std::fmt;

use crate::core::scene::Scene;

//=== Scene Lifecycle Events ==============================================

/// Requests that the top scene be popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopSceneEvent;

/// Requests that `scene` be pushed on top of the stack.
///
/// Ownership of the scene moves with the event.
pub struct PushSceneEvent {
    pub scene: Box<dyn Scene>,
}

/// Requests that the whole stack be replaced by `scene`.
pub struct ReplaceSceneEvent {
    pub scene: Box<dyn Scene>,
}

/// Requests application shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuitEvent;

impl PushSceneEvent {
    pub fn new(scene: impl Scene + 'static) -> Self {
        Self { scene: Box::new(scene) }
    }
}

impl ReplaceSceneEvent {
    pub fn new(scene: impl Scene + 'static) -> Self {
        Self { scene: Box::new(scene) }
    }
}

impl fmt::Debug for PushSceneEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushSceneEvent")
            .field("scene", &self.scene.name())
            .finish()
    }
}

impl fmt::Debug for ReplaceSceneEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaceSceneEvent")
            .field("scene", &self.scene.name())
            .finish()
    }
}
