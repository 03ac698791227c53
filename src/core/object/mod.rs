//=========================================================================
// Game Objects
//=========================================================================
//
// Entities (GameObject), their components, and the per-scene registry
// that owns them.
//
//=========================================================================

//=== Module Declarations =================================================

mod component;
mod game_object;
mod registry;
mod sprite;
mod transform;

//=== Public API ==========================================================

pub use component::{AsAny, Component};
pub use game_object::GameObject;
pub use registry::{ObjectCommands, ObjectRegistry};
pub use sprite::{Alignment, SpriteComponent};
pub use transform::TransformComponent;

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::Context;

//=== Identifiers =========================================================

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`GameObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    pub(crate) fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Process-unique identity of an [`ObjectRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryId(u64);

impl RegistryId {
    pub(crate) fn next() -> Self {
        Self(NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

//=== FrameContext ========================================================

/// Everything an object hook may touch during a pass: the shared engine
/// context and the owning registry's deferred commands.
pub struct FrameContext<'a> {
    pub context: &'a mut Context,
    pub commands: &'a mut ObjectCommands,
}

impl<'a> FrameContext<'a> {
    pub fn new(context: &'a mut Context, commands: &'a mut ObjectCommands) -> Self {
        Self { context, commands }
    }
}
