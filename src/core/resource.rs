//=========================================================================
// Texture Registry
//=========================================================================
//
// Minimal resource view the core needs: texture sizes by id. Loading and
// caching of the actual pixel data stays with the host.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::Vec2;

//=== TextureRegistry =====================================================

/// Known textures and their pixel sizes.
#[derive(Debug, Default, Clone)]
pub struct TextureRegistry {
    sizes: HashMap<String, Vec2>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the size of a texture, replacing any previous entry.
    pub fn register(&mut self, texture_id: impl Into<String>, size: Vec2) {
        let texture_id = texture_id.into();
        if self.sizes.insert(texture_id.clone(), size).is_some() {
            warn!(target: "resources", "Texture '{}' re-registered with size {:?}", texture_id, size);
        }
    }

    /// Returns the size of a texture, if known.
    pub fn size_of(&self, texture_id: &str) -> Option<Vec2> {
        self.sizes.get(texture_id).copied()
    }

    pub fn contains(&self, texture_id: &str) -> bool {
        self.sizes.contains_key(texture_id)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
