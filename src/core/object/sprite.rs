//=========================================================================
// Sprite Component
//=========================================================================
//
// Draws a sprite at the owner's TransformComponent.
//
// The sprite size is resolved lazily from the Context's texture registry
// the first time it is rendered (or taken from the source rect if set).
// Objects without a transform are skipped.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::{Component, FrameContext, GameObject, TransformComponent};
use crate::core::render::{Rect, Sprite};
use crate::core::Vec2;

//=== Alignment ===========================================================

/// Which point of the sprite sits on the transform position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Top-left corner, no offset.
    #[default]
    None,
    Center,
    BottomCenter,
}

//=== SpriteComponent =====================================================

#[derive(Debug, Clone)]
pub struct SpriteComponent {
    sprite: Sprite,
    alignment: Alignment,
    size: Option<Vec2>,
    hidden: bool,
}

impl SpriteComponent {
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self::from_sprite(Sprite::new(texture_id))
    }

    pub fn from_sprite(sprite: Sprite) -> Self {
        let size = sprite.source_rect.map(|rect| rect.size);
        Self {
            sprite,
            alignment: Alignment::None,
            size,
            hidden: false,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn texture_id(&self) -> &str {
        &self.sprite.texture_id
    }

    /// Resolved size, once known.
    pub fn size(&self) -> Option<Vec2> {
        self.size
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn is_flipped(&self) -> bool {
        self.sprite.flipped
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.sprite.flipped = flipped;
    }

    /// Swaps the texture; the size is resolved again on next render.
    pub fn set_texture(&mut self, texture_id: impl Into<String>, source_rect: Option<Rect>) {
        self.sprite.texture_id = texture_id.into();
        self.sprite.source_rect = source_rect;
        self.size = source_rect.map(|rect| rect.size);
    }

    /// Offset from the transform position for the current alignment.
    pub fn offset(&self, scale: Vec2) -> Vec2 {
        let size = self.size.unwrap_or_else(Vec2::zeros).component_mul(&scale);
        match self.alignment {
            Alignment::None => Vec2::zeros(),
            Alignment::Center => -size / 2.0,
            Alignment::BottomCenter => Vec2::new(-size.x / 2.0, -size.y),
        }
    }
}

impl Component for SpriteComponent {
    fn render(&mut self, owner: &mut GameObject, frame: &mut FrameContext<'_>) {
        if self.hidden {
            return;
        }

        if self.size.is_none() {
            self.size = frame.context.textures().size_of(&self.sprite.texture_id);
            if self.size.is_none() {
                warn!(target: "objects", "Unknown texture '{}' on '{}'", self.sprite.texture_id, owner.name());
            }
        }

        let Some(transform) = owner.get_component::<TransformComponent>() else {
            return;
        };

        let position = transform.position() + self.offset(transform.scale());
        frame
            .context
            .draw_world_sprite(&self.sprite, position, transform.scale(), transform.rotation());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
