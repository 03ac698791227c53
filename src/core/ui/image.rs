//=========================================================================
// UI Image
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::UiElement;
use crate::core::render::{Rect, Sprite};
use crate::core::{Context, Vec2};

//=== UiImage =============================================================

/// Draws a texture (or part of one) at a fixed screen position.
///
/// A zero size means "use the texture's own size", resolved through the
/// context's texture registry at render time.
#[derive(Debug, Clone)]
pub struct UiImage {
    sprite: Sprite,
    position: Vec2,
    size: Vec2,
    visible: bool,
}

impl UiImage {
    pub fn new(texture_id: impl Into<String>, position: Vec2) -> Self {
        Self {
            sprite: Sprite::new(texture_id),
            position,
            size: Vec2::zeros(),
            visible: true,
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_source_rect(mut self, rect: Rect) -> Self {
        self.sprite.source_rect = Some(rect);
        self
    }

    pub fn with_flipped(mut self, flipped: bool) -> Self {
        self.sprite.flipped = flipped;
        self
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn set_sprite(&mut self, sprite: Sprite) {
        self.sprite = sprite;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Size to draw at, falling back to the source rect, then the texture.
    fn resolve_size(&self, context: &Context) -> Option<Vec2> {
        if self.size != Vec2::zeros() {
            return Some(self.size);
        }
        if let Some(rect) = self.sprite.source_rect {
            return Some(rect.size);
        }
        context.textures().size_of(&self.sprite.texture_id)
    }
}

impl UiElement for UiImage {
    fn render(&mut self, context: &mut Context) {
        let Some(size) = self.resolve_size(context) else {
            warn!(target: "scene", "UI image texture '{}' has no known size", self.sprite.texture_id);
            return;
        };

        context.draw_ui_sprite(&self.sprite, self.position, size);
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
