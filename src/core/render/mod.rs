//=========================================================================
// Rendering Interface
//=========================================================================
//
// Narrow drawing surface the scene core renders through. Backends (GPU,
// software, logging) live outside the core and implement `Renderer`.
//
//=========================================================================

//=== Module Declarations =================================================

mod camera;

//=== Public API ==========================================================

pub use camera::Camera;

//=== Internal Dependencies ===============================================

use crate::core::Vec2;

//=== Rect ================================================================

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }
}

//=== Sprite ==============================================================

/// What to draw: a texture id plus an optional source region.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture_id: String,
    pub source_rect: Option<Rect>,
    pub flipped: bool,
}

impl Sprite {
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self {
            texture_id: texture_id.into(),
            source_rect: None,
            flipped: false,
        }
    }

    pub fn with_source_rect(mut self, rect: Rect) -> Self {
        self.source_rect = Some(rect);
        self
    }

    pub fn with_flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }
}

//=== Renderer Trait ======================================================

/// Drawing backend consumed by scenes, components and UI elements.
///
/// World-space calls receive screen coordinates already transformed by
/// the [`Camera`]; UI calls are in screen space to begin with.
pub trait Renderer {
    /// Draws a sprite at a screen position.
    fn draw_sprite(&mut self, sprite: &Sprite, position: Vec2, scale: Vec2, rotation: f32);

    /// Draws a UI sprite stretched to `size`.
    fn draw_ui_sprite(&mut self, sprite: &Sprite, position: Vec2, size: Vec2);

    /// Draws a line of text.
    fn draw_text(&mut self, text: &str, position: Vec2);
}
