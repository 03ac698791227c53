//=========================================================================
// Transform Component
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Component;
use crate::core::Vec2;

//=== TransformComponent ==================================================

/// Position, scale and rotation (degrees) of an object in 2D world space.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    position: Vec2,
    scale: Vec2,
    rotation: f32,
}

impl TransformComponent {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.rotation = (self.rotation + degrees) % 360.0;
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::new(Vec2::zeros())
    }
}

impl Component for TransformComponent {}
