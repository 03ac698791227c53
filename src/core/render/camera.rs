//=========================================================================
// Camera
//=========================================================================
//
// 2D view transform: world ↔ screen conversion with optional bounds.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Rect;
use crate::core::Vec2;

//=== Camera ==============================================================

/// Viewport into the 2D world.
///
/// `position` is the world coordinate shown at the top-left corner of the
/// viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    viewport_size: Vec2,
    position: Vec2,
    limit_bounds: Option<Rect>,
}

impl Camera {
    /// Creates a camera at the world origin.
    pub fn new(viewport_size: Vec2) -> Self {
        Self {
            viewport_size,
            position: Vec2::zeros(),
            limit_bounds: None,
        }
    }

    //--- Movement ---------------------------------------------------------

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.clamp_position();
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
        self.clamp_position();
    }

    /// Restricts the camera so the viewport stays inside `bounds`.
    pub fn set_limit_bounds(&mut self, bounds: Option<Rect>) {
        self.limit_bounds = bounds;
        self.clamp_position();
    }

    //--- Conversion -------------------------------------------------------

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    /// Converts with a scroll factor (0 = fixed to screen, 1 = world).
    pub fn world_to_screen_with_parallax(&self, world: Vec2, scroll_factor: Vec2) -> Vec2 {
        world - self.position.component_mul(&scroll_factor)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position
    }

    //--- Accessors --------------------------------------------------------

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn limit_bounds(&self) -> Option<Rect> {
        self.limit_bounds
    }

    //--- Internal Helpers -------------------------------------------------

    fn clamp_position(&mut self) {
        let Some(bounds) = self.limit_bounds else {
            return;
        };

        let min = bounds.position;
        // A viewport larger than the bounds pins to the bounds origin
        let max = (bounds.position + bounds.size - self.viewport_size).sup(&min);
        self.position = self.position.sup(&min).inf(&max);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
