//=========================================================================
// UI Layer
//=========================================================================
//
// Screen-space elements drawn on top of a scene's game objects.
//
// Each scene owns one UiLayer. Elements are rendered in insertion order
// and offered input top-most first; the first element that consumes the
// input stops propagation.
//
//=========================================================================

//=== Module Declarations =================================================

mod image;

//=== Public API ==========================================================

pub use image::UiImage;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::Context;

//=== UiElement Trait =====================================================

/// A screen-space element owned by a [`UiLayer`].
pub trait UiElement {
    /// Returns true if the input was consumed.
    fn handle_input(&mut self, _context: &mut Context) -> bool {
        false
    }

    fn update(&mut self, _dt: f32, _context: &mut Context) {}

    fn render(&mut self, context: &mut Context);

    fn is_visible(&self) -> bool {
        true
    }
}

//=== UiLayer =============================================================

/// Ordered set of UI elements belonging to one scene.
pub struct UiLayer {
    elements: Vec<Box<dyn UiElement>>,
    visible: bool,
}

impl UiLayer {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            visible: true,
        }
    }

    pub fn add_element(&mut self, element: impl UiElement + 'static) {
        self.elements.push(Box::new(element));
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        if !self.elements.is_empty() {
            debug!(target: "scene", "Cleared {} UI element(s)", self.elements.len());
        }
        self.elements.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    //--- Frame Passes -----------------------------------------------------

    /// Offers input to visible elements, top-most first.
    ///
    /// Returns true if an element consumed it.
    pub fn handle_input(&mut self, context: &mut Context) -> bool {
        if !self.visible {
            return false;
        }

        self.elements
            .iter_mut()
            .rev()
            .filter(|element| element.is_visible())
            .any(|element| element.handle_input(context))
    }

    pub fn update(&mut self, dt: f32, context: &mut Context) {
        for element in self.elements.iter_mut() {
            element.update(dt, context);
        }
    }

    pub fn render(&mut self, context: &mut Context) {
        if !self.visible {
            return;
        }

        for element in self.elements.iter_mut().filter(|e| e.is_visible()) {
            element.render(context);
        }
    }
}

impl Default for UiLayer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
