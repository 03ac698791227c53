//=========================================================================
// Context
//=========================================================================
//
// Engine-wide facade handed to every scene, object, component and UI
// element hook.
//
// Contains:
// - dispatcher: event channel for scene transitions and game events
// - actions: input action queries (fed by the host)
// - renderer / camera: drawing surface and view transform
// - textures: texture sizes for layout
//
// The Context outlives every scene. The scene core reads from it and
// publishes through it but never replaces its collaborators.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, EventDispatcher};
use crate::core::input::ActionStates;
use crate::core::render::{Camera, Renderer, Sprite};
use crate::core::resource::TextureRegistry;
use crate::core::{EngineError, Vec2};

//=== Context =============================================================

/// Shared collaborators accessible to scenes during every frame phase.
pub struct Context {
    dispatcher: EventDispatcher,
    actions: ActionStates,
    renderer: Box<dyn Renderer>,
    camera: Camera,
    textures: TextureRegistry,
}

impl Context {
    /// Starts building a context.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    //--- Events -----------------------------------------------------------

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    /// Shorthand for `dispatcher_mut().publish(event)`.
    pub fn publish<E: Event>(&mut self, event: E) -> bool {
        self.dispatcher.publish(event)
    }

    //--- Input ------------------------------------------------------------

    pub fn actions(&self) -> &ActionStates {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionStates {
        &mut self.actions
    }

    //--- Rendering --------------------------------------------------------

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// Draws a sprite placed in world space, transformed by the camera.
    pub fn draw_world_sprite(&mut self, sprite: &Sprite, world_position: Vec2, scale: Vec2, rotation: f32) {
        let screen = self.camera.world_to_screen(world_position);
        self.renderer.draw_sprite(sprite, screen, scale, rotation);
    }

    /// Draws a sprite in screen space for UI.
    pub fn draw_ui_sprite(&mut self, sprite: &Sprite, position: Vec2, size: Vec2) {
        self.renderer.draw_ui_sprite(sprite, position, size);
    }

    pub fn draw_text(&mut self, text: &str, position: Vec2) {
        self.renderer.draw_text(text, position);
    }

    //--- Resources --------------------------------------------------------

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureRegistry {
        &mut self.textures
    }
}

//=== ContextBuilder ======================================================

/// Builder for [`Context`].
///
/// # Default Values
///
/// - **Viewport**: 640 x 360
/// - **Textures**: empty registry
///
/// A renderer is required; [`build`](Self::build) fails without one.
pub struct ContextBuilder {
    renderer: Option<Box<dyn Renderer>>,
    textures: TextureRegistry,
    viewport: Vec2,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self {
            renderer: None,
            textures: TextureRegistry::new(),
            viewport: Vec2::new(640.0, 360.0),
        }
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_boxed_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_textures(mut self, textures: TextureRegistry) -> Self {
        self.textures = textures;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec2::new(width, height);
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingCollaborator`] if no renderer was supplied
    /// - [`EngineError::InvalidViewport`] if a viewport dimension is not positive
    pub fn build(self) -> Result<Context, EngineError> {
        let Some(renderer) = self.renderer else {
            error!(target: "engine", "Cannot build context without a renderer");
            return Err(EngineError::MissingCollaborator("renderer"));
        };

        if !(self.viewport.x > 0.0 && self.viewport.y > 0.0) {
            error!(target: "engine", "Invalid viewport {:?}", self.viewport);
            return Err(EngineError::InvalidViewport {
                width: self.viewport.x,
                height: self.viewport.y,
            });
        }

        info!(target: "engine", "Context created (viewport: {}x{})", self.viewport.x, self.viewport.y);

        Ok(Context {
            dispatcher: EventDispatcher::new(),
            actions: ActionStates::new(),
            renderer,
            camera: Camera::new(self.viewport),
            textures: self.textures,
        })
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
