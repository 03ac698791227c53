//=========================================================================
// Strata Engine
//
// Frame-level facade over the scene core.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──frame(dt)──>  TickControl
//         │                          │
//         ├─ with_renderer()         ├─ drains host events → ActionEvent
//         ├─ with_viewport()         ├─ handle_input → update → render
//         └─ with_initial_scene()    └─ reports QuitEvent as Exit
// ```
//
// Frame timing belongs to the host: it calls `frame(dt)` at whatever
// rate it likes and stops when `TickControl::Exit` comes back.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::event::{PushSceneEvent, QuitEvent, SubscriberId};
use crate::core::host_bridge::EventCollector;
use crate::core::input::ActionEvent;
use crate::core::render::Renderer;
use crate::core::resource::TextureRegistry;
use crate::core::scene::{Scene, SceneManager, TransitionPolicy};
use crate::core::{Context, EngineError, HostHandle, TickControl, Vec2};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Viewport**: 640 x 360
/// - **Transition policy**: [`TransitionPolicy::LastWins`]
/// - **Host event budget**: 100 events per frame
/// - **Host channel capacity**: 128 events
///
/// A renderer is required; [`build`](Self::build) fails without one.
///
/// # Examples
///
/// ```no_run
/// use strata_engine::prelude::*;
/// # struct NullRenderer;
/// # impl Renderer for NullRenderer {
/// #     fn draw_sprite(&mut self, _: &Sprite, _: Vec2, _: Vec2, _: f32) {}
/// #     fn draw_ui_sprite(&mut self, _: &Sprite, _: Vec2, _: Vec2) {}
/// #     fn draw_text(&mut self, _: &str, _: Vec2) {}
/// # }
///
/// let mut engine = EngineBuilder::new()
///     .with_renderer(NullRenderer)
///     .with_viewport(1280.0, 720.0)
///     .with_initial_scene(BasicScene::new("title"))
///     .build()
///     .expect("engine");
///
/// while engine.frame(1.0 / 60.0) == TickControl::Continue {}
/// ```
pub struct EngineBuilder {
    renderer: Option<Box<dyn Renderer>>,
    textures: TextureRegistry,
    viewport: Vec2,
    policy: TransitionPolicy,
    host_event_budget: usize,
    channel_capacity: usize,
    initial_scene: Option<Box<dyn Scene>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            renderer: None,
            textures: TextureRegistry::new(),
            viewport: Vec2::new(640.0, 360.0),
            policy: TransitionPolicy::default(),
            host_event_budget: 100,
            channel_capacity: 128,
            initial_scene: None,
        }
    }

    /// Sets the drawing backend. Required.
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Sets the known texture sizes.
    pub fn with_textures(mut self, textures: TextureRegistry) -> Self {
        self.textures = textures;
        self
    }

    /// Sets the camera viewport size. Validated by [`build`](Self::build).
    ///
    /// Default: 640 x 360
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec2::new(width, height);
        self
    }

    /// Sets how several transition requests in one frame are combined.
    ///
    /// Default: [`TransitionPolicy::LastWins`]
    pub fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the maximum number of host events drained per frame.
    ///
    /// Default: 100
    ///
    /// # Panics
    ///
    /// Panics if `budget == 0`.
    pub fn with_host_event_budget(mut self, budget: usize) -> Self {
        assert!(budget > 0, "Host event budget must be positive");
        self.host_event_budget = budget;
        self
    }

    /// Sets the capacity of the host → engine channel.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the scene pushed by the first frame's update.
    pub fn with_initial_scene(mut self, scene: impl Scene + 'static) -> Self {
        self.initial_scene = Some(Box::new(scene));
        self
    }

    /// Builds the engine.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError`] from context construction: missing
    /// renderer or a non-positive viewport.
    pub fn build(self) -> Result<Engine, EngineError> {
        let mut builder = Context::builder()
            .with_textures(self.textures)
            .with_viewport(self.viewport.x, self.viewport.y);
        if let Some(renderer) = self.renderer {
            builder = builder.with_boxed_renderer(renderer);
        }
        let mut context = builder.build()?;

        let scenes = SceneManager::new(&mut context).with_policy(self.policy);

        let quit_subscriber = context.dispatcher_mut().register_subscriber();
        context.dispatcher_mut().subscribe::<QuitEvent>(quit_subscriber);

        if let Some(scene) = self.initial_scene {
            debug!(target: "engine", "Queued initial scene '{}'", scene.name());
            context.publish(PushSceneEvent { scene });
        }

        let (sender, receiver) = bounded(self.channel_capacity);

        info!(
            target: "engine",
            "Engine built (policy: {:?}, host budget: {}, channel: {})",
            self.policy, self.host_event_budget, self.channel_capacity
        );

        Ok(Engine {
            context,
            scenes,
            collector: EventCollector::new(receiver, self.host_event_budget),
            host: HostHandle::new(sender),
            quit_subscriber,
            frame_count: 0,
            shut_down: false,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Strata engine runtime.
///
/// Owns the [`Context`] and the [`SceneManager`]. Create it through
/// [`EngineBuilder`], then call [`frame`](Self::frame) once per host tick.
///
/// # Frame Order
///
/// ```text
/// host events → actions (+ ActionEvent) → handle_input → update (+ transitions) → render
///                                                                  ↓
///                                              QuitEvent? → TickControl::Exit
/// ```
pub struct Engine {
    context: Context,
    scenes: SceneManager,
    collector: EventCollector,
    host: HostHandle,
    quit_subscriber: SubscriberId,
    frame_count: u64,
    shut_down: bool,
}

impl Engine {
    //--- Host Interface ---------------------------------------------------

    /// Sending half for the host layer. Clone freely across threads.
    pub fn host_handle(&self) -> HostHandle {
        self.host.clone()
    }

    //--- Execution --------------------------------------------------------

    /// Runs one frame.
    ///
    /// Returns [`TickControl::Exit`] once the host asked to close, a
    /// [`QuitEvent`] was raised, or the engine was shut down.
    pub fn frame(&mut self, dt: f32) -> TickControl {
        if self.shut_down {
            return TickControl::Exit;
        }

        //--- 1. Host events ----------------------------------------------
        self.context.actions_mut().begin_frame();
        if self.collector.collect_frame() == TickControl::Exit {
            info!(target: "engine", "Exit requested by host after {} frame(s)", self.frame_count);
            return TickControl::Exit;
        }
        self.context.actions_mut().apply(self.collector.updates());
        self.publish_action_events();

        //--- 2. Scene phases ---------------------------------------------
        self.scenes.handle_input(&mut self.context);
        self.scenes.update(dt, &mut self.context);
        self.scenes.render(&mut self.context);

        self.frame_count += 1;

        //--- 3. Quit signal ----------------------------------------------
        if !self.context.dispatcher_mut().take::<QuitEvent>().is_empty() {
            info!(target: "engine", "Quit raised after {} frame(s)", self.frame_count);
            return TickControl::Exit;
        }

        TickControl::Continue
    }

    /// Runs up to `max_frames` frames of `dt` each, stopping early on exit.
    ///
    /// Returns the number of frames that completed with `Continue`.
    pub fn run_frames(&mut self, dt: f32, max_frames: u64) -> u64 {
        let mut completed = 0;
        while completed < max_frames {
            if self.frame(dt) == TickControl::Exit {
                break;
            }
            completed += 1;
        }
        completed
    }

    /// Cleans every scene and disconnects from the bus. Idempotent; also
    /// run on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }

        self.scenes.close(&mut self.context);
        self.context.dispatcher_mut().disconnect(self.quit_subscriber);
        self.shut_down = true;

        info!(target: "engine", "Engine shutdown complete ({} frame(s))", self.frame_count);
    }

    /// Replaces last frame's action events with this frame's updates.
    fn publish_action_events(&mut self) {
        self.context.dispatcher_mut().clear::<ActionEvent>();
        for update in self.collector.updates() {
            self.context.publish(ActionEvent::from(update));
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
