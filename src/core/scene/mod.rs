//=========================================================================
// Scene System
//=========================================================================
//
// Scenes and the stack-based manager that switches between them.
//
// Architecture:
//   SceneManager
//     ├─ stack: Vec<Box<dyn Scene>>   (bottom → top)
//     └─ pending: TransitionQueue     (requests collected from the bus)
//
//   Scene (trait) ── base() ──> SceneBase
//                                 ├─ objects: ObjectRegistry
//                                 └─ ui: UiLayer
//
// Flow:
//   Scene::request_*() → EventDispatcher → SceneManager::update()
//                                          → top scene update
//                                          → pending transition applied
//
// A scene never touches the manager's stack directly.
//
//=========================================================================

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::SceneManager;
pub use transition_queue::TransitionPolicy;

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, PopSceneEvent, PushSceneEvent, QuitEvent, ReplaceSceneEvent, SubscriberId};
use crate::core::object::ObjectRegistry;
use crate::core::ui::UiLayer;
use crate::core::Context;

//=== SceneBase ===========================================================

/// State every scene carries: name, init flag, objects and UI.
///
/// Concrete scenes embed one and expose it through [`Scene::base`].
pub struct SceneBase {
    name: String,
    initialized: bool,
    objects: ObjectRegistry,
    ui: UiLayer,
    subscriber: Option<SubscriberId>,
}

impl SceneBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initialized: false,
            objects: ObjectRegistry::new(),
            ui: UiLayer::new(),
            subscriber: None,
        }
    }

    //--- Identity ---------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn set_initialized(&mut self, initialized: bool) {
        self.initialized = initialized;
    }

    //--- Owned Content ----------------------------------------------------

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.objects
    }

    pub fn ui(&self) -> &UiLayer {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiLayer {
        &mut self.ui
    }

    //--- Event Subscriptions ----------------------------------------------

    /// Subscriber identity of this scene, allocated on first use.
    ///
    /// Every subscription made with it is disconnected by [`clean`](Self::clean).
    pub fn subscriber(&mut self, context: &mut Context) -> SubscriberId {
        *self
            .subscriber
            .get_or_insert_with(|| context.dispatcher_mut().register_subscriber())
    }

    pub fn subscriber_id(&self) -> Option<SubscriberId> {
        self.subscriber
    }

    /// Subscribes this scene to events of type `E` until [`clean`](Self::clean).
    pub fn subscribe<E: Event>(&mut self, context: &mut Context) {
        let subscriber = self.subscriber(context);
        context.dispatcher_mut().subscribe::<E>(subscriber);
    }

    /// Events of type `E` queued on the bus, oldest first.
    ///
    /// Empty unless this scene is currently subscribed to `E`.
    pub fn received<E: Event + Clone>(&self, context: &Context) -> Vec<E> {
        match self.subscriber {
            Some(subscriber) if context.dispatcher().is_subscribed::<E>(subscriber) => context
                .dispatcher()
                .read::<E>()
                .iter()
                .map(|stamped| stamped.event.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    //--- Default Lifecycle ------------------------------------------------

    pub fn init(&mut self, _context: &mut Context) {
        self.initialized = true;
        debug!(target: "scene", "Scene '{}' initialized", self.name);
    }

    pub fn handle_input(&mut self, context: &mut Context) {
        self.objects.handle_input(context);
        self.ui.handle_input(context);
    }

    /// Updates every object, then the UI, then reconciles the registry.
    pub fn update(&mut self, dt: f32, context: &mut Context) {
        self.objects.update(dt, context);
        self.ui.update(dt, context);
        self.objects.reconcile();
    }

    /// Objects first (painter's order), UI on top.
    pub fn render(&mut self, context: &mut Context) {
        self.objects.render(context);
        self.ui.render(context);
    }

    /// Releases objects and UI and drops the scene's subscriptions.
    ///
    /// Safe to call more than once.
    pub fn clean(&mut self, context: &mut Context) {
        trace!(target: "scene", "Cleaning scene '{}'", self.name);
        self.objects.clean_all();
        self.ui.clear();

        if let Some(subscriber) = self.subscriber.take() {
            context.dispatcher_mut().disconnect(subscriber);
        }
    }
}

//=== Scene Trait =========================================================

/// Lifecycle hooks of a scene managed by the [`SceneManager`].
///
/// Only [`base`](Self::base) and [`base_mut`](Self::base_mut) are
/// required. Every hook defaults to the [`SceneBase`] behaviour; an
/// override should call through to the base so objects, UI and
/// subscriptions keep working.
///
/// ```rust
/// # use strata_engine::prelude::*;
/// struct TitleScene {
///     base: SceneBase,
/// }
///
/// impl Scene for TitleScene {
///     fn base(&self) -> &SceneBase { &self.base }
///     fn base_mut(&mut self) -> &mut SceneBase { &mut self.base }
///
///     fn init(&mut self, context: &mut Context) {
///         self.base.objects_mut().add_game_object(GameObject::new("logo"));
///         self.base.init(context);
///     }
/// }
/// ```
pub trait Scene {
    fn base(&self) -> &SceneBase;

    fn base_mut(&mut self) -> &mut SceneBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn is_initialized(&self) -> bool {
        self.base().is_initialized()
    }

    /// Builds initial objects and UI. Called at most once by the manager.
    fn init(&mut self, context: &mut Context) {
        self.base_mut().init(context);
    }

    fn handle_input(&mut self, context: &mut Context) {
        self.base_mut().handle_input(context);
    }

    fn update(&mut self, dt: f32, context: &mut Context) {
        self.base_mut().update(dt, context);
    }

    fn render(&mut self, context: &mut Context) {
        self.base_mut().render(context);
    }

    fn clean(&mut self, context: &mut Context) {
        self.base_mut().clean(context);
    }

    //--- Transition Requests ----------------------------------------------

    /// Asks the manager to pop this scene after the current update.
    fn request_pop_scene(&self, context: &mut Context) {
        debug!(target: "scene", "'{}' requested pop", self.name());
        context.publish(PopSceneEvent);
    }

    /// Asks the manager to push `scene` after the current update.
    fn request_push_scene(&self, context: &mut Context, scene: Box<dyn Scene>) {
        debug!(target: "scene", "'{}' requested push of '{}'", self.name(), scene.name());
        context.publish(PushSceneEvent { scene });
    }

    /// Asks the manager to replace the whole stack with `scene`.
    fn request_replace_scene(&self, context: &mut Context, scene: Box<dyn Scene>) {
        debug!(target: "scene", "'{}' requested replace with '{}'", self.name(), scene.name());
        context.publish(ReplaceSceneEvent { scene });
    }

    /// Asks the application to shut down.
    fn quit(&self, context: &mut Context) {
        debug!(target: "scene", "'{}' requested quit", self.name());
        context.publish(QuitEvent);
    }
}

//=== BasicScene ==========================================================

/// A scene with no behaviour beyond [`SceneBase`].
///
/// Useful for scenes assembled entirely from objects and UI elements.
pub struct BasicScene {
    base: SceneBase,
}

impl BasicScene {
    pub fn new(name: impl Into<String>) -> Self {
        Self { base: SceneBase::new(name) }
    }
}

impl Scene for BasicScene {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
