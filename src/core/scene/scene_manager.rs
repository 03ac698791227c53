//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the scene stack and applies transition requests between frames.
//
// Scenes ask for transitions by publishing Pop/Push/Replace events. The
// manager subscribes to those events at construction, drains them after
// the top scene's update, and applies the result once per update. Stack
// mutation is therefore never observable by a scene mid-frame.
//
// Lifecycle:
//   push    → init (unless already initialized) → on top
//   pop     → clean top → removed
//   replace → clean every scene top-to-bottom → init new → on top
//   close   → clean every scene top-to-bottom → disconnect from bus
//
// A batch that popped and left the stack empty publishes one QuitEvent
// once the whole batch has been applied.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::transition_queue::{PendingTransition, TransitionQueue};
use super::{Scene, TransitionPolicy};
use crate::core::event::{PopSceneEvent, PushSceneEvent, QuitEvent, ReplaceSceneEvent, SubscriberId};
use crate::core::Context;

//=== SceneManager ========================================================

/// Stack of scenes with deferred, event-driven transitions.
///
/// The top scene receives input and update; every scene on the stack is
/// rendered, bottom to top.
pub struct SceneManager {
    stack: Vec<Box<dyn Scene>>,
    pending: TransitionQueue,
    subscriber: SubscriberId,
    closed: bool,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    /// Creates an empty manager subscribed to the scene transition events.
    pub fn new(context: &mut Context) -> Self {
        let dispatcher = context.dispatcher_mut();
        let subscriber = dispatcher.register_subscriber();
        dispatcher.subscribe::<PopSceneEvent>(subscriber);
        dispatcher.subscribe::<PushSceneEvent>(subscriber);
        dispatcher.subscribe::<ReplaceSceneEvent>(subscriber);

        debug!(target: "scene", "Scene manager created ({:?})", subscriber);

        Self {
            stack: Vec::new(),
            pending: TransitionQueue::new(TransitionPolicy::default()),
            subscriber,
            closed: false,
        }
    }

    /// Sets how requests raised within one frame are combined.
    ///
    /// Default: [`TransitionPolicy::LastWins`]
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.pending.set_policy(policy);
        self
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.pending.policy()
    }

    //--- Query API --------------------------------------------------------

    /// The scene on top of the stack.
    pub fn current_scene(&self) -> Option<&dyn Scene> {
        self.stack.last().map(|scene| &**scene)
    }

    pub fn current_scene_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        self.stack.last_mut().map(|scene| &mut **scene)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Scene names, bottom to top.
    pub fn scene_names(&self) -> Vec<&str> {
        self.stack.iter().map(|scene| scene.name()).collect()
    }

    /// Transitions recorded but not yet applied.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    //--- Frame Passes -----------------------------------------------------

    /// Forwards input to the top scene only.
    pub fn handle_input(&mut self, context: &mut Context) {
        if let Some(scene) = self.stack.last_mut() {
            scene.handle_input(context);
        }
    }

    /// Updates the top scene, then applies the transitions requested
    /// since the previous update.
    pub fn update(&mut self, dt: f32, context: &mut Context) {
        if let Some(scene) = self.stack.last_mut() {
            scene.update(dt, context);
        }

        self.collect_requests(context);
        self.apply_pending(context);
    }

    /// Renders every scene, bottom to top.
    pub fn render(&mut self, context: &mut Context) {
        for scene in self.stack.iter_mut() {
            scene.render(context);
        }
    }

    /// Cleans every scene top-to-bottom, discards pending requests and
    /// disconnects from the event bus. Safe to call more than once.
    pub fn close(&mut self, context: &mut Context) {
        if self.closed {
            return;
        }

        info!(target: "scene", "Closing scene manager ({} scene(s))", self.stack.len());

        while let Some(mut scene) = self.stack.pop() {
            debug!(target: "scene", "Cleaning scene '{}'", scene.name());
            scene.clean(context);
        }

        let discarded = self.pending.clear();
        if discarded > 0 {
            debug!(target: "scene", "Discarded {} pending transition(s)", discarded);
        }

        context.dispatcher_mut().disconnect(self.subscriber);
        self.closed = true;
    }

    //--- Request Collection -----------------------------------------------

    /// Drains the scene events raised since the last update into the
    /// pending queue, in publication order.
    fn collect_requests(&mut self, context: &mut Context) {
        let dispatcher = context.dispatcher_mut();

        let mut requests: Vec<(u64, PendingTransition)> = Vec::new();
        requests.extend(
            dispatcher
                .take::<PopSceneEvent>()
                .into_iter()
                .map(|stamped| (stamped.sequence, PendingTransition::Pop)),
        );
        requests.extend(
            dispatcher
                .take::<PushSceneEvent>()
                .into_iter()
                .map(|stamped| (stamped.sequence, PendingTransition::Push(stamped.event.scene))),
        );
        requests.extend(
            dispatcher
                .take::<ReplaceSceneEvent>()
                .into_iter()
                .map(|stamped| (stamped.sequence, PendingTransition::Replace(stamped.event.scene))),
        );

        requests.sort_by_key(|(sequence, _)| *sequence);

        for (_, transition) in requests {
            self.pending.record(transition);
        }
    }

    //--- Stack Mutation ---------------------------------------------------

    fn apply_pending(&mut self, context: &mut Context) {
        if self.pending.is_empty() {
            return;
        }

        let mut popped = false;

        for transition in self.pending.take() {
            match transition {
                PendingTransition::Push(scene) => self.push_scene(scene, context),
                PendingTransition::Pop => {
                    self.pop_scene(context);
                    popped = true;
                }
                PendingTransition::Replace(scene) => self.replace_scene(scene, context),
            }
        }

        if popped && self.stack.is_empty() {
            info!(target: "scene", "Scene stack is empty, quitting");
            context.publish(QuitEvent);
        }
    }

    fn push_scene(&mut self, mut scene: Box<dyn Scene>, context: &mut Context) {
        debug!(target: "scene", "Pushing scene '{}'", scene.name());
        Self::ensure_initialized(&mut *scene, context);
        self.stack.push(scene);
    }

    fn pop_scene(&mut self, context: &mut Context) {
        let Some(mut scene) = self.stack.pop() else {
            error!(target: "scene", "Pop requested on an empty scene stack");
            return;
        };

        debug!(target: "scene", "Popping scene '{}'", scene.name());
        scene.clean(context);
    }

    fn replace_scene(&mut self, mut scene: Box<dyn Scene>, context: &mut Context) {
        debug!(target: "scene", "Replacing {} scene(s) with '{}'", self.stack.len(), scene.name());

        while let Some(mut old) = self.stack.pop() {
            old.clean(context);
        }

        Self::ensure_initialized(&mut *scene, context);
        self.stack.push(scene);
    }

    fn ensure_initialized(scene: &mut dyn Scene, context: &mut Context) {
        if scene.is_initialized() {
            return;
        }

        scene.init(context);

        if !scene.is_initialized() {
            warn!(target: "scene", "Scene '{}' did not mark itself initialized", scene.name());
            scene.base_mut().set_initialized(true);
        }
    }
}

impl Drop for SceneManager {
    fn drop(&mut self) {
        if !self.closed && !self.stack.is_empty() {
            warn!(
                target: "scene",
                "Scene manager dropped without close(); {} scene(s) were not cleaned",
                self.stack.len()
            );
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::{Component, FrameContext, GameObject};
    use crate::core::test_support::{test_context, Journal, JournalScene, Script};

    //--- Helpers ----------------------------------------------------------

    /// Counts quit signals raised through the bus.
    struct QuitListener(SubscriberId);

    impl QuitListener {
        fn attach(ctx: &mut Context) -> Self {
            let id = ctx.dispatcher_mut().register_subscriber();
            ctx.dispatcher_mut().subscribe::<QuitEvent>(id);
            Self(id)
        }

        fn count(&self, ctx: &Context) -> usize {
            assert!(ctx.dispatcher().is_subscribed::<QuitEvent>(self.0));
            ctx.dispatcher().count::<QuitEvent>()
        }
    }

    fn journaled(name: &str, journal: &Journal) -> Box<dyn Scene> {
        Box::new(JournalScene::new(name, journal))
    }

    /// Manager with `names` pushed in order, journal cleared afterwards.
    fn manager_with(ctx: &mut Context, journal: &Journal, names: &[&str]) -> SceneManager {
        let mut manager = SceneManager::new(ctx);
        for name in names {
            ctx.publish(PushSceneEvent { scene: journaled(name, journal) });
            manager.update(0.016, ctx);
        }
        journal.clear();
        manager
    }

    //--- Push / Pop -------------------------------------------------------

    #[test]
    fn push_then_pop_scenario() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["menu"]);

        ctx.publish(PushSceneEvent { scene: journaled("game", &journal) });
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["menu", "game"]);
        assert_eq!(journal.count("game:init"), 1);
        assert_eq!(journal.count("menu:clean"), 0);

        ctx.publish(PopSceneEvent);
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["menu"]);
        assert_eq!(journal.count("game:clean"), 1);
        assert_eq!(journal.count("menu:clean"), 0);
    }

    #[test]
    fn requests_are_deferred_until_update() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["menu"]);

        ctx.publish(PushSceneEvent { scene: journaled("game", &journal) });
        manager.handle_input(&mut ctx);
        manager.render(&mut ctx);

        assert_eq!(manager.scene_names(), vec!["menu"]);
        assert_eq!(journal.count("game:init"), 0);
    }

    #[test]
    fn pushing_initialized_scene_skips_init() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["menu"]);

        let mut ready = JournalScene::new("ready", &journal);
        ready.init(&mut ctx);
        journal.clear();

        ctx.publish(PushSceneEvent::new(ready));
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["menu", "ready"]);
        assert_eq!(journal.count("ready:init"), 0);
    }

    #[test]
    fn only_top_scene_updates_and_handles_input() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["game", "pause"]);

        manager.handle_input(&mut ctx);
        manager.update(0.016, &mut ctx);

        assert_eq!(journal.entries(), vec!["pause:input", "pause:update"]);
    }

    #[test]
    fn render_visits_stack_bottom_to_top() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["world", "hud", "pause"]);

        manager.render(&mut ctx);

        assert_eq!(journal.entries(), vec!["world:render", "hud:render", "pause:render"]);
    }

    #[test]
    fn popping_last_scene_raises_single_quit() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let quit = QuitListener::attach(&mut ctx);
        let mut manager = manager_with(&mut ctx, &journal, &["only"]);

        ctx.publish(PopSceneEvent);
        manager.update(0.016, &mut ctx);

        assert!(manager.is_empty());
        assert_eq!(quit.count(&ctx), 1);
        assert_eq!(journal.count("only:clean"), 1);
    }

    #[test]
    fn pop_on_empty_stack_quits_without_panicking() {
        let (mut ctx, _) = test_context();
        let quit = QuitListener::attach(&mut ctx);
        let mut manager = SceneManager::new(&mut ctx);

        ctx.publish(PopSceneEvent);
        manager.update(0.016, &mut ctx);

        assert!(manager.is_empty());
        assert_eq!(quit.count(&ctx), 1);
    }

    //--- Replace ----------------------------------------------------------

    #[test]
    fn replace_cleans_every_scene_once() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["a", "b"]);

        ctx.publish(ReplaceSceneEvent { scene: journaled("c", &journal) });
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["c"]);
        assert_eq!(journal.count("a:clean"), 1);
        assert_eq!(journal.count("b:clean"), 1);
        assert_eq!(journal.count("c:init"), 1);

        // Top-to-bottom
        let entries = journal.entries();
        let b = entries.iter().position(|e| e == "b:clean");
        let a = entries.iter().position(|e| e == "a:clean");
        assert!(b < a);
    }

    #[test]
    fn replacing_with_initialized_scene_skips_init() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["menu"]);

        let mut ready = JournalScene::new("ready", &journal);
        ready.init(&mut ctx);
        journal.clear();

        ctx.publish(ReplaceSceneEvent::new(ready));
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["ready"]);
        assert_eq!(journal.count("menu:clean"), 1);
        assert_eq!(journal.count("ready:init"), 0);
        assert!(manager.current_scene().is_some_and(|scene| scene.is_initialized()));
    }

    //--- Last-Wins --------------------------------------------------------

    #[test]
    fn last_request_in_a_frame_wins() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["menu"]);

        ctx.publish(PushSceneEvent { scene: journaled("b", &journal) });
        ctx.publish(PopSceneEvent);
        ctx.publish(ReplaceSceneEvent { scene: journaled("c", &journal) });
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["c"]);
        assert_eq!(journal.count("b:init"), 0);
        assert_eq!(journal.count("menu:clean"), 1);
        assert_eq!(manager.pending_len(), 0);
    }

    #[test]
    fn last_wins_follows_publication_order_across_event_types() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["menu"]);

        ctx.publish(ReplaceSceneEvent { scene: journaled("c", &journal) });
        ctx.publish(PushSceneEvent { scene: journaled("b", &journal) });
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["menu", "b"]);
        assert_eq!(journal.count("c:init"), 0);
    }

    #[test]
    fn requests_raised_during_scene_update_apply_after_it() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let script = Script::new();
        let mut manager = SceneManager::new(&mut ctx);

        ctx.publish(PushSceneEvent::new(JournalScene::new("game", &journal).with_script(&script)));
        manager.update(0.016, &mut ctx);
        journal.clear();

        let pause_journal = journal.clone();
        script.then(move |ctx| {
            ctx.publish(PushSceneEvent::new(JournalScene::new("pause", &pause_journal)));
        });
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["game", "pause"]);
        assert_eq!(journal.entries(), vec!["game:update", "pause:init"]);
    }

    #[test]
    fn component_can_request_a_push_mid_frame() {
        struct PauseButton {
            journal: Journal,
        }

        impl Component for PauseButton {
            fn update(&mut self, _owner: &mut GameObject, _dt: f32, frame: &mut FrameContext<'_>) {
                frame
                    .context
                    .publish(PushSceneEvent::new(JournalScene::new("pause", &self.journal)));
            }
        }

        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["game"]);

        if let Some(scene) = manager.current_scene_mut() {
            scene
                .base_mut()
                .objects_mut()
                .add_game_object(GameObject::new("button").with_component(PauseButton { journal: journal.clone() }));
        }

        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["game", "pause"]);
        assert_eq!(journal.count("pause:init"), 1);
    }

    //--- Sequential Policy ------------------------------------------------

    #[test]
    fn sequential_policy_applies_every_request_in_order() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = SceneManager::new(&mut ctx).with_policy(TransitionPolicy::Sequential);
        assert_eq!(manager.policy(), TransitionPolicy::Sequential);

        ctx.publish(PushSceneEvent { scene: journaled("a", &journal) });
        ctx.publish(PushSceneEvent { scene: journaled("b", &journal) });
        ctx.publish(PopSceneEvent);
        ctx.publish(PushSceneEvent { scene: journaled("c", &journal) });
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["a", "c"]);
        assert_eq!(journal.count("b:init"), 1);
        assert_eq!(journal.count("b:clean"), 1);

        manager.close(&mut ctx);
    }

    #[test]
    fn sequential_pop_then_push_does_not_quit() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let quit = QuitListener::attach(&mut ctx);
        let mut manager = SceneManager::new(&mut ctx).with_policy(TransitionPolicy::Sequential);
        ctx.publish(PushSceneEvent { scene: journaled("a", &journal) });
        manager.update(0.016, &mut ctx);

        ctx.publish(PopSceneEvent);
        ctx.publish(PushSceneEvent { scene: journaled("b", &journal) });
        manager.update(0.016, &mut ctx);

        assert_eq!(manager.scene_names(), vec!["b"]);
        assert_eq!(journal.count("a:clean"), 1);
        assert_eq!(quit.count(&ctx), 0);

        manager.close(&mut ctx);
    }

    #[test]
    fn sequential_batch_ending_empty_quits_once() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let quit = QuitListener::attach(&mut ctx);
        let mut manager = SceneManager::new(&mut ctx).with_policy(TransitionPolicy::Sequential);
        ctx.publish(PushSceneEvent { scene: journaled("a", &journal) });
        manager.update(0.016, &mut ctx);

        ctx.publish(PopSceneEvent);
        ctx.publish(PushSceneEvent { scene: journaled("b", &journal) });
        ctx.publish(PopSceneEvent);
        manager.update(0.016, &mut ctx);

        assert!(manager.is_empty());
        assert_eq!(quit.count(&ctx), 1);
    }

    //--- Close ------------------------------------------------------------

    #[test]
    fn close_cleans_all_and_disconnects() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["a", "b"]);
        ctx.publish(PushSceneEvent { scene: journaled("never", &journal) });

        manager.close(&mut ctx);
        manager.close(&mut ctx);

        assert!(manager.is_empty());
        assert!(manager.is_closed());
        assert_eq!(journal.entries(), vec!["b:clean", "a:clean"]);
        assert_eq!(ctx.dispatcher().subscriber_count::<PushSceneEvent>(), 0);
        assert!(!ctx.publish(PopSceneEvent));
    }

    #[test]
    fn current_scene_is_top_of_stack() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut manager = manager_with(&mut ctx, &journal, &["menu", "options"]);

        assert_eq!(manager.current_scene().map(|s| s.name()), Some("options"));
        assert_eq!(manager.len(), 2);

        manager.close(&mut ctx);
        assert!(manager.current_scene().is_none());
    }
}
