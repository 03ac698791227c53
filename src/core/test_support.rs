//=========================================================================
// Test Support
//=========================================================================
//
// Shared fixtures for unit tests: a renderer that records draw calls,
// a journal that collects lifecycle calls, and journaling components/scenes
// that write into it.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::object::{Component, FrameContext, GameObject};
use crate::core::render::{Renderer, Sprite};
use crate::core::scene::{Scene, SceneBase};
use crate::core::{Context, Vec2};

//=== Recording Renderer ==================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCall {
    Sprite { texture_id: String, position: Vec2 },
    UiSprite { texture_id: String, position: Vec2, size: Vec2 },
    Text { text: String, position: Vec2 },
}

pub(crate) type DrawLog = Rc<RefCell<Vec<DrawCall>>>;

/// Renderer that appends every call to a shared log.
#[derive(Default)]
pub(crate) struct RecordingRenderer {
    log: DrawLog,
}

impl RecordingRenderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn log(&self) -> DrawLog {
        Rc::clone(&self.log)
    }
}

impl Renderer for RecordingRenderer {
    fn draw_sprite(&mut self, sprite: &Sprite, position: Vec2, _scale: Vec2, _rotation: f32) {
        self.log.borrow_mut().push(DrawCall::Sprite {
            texture_id: sprite.texture_id.clone(),
            position,
        });
    }

    fn draw_ui_sprite(&mut self, sprite: &Sprite, position: Vec2, size: Vec2) {
        self.log.borrow_mut().push(DrawCall::UiSprite {
            texture_id: sprite.texture_id.clone(),
            position,
            size,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2) {
        self.log.borrow_mut().push(DrawCall::Text {
            text: text.to_string(),
            position,
        });
    }
}

/// A context with a recording renderer and default viewport.
pub(crate) fn test_context() -> (Context, DrawLog) {
    let renderer = RecordingRenderer::new();
    let log = renderer.log();
    let context = match Context::builder().with_renderer(renderer).build() {
        Ok(context) => context,
        Err(err) => panic!("test context: {err}"),
    };
    (context, log)
}

//=== Journal =============================================================

/// Shared, ordered record of lifecycle calls.
#[derive(Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

//=== JournalComponent ====================================================

/// Component that journals every hook as `"<label>:<hook>"`.
pub(crate) struct JournalComponent {
    label: String,
    journal: Journal,
}

impl JournalComponent {
    pub(crate) fn new(label: &str, journal: &Journal) -> Self {
        Self {
            label: label.to_string(),
            journal: journal.clone(),
        }
    }

    fn note(&self, hook: &str) {
        self.journal.push(format!("{}:{}", self.label, hook));
    }
}

impl Component for JournalComponent {
    fn init(&mut self, _owner: &mut GameObject) {
        self.note("init");
    }

    fn handle_input(&mut self, _owner: &mut GameObject, _frame: &mut FrameContext<'_>) {
        self.note("input");
    }

    fn update(&mut self, _owner: &mut GameObject, _dt: f32, _frame: &mut FrameContext<'_>) {
        self.note("update");
    }

    fn render(&mut self, _owner: &mut GameObject, _frame: &mut FrameContext<'_>) {
        self.note("render");
    }

    fn clean(&mut self, _owner: &mut GameObject) {
        self.note("clean");
    }
}

//=== Script ==============================================================

type ScriptAction = Box<dyn FnOnce(&mut Context)>;

/// Actions a [`JournalScene`] runs during its next update.
#[derive(Clone, Default)]
pub(crate) struct Script(Rc<RefCell<Vec<ScriptAction>>>);

impl Script {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn then(&self, action: impl FnOnce(&mut Context) + 'static) {
        self.0.borrow_mut().push(Box::new(action));
    }

    fn drain(&self) -> Vec<ScriptAction> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

//=== JournalScene ========================================================

/// Scene that journals its own hooks and runs scripted actions mid-update.
///
/// Object-level journaling comes from the objects it holds; the scene's
/// own entries are `"<name>:init"`, `":input"`, `":update"`, `":render"`
/// and `":clean"`.
pub(crate) struct JournalScene {
    base: SceneBase,
    journal: Journal,
    script: Script,
}

impl JournalScene {
    pub(crate) fn new(name: &str, journal: &Journal) -> Self {
        Self {
            base: SceneBase::new(name),
            journal: journal.clone(),
            script: Script::new(),
        }
    }

    pub(crate) fn with_script(mut self, script: &Script) -> Self {
        self.script = script.clone();
        self
    }

    fn note(&self, hook: &str) {
        self.journal.push(format!("{}:{}", self.base.name(), hook));
    }
}

impl Scene for JournalScene {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }

    fn init(&mut self, context: &mut Context) {
        self.note("init");
        self.base.init(context);
    }

    fn handle_input(&mut self, context: &mut Context) {
        self.note("input");
        self.base.handle_input(context);
    }

    fn update(&mut self, dt: f32, context: &mut Context) {
        self.note("update");
        for action in self.script.drain() {
            action(context);
        }
        self.base.update(dt, context);
    }

    fn render(&mut self, context: &mut Context) {
        self.note("render");
        self.base.render(context);
    }

    fn clean(&mut self, context: &mut Context) {
        self.note("clean");
        self.base.clean(context);
    }
}
