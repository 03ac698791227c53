//=========================================================================
// Scene Demo
//=========================================================================
//
// Headless walk through a menu → game → pause → game → quit flow.
//
// A scripted "host" feeds action presses into the engine through the
// host handle; a logging renderer prints what would have been drawn.
// Components poll action states; the game scene reacts to ActionEvents
// it subscribes to in init.
//
// Run with RUST_LOG=trace to see every object lifecycle call.
//
//=========================================================================

use log::{debug, info};

use strata_engine::prelude::*;

//=== LogRenderer =========================================================

struct LogRenderer;

impl Renderer for LogRenderer {
    fn draw_sprite(&mut self, sprite: &Sprite, position: Vec2, _scale: Vec2, _rotation: f32) {
        debug!(target: "render", "sprite '{}' at ({:.1}, {:.1})", sprite.texture_id, position.x, position.y);
    }

    fn draw_ui_sprite(&mut self, sprite: &Sprite, position: Vec2, size: Vec2) {
        debug!(
            target: "render",
            "ui '{}' at ({:.1}, {:.1}) size {}x{}",
            sprite.texture_id, position.x, position.y, size.x, size.y
        );
    }

    fn draw_text(&mut self, text: &str, position: Vec2) {
        debug!(target: "render", "text \"{}\" at ({:.1}, {:.1})", text, position.x, position.y);
    }
}

//=== Components ==========================================================

/// Moves the owner right while the "right" action is held.
struct Walker {
    speed: f32,
}

impl Component for Walker {
    fn update(&mut self, owner: &mut GameObject, dt: f32, frame: &mut FrameContext<'_>) {
        if !frame.context.actions().is_action_down("right") {
            return;
        }
        if let Some(transform) = owner.get_component_mut::<TransformComponent>() {
            transform.translate(Vec2::new(self.speed * dt, 0.0));
        }
    }
}

/// Drops a coin behind the owner every time "fire" is pressed.
struct CoinDropper;

impl Component for CoinDropper {
    fn update(&mut self, owner: &mut GameObject, _dt: f32, frame: &mut FrameContext<'_>) {
        if !frame.context.actions().is_action_pressed("fire") {
            return;
        }
        let position = owner
            .get_component::<TransformComponent>()
            .map(|t| t.position())
            .unwrap_or_else(Vec2::zeros);

        let coin = GameObject::new("coin")
            .with_tag("pickup")
            .with_component(TransformComponent::new(position))
            .with_component(SpriteComponent::new("coin").with_alignment(Alignment::Center));
        frame.commands.safe_add(coin);
    }
}

//=== Text ================================================================

struct Label {
    text: String,
    position: Vec2,
}

impl UiElement for Label {
    fn render(&mut self, context: &mut Context) {
        context.draw_text(&self.text, self.position);
    }
}

//=== Scenes ==============================================================

struct MenuScene {
    base: SceneBase,
}

impl MenuScene {
    fn new() -> Self {
        Self { base: SceneBase::new("menu") }
    }
}

impl Scene for MenuScene {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }

    fn init(&mut self, context: &mut Context) {
        self.base.ui_mut().add_element(UiImage::new("title", Vec2::new(160.0, 40.0)));
        self.base.ui_mut().add_element(Label {
            text: "press start".into(),
            position: Vec2::new(260.0, 220.0),
        });
        self.base.init(context);
    }

    fn update(&mut self, dt: f32, context: &mut Context) {
        self.base.update(dt, context);
        if context.actions().is_action_pressed("start") {
            self.request_replace_scene(context, Box::new(GameScene::new()));
        }
    }
}

struct GameScene {
    base: SceneBase,
    jumps: u32,
}

impl GameScene {
    fn new() -> Self {
        Self { base: SceneBase::new("game"), jumps: 0 }
    }

    fn on_action(&mut self, event: &ActionEvent, context: &mut Context) {
        if event.state != ActionState::Pressed {
            return;
        }
        match event.action.as_str() {
            "jump" => {
                self.jumps += 1;
                info!("Jump #{}", self.jumps);
            }
            "pause" => self.request_push_scene(context, Box::new(PauseScene::new())),
            "quit" => self.quit(context),
            _ => {}
        }
    }
}

impl Scene for GameScene {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }

    fn init(&mut self, context: &mut Context) {
        let player = GameObject::new("player")
            .with_tag("player")
            .with_component(TransformComponent::new(Vec2::new(32.0, 200.0)))
            .with_component(SpriteComponent::new("hero").with_alignment(Alignment::BottomCenter))
            .with_component(Walker { speed: 120.0 })
            .with_component(CoinDropper);
        self.base.objects_mut().add_game_object(player);
        self.base.ui_mut().add_element(UiImage::new("heart", Vec2::new(8.0, 8.0)));
        self.base.subscribe::<ActionEvent>(context);
        self.base.init(context);
    }

    fn handle_input(&mut self, context: &mut Context) {
        self.base.handle_input(context);
        for event in self.base.received::<ActionEvent>(context) {
            self.on_action(&event, context);
        }
    }

    fn clean(&mut self, context: &mut Context) {
        if let Some(player) = self.base.objects().find_game_object_by_name("player") {
            if let Some(transform) = player.get_component::<TransformComponent>() {
                info!("Player finished at x = {:.1}", transform.position().x);
            }
        }
        info!("Coins dropped: {}, jumps: {}", self.base.objects().iter().filter(|o| o.tag() == "pickup").count(), self.jumps);
        self.base.clean(context);
    }
}

struct PauseScene {
    base: SceneBase,
}

impl PauseScene {
    fn new() -> Self {
        Self { base: SceneBase::new("pause") }
    }
}

impl Scene for PauseScene {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }

    fn init(&mut self, context: &mut Context) {
        self.base.ui_mut().add_element(Label {
            text: "paused".into(),
            position: Vec2::new(290.0, 170.0),
        });
        self.base.init(context);
    }

    fn update(&mut self, dt: f32, context: &mut Context) {
        self.base.update(dt, context);
        if context.actions().is_action_pressed("pause") {
            self.request_pop_scene(context);
        }
    }
}

//=== Host Script =========================================================

/// Actions tapped (pressed, then released next frame) on given frames.
const SCRIPT: &[(u64, &str)] = &[
    (2, "start"),
    (6, "fire"),
    (8, "jump"),
    (9, "fire"),
    (12, "pause"),
    (15, "pause"),
    (20, "quit"),
];

const HELD_RIGHT: std::ops::Range<u64> = 4..11;

fn host_updates(frame: u64) -> Vec<ActionUpdate> {
    let mut updates = Vec::new();

    for (at, action) in SCRIPT {
        if *at == frame {
            updates.push(ActionUpdate::pressed(*action));
        } else if *at + 1 == frame {
            updates.push(ActionUpdate::released(*action));
        }
    }

    if frame == HELD_RIGHT.start {
        updates.push(ActionUpdate::pressed("right"));
    } else if frame == HELD_RIGHT.end {
        updates.push(ActionUpdate::released("right"));
    }

    updates
}

//=== Main ================================================================

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut textures = TextureRegistry::new();
    textures.register("title", Vec2::new(320.0, 96.0));
    textures.register("hero", Vec2::new(16.0, 24.0));
    textures.register("coin", Vec2::new(8.0, 8.0));
    textures.register("heart", Vec2::new(12.0, 12.0));

    let mut engine = EngineBuilder::new()
        .with_renderer(LogRenderer)
        .with_textures(textures)
        .with_viewport(640.0, 360.0)
        .with_initial_scene(MenuScene::new())
        .build()?;

    let host = engine.host_handle();
    let dt = 1.0 / 60.0;

    for frame in 0..120 {
        host.send_actions(host_updates(frame));

        if engine.frame(dt) == TickControl::Exit {
            break;
        }
        info!("frame {:>3}: stack {:?}", frame, engine.scenes().scene_names());
    }

    engine.shutdown();
    Ok(())
}
