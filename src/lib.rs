//=========================================================================
// Strata Engine: Library Root
//
// Scene and game-object lifecycle core for 2D games.
//
// Responsibilities:
// - Expose the frame-level facade (`Engine`, `EngineBuilder`)
// - Expose the scene core (`core`) for games that drive frames themselves
//
// Typical usage:
// ```no_run
// use strata_engine::prelude::*;
//
// let mut engine = EngineBuilder::new()
//     .with_renderer(my_renderer)
//     .with_initial_scene(BasicScene::new("title"))
//     .build()?;
//
// while engine.frame(dt) == TickControl::Continue {}
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds objects, scenes, the event bus and the collaborator
// interfaces. `prelude` re-exports the common subset.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
