//=========================================================================
// Host Bridge
//=========================================================================
//
// Bridges the host layer (window, OS event loop) with the engine frame.
//
// The host may run on its own thread. It only ever talks to the engine
// through a bounded crossbeam channel; the engine drains that channel at
// the start of every frame.
//
// Components:
// - `interface`: HostEvent and the clonable HostHandle (the contract)
// - `event_collector`: engine-side draining with a per-frame budget
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::TickControl;
pub use interface::{HostEvent, HostHandle};

pub(crate) use event_collector::EventCollector;
