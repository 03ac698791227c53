//=========================================================================
// Engine Errors
//=========================================================================
//
// Construction-time failures. Everything that can go wrong while frames
// are running is handled where it is detected and logged instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== EngineError =========================================================

/// Setup failures raised by [`ContextBuilder`](crate::core::ContextBuilder)
/// and [`EngineBuilder`](crate::EngineBuilder).
///
/// These are fatal: the engine never runs in a partially constructed state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A collaborator the core cannot run without was not supplied.
    #[error("Required collaborator missing: {0}")]
    MissingCollaborator(&'static str),

    /// The camera viewport has a non-positive dimension.
    #[error("Invalid viewport size: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

//=========================================================================
// Unit Tests
//=========================================================================
