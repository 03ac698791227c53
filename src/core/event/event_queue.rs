//=========================================================================
// Event Queue Trait
//=========================================================================
//
// Type-erased trait for event queues that preserves Vec operations
// while allowing storage in a HashMap without concrete type knowledge.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::dispatcher::{Event, Stamped};

//=========================================================================

/// Type-erased storage for the queued events of one event type.
///
/// Lets the dispatcher clear or measure a queue without knowing the
/// concrete event type at compile time.
pub(super) trait EventQueue {
    /// Drops every queued event while preserving allocated capacity.
    fn clear_queue(&mut self);

    /// Returns the number of queued events.
    fn len(&self) -> usize;

    /// Returns true if the queue is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Downcasts to `&dyn Any` for type-specific operations.
    fn as_any(&self) -> &dyn Any;

    /// Downcasts to `&mut dyn Any` for type-specific operations.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

//=========================================================================

impl<E: Event> EventQueue for Vec<Stamped<E>> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================
