//=========================================================================
// Host Bridge Interface
//=========================================================================
//
// Host-to-engine message types and the sending half of the channel.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Sender, TrySendError};
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::input::ActionUpdate;

//=== HostEvent ===========================================================

/// Messages the host sends to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Action edges observed since the previous message.
    Actions(Vec<ActionUpdate>),

    /// The user asked to close the application.
    CloseRequested,
}

//=== HostHandle ==========================================================

/// Sending half handed to the host. Cheap to clone across threads.
#[derive(Debug, Clone)]
pub struct HostHandle {
    sender: Sender<HostEvent>,
}

impl HostHandle {
    pub(crate) fn new(sender: Sender<HostEvent>) -> Self {
        Self { sender }
    }

    /// Queues `event` without blocking.
    ///
    /// Returns false if the channel is full (event dropped) or the engine
    /// is gone.
    pub fn send(&self, event: HostEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(target: "engine", "Host channel full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn send_actions(&self, updates: Vec<ActionUpdate>) -> bool {
        if updates.is_empty() {
            return true;
        }
        self.send(HostEvent::Actions(updates))
    }

    pub fn request_close(&self) -> bool {
        self.send(HostEvent::CloseRequested)
    }
}
