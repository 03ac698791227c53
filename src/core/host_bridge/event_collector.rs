//=========================================================================
// Event Collector
//=========================================================================
//
// Engine-side host event collector with bounded draining and shutdown
// detection.
//
// Architecture:
//   Receiver<HostEvent> → collect_frame() → action updates → TickControl
//
// The per-frame budget keeps a flooding host from starving the frame;
// anything left over is picked up next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::HostEvent;
use crate::core::input::ActionUpdate;

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains host events at the start of each frame.
pub(crate) struct EventCollector {
    receiver: Receiver<HostEvent>,
    budget: usize,
    updates: Vec<ActionUpdate>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<HostEvent>, budget: usize) -> Self {
        Self {
            receiver,
            budget,
            updates: Vec::with_capacity(16),
        }
    }

    /// Collects pending host events, at most `budget` of them.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.updates.clear();
        let mut drained = 0;

        while drained < self.budget {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    info!(target: "engine", "Host channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= self.budget {
            warn!(target: "engine", "Host event backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Action updates collected this frame, in arrival order.
    pub(crate) fn updates(&self) -> &[ActionUpdate] {
        &self.updates
    }

    fn handle_event(&mut self, event: HostEvent) -> TickControl {
        match event {
            HostEvent::Actions(updates) => {
                self.updates.extend(updates);
                TickControl::Continue
            }
            HostEvent::CloseRequested => {
                info!(target: "engine", "Host requested close");
                TickControl::Exit
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<HostEvent>();
        let mut collector = EventCollector::new(rx, 8);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.updates().is_empty());
    }

    #[test]
    fn collect_aggregates_multiple_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx, 8);

        tx.send(HostEvent::Actions(vec![ActionUpdate::pressed("jump")])).unwrap();
        tx.send(HostEvent::Actions(vec![ActionUpdate::released("fire")])).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(
            collector.updates(),
            &[ActionUpdate::pressed("jump"), ActionUpdate::released("fire")]
        );
    }

    #[test]
    fn collect_returns_exit_on_close_request() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx, 8);

        tx.send(HostEvent::CloseRequested).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_clears_previous_updates() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx, 8);

        tx.send(HostEvent::Actions(vec![ActionUpdate::pressed("jump")])).unwrap();
        collector.collect_frame();
        assert_eq!(collector.updates().len(), 1);

        collector.collect_frame();
        assert!(collector.updates().is_empty());
    }

    #[test]
    fn collect_respects_budget() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx, 2);

        for _ in 0..3 {
            tx.send(HostEvent::Actions(vec![ActionUpdate::pressed("jump")])).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.updates().len(), 2);

        collector.collect_frame();
        assert_eq!(collector.updates().len(), 1);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<HostEvent>();
        let mut collector = EventCollector::new(rx, 8);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
