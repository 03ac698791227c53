//=========================================================================
// Transition Queue
//=========================================================================
//
// Pending scene transitions recorded between two manager updates.
//
// Requests only record intent here. The scene manager applies the queue
// after the top scene's update has finished, so no request can mutate
// the stack while a scene is mid-frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use super::Scene;

//=== TransitionPolicy ====================================================

/// How several transition requests raised in one frame are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Only the last request of the frame is applied.
    #[default]
    LastWins,
    /// Every request is applied, in the order it was raised.
    Sequential,
}

//=== PendingTransition ===================================================

pub(super) enum PendingTransition {
    Push(Box<dyn Scene>),
    Pop,
    Replace(Box<dyn Scene>),
}

impl fmt::Debug for PendingTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(scene) => write!(f, "Push({})", scene.name()),
            Self::Pop => write!(f, "Pop"),
            Self::Replace(scene) => write!(f, "Replace({})", scene.name()),
        }
    }
}

//=== TransitionQueue =====================================================

pub(super) struct TransitionQueue {
    policy: TransitionPolicy,
    queue: Vec<PendingTransition>,
}

impl TransitionQueue {
    pub(super) fn new(policy: TransitionPolicy) -> Self {
        Self {
            policy,
            queue: Vec::new(),
        }
    }

    pub(super) fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub(super) fn set_policy(&mut self, policy: TransitionPolicy) {
        self.policy = policy;
    }

    /// Records a request. Under `LastWins` it overwrites any earlier one.
    pub(super) fn record(&mut self, transition: PendingTransition) {
        if self.policy == TransitionPolicy::LastWins {
            if let Some(previous) = self.queue.pop() {
                debug!(target: "scene", "Discarding {:?}, superseded by {:?}", previous, transition);
            }
        }
        self.queue.push(transition);
    }

    pub(super) fn len(&self) -> usize {
        self.queue.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Takes every recorded transition in application order.
    pub(super) fn take(&mut self) -> Vec<PendingTransition> {
        std::mem::take(&mut self.queue)
    }

    /// Drops every recorded transition. Returns how many were dropped.
    pub(super) fn clear(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::BasicScene;

    fn push(name: &str) -> PendingTransition {
        PendingTransition::Push(Box::new(BasicScene::new(name)))
    }

    #[test]
    fn last_wins_keeps_only_latest() {
        let mut queue = TransitionQueue::new(TransitionPolicy::LastWins);
        queue.record(push("a"));
        queue.record(PendingTransition::Pop);
        queue.record(push("b"));

        let taken = queue.take();
        assert_eq!(taken.len(), 1);
        assert!(matches!(&taken[0], PendingTransition::Push(scene) if scene.name() == "b"));
        assert!(queue.is_empty());
    }

    #[test]
    fn sequential_keeps_everything_in_order() {
        let mut queue = TransitionQueue::new(TransitionPolicy::Sequential);
        queue.record(push("a"));
        queue.record(PendingTransition::Pop);

        assert_eq!(queue.len(), 2);
        let taken = queue.take();
        assert!(matches!(taken[0], PendingTransition::Push(_)));
        assert!(matches!(taken[1], PendingTransition::Pop));
    }

    #[test]
    fn clear_reports_dropped_count() {
        let mut queue = TransitionQueue::new(TransitionPolicy::Sequential);
        queue.record(PendingTransition::Pop);
        queue.record(PendingTransition::Pop);
        assert_eq!(queue.clear(), 2);
        assert_eq!(queue.clear(), 0);
    }
}
