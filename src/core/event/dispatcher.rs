//=========================================================================
// Event Dispatcher
//=========================================================================
//
// Type-keyed publish/subscribe channel shared by every scene, object and
// the scene manager through the Context.
//
// Architecture:
//   publisher → publish<E>() → HashMap<TypeId, Vec<Stamped<E>>>
//                                   ↓
//   subscriber ← read<E>() / take<E>() at its own reconciliation point
//
// Events are queued, never delivered synchronously. A publisher may be
// nested deep inside the consumer's own iteration, so nothing can be
// mutated on its behalf until the consumer drains the queue.
//
// An event type with no subscriber has no queue: publishing it drops the
// event. Disconnecting the last subscriber drops whatever is still queued.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use log::{debug, error, trace};

//=== Internal Dependencies ===============================================

use super::event_queue::EventQueue;

//=== Public API ==========================================================

/// Marker trait for types that can travel through the [`EventDispatcher`].
///
/// Automatically implemented for every `'static` type.
pub trait Event: 'static {}

impl<T: 'static> Event for T {}

/// An event together with its publication sequence number.
///
/// Sequence numbers are global across all event types, so a consumer
/// draining several queues can restore the order events were raised in.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<E> {
    pub sequence: u64,
    pub event: E,
}

/// Identifies one subscriber (scene manager, scene, engine loop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

//=== EventDispatcher =====================================================

/// Queued publish/subscribe bus keyed by event type.
///
/// Subscriptions have no automatic lifetime tracking: whoever subscribes
/// must [`disconnect`](Self::disconnect) on teardown.
pub struct EventDispatcher {
    queues: HashMap<TypeId, Box<dyn EventQueue>>,
    subscriptions: HashMap<TypeId, Vec<SubscriberId>>,
    next_subscriber: u64,
    next_sequence: u64,
}

impl EventDispatcher {
    /// Creates a dispatcher with no subscribers and no queued events.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
            subscriptions: HashMap::new(),
            next_subscriber: 0,
            next_sequence: 0,
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Allocates a fresh subscriber identity.
    pub fn register_subscriber(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        id
    }

    /// Subscribes `subscriber` to events of type `E`.
    ///
    /// Subscribing twice is a no-op.
    pub fn subscribe<E: Event>(&mut self, subscriber: SubscriberId) {
        let type_id = TypeId::of::<E>();
        let subscribers = self.subscriptions.entry(type_id).or_default();

        if subscribers.contains(&subscriber) {
            return;
        }

        subscribers.push(subscriber);
        self.queues
            .entry(type_id)
            .or_insert_with(|| Box::new(Vec::<Stamped<E>>::new()));

        trace!(target: "events", "{:?} subscribed to {}", subscriber, type_name::<E>());
    }

    /// Removes the subscription of `subscriber` to events of type `E`.
    pub fn unsubscribe<E: Event>(&mut self, subscriber: SubscriberId) {
        let type_id = TypeId::of::<E>();
        if let Some(subscribers) = self.subscriptions.get_mut(&type_id) {
            subscribers.retain(|s| *s != subscriber);
        }
        self.drop_orphaned_queue(type_id);
    }

    /// Removes every subscription held by `subscriber`.
    ///
    /// Returns the number of event types it was disconnected from.
    pub fn disconnect(&mut self, subscriber: SubscriberId) -> usize {
        let mut removed = 0;
        let mut orphaned = Vec::new();

        for (type_id, subscribers) in self.subscriptions.iter_mut() {
            let before = subscribers.len();
            subscribers.retain(|s| *s != subscriber);
            if subscribers.len() != before {
                removed += 1;
                orphaned.push(*type_id);
            }
        }

        for type_id in orphaned {
            self.drop_orphaned_queue(type_id);
        }

        if removed > 0 {
            debug!(target: "events", "{:?} disconnected from {} event type(s)", subscriber, removed);
        }
        removed
    }

    /// Returns true if `subscriber` currently listens to `E`.
    pub fn is_subscribed<E: Event>(&self, subscriber: SubscriberId) -> bool {
        self.subscriptions
            .get(&TypeId::of::<E>())
            .map(|s| s.contains(&subscriber))
            .unwrap_or(false)
    }

    /// Returns the number of subscribers listening to `E`.
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.subscriptions
            .get(&TypeId::of::<E>())
            .map(|s| s.len())
            .unwrap_or(0)
    }

    /// Returns the total number of live subscriptions across all types.
    pub fn total_subscriptions(&self) -> usize {
        self.subscriptions.values().map(|s| s.len()).sum()
    }

    //--- Publishing -------------------------------------------------------

    /// Queues `event` for the subscribers of its type.
    ///
    /// Returns false (and drops the event) when nobody is subscribed.
    pub fn publish<E: Event>(&mut self, event: E) -> bool {
        let type_id = TypeId::of::<E>();

        if self.subscriber_count::<E>() == 0 {
            debug!(target: "events", "Dropped {}: no subscribers", type_name::<E>());
            return false;
        }

        let sequence = self.next_sequence;

        let Some(queue) = self
            .queues
            .get_mut(&type_id)
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<Stamped<E>>>())
        else {
            error!(target: "events", "Queue for {} is missing or mistyped", type_name::<E>());
            return false;
        };

        queue.push(Stamped { sequence, event });
        self.next_sequence += 1;
        trace!(target: "events", "Published {} (#{})", type_name::<E>(), sequence);
        true
    }

    //--- Consumption ------------------------------------------------------

    /// Returns every queued event of type `E`, oldest first.
    ///
    /// Events stay queued until taken or cleared, so several readers can
    /// inspect the same frame's events.
    pub fn read<E: Event>(&self) -> &[Stamped<E>] {
        self.queues
            .get(&TypeId::of::<E>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<Stamped<E>>>())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Removes and returns every queued event of type `E`, oldest first.
    ///
    /// Transfers ownership of the payloads to the caller.
    pub fn take<E: Event>(&mut self) -> Vec<Stamped<E>> {
        self.queues
            .get_mut(&TypeId::of::<E>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<Stamped<E>>>())
            .map(std::mem::take)
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    /// Returns true if any event of type `E` is queued.
    pub fn has_events<E: Event>(&self) -> bool {
        self.count::<E>() > 0
    }

    /// Returns the number of queued events of type `E`.
    pub fn count<E: Event>(&self) -> usize {
        self.queues
            .get(&TypeId::of::<E>())
            .map(|q| q.len())
            .unwrap_or(0)
    }

    /// Drops every queued event of type `E`, preserving capacity.
    pub fn clear<E: Event>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<E>()) {
            queue.clear_queue();
        }
    }

    /// Drops every queued event of every type, preserving capacity.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn drop_orphaned_queue(&mut self, type_id: TypeId) {
        let orphaned = self
            .subscriptions
            .get(&type_id)
            .map(|s| s.is_empty())
            .unwrap_or(true);

        if !orphaned {
            return;
        }

        self.subscriptions.remove(&type_id);
        if let Some(queue) = self.queues.remove(&type_id) {
            if !queue.is_empty() {
                debug!(target: "events", "Dropped {} queued event(s) with no subscribers left", queue.len());
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
