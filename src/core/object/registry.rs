//=========================================================================
// Object Registry
//=========================================================================
//
// Owns the game objects of one scene and defers structural changes that
// are requested while those objects are being iterated.
//
// Architecture:
//   ObjectRegistry
//     ├─ objects: Vec<GameObject>      (insertion order = update/render order)
//     └─ pending: ObjectCommands
//          ├─ additions: Vec<GameObject>
//          └─ removals:  Vec<ObjectId>
//
// Frame flow:
//   update() → every object updates with FrameContext { context, commands }
//           → hooks may safe_add / safe_remove through the commands
//   reconcile() → pending removals destroyed → pending additions merged
//
// An object added mid-pass is never visited twice in that pass because it
// sits in `pending` until the reconciliation point.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{FrameContext, GameObject, ObjectId, RegistryId};
use crate::core::Context;

//=== ObjectCommands ======================================================

/// Deferred registry mutations recorded during a pass over the objects.
///
/// Handed to every object and component hook inside [`FrameContext`].
pub struct ObjectCommands {
    registry: Option<RegistryId>,
    additions: Vec<GameObject>,
    removals: Vec<ObjectId>,
}

impl ObjectCommands {
    fn for_registry(registry: RegistryId) -> Self {
        Self {
            registry: Some(registry),
            additions: Vec::new(),
            removals: Vec::new(),
        }
    }

    /// Commands not bound to any registry. Additions made through them are
    /// dropped when the value is dropped; used to drive objects standalone.
    pub fn detached() -> Self {
        Self {
            registry: None,
            additions: Vec::new(),
            removals: Vec::new(),
        }
    }

    /// Queues `object` for addition at the next reconciliation point.
    ///
    /// Returns `None` (dropping the object) if it belongs to another registry.
    pub fn safe_add(&mut self, mut object: GameObject) -> Option<ObjectId> {
        if let Some(registry) = self.registry {
            if !object.attach_to(registry) {
                return None;
            }
        }

        let id = object.id();
        trace!(target: "objects", "Queued '{}' ({:?}) for addition", object.name(), id);
        self.additions.push(object);
        Some(id)
    }

    /// Queues the object with `id` for destruction at the next
    /// reconciliation point. Unknown ids are ignored at that point.
    pub fn safe_remove(&mut self, id: ObjectId) {
        if !self.removals.contains(&id) {
            self.removals.push(id);
        }
    }

    /// Number of objects waiting to be merged.
    pub fn pending_additions(&self) -> usize {
        self.additions.len()
    }

    /// Number of ids waiting to be removed.
    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }
}

//=== ObjectRegistry ======================================================

/// Ordered collection of the game objects owned by one scene.
pub struct ObjectRegistry {
    id: RegistryId,
    objects: Vec<GameObject>,
    pending: ObjectCommands,
}

impl ObjectRegistry {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        let id = RegistryId::next();
        Self {
            id,
            objects: Vec::new(),
            pending: ObjectCommands::for_registry(id),
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    //--- Insertion --------------------------------------------------------

    /// Appends `object` directly to the active sequence.
    ///
    /// Must not be used while the objects are being iterated; use
    /// [`safe_add_game_object`](Self::safe_add_game_object) or the
    /// [`ObjectCommands`] in the hook's [`FrameContext`] instead.
    pub fn add_game_object(&mut self, mut object: GameObject) -> Option<ObjectId> {
        if !object.attach_to(self.id) {
            return None;
        }

        let id = object.id();
        trace!(target: "objects", "Added '{}' ({:?})", object.name(), id);
        self.objects.push(object);
        Some(id)
    }

    /// Appends `object` to the pending-addition sequence.
    pub fn safe_add_game_object(&mut self, object: GameObject) -> Option<ObjectId> {
        self.pending.safe_add(object)
    }

    //--- Removal ----------------------------------------------------------

    /// Removes and destroys the object with `id` immediately.
    ///
    /// Returns false if the registry holds no such object; that is not an
    /// error, double removal is expected under reentrant event delivery.
    pub fn remove_game_object(&mut self, id: ObjectId) -> bool {
        if let Some(index) = self.objects.iter().position(|o| o.id() == id) {
            let mut object = self.objects.remove(index);
            object.clean();
            trace!(target: "objects", "Removed '{}' ({:?})", object.name(), id);
            return true;
        }

        if let Some(index) = self.pending.additions.iter().position(|o| o.id() == id) {
            let mut object = self.pending.additions.remove(index);
            object.clean();
            trace!(target: "objects", "Removed pending '{}' ({:?})", object.name(), id);
            return true;
        }

        false
    }

    /// Marks the object with `id` for destruction at the next
    /// reconciliation point.
    pub fn safe_remove_game_object(&mut self, id: ObjectId) {
        if let Some(object) = self.get_mut(id) {
            object.mark_for_removal();
        }
        self.pending.safe_remove(id);
    }

    //--- Reconciliation ---------------------------------------------------

    /// Destroys every object marked for removal. Returns how many went.
    pub fn process_pending_removals(&mut self) -> usize {
        let removals = std::mem::take(&mut self.pending.removals);
        let before = self.objects.len() + self.pending.additions.len();

        let doomed = |object: &GameObject| object.is_marked_for_removal() || removals.contains(&object.id());

        for list in [&mut self.objects, &mut self.pending.additions] {
            list.retain_mut(|object| {
                if doomed(object) {
                    object.clean();
                    trace!(target: "objects", "Destroyed '{}' ({:?})", object.name(), object.id());
                    false
                } else {
                    true
                }
            });
        }

        before - (self.objects.len() + self.pending.additions.len())
    }

    /// Moves every pending object into the active sequence, preserving
    /// their relative order. Returns how many were merged.
    pub fn process_pending_additions(&mut self) -> usize {
        let merged = self.pending.additions.len();
        if merged > 0 {
            self.objects.append(&mut self.pending.additions);
            debug!(target: "objects", "Merged {} pending object(s)", merged);
        }
        merged
    }

    /// End-of-frame reconciliation: removals first, then additions.
    pub fn reconcile(&mut self) {
        self.process_pending_removals();
        self.process_pending_additions();
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the first active object named `name`.
    pub fn find_game_object_by_name(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.name() == name)
    }

    pub fn find_game_object_by_name_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.name() == name)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Active objects in update/render order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.additions.len()
    }

    //--- Frame Passes -----------------------------------------------------

    pub fn handle_input(&mut self, context: &mut Context) {
        let mut frame = FrameContext::new(context, &mut self.pending);
        for object in self.objects.iter_mut() {
            object.handle_input(&mut frame);
        }
    }

    pub fn update(&mut self, dt: f32, context: &mut Context) {
        let mut frame = FrameContext::new(context, &mut self.pending);
        for object in self.objects.iter_mut() {
            object.update(dt, &mut frame);
        }
    }

    pub fn render(&mut self, context: &mut Context) {
        let mut frame = FrameContext::new(context, &mut self.pending);
        for object in self.objects.iter_mut() {
            object.render(&mut frame);
        }
    }

    /// Cleans and drops every object, active and pending.
    pub fn clean_all(&mut self) {
        let count = self.objects.len() + self.pending.additions.len();
        for object in self.objects.iter_mut().chain(self.pending.additions.iter_mut()) {
            object.clean();
        }
        self.objects.clear();
        self.pending.additions.clear();
        self.pending.removals.clear();

        if count > 0 {
            debug!(target: "objects", "Cleaned {} object(s) from {:?}", count, self.id);
        }
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::Component;
    use crate::core::test_support::{test_context, Journal, JournalComponent};

    /// Spawns a child through the commands on its first update.
    struct Spawner {
        journal: Journal,
        spawned: bool,
    }

    impl Component for Spawner {
        fn update(&mut self, _owner: &mut GameObject, _dt: f32, frame: &mut FrameContext<'_>) {
            if !self.spawned {
                self.spawned = true;
                let child = GameObject::new("child")
                    .with_component(JournalComponent::new("child", &self.journal));
                frame.commands.safe_add(child);
            }
        }
    }

    /// Removes itself through the commands when updated.
    struct SelfDestruct;

    impl Component for SelfDestruct {
        fn update(&mut self, owner: &mut GameObject, _dt: f32, frame: &mut FrameContext<'_>) {
            frame.commands.safe_remove(owner.id());
        }
    }

    fn journaled(name: &str, journal: &Journal) -> GameObject {
        GameObject::new(name).with_component(JournalComponent::new(name, journal))
    }

    #[test]
    fn add_appends_in_order() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        registry.add_game_object(journaled("a", &journal));
        registry.add_game_object(journaled("b", &journal));

        let names: Vec<_> = registry.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn safe_add_waits_for_pending_merge() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        let id = registry.safe_add_game_object(journaled("late", &journal)).expect("id");

        assert!(!registry.contains(id));
        assert_eq!(registry.pending_len(), 1);

        assert_eq!(registry.process_pending_additions(), 1);
        assert!(registry.contains(id));
        assert_eq!(registry.pending_len(), 0);
    }

    #[test]
    fn process_pending_additions_is_idempotent_when_empty() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        registry.add_game_object(journaled("a", &journal));

        assert_eq!(registry.process_pending_additions(), 0);
        assert_eq!(registry.process_pending_additions(), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn pending_merge_preserves_relative_order() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        registry.add_game_object(journaled("a", &journal));
        registry.safe_add_game_object(journaled("b", &journal));
        registry.safe_add_game_object(journaled("c", &journal));

        registry.process_pending_additions();

        let names: Vec<_> = registry.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn object_spawned_mid_update_is_not_updated_that_pass() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut registry = ObjectRegistry::new();
        registry.add_game_object(GameObject::new("spawner").with_component(Spawner {
            journal: journal.clone(),
            spawned: false,
        }));

        registry.update(0.016, &mut ctx);
        assert_eq!(journal.count("child:update"), 0);
        assert_eq!(registry.pending_len(), 1);

        registry.reconcile();
        registry.update(0.016, &mut ctx);
        assert_eq!(journal.count("child:update"), 1);
        assert!(registry.find_game_object_by_name("child").is_some());
    }

    #[test]
    fn remove_absent_object_is_noop() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        registry.add_game_object(journaled("a", &journal));
        let stranger = GameObject::new("stranger").id();

        assert!(!registry.remove_game_object(stranger));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().next().map(|o| o.name()), Some("a"));
    }

    #[test]
    fn remove_cleans_immediately() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        let id = registry.add_game_object(journaled("a", &journal)).expect("id");

        assert!(registry.remove_game_object(id));
        assert!(!registry.remove_game_object(id));
        assert!(registry.is_empty());
        assert_eq!(journal.count("a:clean"), 1);
    }

    #[test]
    fn safe_remove_defers_destruction() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        let id = registry.add_game_object(journaled("a", &journal)).expect("id");

        registry.safe_remove_game_object(id);
        assert!(registry.contains(id));
        assert_eq!(journal.count("a:clean"), 0);

        assert_eq!(registry.process_pending_removals(), 1);
        assert!(!registry.contains(id));
        assert_eq!(journal.count("a:clean"), 1);
    }

    #[test]
    fn self_removal_during_update_applies_at_reconcile() {
        let journal = Journal::new();
        let (mut ctx, _) = test_context();
        let mut registry = ObjectRegistry::new();
        registry.add_game_object(GameObject::new("doomed").with_component(SelfDestruct));
        registry.add_game_object(journaled("survivor", &journal));

        registry.update(0.016, &mut ctx);
        assert_eq!(registry.len(), 2);
        assert_eq!(journal.count("survivor:update"), 1);

        registry.reconcile();
        let names: Vec<_> = registry.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["survivor"]);
    }

    #[test]
    fn marked_objects_are_removed_on_reconcile() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        let id = registry.add_game_object(journaled("a", &journal)).expect("id");
        registry.get_mut(id).expect("object").mark_for_removal();

        registry.reconcile();

        assert!(registry.is_empty());
    }

    #[test]
    fn object_owned_elsewhere_is_rejected() {
        let journal = Journal::new();
        let first = ObjectRegistry::new();
        let mut second = ObjectRegistry::new();

        let mut object = journaled("shared", &journal);
        assert!(object.attach_to(first.id()));

        assert!(second.add_game_object(object).is_none());
        assert!(second.is_empty());
        assert!(first.is_empty());
    }

    #[test]
    fn find_by_name_returns_first_match() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        let first = registry.add_game_object(journaled("twin", &journal)).expect("id");
        registry.add_game_object(journaled("twin", &journal));

        assert_eq!(registry.find_game_object_by_name("twin").map(|o| o.id()), Some(first));
        assert!(registry.find_game_object_by_name("nobody").is_none());
    }

    #[test]
    fn clean_all_drops_active_and_pending() {
        let journal = Journal::new();
        let mut registry = ObjectRegistry::new();
        registry.add_game_object(journaled("a", &journal));
        registry.safe_add_game_object(journaled("b", &journal));

        registry.clean_all();

        assert!(registry.is_empty());
        assert_eq!(registry.pending_len(), 0);
        assert_eq!(journal.count("a:clean"), 1);
        assert_eq!(journal.count("b:clean"), 1);
    }
}
