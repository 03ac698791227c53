//=========================================================================
// Game Object
//=========================================================================
//
// Named entity composed of components.
//
// Architecture:
//   GameObject
//     ├─ id / name / tag
//     ├─ registry: Option<RegistryId>   (set once, on hand-over)
//     └─ components: Vec<ComponentSlot> (attach order, one per type)
//
// Hook dispatch takes each component out of its slot, runs the hook with
// `&mut self` as owner, and puts it back. A component therefore never
// aliases its own owner.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, TypeId};
use std::fmt;

use log::{error, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Component, FrameContext, ObjectId, RegistryId};

//=== ComponentSlot =======================================================

struct ComponentSlot {
    type_id: TypeId,
    type_name: &'static str,
    /// `None` while the component's own hook is running.
    component: Option<Box<dyn Component>>,
}

//=== GameObject ==========================================================

/// An entity owned by exactly one scene's object registry.
pub struct GameObject {
    id: ObjectId,
    name: String,
    tag: String,
    registry: Option<RegistryId>,
    components: Vec<ComponentSlot>,
    need_remove: bool,
}

impl GameObject {
    //--- Construction -----------------------------------------------------

    /// Creates an empty object with a fresh identity.
    pub fn new(name: impl Into<String>) -> Self {
        let object = Self {
            id: ObjectId::next(),
            name: name.into(),
            tag: String::new(),
            registry: None,
            components: Vec::new(),
            need_remove: false,
        };
        trace!(target: "objects", "Created {:?} '{}'", object.id, object.name);
        object
    }

    /// Sets the tag (builder style).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Attaches a component (builder style).
    pub fn with_component<C: Component>(mut self, component: C) -> Self {
        self.add_component(component);
        self
    }

    //--- Identity ---------------------------------------------------------

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// The registry this object was handed to, if any.
    pub fn registry(&self) -> Option<RegistryId> {
        self.registry
    }

    /// Records the owning registry. Fails if another registry owns it already.
    pub(crate) fn attach_to(&mut self, registry: RegistryId) -> bool {
        match self.registry {
            None => {
                self.registry = Some(registry);
                true
            }
            Some(current) if current == registry => true,
            Some(current) => {
                error!(
                    target: "objects",
                    "Object '{}' already belongs to {:?}, cannot hand it to {:?}",
                    self.name, current, registry
                );
                false
            }
        }
    }

    //--- Removal Flag -----------------------------------------------------

    /// Schedules this object for destruction at the next reconciliation.
    pub fn mark_for_removal(&mut self) {
        self.need_remove = true;
    }

    pub fn is_marked_for_removal(&self) -> bool {
        self.need_remove
    }

    //--- Components -------------------------------------------------------

    /// Attaches `component` and runs its `init` hook.
    ///
    /// Returns false (dropping `component`) if a component of the same type
    /// is already attached.
    pub fn add_component<C: Component>(&mut self, mut component: C) -> bool {
        let type_id = TypeId::of::<C>();
        if self.components.iter().any(|slot| slot.type_id == type_id) {
            warn!(
                target: "objects",
                "Object '{}' already has a {}, ignoring duplicate",
                self.name, type_name::<C>()
            );
            return false;
        }

        component.init(self);

        self.components.push(ComponentSlot {
            type_id,
            type_name: type_name::<C>(),
            component: Some(Box::new(component)),
        });
        trace!(target: "objects", "Attached {} to '{}'", type_name::<C>(), self.name);
        true
    }

    /// Returns the component of type `C`, if attached.
    pub fn get_component<C: Component>(&self) -> Option<&C> {
        self.slot_of::<C>()
            .and_then(|slot| slot.component.as_deref())
            .and_then(|c| c.downcast_ref::<C>())
    }

    /// Returns the component of type `C`, if attached.
    pub fn get_component_mut<C: Component>(&mut self) -> Option<&mut C> {
        let type_id = TypeId::of::<C>();
        self.components
            .iter_mut()
            .find(|slot| slot.type_id == type_id)
            .and_then(|slot| slot.component.as_deref_mut())
            .and_then(|c| c.downcast_mut::<C>())
    }

    pub fn has_component<C: Component>(&self) -> bool {
        self.slot_of::<C>().is_some()
    }

    /// Detaches the component of type `C`, running its `clean` hook.
    ///
    /// Returns false if no such component is attached, or if it is the
    /// component whose hook is currently running.
    pub fn remove_component<C: Component>(&mut self) -> bool {
        let type_id = TypeId::of::<C>();
        let Some(index) = self.components.iter().position(|slot| slot.type_id == type_id) else {
            return false;
        };

        let Some(mut component) = self.components[index].component.take() else {
            warn!(
                target: "objects",
                "Cannot remove {} from '{}' while its own hook is running",
                type_name::<C>(), self.name
            );
            return false;
        };

        self.components.remove(index);
        component.clean(self);
        true
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn handle_input(&mut self, frame: &mut FrameContext<'_>) {
        self.for_each_component(|component, owner| component.handle_input(owner, frame));
    }

    pub fn update(&mut self, dt: f32, frame: &mut FrameContext<'_>) {
        self.for_each_component(|component, owner| component.update(owner, dt, frame));
    }

    pub fn render(&mut self, frame: &mut FrameContext<'_>) {
        self.for_each_component(|component, owner| component.render(owner, frame));
    }

    /// Runs every component's `clean` hook and detaches them all.
    pub fn clean(&mut self) {
        trace!(target: "objects", "Cleaning '{}'", self.name);
        self.for_each_component(|component, owner| component.clean(owner));
        self.components.clear();
    }

    //--- Internal Helpers -------------------------------------------------

    fn slot_of<C: Component>(&self) -> Option<&ComponentSlot> {
        let type_id = TypeId::of::<C>();
        self.components.iter().find(|slot| slot.type_id == type_id)
    }

    fn for_each_component<F>(&mut self, mut hook: F)
    where
        F: FnMut(&mut dyn Component, &mut GameObject),
    {
        let mut index = 0;
        while index < self.components.len() {
            let type_id = self.components[index].type_id;

            if let Some(mut component) = self.components[index].component.take() {
                hook(&mut *component, self);

                // The hook may have added or removed siblings, so find the slot again
                match self.components.iter_mut().find(|slot| slot.type_id == type_id) {
                    Some(slot) => slot.component = Some(component),
                    None => error!(
                        target: "objects",
                        "Slot for a running component vanished from '{}'",
                        self.name
                    ),
                }
            }

            // Re-locate in case earlier slots were removed during the hook
            index = self
                .components
                .iter()
                .position(|slot| slot.type_id == type_id)
                .map(|i| i + 1)
                .unwrap_or(index);
        }
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components: Vec<_> = self.components.iter().map(|slot| slot.type_name).collect();

        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("components", &components)
            .field("need_remove", &self.need_remove)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
