//=========================================================================
// Component Trait
//=========================================================================
//
// Unit of behaviour or data attached to exactly one GameObject.
//
// Ownership: a component is moved into its GameObject and never shared.
// The owner is handed to every hook as `&mut GameObject`, so a component
// can read sibling components without holding a stored back-pointer.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::{FrameContext, GameObject};

//=== AsAny ===============================================================

/// Upcast helper so boxed components can be downcast to their concrete type.
///
/// Implemented automatically for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Component Trait =====================================================

/// Lifecycle hooks of a component.
///
/// All hooks default to doing nothing. While a hook runs, the component is
/// detached from `owner`, so `owner.get_component::<Self>()` returns `None`.
///
/// ```rust
/// # use strata_engine::prelude::*;
/// struct Spin { speed: f32 }
///
/// impl Component for Spin {
///     fn update(&mut self, owner: &mut GameObject, dt: f32, _frame: &mut FrameContext<'_>) {
///         if let Some(transform) = owner.get_component_mut::<TransformComponent>() {
///             transform.rotate(self.speed * dt);
///         }
///     }
/// }
/// ```
pub trait Component: AsAny {
    /// Called once when the component is attached to its owner.
    fn init(&mut self, _owner: &mut GameObject) {}

    fn handle_input(&mut self, _owner: &mut GameObject, _frame: &mut FrameContext<'_>) {}

    fn update(&mut self, _owner: &mut GameObject, _dt: f32, _frame: &mut FrameContext<'_>) {}

    fn render(&mut self, _owner: &mut GameObject, _frame: &mut FrameContext<'_>) {}

    /// Called once when the owner is destroyed or the component removed.
    fn clean(&mut self, _owner: &mut GameObject) {}
}

impl dyn Component {
    /// Downcasts to a concrete component type.
    pub fn downcast_ref<C: Component>(&self) -> Option<&C> {
        self.as_any().downcast_ref::<C>()
    }

    /// Downcasts to a concrete component type.
    pub fn downcast_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.as_any_mut().downcast_mut::<C>()
    }
}
