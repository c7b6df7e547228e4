//! Lifecycle hooks for abilities attached to entities.
//!
//! An ability is a unit of behavior that keeps its per-entity state in the
//! entity's store. The world calls [`Ability::init`] exactly once when the
//! ability is attached and [`Ability::destroy`] when it is detached.
//!
//! Store entries written during `init` belong to the entity and outlive the
//! ability.

use crate::entity::EntityId;
use crate::error::Result;
use crate::world::HealthWorld;

/// Attach/detach hooks.
pub trait Ability<W: HealthWorld> {
    /// Stable name of this ability, used in logs.
    fn name(&self) -> &'static str;

    /// Writes the ability's initial state for `entity`.
    ///
    /// Calling this again resets that state.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist in `world`.
    fn init(&self, world: &mut W, entity: EntityId) -> Result<()>;

    /// Releases anything the ability holds for `entity`.
    fn destroy(&self, world: &mut W, entity: EntityId);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;

    // Test that the trait is object-safe
    #[test]
    fn ability_is_object_safe() {
        fn _accepts_boxed(_ability: Box<dyn Ability<Arena>>) {}
        fn _accepts_slice(_abilities: &[Box<dyn Ability<Arena>>]) {}
    }
}
