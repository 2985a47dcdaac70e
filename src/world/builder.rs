use super::World;
use crate::aspect::Aspect;
use crate::component::{Component, ComponentKey};
use crate::manager::{Manager, ManagerType};
use crate::system::{System, SystemType};
use crate::Result;

/// A bundle encapsulates the managers and systems for a specific feature.
/// This can be used by library crates to expose their features as a single API.
pub trait Bundle {
    /// Registers the managers, systems and component types used by this bundle.
    fn register(&self, _builder: &mut Builder) -> Result<()> { Ok(()) }

    /// Populates the world with entities.
    fn populate(&self, _world: &mut World) {}
}

/// This type is used to build a world.
///
/// Managers and systems registered through the builder
/// are initialized together when the world is built.
#[derive(Default)]
pub struct Builder {
    world: World,
}

impl Builder {
    /// Sets the initial tick delta.
    pub fn delta(&mut self, delta: f32) -> &mut Self {
        self.world.set_delta(delta);
        self
    }

    /// Allocates the lowest free component ordinal for `T`.
    pub fn component<T: Component>(&mut self) -> Result<ComponentKey<T>> {
        self.world.register_component()
    }

    /// Registers a manager at the given ordinal.
    pub fn manager(&mut self, ty: ManagerType, manager: impl Manager) -> Result<&mut Self> {
        self.world.set_manager(ty, manager)?;
        Ok(self)
    }

    /// Registers a system at the given ordinal.
    pub fn system(&mut self, ty: SystemType, aspect: Aspect, system: impl System) -> Result<&mut Self> {
        self.world.set_system(ty, aspect, system)?;
        Ok(self)
    }

    /// Registers a passive system at the given ordinal.
    pub fn passive_system(
        &mut self,
        ty: SystemType,
        aspect: Aspect,
        system: impl System,
    ) -> Result<&mut Self> {
        self.world.set_passive_system(ty, aspect, system)?;
        Ok(self)
    }

    /// Registers the contents of a bundle.
    ///
    /// This does not populate the world.
    /// Use [`world::new`](super::new) to register and populate bundles together.
    pub fn bundle(&mut self, bundle: &dyn Bundle) -> Result<&mut Self> {
        bundle.register(self)?;
        Ok(self)
    }

    /// Initializes all registered managers and systems and returns the world.
    pub fn build(self) -> World {
        let mut world = self.world;
        world.initialize();
        world
    }
}
