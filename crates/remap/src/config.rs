mod builder;
pub use builder::{MapBuilder, MapperBuilder};

use crate::convention::Convention;
use crate::convert::Conversions;
use crate::plan::Plan;
use crate::registry::PlanRegistry;

use remap_core::{Mapped, Result, Shape};

use std::sync::Arc;

/// The default destination-construction strategy: a function from the
/// target shape to a fresh instance.
pub type DefaultActivator = fn(&'static Shape) -> Result<Box<dyn Mapped>>;

/// Aggregates the convention set, conversion registry, plan registry, and
/// construction policy for one mapper.
///
/// Frozen once built: conventions and conversions registered here are the
/// ones every plan sees, and already-compiled plans are never retroactively
/// rebuilt. The only post-build mutation is the registry auto-creating a
/// plan for a previously-unseen pair.
pub struct MapperConfig {
    pub(crate) conventions: Vec<Arc<dyn Convention>>,
    pub(crate) conversions: Conversions,
    pub(crate) plans: PlanRegistry,
    pub(crate) default_activator: DefaultActivator,
    pub(crate) auto_create: bool,
}

impl MapperConfig {
    pub(crate) fn resolve(
        &self,
        source: &'static Shape,
        destination: &'static Shape,
    ) -> Result<Arc<Plan>> {
        self.plans.resolve(
            source,
            destination,
            self.auto_create,
            &self.conventions,
            &self.conversions,
        )
    }

    /// Constructs the destination instance: the plan's custom activator
    /// when declared, else the default activator applied to the requested
    /// target shape.
    pub(crate) fn activate(
        &self,
        plan: &Plan,
        source: &dyn Mapped,
        target: &'static Shape,
    ) -> Result<Box<dyn Mapped>> {
        match plan.activator() {
            Some(activator) => activator(source),
            None => (self.default_activator)(target),
        }
    }
}

impl core::fmt::Debug for MapperConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("MapperConfig")
            .field("conventions", &self.conventions.len())
            .field("plans", &self.plans)
            .field("auto_create", &self.auto_create)
            .finish()
    }
}

/// Constructs via the shape's registered constructor; the default
/// [`DefaultActivator`].
pub(crate) fn construct(shape: &'static Shape) -> Result<Box<dyn Mapped>> {
    shape.new_instance()
}

/// A mapper-definition object activated during configuration
/// initialization.
///
/// Discovery of definitions is the caller's concern; the engine consumes an
/// already-enumerated list via [`Mapper::from_definitions`] and calls each
/// definition's setup hook once, in list order. A failing definition aborts
/// initialization.
///
/// [`Mapper::from_definitions`]: crate::Mapper::from_definitions
pub trait MapperDefinition: Send + Sync {
    /// The definition's name, used when reporting activation failures.
    fn name(&self) -> &str;

    /// Registers this definition's maps, conventions, and conversions.
    fn setup(&self, builder: &mut MapperBuilder) -> Result<()>;
}
