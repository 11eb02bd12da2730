use crate::config::{construct, MapperBuilder, MapperConfig, MapperDefinition};
use crate::convention::NameMatch;
use crate::convert::Conversions;
use crate::plan::Plan;
use crate::registry::PlanRegistry;

use remap_core::{Error, Mapped, Result};

use std::sync::{Arc, OnceLock};

/// The mapping engine façade.
///
/// Cloning is cheap; clones share one frozen [`MapperConfig`]. Most
/// applications use the process-wide instance via [`configure`] /
/// [`current`] and the free-function entry points, but a `Mapper` can also
/// be held and passed explicitly.
#[derive(Clone)]
pub struct Mapper {
    config: Arc<MapperConfig>,
}

static CURRENT: OnceLock<Mapper> = OnceLock::new();

impl Mapper {
    /// Starts a configuration pre-loaded with the default convention
    /// (case-insensitive name match) and default conversions.
    pub fn builder() -> MapperBuilder {
        MapperBuilder::with_defaults()
    }

    pub(crate) fn from_config(config: MapperConfig) -> Mapper {
        Mapper {
            config: Arc::new(config),
        }
    }

    /// Builds a mapper by activating each definition's setup hook once, in
    /// list order, aggregating their registrations into one configuration.
    /// A failing definition aborts initialization.
    pub fn from_definitions(definitions: &[Box<dyn MapperDefinition>]) -> Result<Mapper> {
        let mut builder = Mapper::builder();

        for definition in definitions {
            definition.setup(&mut builder).map_err(|cause| {
                cause.context(Error::configuration(format!(
                    "definition `{}` failed to activate",
                    definition.name()
                )))
            })?;
        }

        builder.build()
    }

    /// Resolves (or auto-creates) the plan for the `S -> D` pair.
    ///
    /// Resolution is idempotent: the same pair always yields the
    /// reference-identical plan object.
    pub fn resolve<S: Mapped, D: Mapped>(&self) -> Result<Arc<Plan>> {
        self.config.resolve(S::shape(), D::shape())
    }

    /// Maps `source` into a newly constructed `D`.
    ///
    /// An absent source short-circuits to `Ok(None)`: no destination is
    /// constructed, no plan is resolved, no error is raised.
    pub fn map_to<S: Mapped, D: Mapped>(&self, source: Option<&S>) -> Result<Option<D>> {
        let Some(source) = source else {
            return Ok(None);
        };

        let plan = self.config.resolve(S::shape(), D::shape())?;
        let mut destination = self.config.activate(&plan, source, D::shape())?;
        plan.apply(source, &mut *destination)?;

        let destination = destination.into_any().downcast::<D>().map_err(|_| {
            Error::configuration(format!(
                "activator for `{}` produced an instance of a different type",
                D::shape().name()
            ))
        })?;

        Ok(Some(*destination))
    }

    /// Maps `source` onto a caller-provided destination instance.
    ///
    /// An absent source is a no-op. An absent destination with a present
    /// source is a configuration error, distinct from the source-absent
    /// case.
    pub fn map_onto<S: Mapped, D: Mapped>(
        &self,
        source: Option<&S>,
        destination: Option<&mut D>,
    ) -> Result<()> {
        let Some(source) = source else {
            return Ok(());
        };
        let Some(destination) = destination else {
            return Err(Error::configuration(format!(
                "no destination instance provided for `{} -> {}`",
                S::shape().name(),
                D::shape().name()
            )));
        };

        let plan = self.config.resolve(S::shape(), D::shape())?;
        plan.apply(source, &mut *destination)
    }

    /// Maps every element of `sources` into a new `D`, resolving the plan
    /// once for the whole sequence. An absent sequence yields an empty
    /// collection.
    pub fn map_many<S: Mapped, D: Mapped>(&self, sources: Option<&[S]>) -> Result<Vec<D>> {
        let Some(sources) = sources else {
            return Ok(Vec::new());
        };

        let plan = self.config.resolve(S::shape(), D::shape())?;
        let mut out = Vec::with_capacity(sources.len());

        for source in sources {
            let mut destination = self.config.activate(&plan, source, D::shape())?;
            plan.apply(source, &mut *destination)?;

            let destination = destination.into_any().downcast::<D>().map_err(|_| {
                Error::configuration(format!(
                    "activator for `{}` produced an instance of a different type",
                    D::shape().name()
                ))
            })?;
            out.push(*destination);
        }

        Ok(out)
    }

    /// Applies one or more source instances onto an existing destination,
    /// sequentially; later sources overwrite earlier field writes where
    /// both touch the same field. Each source resolves its own plan by its
    /// concrete shape.
    pub fn map_from<D: Mapped>(
        &self,
        destination: Option<&mut D>,
        sources: &[&dyn Mapped],
    ) -> Result<()> {
        let Some(destination) = destination else {
            return Err(Error::configuration(format!(
                "no destination instance provided for mapping onto `{}`",
                D::shape().name()
            )));
        };

        for source in sources {
            let plan = self.config.resolve(source.instance_shape(), D::shape())?;
            plan.apply(*source, &mut *destination)?;
        }

        Ok(())
    }
}

impl Default for Mapper {
    fn default() -> Mapper {
        Mapper::from_config(MapperConfig {
            conventions: vec![Arc::new(NameMatch)],
            conversions: Conversions::with_defaults(),
            plans: PlanRegistry::new(),
            default_activator: construct,
            auto_create: true,
        })
    }
}

impl core::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Mapper").field("config", &self.config).finish()
    }
}

/// Installs `mapper` as the process-wide instance.
///
/// Fails once lazy default initialization (or an earlier `configure`) has
/// taken effect; the process-wide configuration is replaceable only before
/// first use.
pub fn configure(mapper: Mapper) -> Result<()> {
    CURRENT
        .set(mapper)
        .map_err(|_| Error::configuration("process-wide mapper already initialized"))
}

/// The process-wide mapper. Lazily initialized exactly once with the
/// default configuration on first access; concurrent first accesses are
/// serialized.
pub fn current() -> &'static Mapper {
    CURRENT.get_or_init(Mapper::default)
}

/// Maps `source` into a new `D` using the process-wide mapper.
pub fn map_to<S: Mapped, D: Mapped>(source: Option<&S>) -> Result<Option<D>> {
    current().map_to(source)
}

/// Maps `source` onto an existing destination using the process-wide
/// mapper.
pub fn map_onto<S: Mapped, D: Mapped>(
    source: Option<&S>,
    destination: Option<&mut D>,
) -> Result<()> {
    current().map_onto(source, destination)
}

/// Maps a sequence using the process-wide mapper.
pub fn map_many<S: Mapped, D: Mapped>(sources: Option<&[S]>) -> Result<Vec<D>> {
    current().map_many(sources)
}

/// Applies sources onto an existing destination using the process-wide
/// mapper.
pub fn map_from<D: Mapped>(destination: Option<&mut D>, sources: &[&dyn Mapped]) -> Result<()> {
    current().map_from(destination, sources)
}
