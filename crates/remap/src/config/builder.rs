use super::{construct, DefaultActivator, MapperConfig};
use crate::convention::{Convention, NameMatch};
use crate::convert::Conversions;
use crate::mapper::Mapper;
use crate::plan::{Activator, Plan, PlanSettings, Transform};
use crate::registry::PlanRegistry;

use remap_core::{Error, Mapped, Result, Shape, Type, Value};

use std::marker::PhantomData;
use std::sync::Arc;

/// One declared map and its accumulated settings.
struct MapEntry {
    source: &'static Shape,
    destination: &'static Shape,
    settings: PlanSettings,
    include_from: Vec<&'static Shape>,
    include_to: Vec<&'static Shape>,
}

/// Builds a [`Mapper`] configuration: declared maps, conventions,
/// conversions, and construction policy.
///
/// Declared plans compile eagerly in [`build`](MapperBuilder::build);
/// unseen pairs compile lazily at first resolution when auto-creation is
/// enabled.
pub struct MapperBuilder {
    conventions: Vec<Arc<dyn Convention>>,
    conversions: Conversions,
    entries: Vec<MapEntry>,
    default_activator: DefaultActivator,
    auto_create: bool,
}

impl MapperBuilder {
    /// A builder pre-loaded with the default convention and conversions.
    pub(crate) fn with_defaults() -> MapperBuilder {
        MapperBuilder {
            conventions: vec![Arc::new(NameMatch)],
            conversions: Conversions::with_defaults(),
            entries: Vec::new(),
            default_activator: construct,
            auto_create: true,
        }
    }

    /// A bare builder: no conventions, no conversions. Plans declared on it
    /// fail to build until at least one convention is registered (or they
    /// skip conventions entirely).
    pub fn empty() -> MapperBuilder {
        MapperBuilder {
            conventions: Vec::new(),
            conversions: Conversions::new(),
            entries: Vec::new(),
            default_activator: construct,
            auto_create: true,
        }
    }

    /// Declares a map from `S` to `D` and returns its per-map builder.
    pub fn create_map<S: Mapped, D: Mapped>(&mut self) -> MapBuilder<'_, S, D> {
        self.entries.push(MapEntry {
            source: S::shape(),
            destination: D::shape(),
            settings: PlanSettings::default(),
            include_from: Vec::new(),
            include_to: Vec::new(),
        });

        MapBuilder {
            entry: self.entries.last_mut().unwrap(),
            _marker: PhantomData,
        }
    }

    /// Registers an additional convention. Conventions are additive and run
    /// in registration order during plan construction.
    pub fn add_convention(&mut self, convention: impl Convention + 'static) -> &mut Self {
        self.conventions.push(Arc::new(convention));
        self
    }

    /// Registers a conversion for the ordered type pair, replacing any
    /// earlier registration.
    pub fn add_conversion<F>(&mut self, from: Type, to: Type, convert: F) -> &mut Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.conversions.register(from, to, convert);
        self
    }

    /// Replaces the default destination-construction strategy.
    pub fn default_activator(&mut self, activator: DefaultActivator) -> &mut Self {
        self.default_activator = activator;
        self
    }

    /// Controls whether resolving an undeclared shape pair synthesizes a
    /// convention-only plan (enabled by default).
    pub fn auto_create(&mut self, enabled: bool) -> &mut Self {
        self.auto_create = enabled;
        self
    }

    /// Compiles every declared plan and freezes the configuration.
    pub fn build(self) -> Result<Mapper> {
        let plans = PlanRegistry::new();

        for entry in &self.entries {
            let plan = Arc::new(Plan::initialize(
                entry.source,
                entry.destination,
                &entry.settings,
                &self.conventions,
                &self.conversions,
            )?);

            plans.insert(
                (entry.source.id(), entry.destination.id()),
                (entry.source.name(), entry.destination.name()),
                plan.clone(),
            )?;

            // Assignability-related shapes share the same plan object.
            for shape in &entry.include_from {
                validate_included_source(&plan, shape)?;
                plans.insert(
                    (shape.id(), entry.destination.id()),
                    (shape.name(), entry.destination.name()),
                    plan.clone(),
                )?;
            }
            for shape in &entry.include_to {
                validate_included_destination(&plan, shape)?;
                plans.insert(
                    (entry.source.id(), shape.id()),
                    (entry.source.name(), shape.name()),
                    plan.clone(),
                )?;
            }
        }

        Ok(Mapper::from_config(MapperConfig {
            conventions: self.conventions,
            conversions: self.conversions,
            plans,
            default_activator: self.default_activator,
            auto_create: self.auto_create,
        }))
    }
}

impl core::fmt::Debug for MapperBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("MapperBuilder")
            .field("conventions", &self.conventions.len())
            .field("maps", &self.entries.len())
            .field("auto_create", &self.auto_create)
            .finish()
    }
}

/// Every source field the plan reads must exist on the included shape with
/// the same declared type and be readable there.
fn validate_included_source(plan: &Plan, shape: &'static Shape) -> Result<()> {
    for lookup in plan.lookups() {
        let field = shape.field(lookup.source.name).ok_or_else(|| {
            Error::configuration(format!(
                "included source shape `{}` has no field `{}` required by the `{} -> {}` plan",
                shape.name(),
                lookup.source.name,
                plan.source().name(),
                plan.destination().name()
            ))
        })?;

        if field.ty != lookup.source.ty || !field.readable {
            return Err(Error::configuration(format!(
                "field `{}.{}` is not assignable to `{}.{}`",
                shape.name(),
                field.name,
                plan.source().name(),
                lookup.source.name
            )));
        }
    }
    Ok(())
}

/// Every destination field the plan writes must exist on the included shape
/// with the same declared type and be writable there.
fn validate_included_destination(plan: &Plan, shape: &'static Shape) -> Result<()> {
    for lookup in plan.lookups() {
        let field = shape.field(lookup.destination.name).ok_or_else(|| {
            Error::configuration(format!(
                "included destination shape `{}` has no field `{}` required by the `{} -> {}` plan",
                shape.name(),
                lookup.destination.name,
                plan.source().name(),
                plan.destination().name()
            ))
        })?;

        if field.ty != lookup.destination.ty || !field.writable {
            return Err(Error::configuration(format!(
                "field `{}.{}` is not assignable from `{}.{}`",
                shape.name(),
                field.name,
                plan.destination().name(),
                lookup.destination.name
            )));
        }
    }
    Ok(())
}

/// Per-map fluent surface returned by [`MapperBuilder::create_map`].
pub struct MapBuilder<'a, S: Mapped, D: Mapped> {
    entry: &'a mut MapEntry,
    _marker: PhantomData<fn(&S) -> D>,
}

impl<S: Mapped, D: Mapped> MapBuilder<'_, S, D> {
    /// Excludes every destination field whose declared *type name* matches.
    ///
    /// Filtering is by type name, not field name: ignoring the type of one
    /// field also excludes sibling fields sharing that type.
    pub fn ignore_type(self, type_name: impl Into<String>) -> Self {
        self.entry.settings.ignored_types.insert(type_name.into());
        self
    }

    /// Removes a type name from this map's ignore list.
    pub fn keep_type(self, type_name: &str) -> Self {
        self.entry.settings.ignored_types.remove(type_name);
        self
    }

    /// Disables convention matching for this map; only the manual transform
    /// runs.
    pub fn skip_conventions(self) -> Self {
        self.entry.settings.skip_conventions = true;
        self
    }

    /// Declares a custom activator constructing the destination from the
    /// source instance, replacing the default activator for this map.
    pub fn activate_with<F>(self, activate: F) -> Self
    where
        F: Fn(&S) -> D + Send + Sync + 'static,
    {
        let source_name = self.entry.source.name();
        let activator: Activator = Arc::new(move |source: &dyn Mapped| {
            let source = source.as_any().downcast_ref::<S>().ok_or_else(|| {
                Error::configuration(format!(
                    "activator for `{source_name}` invoked with a different source type"
                ))
            })?;
            Ok(Box::new(activate(source)) as Box<dyn Mapped>)
        });

        self.entry.settings.activator = Some(activator);
        self
    }

    /// Declares a manual transform that runs after convention mapping and
    /// may overwrite any field a convention already set.
    pub fn after_map<F>(self, transform: F) -> Self
    where
        F: Fn(&S, &mut D) -> Result<()> + Send + Sync + 'static,
    {
        let source_name = self.entry.source.name();
        let destination_name = self.entry.destination.name();
        let transform: Transform = Arc::new(move |source: &dyn Mapped, destination: &mut dyn Mapped| {
            let source = source.as_any().downcast_ref::<S>().ok_or_else(|| {
                Error::configuration(format!(
                    "manual transform for `{source_name} -> {destination_name}` \
                     invoked with a different source type"
                ))
            })?;
            let destination = destination.as_any_mut().downcast_mut::<D>().ok_or_else(|| {
                Error::configuration(format!(
                    "manual transform for `{source_name} -> {destination_name}` \
                     invoked with a different destination type"
                ))
            })?;
            transform(source, destination)
        });

        self.entry.settings.transform = Some(transform);
        self
    }

    /// Shares this map's plan with an additional source shape that is
    /// assignable to `S`. Validated when the plan builds.
    pub fn include_from<S2: Mapped>(self) -> Self {
        self.entry.include_from.push(S2::shape());
        self
    }

    /// Shares this map's plan with an additional destination shape that `D`
    /// is assignable to. Validated when the plan builds.
    pub fn include_to<D2: Mapped>(self) -> Self {
        self.entry.include_to.push(D2::shape());
        self
    }
}
