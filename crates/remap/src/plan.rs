mod field_lookup;
pub use field_lookup::FieldLookup;

use crate::convention::Convention;
use crate::convert::Conversions;

use remap_core::{Error, Mapped, Result, Shape};

use indexmap::IndexSet;
use std::collections::HashSet;
use std::sync::Arc;

/// Constructs a destination instance from the source instance.
pub(crate) type Activator = Arc<dyn Fn(&dyn Mapped) -> Result<Box<dyn Mapped>> + Send + Sync>;

/// A manual post-processing step layered over convention mapping.
pub(crate) type Transform = Arc<dyn Fn(&dyn Mapped, &mut dyn Mapped) -> Result<()> + Send + Sync>;

/// Per-pair build settings collected by the configuration builder.
#[derive(Default, Clone)]
pub(crate) struct PlanSettings {
    /// Destination field *type names* excluded from the compiled plan.
    /// Filtering is by declared type name, not field name, so ignoring one
    /// field's type also excludes sibling fields sharing that type.
    pub(crate) ignored_types: HashSet<String>,

    /// When set, convention matching is disabled and only the manual
    /// transform runs.
    pub(crate) skip_conventions: bool,

    pub(crate) activator: Option<Activator>,

    pub(crate) transform: Option<Transform>,
}

/// The compiled, immutable, ordered list of field assignments for one
/// (source shape, destination shape) pair.
///
/// Built once, then shared as `Arc<Plan>` and reused for every instance
/// pair; concurrent executions read it without locking.
pub struct Plan {
    source: &'static Shape,
    destination: &'static Shape,
    lookups: Vec<FieldLookup>,
    activator: Option<Activator>,
    transform: Option<Transform>,
    use_conventions: bool,
}

impl Plan {
    /// Compiles the field lookup sequence for the shape pair. Runs once per
    /// plan, not once per mapped instance.
    pub(crate) fn initialize(
        source: &'static Shape,
        destination: &'static Shape,
        settings: &PlanSettings,
        conventions: &[Arc<dyn Convention>],
        conversions: &Conversions,
    ) -> Result<Plan> {
        let lookups = if settings.skip_conventions {
            Vec::new()
        } else {
            build_lookups(
                source,
                destination,
                &settings.ignored_types,
                conventions,
                conversions,
            )?
        };

        Ok(Plan {
            source,
            destination,
            lookups,
            activator: settings.activator.clone(),
            transform: settings.transform.clone(),
            use_conventions: !settings.skip_conventions,
        })
    }

    pub fn source(&self) -> &'static Shape {
        self.source
    }

    pub fn destination(&self) -> &'static Shape {
        self.destination
    }

    /// The frozen field lookups, in execution order.
    pub fn lookups(&self) -> &[FieldLookup] {
        &self.lookups
    }

    pub(crate) fn activator(&self) -> Option<&Activator> {
        self.activator.as_ref()
    }

    /// Executes the plan on a concrete instance pair: convention lookups in
    /// plan order, then the manual transform, which may overwrite any field
    /// a lookup already set.
    ///
    /// Writes committed before a failure are not rolled back; the
    /// destination is left partially mapped.
    pub(crate) fn apply(&self, source: &dyn Mapped, destination: &mut dyn Mapped) -> Result<()> {
        if self.use_conventions {
            for lookup in &self.lookups {
                apply_lookup(lookup, source, &mut *destination)?;
            }
        }

        if let Some(transform) = &self.transform {
            transform(source, &mut *destination).map_err(|cause| {
                cause.context(Error::mapping_transform(
                    self.source.name(),
                    self.destination.name(),
                ))
            })?;
        }

        Ok(())
    }
}

impl core::fmt::Debug for Plan {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Plan")
            .field("source", &self.source.name())
            .field("destination", &self.destination.name())
            .field("lookups", &self.lookups)
            .field("use_conventions", &self.use_conventions)
            .finish()
    }
}

fn apply_lookup(
    lookup: &FieldLookup,
    source: &dyn Mapped,
    destination: &mut dyn Mapped,
) -> Result<()> {
    let mut value = source
        .read(lookup.source.name)
        .map_err(|cause| cause.context(Error::mapping_field("read", lookup.source.name)))?;

    if let Some(convert) = &lookup.convert {
        value = convert
            .apply(value)
            .map_err(|cause| cause.context(Error::mapping_field("convert", lookup.source.name)))?;
    }

    destination
        .write(lookup.destination.name, value)
        .map_err(|cause| cause.context(Error::mapping_field("write", lookup.destination.name)))
}

fn build_lookups(
    source: &'static Shape,
    destination: &'static Shape,
    ignored_types: &HashSet<String>,
    conventions: &[Arc<dyn Convention>],
    conversions: &Conversions,
) -> Result<Vec<FieldLookup>> {
    if conventions.is_empty() {
        return Err(Error::configuration(format!(
            "no conventions registered; cannot build a plan for `{} -> {}`",
            source.name(),
            destination.name()
        )));
    }

    // Conventions are additive: concatenate every convention's candidates
    // before deduplication.
    let mut candidates = Vec::new();
    for convention in conventions {
        candidates.extend(convention.candidates(source, destination));
    }

    let mut lookups: IndexSet<FieldLookup> = IndexSet::with_capacity(candidates.len());

    for (src, dst) in candidates {
        if !src.readable {
            return Err(Error::configuration(format!(
                "source field `{}.{}` is not readable",
                source.name(),
                src.name
            )));
        }
        if !dst.writable {
            return Err(Error::configuration(format!(
                "destination field `{}.{}` is not writable",
                destination.name(),
                dst.name
            )));
        }

        // Declared types are compared by identity; a mismatch requires a
        // conversion registered for the exact ordered pair.
        let convert = if src.ty != dst.ty {
            match conversions.get(src.ty, dst.ty) {
                Some(conversion) => Some(conversion.clone()),
                None => {
                    return Err(Error::configuration(format!(
                        "no conversion registered for `{} -> {}` \
                         (field `{}.{}` -> `{}.{}`)",
                        src.ty,
                        dst.ty,
                        source.name(),
                        src.name,
                        destination.name(),
                        dst.name
                    )))
                }
            }
        } else {
            None
        };

        // First-seen entry wins for duplicate pairs; equality ignores the
        // conversion.
        lookups.insert(FieldLookup {
            source: src,
            destination: dst,
            convert,
        });
    }

    Ok(lookups
        .into_iter()
        .filter(|lookup| !ignored_types.contains(lookup.destination.ty.name()))
        .collect())
}
