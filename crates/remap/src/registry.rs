use crate::convention::Convention;
use crate::convert::Conversions;
use crate::plan::{Plan, PlanSettings};

use remap_core::{Error, Result, Shape, ShapeId};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Associates (source shape, destination shape) pairs with their compiled
/// plans.
///
/// Plans are never rebuilt after registration: resolving the same pair
/// twice yields the reference-identical `Arc<Plan>`. Auto-created plans are
/// built while holding the registry lock, so at most one plan object ever
/// exists per pair, even under concurrent first use. Builds are CPU-bound
/// field matching, so holding the lock across them is fine.
pub(crate) struct PlanRegistry {
    plans: Mutex<HashMap<(ShapeId, ShapeId), Arc<Plan>>>,
}

impl PlanRegistry {
    pub(crate) fn new() -> PlanRegistry {
        PlanRegistry {
            plans: Mutex::new(HashMap::new()),
        }
    }

    /// Registers an eagerly-built plan under the given key. Duplicate
    /// registration for a pair is a configuration error.
    pub(crate) fn insert(
        &self,
        key: (ShapeId, ShapeId),
        names: (&str, &str),
        plan: Arc<Plan>,
    ) -> Result<()> {
        let mut plans = self.plans.lock().unwrap();

        if plans.contains_key(&key) {
            return Err(Error::configuration(format!(
                "a map for `{} -> {}` is already registered",
                names.0, names.1
            )));
        }

        plans.insert(key, plan);
        Ok(())
    }

    /// Resolves the plan for a shape pair, synthesizing a convention-only
    /// plan on first miss when `auto_create` is enabled. A failed build
    /// registers nothing.
    pub(crate) fn resolve(
        &self,
        source: &'static Shape,
        destination: &'static Shape,
        auto_create: bool,
        conventions: &[Arc<dyn Convention>],
        conversions: &Conversions,
    ) -> Result<Arc<Plan>> {
        let key = (source.id(), destination.id());
        let mut plans = self.plans.lock().unwrap();

        if let Some(plan) = plans.get(&key) {
            return Ok(plan.clone());
        }

        if !auto_create {
            return Err(Error::configuration(format!(
                "no map registered for `{} -> {}` and auto-creation is disabled",
                source.name(),
                destination.name()
            )));
        }

        let plan = Arc::new(Plan::initialize(
            source,
            destination,
            &PlanSettings::default(),
            conventions,
            conversions,
        )?);
        plans.insert(key, plan.clone());

        Ok(plan)
    }
}

impl core::fmt::Debug for PlanRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let plans = self.plans.lock().unwrap();
        f.debug_struct("PlanRegistry")
            .field("plans", &plans.len())
            .finish()
    }
}
