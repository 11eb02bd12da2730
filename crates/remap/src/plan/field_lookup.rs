use crate::Conversion;

use remap_core::Field;

use std::hash::{Hash, Hasher};

/// A single compiled field assignment: read `source`, apply `convert` when
/// present, write `destination`.
///
/// Equality and hashing cover the (source, destination) field pair only.
/// Candidates produced by different conventions for the same pair collapse
/// to one entry during plan construction regardless of which convention
/// produced them and regardless of the attached conversion.
#[derive(Debug, Clone)]
pub struct FieldLookup {
    pub source: &'static Field,
    pub destination: &'static Field,
    pub convert: Option<Conversion>,
}

impl PartialEq for FieldLookup {
    fn eq(&self, other: &FieldLookup) -> bool {
        self.source.name == other.source.name && self.destination.name == other.destination.name
    }
}

impl Eq for FieldLookup {}

impl Hash for FieldLookup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.name.hash(state);
        self.destination.name.hash(state);
    }
}
