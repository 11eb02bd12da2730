use remap_core::{Field, Shape};

/// A rule producing candidate source/destination field pairings from two
/// shapes.
///
/// Conventions are additive: a plan's build step concatenates every
/// registered convention's candidates before deduplicating, so a later
/// convention extends earlier ones rather than replacing them. Conventions
/// never see or alter resolved conversions.
pub trait Convention: Send + Sync {
    /// Human-readable name, used in configuration errors.
    fn name(&self) -> &'static str;

    /// Yields candidate pairs for the given shapes.
    fn candidates(
        &self,
        source: &'static Shape,
        destination: &'static Shape,
    ) -> Vec<(&'static Field, &'static Field)>;
}

/// The built-in default convention: matches fields whose names are equal
/// ASCII-case-insensitively, restricted to readable source fields and
/// writable destination fields.
#[derive(Debug, Default)]
pub struct NameMatch;

impl Convention for NameMatch {
    fn name(&self) -> &'static str {
        "name-match"
    }

    fn candidates(
        &self,
        source: &'static Shape,
        destination: &'static Shape,
    ) -> Vec<(&'static Field, &'static Field)> {
        let mut candidates = Vec::new();

        for src in source.fields().iter().filter(|field| field.readable) {
            for dst in destination.fields().iter().filter(|field| field.writable) {
                if src.name.eq_ignore_ascii_case(dst.name) {
                    candidates.push((src, dst));
                }
            }
        }

        candidates
    }
}
