use crate::Type;

/// A named, typed, independently readable/writable member of a
/// [`Shape`](crate::Shape).
#[derive(Debug, Clone)]
pub struct Field {
    /// The field name, as used by conventions and instance access.
    pub name: &'static str,

    /// The declared type. Mismatched source/destination types require a
    /// registered conversion.
    pub ty: Type,

    /// True if the field's value can be read from an instance.
    pub readable: bool,

    /// True if the field's value can be written on an instance.
    pub writable: bool,
}
