/// The declared type of a [`Field`](crate::Field).
///
/// `Type` equality is the type identity used when deciding whether a field
/// pair needs a conversion and when looking the conversion up. Two `Named`
/// types are the same type iff their names are equal; callers describing
/// types from different namespaces must give them distinct names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 64-bit integer
    I64,

    /// 64-bit floating point
    F64,

    /// String type
    String,

    /// An instant in time
    Timestamp,

    /// An opaque user-declared type, identified by name
    Named(&'static str),
}

impl Type {
    /// The declared type name, as used by ignore-list filtering.
    pub fn name(&self) -> &'static str {
        match self {
            Type::Bool => "Bool",
            Type::I64 => "I64",
            Type::F64 => "F64",
            Type::String => "String",
            Type::Timestamp => "Timestamp",
            Type::Named(name) => name,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::String)
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Type::Named(_))
    }
}

impl core::fmt::Display for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
