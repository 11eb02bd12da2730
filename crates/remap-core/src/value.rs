use crate::{Result, Type};

/// A runtime field value, read from a source instance and written to a
/// destination instance during plan execution.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// 64-bit floating point value
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),

    /// An instant in time
    Timestamp(jiff::Timestamp),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Infers the declared type this value would satisfy. `Null` satisfies
    /// no type.
    pub fn infer_ty(&self) -> Option<Type> {
        match self {
            Self::Bool(_) => Some(Type::Bool),
            Self::F64(_) => Some(Type::F64),
            Self::I64(_) => Some(Type::I64),
            Self::Null => None,
            Self::String(_) => Some(Type::String),
            Self::Timestamp(_) => Some(Type::Timestamp),
        }
    }

    /// The runtime type name, used when reporting conversion failures.
    pub fn ty_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            _ => self.infer_ty().unwrap().name(),
        }
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            _ => bail!("cannot convert value to bool; value={self:#?}"),
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(v),
            _ => bail!("cannot convert value to i64; value={self:#?}"),
        }
    }

    pub fn to_f64(self) -> Result<f64> {
        match self {
            Self::F64(v) => Ok(v),
            _ => bail!("cannot convert value to f64; value={self:#?}"),
        }
    }

    pub fn to_string(self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v),
            _ => bail!("cannot convert value to String; value={self:#?}"),
        }
    }

    pub fn to_timestamp(self) -> Result<jiff::Timestamp> {
        match self {
            Self::Timestamp(v) => Ok(v),
            _ => bail!("cannot convert value to Timestamp; value={self:#?}"),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<jiff::Timestamp> for Value {
    fn from(src: jiff::Timestamp) -> Self {
        Self::Timestamp(src)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

macro_rules! impl_try_from_value {
    ($target:ty, $to:ident) => {
        impl TryFrom<Value> for $target {
            type Error = crate::Error;

            fn try_from(value: Value) -> Result<Self> {
                value.$to()
            }
        }
    };
}

impl_try_from_value!(bool, to_bool);
impl_try_from_value!(i64, to_i64);
impl_try_from_value!(f64, to_f64);
impl_try_from_value!(String, to_string);
impl_try_from_value!(jiff::Timestamp, to_timestamp);
