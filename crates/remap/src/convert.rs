use remap_core::{Error, Result, Type, Value};

use std::collections::HashMap;
use std::sync::Arc;

/// A registered function transforming a value from one declared field type
/// to another.
#[derive(Clone)]
pub struct Conversion {
    convert: Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>,
}

impl Conversion {
    pub fn new<F>(convert: F) -> Conversion
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Conversion {
            convert: Arc::new(convert),
        }
    }

    /// Applies the conversion. A failure in the function itself is
    /// re-raised as a conversion error naming the runtime type of `value`,
    /// with the original failure as its cause.
    pub fn apply(&self, value: Value) -> Result<Value> {
        let value_ty = value.ty_name();
        (self.convert)(value).map_err(|cause| cause.context(Error::conversion(value_ty)))
    }
}

impl core::fmt::Debug for Conversion {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("Conversion")
    }
}

/// Conversion functions keyed by ordered (source type, destination type)
/// pairs. At most one conversion exists per ordered pair; later
/// registrations overwrite earlier ones.
///
/// The default conversions use fixed, locale-independent textual forms:
/// RFC 3339 UTC for timestamps and plain decimal digits for integers.
/// Ambient-locale formatting is deliberately not used, so textual output is
/// deterministic across environments.
#[derive(Debug, Default, Clone)]
pub struct Conversions {
    entries: HashMap<(Type, Type), Conversion>,
}

impl Conversions {
    /// An empty registry.
    pub fn new() -> Conversions {
        Conversions::default()
    }

    /// A registry holding the built-in defaults: `Timestamp <-> String` and
    /// `I64 <-> String`.
    pub fn with_defaults() -> Conversions {
        let mut conversions = Conversions::new();

        conversions.register(Type::Timestamp, Type::String, |value| {
            Ok(Value::String(value.to_timestamp()?.to_string()))
        });
        conversions.register(Type::String, Type::Timestamp, |value| {
            let text = value.to_string()?;
            let timestamp: jiff::Timestamp = text.parse()?;
            Ok(Value::Timestamp(timestamp))
        });
        conversions.register(Type::I64, Type::String, |value| {
            Ok(Value::String(value.to_i64()?.to_string()))
        });
        conversions.register(Type::String, Type::I64, |value| {
            let text = value.to_string()?;
            Ok(Value::I64(text.parse::<i64>()?))
        });

        conversions
    }

    /// Registers a conversion for the ordered pair, replacing any earlier
    /// registration.
    pub fn register<F>(&mut self, from: Type, to: Type, convert: F)
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.entries.insert((from, to), Conversion::new(convert));
    }

    /// Looks up the conversion for the exact ordered pair.
    pub fn get(&self, from: Type, to: Type) -> Option<&Conversion> {
        self.entries.get(&(from, to))
    }
}
