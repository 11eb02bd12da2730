mod config;
pub use config::{DefaultActivator, MapBuilder, MapperBuilder, MapperConfig, MapperDefinition};

pub mod convention;
pub use convention::{Convention, NameMatch};

mod convert;
pub use convert::{Conversion, Conversions};

mod mapper;
pub use mapper::{configure, current, map_from, map_many, map_onto, map_to, Mapper};

mod plan;
pub use plan::{FieldLookup, Plan};

mod registry;

pub use remap_core::{
    bail, err, Error, Field, IntoError, Mapped, Result, Shape, ShapeBuilder, ShapeId, Type, Value,
};
