#[macro_use]
mod error;
pub use error::{Error, IntoError};

pub mod shape;
pub use shape::{Field, Mapped, Shape, ShapeBuilder, ShapeId};

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

/// A Result type alias that uses remap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
