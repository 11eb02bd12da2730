mod field;
pub use field::Field;

use crate::{Error, Result, Type, Value};

use std::any::{Any, TypeId};

/// Uniquely identifies a shape by the Rust type it describes.
///
/// Shape identity is nominal, never structural: two shapes compare equal
/// only when they describe the same type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShapeId(TypeId);

impl ShapeId {
    pub fn of<T: 'static>() -> ShapeId {
        ShapeId(TypeId::of::<T>())
    }
}

/// The field-level description of a data type.
///
/// Rust has no runtime field reflection, so every mapped type registers an
/// explicit descriptor once, built with [`Shape::builder`] and cached behind
/// a `OnceLock` in its [`Mapped::shape`] implementation.
#[derive(Debug)]
pub struct Shape {
    name: &'static str,
    id: ShapeId,
    fields: Vec<Field>,
    new_instance: Option<fn() -> Box<dyn Mapped>>,
}

impl Shape {
    /// Starts describing the fields of `T`.
    pub fn builder<T: 'static>(name: &'static str) -> ShapeBuilder {
        ShapeBuilder {
            name,
            id: ShapeId::of::<T>(),
            fields: Vec::new(),
            new_instance: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Finds a field by exact name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Constructs a fresh instance using the shape's registered
    /// constructor. This is the default activation path; shapes without a
    /// constructor require a custom activator on their plan.
    pub fn new_instance(&self) -> Result<Box<dyn Mapped>> {
        match self.new_instance {
            Some(new_instance) => Ok(new_instance()),
            None => Err(Error::configuration(format!(
                "shape `{}` is not constructible and its plan declares no activator",
                self.name
            ))),
        }
    }
}

/// Builds a [`Shape`] descriptor.
pub struct ShapeBuilder {
    name: &'static str,
    id: ShapeId,
    fields: Vec<Field>,
    new_instance: Option<fn() -> Box<dyn Mapped>>,
}

impl ShapeBuilder {
    /// Declares a readable, writable field.
    pub fn field(self, name: &'static str, ty: Type) -> Self {
        self.field_with(name, ty, true, true)
    }

    /// Declares a field that can be read but not written.
    pub fn read_only(self, name: &'static str, ty: Type) -> Self {
        self.field_with(name, ty, true, false)
    }

    /// Declares a field that can be written but not read.
    pub fn write_only(self, name: &'static str, ty: Type) -> Self {
        self.field_with(name, ty, false, true)
    }

    fn field_with(mut self, name: &'static str, ty: Type, readable: bool, writable: bool) -> Self {
        self.fields.push(Field {
            name,
            ty,
            readable,
            writable,
        });
        self
    }

    /// Registers a default constructor, making the shape usable with the
    /// default activator.
    pub fn constructible<T: Mapped + Default>(mut self) -> Self {
        self.new_instance = Some(|| Box::new(T::default()));
        self
    }

    pub fn build(self) -> Shape {
        Shape {
            name: self.name,
            id: self.id,
            fields: self.fields,
            new_instance: self.new_instance,
        }
    }
}

/// Uniform field access over a mapped instance.
///
/// Field access is by name so a compiled plan remains valid across
/// assignability-related shapes sharing it.
pub trait Mapped: Any + Send {
    /// The shape describing `Self`.
    fn shape() -> &'static Shape
    where
        Self: Sized;

    /// The shape describing this instance's concrete type.
    fn instance_shape(&self) -> &'static Shape;

    /// Reads the named field's value.
    fn read(&self, field: &str) -> Result<Value>;

    /// Writes the named field's value.
    fn write(&mut self, field: &str, value: Value) -> Result<()>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl std::fmt::Debug for dyn Mapped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapped")
            .field("shape", &self.instance_shape().name())
            .finish()
    }
}
