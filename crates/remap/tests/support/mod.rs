#![allow(dead_code)]

use remap::{bail, Mapped, Result, Shape, Type, Value};

use std::any::Any;
use std::sync::OnceLock;

/// A source shape with capitalized field names, to exercise the
/// case-insensitive default convention.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub age: i64,
}

impl Mapped for User {
    fn shape() -> &'static Shape {
        static SHAPE: OnceLock<Shape> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::builder::<User>("User")
                .field("Name", Type::String)
                .field("Age", Type::I64)
                .constructible::<User>()
                .build()
        })
    }

    fn instance_shape(&self) -> &'static Shape {
        Self::shape()
    }

    fn read(&self, field: &str) -> Result<Value> {
        match field {
            "Name" => Ok(self.name.clone().into()),
            "Age" => Ok(self.age.into()),
            _ => bail!("unknown field `{field}`"),
        }
    }

    fn write(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "Name" => self.name = value.try_into()?,
            "Age" => self.age = value.try_into()?,
            _ => bail!("unknown field `{field}`"),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserDto {
    pub name: String,
    pub age: i64,
}

impl Mapped for UserDto {
    fn shape() -> &'static Shape {
        static SHAPE: OnceLock<Shape> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::builder::<UserDto>("UserDto")
                .field("name", Type::String)
                .field("age", Type::I64)
                .constructible::<UserDto>()
                .build()
        })
    }

    fn instance_shape(&self) -> &'static Shape {
        Self::shape()
    }

    fn read(&self, field: &str) -> Result<Value> {
        match field {
            "name" => Ok(self.name.clone().into()),
            "age" => Ok(self.age.into()),
            _ => bail!("unknown field `{field}`"),
        }
    }

    fn write(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "name" => self.name = value.try_into()?,
            "age" => self.age = value.try_into()?,
            _ => bail!("unknown field `{field}`"),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Assignable to [`User`]: carries the same `Name`/`Age` fields plus one of
/// its own.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AdminUser {
    pub name: String,
    pub age: i64,
    pub role: String,
}

impl Mapped for AdminUser {
    fn shape() -> &'static Shape {
        static SHAPE: OnceLock<Shape> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::builder::<AdminUser>("AdminUser")
                .field("Name", Type::String)
                .field("Age", Type::I64)
                .field("Role", Type::String)
                .constructible::<AdminUser>()
                .build()
        })
    }

    fn instance_shape(&self) -> &'static Shape {
        Self::shape()
    }

    fn read(&self, field: &str) -> Result<Value> {
        match field {
            "Name" => Ok(self.name.clone().into()),
            "Age" => Ok(self.age.into()),
            "Role" => Ok(self.role.clone().into()),
            _ => bail!("unknown field `{field}`"),
        }
    }

    fn write(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "Name" => self.name = value.try_into()?,
            "Age" => self.age = value.try_into()?,
            "Role" => self.role = value.try_into()?,
            _ => bail!("unknown field `{field}`"),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A destination [`UserDto`] is assignable to: same `name`/`age` fields.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserView {
    pub name: String,
    pub age: i64,
}

impl Mapped for UserView {
    fn shape() -> &'static Shape {
        static SHAPE: OnceLock<Shape> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::builder::<UserView>("UserView")
                .field("name", Type::String)
                .field("age", Type::I64)
                .constructible::<UserView>()
                .build()
        })
    }

    fn instance_shape(&self) -> &'static Shape {
        Self::shape()
    }

    fn read(&self, field: &str) -> Result<Value> {
        match field {
            "name" => Ok(self.name.clone().into()),
            "age" => Ok(self.age.into()),
            _ => bail!("unknown field `{field}`"),
        }
    }

    fn write(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "name" => self.name = value.try_into()?,
            "age" => self.age = value.try_into()?,
            _ => bail!("unknown field `{field}`"),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

pub fn user() -> User {
    User {
        name: "Ann".to_string(),
        age: 30,
    }
}
