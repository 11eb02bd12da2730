use remap::{bail, Mapped, Mapper, Result, Shape, Type, Value};

use std::any::Any;
use std::sync::OnceLock;

#[derive(Debug, Default, Clone, PartialEq)]
struct Contact {
    nickname: String,
    email: String,
    age: i64,
}

impl Mapped for Contact {
    fn shape() -> &'static Shape {
        static SHAPE: OnceLock<Shape> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::builder::<Contact>("Contact")
                .field("nickname", Type::String)
                .field("email", Type::String)
                .field("age", Type::I64)
                .constructible::<Contact>()
                .build()
        })
    }

    fn instance_shape(&self) -> &'static Shape {
        Self::shape()
    }

    fn read(&self, field: &str) -> Result<Value> {
        match field {
            "nickname" => Ok(self.nickname.clone().into()),
            "email" => Ok(self.email.clone().into()),
            "age" => Ok(self.age.into()),
            _ => bail!("unknown field `{field}`"),
        }
    }

    fn write(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "nickname" => self.nickname = value.try_into()?,
            "email" => self.email = value.try_into()?,
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

#[derive(Debug, Default, Clone, PartialEq)]
struct ContactDto {
    nickname: String,
    email: String,
    age: i64,
}

impl Mapped for ContactDto {
    fn shape() -> &'static Shape {
        static SHAPE: OnceLock<Shape> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::builder::<ContactDto>("ContactDto")
                .field("nickname", Type::String)
                .field("email", Type::String)
                .field("age", Type::I64)
                .constructible::<ContactDto>()
                .build()
        })
    }

    fn instance_shape(&self) -> &'static Shape {
        Self::shape()
    }

    fn read(&self, field: &str) -> Result<Value> {
        match field {
            "nickname" => Ok(self.nickname.clone().into()),
            "email" => Ok(self.email.clone().into()),
            "age" => Ok(self.age.into()),
            _ => bail!("unknown field `{field}`"),
        }
    }

    fn write(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "nickname" => self.nickname = value.try_into()?,
            "email" => self.email = value.try_into()?,
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

fn contact() -> Contact {
    Contact {
        nickname: "ann".to_string(),
        email: "ann@example.com".to_string(),
        age: 30,
    }
}

// ---------------------------------------------------------------------------
// Type-name-based exclusion
// ---------------------------------------------------------------------------

// Ignoring is by the destination field's declared *type name*, not the
// field's identifier. Excluding `String` to drop `email` also drops the
// sibling `nickname`, which shares the type.
#[test]
fn ignoring_a_type_name_excludes_every_sibling_field() {
    let mut builder = Mapper::builder();
    builder
        .create_map::<Contact, ContactDto>()
        .ignore_type("String");
    let mapper = builder.build().unwrap();

    let plan = mapper.resolve::<Contact, ContactDto>().unwrap();
    assert_eq!(plan.lookups().len(), 1);
    assert_eq!(plan.lookups()[0].destination.name, "age");

    let dto: ContactDto = mapper.map_to(Some(&contact())).unwrap().unwrap();
    assert_eq!(dto.nickname, "");
    assert_eq!(dto.email, "");
    assert_eq!(dto.age, 30);
}

#[test]
fn keep_type_removes_the_exclusion() {
    let mut builder = Mapper::builder();
    builder
        .create_map::<Contact, ContactDto>()
        .ignore_type("String")
        .keep_type("String");
    let mapper = builder.build().unwrap();

    let plan = mapper.resolve::<Contact, ContactDto>().unwrap();
    assert_eq!(plan.lookups().len(), 3);
}

#[test]
fn ignoring_an_unused_type_changes_nothing() {
    let mut builder = Mapper::builder();
    builder
        .create_map::<Contact, ContactDto>()
        .ignore_type("Timestamp");
    let mapper = builder.build().unwrap();

    let plan = mapper.resolve::<Contact, ContactDto>().unwrap();
    assert_eq!(plan.lookups().len(), 3);
}
