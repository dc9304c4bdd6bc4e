use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Instruction shape. Each shape owns an opcode tag and a field layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Shape {
    /// `@value`
    Address,
    /// `dest=comp;jump`
    Compute,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Opcode,
    Value,
    Comp,
    Dest,
    Jump,
}

/// Ordered (field, width) list, most significant field first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format(pub Vec<(Field, usize)>);

impl Format {
    pub fn width(&self) -> usize {
        self.0.iter().map(|(_, width)| width).sum()
    }

    pub fn field(&self, field: Field) -> Option<usize> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, width)| *width)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, usize)> {
        self.0.iter()
    }
}

#[test]
fn test() {
    let format = Format(vec![(Field::Opcode, 1), (Field::Value, 15)]);
    assert_eq!(format.width(), 16);
    assert_eq!(format.field(Field::Value), Some(15));
    assert_eq!(format.field(Field::Jump), None);
    assert_eq!(Shape::Compute.to_string(), "compute");
    assert_eq!("address".parse::<Shape>().unwrap(), Shape::Address);
}
