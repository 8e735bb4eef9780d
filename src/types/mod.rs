//! Scalar and composite binary types.
//!
//! This module holds the leaf of the type system, [`ScalarType`], and the aggregates built from
//! it, [`ArrayType`] and [`StructType`]. [`Type`] unifies all three so that composites can nest,
//! and [`Value`] is the dynamic value every type packs from and unpacks to.
//!
//! # Key Components
//!
//! - [`ByteOrder`] - Big- or little-endian, fixed per scalar type
//! - [`ScalarType`] / [`ScalarKind`] - Fixed-width signed, unsigned and float encodings
//! - [`ArrayType`] / [`StructType`] / [`StructBuilder`] - Packed aggregates
//! - [`Type`] - Any of the above
//! - [`Value`] - Decoded or to-be-encoded data
//!
//! # Thread Safety
//!
//! All types in this module are immutable after construction and are `Send + Sync`.

mod composite;
mod order;
mod scalar;
mod value;

use std::fmt;

pub use composite::{ArrayType, StructBuilder, StructField, StructType};
pub use order::ByteOrder;
pub use scalar::{ScalarKind, ScalarType};
pub use value::Value;

use crate::{Error::TypeMismatch, Result};

/// Any type known to the type system.
///
/// Scalars pack from and unpack to [`Value::Int`] / [`Value::Float`]; arrays and structs pack
/// from and unpack to a [`Value::List`] with one entry per member.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// A single fixed-width value
    Scalar(ScalarType),
    /// A fixed-size array
    Array(ArrayType),
    /// A packed struct
    Struct(StructType),
}

impl Type {
    /// Total width in bytes
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Type::Scalar(scalar) => scalar.width(),
            Type::Array(array) => array.width(),
            Type::Struct(structure) => structure.width(),
        }
    }

    /// Returns the scalar type if this is a [`Type::Scalar`].
    #[must_use]
    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            Type::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    /// Packs `value` into exactly [`Type::width`] bytes.
    ///
    /// # Errors
    /// Any error of the underlying scalar or composite, or [`crate::Error::TypeMismatch`] if the
    /// value's shape does not match the type.
    pub fn pack(&self, value: &Value) -> Result<Vec<u8>> {
        match self {
            Type::Scalar(scalar) => scalar.pack(value),
            Type::Array(array) => array.pack(list(value)?),
            Type::Struct(structure) => structure.pack(list(value)?),
        }
    }

    /// Packs `value` into `data` at `offset`, advancing the offset.
    ///
    /// # Errors
    /// As [`Type::pack`], plus [`crate::Error::LengthMismatch`] if `data` is too short.
    pub fn pack_into(&self, value: &Value, data: &mut [u8], offset: &mut usize) -> Result<()> {
        match self {
            Type::Scalar(scalar) => scalar.pack_into(value, data, offset),
            Type::Array(array) => array.pack_into(list(value)?, data, offset),
            Type::Struct(structure) => structure.pack_into(list(value)?, data, offset),
        }
    }

    /// Unpacks exactly [`Type::width`] bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if `data.len()` differs from the width.
    pub fn unpack(&self, data: &[u8]) -> Result<Value> {
        match self {
            Type::Scalar(scalar) => scalar.unpack(data),
            Type::Array(array) => array.unpack(data).map(Value::List),
            Type::Struct(structure) => structure.unpack(data).map(Value::List),
        }
    }

    /// Unpacks from `data` at `offset`, advancing the offset.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if fewer than [`Type::width`] bytes remain.
    pub fn unpack_at(&self, data: &[u8], offset: &mut usize) -> Result<Value> {
        match self {
            Type::Scalar(scalar) => scalar.unpack_at(data, offset),
            Type::Array(array) => array.unpack_at(data, offset).map(Value::List),
            Type::Struct(structure) => structure.unpack_at(data, offset).map(Value::List),
        }
    }
}

fn list(value: &Value) -> Result<&[Value]> {
    value.as_list().ok_or(TypeMismatch { expected: "list" })
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Scalar(scalar) => write!(f, "{scalar}"),
            Type::Array(array) => write!(f, "[{}; {}]", array.element(), array.count()),
            Type::Struct(structure) => {
                write!(f, "struct {{")?;
                for (index, field) in structure.fields().iter().enumerate() {
                    let separator = if index == 0 { " " } else { ", " };
                    write!(f, "{separator}{}: {}", field.name, field.ty)?;
                }
                write!(f, " }}")
            }
        }
    }
}

impl From<ScalarType> for Type {
    fn from(scalar: ScalarType) -> Self {
        Type::Scalar(scalar)
    }
}

impl From<ArrayType> for Type {
    fn from(array: ArrayType) -> Self {
        Type::Array(array)
    }
}

impl From<StructType> for Type {
    fn from(structure: StructType) -> Self {
        Type::Struct(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch() {
        let scalar = Type::from(ScalarType::uint8(ByteOrder::BigEndian));
        assert_eq!(
            scalar.pack(&Value::List(vec![Value::from(1u8)])),
            Err(TypeMismatch { expected: "scalar" })
        );

        let array = Type::from(ArrayType::new(ScalarType::uint8(ByteOrder::BigEndian), 1).unwrap());
        assert_eq!(
            array.pack(&Value::from(1u8)),
            Err(TypeMismatch { expected: "list" })
        );
        assert_eq!(
            array.pack(&Value::List(vec![Value::from(1u8)])).unwrap(),
            [0x01]
        );
    }

    #[test]
    fn display() {
        let order = ByteOrder::LittleEndian;
        let entry = StructBuilder::new()
            .field("id", ScalarType::uint16(order))
            .array("tag", ScalarType::uint8(order), 2)
            .build()
            .unwrap();
        assert_eq!(
            Type::from(entry).to_string(),
            "struct { id: uint16 (little-endian), tag: [uint8 (little-endian); 2] }"
        );
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Type>();
        assert_send_sync::<Value>();
    }
}
