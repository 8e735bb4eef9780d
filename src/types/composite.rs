//! Fixed-size arrays and packed structs.
//!
//! Composite types aggregate member types into one contiguous byte layout. The layout is always
//! packed: members occupy consecutive byte ranges in declaration order and the total width is
//! the exact sum (struct) or product (array) of the member widths. No padding or alignment is
//! ever inserted.
//!
//! # Key Components
//!
//! - [`ArrayType`] - `count` elements of a single element type
//! - [`StructType`] - Ordered, uniquely named fields
//! - [`StructBuilder`] - Fluent construction of a [`StructType`]
//!
//! # Examples
//!
//! ```rust
//! use bintypes::{ByteOrder, ScalarType, StructBuilder, Value};
//!
//! let header = StructBuilder::new()
//!     .field("kind", ScalarType::uint16(ByteOrder::BigEndian))
//!     .field("length", ScalarType::uint32(ByteOrder::BigEndian))
//!     .build()?;
//! assert_eq!(header.width(), 6);
//!
//! let bytes = header.pack(&[Value::from(7u16), Value::from(0x100u32)])?;
//! assert_eq!(bytes, [0x00, 0x07, 0x00, 0x00, 0x01, 0x00]);
//! assert_eq!(header.unpack(&bytes)?, vec![Value::from(7u16), Value::from(0x100u32)]);
//! # Ok::<(), bintypes::Error>(())
//! ```

use std::collections::HashSet;

use crate::{
    types::{Type, Value},
    Error::{self, ArityMismatch, LengthMismatch},
    Result,
};

/// A fixed number of elements of one type, laid out back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    element: Box<Type>,
    count: usize,
    width: usize,
}

impl ArrayType {
    /// Creates an array of `count` elements of type `element`.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedComposition`] if the total width overflows `usize`.
    pub fn new(element: impl Into<Type>, count: usize) -> Result<Self> {
        let element = element.into();
        let Some(width) = element.width().checked_mul(count) else {
            log::debug!("rejected array definition: {count} elements of {element} overflow");
            return Err(composition_error!(
                "array of {} elements of {} overflows",
                count,
                element
            ));
        };

        Ok(ArrayType {
            element: Box::new(element),
            count,
            width,
        })
    }

    /// Type of every element
    #[must_use]
    pub fn element(&self) -> &Type {
        &self.element
    }

    /// Declared number of elements
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Total width in bytes, `count` times the element width
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Packs exactly `count` element values, concatenated in order.
    ///
    /// # Errors
    /// Returns [`crate::Error::ArityMismatch`] if `values.len() != count`, or the first error
    /// raised by an element.
    pub fn pack(&self, values: &[Value]) -> Result<Vec<u8>> {
        pack_members(
            std::iter::repeat(self.element.as_ref()).take(self.count),
            self.count,
            values,
            self.width,
        )
    }

    /// Packs into `data` at `offset`, advancing the offset. `data` is untouched on failure.
    ///
    /// # Errors
    /// As [`ArrayType::pack`], plus [`crate::Error::LengthMismatch`] if `data` is too short.
    pub fn pack_into(&self, values: &[Value], data: &mut [u8], offset: &mut usize) -> Result<()> {
        copy_into(&self.pack(values)?, data, offset)
    }

    /// Unpacks exactly [`ArrayType::width`] bytes into `count` element values.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if `data.len()` differs from the width.
    pub fn unpack(&self, data: &[u8]) -> Result<Vec<Value>> {
        check_exact(data, self.width)?;
        let mut offset = 0;
        self.unpack_at(data, &mut offset)
    }

    /// Unpacks from `data` at `offset`, advancing the offset. Trailing bytes are allowed.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if fewer than [`ArrayType::width`] bytes remain.
    pub fn unpack_at(&self, data: &[u8], offset: &mut usize) -> Result<Vec<Value>> {
        unpack_members(
            std::iter::repeat(self.element.as_ref()).take(self.count),
            data,
            offset,
            self.width,
        )
    }
}

/// One named member of a [`StructType`].
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    /// Field name, unique within its struct
    pub name: String,
    /// Field type
    pub ty: Type,
    /// Byte offset of the field from the start of the struct
    pub offset: usize,
}

/// An ordered sequence of uniquely named fields with a packed layout.
///
/// Field offsets are computed once at construction; each field starts where the previous one
/// ends.
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    fields: Vec<StructField>,
    width: usize,
}

impl StructType {
    /// Creates a struct from `(name, type)` pairs in declaration order.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedComposition`] if a field name is empty or appears
    /// twice, or if the total width overflows `usize`.
    pub fn new<N: Into<String>>(fields: impl IntoIterator<Item = (N, Type)>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut members = Vec::new();
        let mut width = 0_usize;

        for (name, ty) in fields {
            let name = name.into();
            if name.is_empty() {
                log::debug!("rejected struct definition: empty field name");
                return Err(composition_error!("struct field without a name"));
            }
            if !seen.insert(name.clone()) {
                log::debug!("rejected struct definition: duplicate field '{name}'");
                return Err(composition_error!("duplicate field '{}'", name));
            }

            let offset = width;
            width = width
                .checked_add(ty.width())
                .ok_or_else(|| composition_error!("struct width overflows at field '{}'", name))?;
            members.push(StructField { name, ty, offset });
        }

        Ok(StructType {
            fields: members,
            width,
        })
    }

    /// Fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Byte offset of the named field.
    #[must_use]
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.field(name).map(|field| field.offset)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the struct has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total width in bytes, the sum of the field widths
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Packs one value per field, in declared field order.
    ///
    /// # Errors
    /// Returns [`crate::Error::ArityMismatch`] if the number of values differs from the number of
    /// fields, or the first error raised by a field.
    pub fn pack(&self, values: &[Value]) -> Result<Vec<u8>> {
        pack_members(
            self.fields.iter().map(|field| &field.ty),
            self.fields.len(),
            values,
            self.width,
        )
    }

    /// Packs into `data` at `offset`, advancing the offset. `data` is untouched on failure.
    ///
    /// # Errors
    /// As [`StructType::pack`], plus [`crate::Error::LengthMismatch`] if `data` is too short.
    pub fn pack_into(&self, values: &[Value], data: &mut [u8], offset: &mut usize) -> Result<()> {
        copy_into(&self.pack(values)?, data, offset)
    }

    /// Unpacks exactly [`StructType::width`] bytes into one value per field.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if `data.len()` differs from the width.
    pub fn unpack(&self, data: &[u8]) -> Result<Vec<Value>> {
        check_exact(data, self.width)?;
        let mut offset = 0;
        self.unpack_at(data, &mut offset)
    }

    /// Unpacks exactly [`StructType::width`] bytes, pairing each value with its field name.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if `data.len()` differs from the width.
    pub fn unpack_named(&self, data: &[u8]) -> Result<Vec<(&str, Value)>> {
        let values = self.unpack(data)?;
        Ok(self
            .fields
            .iter()
            .map(|field| field.name.as_str())
            .zip(values)
            .collect())
    }

    /// Unpacks from `data` at `offset`, advancing the offset. Trailing bytes are allowed.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if fewer than [`StructType::width`] bytes remain.
    pub fn unpack_at(&self, data: &[u8], offset: &mut usize) -> Result<Vec<Value>> {
        unpack_members(
            self.fields.iter().map(|field| &field.ty),
            data,
            offset,
            self.width,
        )
    }
}

/// Fluent builder for [`StructType`].
///
/// Errors from member definitions are held until [`StructBuilder::build`], so a chain of calls
/// never needs intermediate `?`.
///
/// # Examples
///
/// ```rust
/// use bintypes::{ByteOrder, ScalarType, StructBuilder};
///
/// let order = ByteOrder::LittleEndian;
/// let entry = StructBuilder::new()
///     .field("id", ScalarType::uint32(order))
///     .array("name", ScalarType::uint8(order), 16)
///     .field("score", ScalarType::float64(order))
///     .build()?;
/// assert_eq!(entry.width(), 28);
/// assert_eq!(entry.offset_of("score"), Some(20));
/// # Ok::<(), bintypes::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct StructBuilder {
    fields: Vec<(String, Type)>,
    error: Option<Error>,
}

impl StructBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<Type>) -> Self {
        self.fields.push((name.into(), ty.into()));
        self
    }

    /// Appends a fixed-size array field.
    #[must_use]
    pub fn array(
        mut self,
        name: impl Into<String>,
        element: impl Into<Type>,
        count: usize,
    ) -> Self {
        match ArrayType::new(element, count) {
            Ok(array) => self.fields.push((name.into(), Type::Array(array))),
            Err(error) => {
                self.error.get_or_insert(error);
            }
        }
        self
    }

    /// Builds the struct.
    ///
    /// # Errors
    /// Returns the first error recorded while adding fields, or any error from
    /// [`StructType::new`].
    pub fn build(self) -> Result<StructType> {
        if let Some(error) = self.error {
            return Err(error);
        }

        StructType::new(self.fields)
    }
}

fn pack_members<'a>(
    members: impl Iterator<Item = &'a Type>,
    expected: usize,
    values: &[Value],
    width: usize,
) -> Result<Vec<u8>> {
    if values.len() != expected {
        return Err(ArityMismatch {
            expected,
            actual: values.len(),
        });
    }

    let mut data = vec![0_u8; width];
    let mut offset = 0;
    for (member, value) in members.zip(values) {
        member.pack_into(value, &mut data, &mut offset)?;
    }

    Ok(data)
}

fn unpack_members<'a>(
    members: impl Iterator<Item = &'a Type>,
    data: &[u8],
    offset: &mut usize,
    width: usize,
) -> Result<Vec<Value>> {
    let remaining = data.len().saturating_sub(*offset);
    if remaining < width {
        return Err(LengthMismatch {
            expected: width,
            actual: remaining,
        });
    }

    let mut cursor = *offset;
    let values = members
        .map(|member| member.unpack_at(data, &mut cursor))
        .collect::<Result<Vec<_>>>()?;

    *offset = cursor;
    Ok(values)
}

fn check_exact(data: &[u8], width: usize) -> Result<()> {
    if data.len() != width {
        return Err(LengthMismatch {
            expected: width,
            actual: data.len(),
        });
    }

    Ok(())
}

fn copy_into(bytes: &[u8], data: &mut [u8], offset: &mut usize) -> Result<()> {
    let remaining = data.len().saturating_sub(*offset);
    if remaining < bytes.len() {
        return Err(LengthMismatch {
            expected: bytes.len(),
            actual: remaining,
        });
    }

    data[*offset..*offset + bytes.len()].copy_from_slice(bytes);
    *offset += bytes.len();
    Ok(())
}
