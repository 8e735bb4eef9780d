//! Low-level byte order aware reading and writing of Rust primitives.
//!
//! This module is the foundation under every scalar type in the crate. It provides bounds-checked
//! reads and writes of fixed-width integers and IEEE-754 floats at an offset within a byte
//! buffer, in either byte order, with the offset advanced on success and left untouched on
//! failure.
//!
//! # Key Components
//!
//! - [`crate::io::ByteIO`] - Trait implemented for every primitive that can be encoded
//! - [`crate::io::read_at`] / [`crate::io::write_at`] - Offset-tracking access in a given order
//! - [`crate::io::read`] / [`crate::io::write`] - Access from the start of a buffer
//!
//! ## Supported Types
//! - **Unsigned integers**: `u8`, `u16`, `u32`, `u64`
//! - **Signed integers**: `i8`, `i16`, `i32`, `i64`
//! - **Floating point**: `f32`, `f64`
//!
//! # Examples
//!
//! ```rust
//! use bintypes::{io::{read_at, write_at}, ByteOrder};
//!
//! let mut data = [0u8; 6];
//! let mut offset = 0;
//! write_at(&mut data, &mut offset, 0x0102u16, ByteOrder::BigEndian)?;
//! write_at(&mut data, &mut offset, 0x03040506u32, ByteOrder::LittleEndian)?;
//! assert_eq!(data, [0x01, 0x02, 0x06, 0x05, 0x04, 0x03]);
//!
//! offset = 0;
//! let first: u16 = read_at(&data, &mut offset, ByteOrder::BigEndian)?;
//! let second: u32 = read_at(&data, &mut offset, ByteOrder::LittleEndian)?;
//! assert_eq!((first, second), (0x0102, 0x03040506));
//! # Ok::<(), bintypes::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All functions return [`crate::Error::LengthMismatch`] when fewer bytes remain than the
//! primitive needs. `expected` is the primitive's width, `actual` the bytes remaining.
//!
//! # Thread Safety
//!
//! All functions are pure and operate only on the buffers passed in.

use crate::{types::ByteOrder, Error::LengthMismatch, Result};

/// Trait for primitives with a fixed-width byte encoding in both byte orders.
///
/// Each implementation names the byte array that holds its encoding through the `Bytes`
/// associated type (e.g. `[u8; 4]` for `u32`), and converts to and from it in either order.
pub trait ByteIO: Sized + Copy {
    /// Byte array type holding the encoding of this primitive.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Decode from little-endian bytes
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Decode from big-endian bytes
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Encode to little-endian bytes
    fn to_le_bytes(self) -> Self::Bytes;
    /// Encode to big-endian bytes
    fn to_be_bytes(self) -> Self::Bytes;

    /// Decode in the given byte order
    fn from_bytes(bytes: Self::Bytes, order: ByteOrder) -> Self {
        match order {
            ByteOrder::BigEndian => Self::from_be_bytes(bytes),
            ByteOrder::LittleEndian => Self::from_le_bytes(bytes),
        }
    }

    /// Encode in the given byte order
    fn to_bytes(self, order: ByteOrder) -> Self::Bytes {
        match order {
            ByteOrder::BigEndian => self.to_be_bytes(),
            ByteOrder::LittleEndian => self.to_le_bytes(),
        }
    }
}

macro_rules! impl_byte_io {
    ($($ty:ty => $len:literal),* $(,)?) => {
        $(
            impl ByteIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_byte_io! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
}

/// Reads a value of type `T` in the given byte order from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::LengthMismatch`] if `data` is shorter than `T`.
pub fn read<T: ByteIO>(data: &[u8], order: ByteOrder) -> Result<T> {
    let mut offset = 0_usize;
    read_at(data, &mut offset, order)
}

/// Reads a value of type `T` in the given byte order at `offset`, advancing the offset.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Position to read at; advanced by the width of `T` on success
/// * `order` - Byte order of the encoded value
///
/// # Errors
/// Returns [`crate::Error::LengthMismatch`] if fewer than `size_of::<T>()` bytes remain.
///
/// # Examples
///
/// ```rust
/// use bintypes::{io::read_at, ByteOrder};
///
/// let data = [0x01, 0x00, 0x02, 0x00];
/// let mut offset = 0;
/// let first: u16 = read_at(&data, &mut offset, ByteOrder::LittleEndian)?;
/// let second: u16 = read_at(&data, &mut offset, ByteOrder::LittleEndian)?;
/// assert_eq!((first, second, offset), (1, 2, 4));
/// # Ok::<(), bintypes::Error>(())
/// ```
pub fn read_at<T: ByteIO>(data: &[u8], offset: &mut usize, order: ByteOrder) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let remaining = data.len().saturating_sub(*offset);
    if type_len > remaining {
        return Err(LengthMismatch {
            expected: type_len,
            actual: remaining,
        });
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(LengthMismatch {
            expected: type_len,
            actual: remaining,
        });
    };

    *offset += type_len;

    Ok(T::from_bytes(read, order))
}

/// Writes `value` in the given byte order to the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::LengthMismatch`] if `data` is shorter than `T`.
pub fn write<T: ByteIO>(data: &mut [u8], value: T, order: ByteOrder) -> Result<()> {
    let mut offset = 0_usize;
    write_at(data, &mut offset, value, order)
}

/// Writes `value` in the given byte order at `offset`, advancing the offset.
///
/// Nothing is written when the buffer is too small.
///
/// # Errors
/// Returns [`crate::Error::LengthMismatch`] if fewer than `size_of::<T>()` bytes remain.
pub fn write_at<T: ByteIO>(
    data: &mut [u8],
    offset: &mut usize,
    value: T,
    order: ByteOrder,
) -> Result<()> {
    let type_len = std::mem::size_of::<T>();
    let remaining = data.len().saturating_sub(*offset);
    if type_len > remaining {
        return Err(LengthMismatch {
            expected: type_len,
            actual: remaining,
        });
    }

    let bytes = value.to_bytes(order);
    data[*offset..*offset + type_len].copy_from_slice(bytes.as_ref());
    *offset += type_len;

    Ok(())
}
