//! Fixed-width scalar encodings.
//!
//! A [`ScalarType`] is fully described by three fields: its [`ScalarKind`], its width in bytes
//! and its [`ByteOrder`]. Packing and unpacking derive entirely from those fields, using the
//! primitives in [`crate::io`].
//!
//! # Value Rules
//!
//! - Integer kinds accept only [`Value::Int`]. A [`Value::Float`] is rejected with
//!   [`crate::Error::NotIntegral`], whether or not it has a fractional part.
//! - Integer values outside `[min_value, max_value]` are rejected with
//!   [`crate::Error::ValueOutOfRange`].
//! - Float kinds accept both [`Value::Int`] and [`Value::Float`]. NaN payloads, signed zeros and
//!   infinities are carried bit-exactly. A finite value too large for `float32` is rejected
//!   with [`crate::Error::ValueOutOfRange`] instead of saturating to infinity.
//! - A [`Value::List`] is never a scalar and is rejected with [`crate::Error::TypeMismatch`].

use std::fmt;

use strum::{Display, EnumIter};

use crate::{
    io::{read_at, write_at},
    types::{ByteOrder, Value},
    Error::{LengthMismatch, NotIntegral, TypeMismatch, ValueOutOfRange},
    Result,
};

/// Numeric family of a scalar encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ScalarKind {
    /// Two's complement signed integer
    #[strum(to_string = "signed-int")]
    Signed,
    /// Unsigned integer
    #[strum(to_string = "unsigned-int")]
    Unsigned,
    /// IEEE-754 binary floating point
    #[strum(to_string = "float")]
    Float,
}

impl ScalarKind {
    /// Returns `true` if `width` is a canonical size for this kind.
    ///
    /// Integers exist at 1, 2, 4 and 8 bytes; floats only at 4 and 8.
    #[must_use]
    pub const fn supports_width(self, width: usize) -> bool {
        match self {
            ScalarKind::Signed | ScalarKind::Unsigned => matches!(width, 1 | 2 | 4 | 8),
            ScalarKind::Float => matches!(width, 4 | 8),
        }
    }
}

/// A single fixed-width numeric encoding bound to one byte order.
///
/// `ScalarType` is an immutable `Copy` value. Instances for the canonical names are vended by the
/// byte-order base tables and the architecture registries; arbitrary ones can be built with
/// [`ScalarType::new`].
///
/// # Examples
///
/// ```rust
/// use bintypes::{ByteOrder, ScalarType, Value};
///
/// let be = ScalarType::uint32(ByteOrder::BigEndian);
/// assert_eq!(be.pack(&Value::from(0x01020304u32))?, [0x01, 0x02, 0x03, 0x04]);
///
/// let le = be.with_order(ByteOrder::LittleEndian);
/// assert_eq!(le.unpack(&[0x04, 0x03, 0x02, 0x01])?, Value::from(0x01020304u32));
/// # Ok::<(), bintypes::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarType {
    kind: ScalarKind,
    width: usize,
    order: ByteOrder,
}

impl ScalarType {
    /// Creates a scalar type, validating that `width` is canonical for `kind`.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedComposition`] for widths other than 1, 2, 4, 8, or
    /// for float kinds at widths other than 4 and 8.
    pub fn new(kind: ScalarKind, width: usize, order: ByteOrder) -> Result<Self> {
        if !kind.supports_width(width) {
            return Err(composition_error!("{} scalar of width {}", kind, width));
        }

        Ok(Self::raw(kind, width, order))
    }

    const fn raw(kind: ScalarKind, width: usize, order: ByteOrder) -> Self {
        ScalarType { kind, width, order }
    }

    /// Signed 8-bit integer
    #[must_use]
    pub const fn int8(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Signed, 1, order)
    }

    /// Signed 16-bit integer
    #[must_use]
    pub const fn int16(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Signed, 2, order)
    }

    /// Signed 32-bit integer
    #[must_use]
    pub const fn int32(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Signed, 4, order)
    }

    /// Signed 64-bit integer
    #[must_use]
    pub const fn int64(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Signed, 8, order)
    }

    /// Unsigned 8-bit integer
    #[must_use]
    pub const fn uint8(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Unsigned, 1, order)
    }

    /// Unsigned 16-bit integer
    #[must_use]
    pub const fn uint16(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Unsigned, 2, order)
    }

    /// Unsigned 32-bit integer
    #[must_use]
    pub const fn uint32(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Unsigned, 4, order)
    }

    /// Unsigned 64-bit integer
    #[must_use]
    pub const fn uint64(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Unsigned, 8, order)
    }

    /// IEEE-754 binary32
    #[must_use]
    pub const fn float32(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Float, 4, order)
    }

    /// IEEE-754 binary64
    #[must_use]
    pub const fn float64(order: ByteOrder) -> Self {
        Self::raw(ScalarKind::Float, 8, order)
    }

    /// The same kind and width in another byte order.
    #[must_use]
    pub const fn with_order(self, order: ByteOrder) -> Self {
        Self::raw(self.kind, self.width, order)
    }

    /// Numeric family of this type
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Width of the encoding in bytes
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Byte order of the encoding
    #[must_use]
    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    /// Returns `true` for signed and unsigned integer kinds
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        !matches!(self.kind, ScalarKind::Float)
    }

    /// Smallest representable integer, `None` for float kinds.
    #[must_use]
    pub fn min_value(&self) -> Option<i128> {
        match self.kind {
            ScalarKind::Signed => Some(-(1_i128 << (self.width * 8 - 1))),
            ScalarKind::Unsigned => Some(0),
            ScalarKind::Float => None,
        }
    }

    /// Largest representable integer, `None` for float kinds.
    #[must_use]
    pub fn max_value(&self) -> Option<i128> {
        match self.kind {
            ScalarKind::Signed => Some((1_i128 << (self.width * 8 - 1)) - 1),
            ScalarKind::Unsigned => Some((1_i128 << (self.width * 8)) - 1),
            ScalarKind::Float => None,
        }
    }

    /// Encodes `value` into exactly [`ScalarType::width`] bytes.
    ///
    /// # Errors
    /// - [`crate::Error::ValueOutOfRange`] if the value does not fit
    /// - [`crate::Error::NotIntegral`] if a float is given to an integer kind
    /// - [`crate::Error::TypeMismatch`] if a list is given
    pub fn pack(&self, value: &Value) -> Result<Vec<u8>> {
        let mut data = vec![0_u8; self.width];
        let mut offset = 0;
        self.pack_into(value, &mut data, &mut offset)?;
        Ok(data)
    }

    /// Encodes `value` into `data` at `offset`, advancing the offset by the width.
    ///
    /// The value is validated before anything is written, so `data` is untouched on failure.
    ///
    /// # Errors
    /// As [`ScalarType::pack`], plus [`crate::Error::LengthMismatch`] if fewer than
    /// [`ScalarType::width`] bytes remain after `offset`.
    pub fn pack_into(&self, value: &Value, data: &mut [u8], offset: &mut usize) -> Result<()> {
        let order = self.order;
        match self.kind {
            ScalarKind::Signed | ScalarKind::Unsigned => {
                let integer = match value {
                    Value::Int(integer) => *integer,
                    Value::Float(_) => {
                        return Err(NotIntegral {
                            kind: self.kind,
                            width: self.width,
                        })
                    }
                    Value::List(_) => return Err(TypeMismatch { expected: "scalar" }),
                };

                match (self.kind, self.width) {
                    (ScalarKind::Signed, 1) => {
                        write_at(data, offset, self.narrow::<i8>(integer)?, order)
                    }
                    (ScalarKind::Signed, 2) => {
                        write_at(data, offset, self.narrow::<i16>(integer)?, order)
                    }
                    (ScalarKind::Signed, 4) => {
                        write_at(data, offset, self.narrow::<i32>(integer)?, order)
                    }
                    (ScalarKind::Signed, _) => {
                        write_at(data, offset, self.narrow::<i64>(integer)?, order)
                    }
                    (_, 1) => {
                        write_at(data, offset, self.narrow::<u8>(integer)?, order)
                    }
                    (_, 2) => {
                        write_at(data, offset, self.narrow::<u16>(integer)?, order)
                    }
                    (_, 4) => {
                        write_at(data, offset, self.narrow::<u32>(integer)?, order)
                    }
                    (_, _) => {
                        write_at(data, offset, self.narrow::<u64>(integer)?, order)
                    }
                }
            }
            ScalarKind::Float => {
                if self.width == 4 {
                    let single = match value {
                        #[allow(clippy::cast_precision_loss)]
                        Value::Int(integer) => *integer as f32,
                        Value::Float(double) => {
                            let single = narrow_f64(*double);
                            if double.is_finite() && single.is_infinite() {
                                return Err(ValueOutOfRange {
                                    value: value.to_string(),
                                    kind: self.kind,
                                    width: self.width,
                                });
                            }
                            single
                        }
                        Value::List(_) => return Err(TypeMismatch { expected: "scalar" }),
                    };
                    write_at(data, offset, single, order)
                } else {
                    let double = match value {
                        #[allow(clippy::cast_precision_loss)]
                        Value::Int(integer) => *integer as f64,
                        Value::Float(double) => *double,
                        Value::List(_) => return Err(TypeMismatch { expected: "scalar" }),
                    };
                    write_at(data, offset, double, order)
                }
            }
        }
    }

    fn narrow<T: TryFrom<i128>>(&self, integer: i128) -> Result<T> {
        T::try_from(integer).map_err(|_| ValueOutOfRange {
            value: integer.to_string(),
            kind: self.kind,
            width: self.width,
        })
    }

    /// Decodes a value from exactly [`ScalarType::width`] bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if `data.len()` is not the width.
    pub fn unpack(&self, data: &[u8]) -> Result<Value> {
        if data.len() != self.width {
            return Err(LengthMismatch {
                expected: self.width,
                actual: data.len(),
            });
        }

        let mut offset = 0;
        self.unpack_at(data, &mut offset)
    }

    /// Decodes a value from `data` at `offset`, advancing the offset by the width.
    ///
    /// Unlike [`ScalarType::unpack`], trailing bytes after the value are allowed.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if fewer than [`ScalarType::width`] bytes remain.
    pub fn unpack_at(&self, data: &[u8], offset: &mut usize) -> Result<Value> {
        let order = self.order;
        let value = match (self.kind, self.width) {
            (ScalarKind::Signed, 1) => Value::from(read_at::<i8>(data, offset, order)?),
            (ScalarKind::Signed, 2) => Value::from(read_at::<i16>(data, offset, order)?),
            (ScalarKind::Signed, 4) => Value::from(read_at::<i32>(data, offset, order)?),
            (ScalarKind::Signed, _) => Value::from(read_at::<i64>(data, offset, order)?),
            (ScalarKind::Unsigned, 1) => Value::from(read_at::<u8>(data, offset, order)?),
            (ScalarKind::Unsigned, 2) => Value::from(read_at::<u16>(data, offset, order)?),
            (ScalarKind::Unsigned, 4) => Value::from(read_at::<u32>(data, offset, order)?),
            (ScalarKind::Unsigned, _) => Value::from(read_at::<u64>(data, offset, order)?),
            (ScalarKind::Float, 4) => {
                Value::Float(widen_f32(read_at::<f32>(data, offset, order)?))
            }
            (ScalarKind::Float, _) => Value::Float(read_at::<f64>(data, offset, order)?),
        };

        Ok(value)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ScalarKind::Signed => "int",
            ScalarKind::Unsigned => "uint",
            ScalarKind::Float => "float",
        };
        write!(f, "{}{} ({})", prefix, self.width * 8, self.order)
    }
}

// The hardware conversions between binary32 and binary64 may quiet signalling NaNs. The payload
// is moved by hand so that a float32 NaN survives a trip through `Value::Float` bit for bit.
const F32_MANTISSA_BITS: u32 = 23;
const F64_MANTISSA_BITS: u32 = 52;
const NAN_PAYLOAD_SHIFT: u32 = F64_MANTISSA_BITS - F32_MANTISSA_BITS;

fn widen_f32(single: f32) -> f64 {
    if !single.is_nan() {
        return f64::from(single);
    }

    let bits = single.to_bits();
    let sign = u64::from(bits >> 31) << 63;
    let mantissa = u64::from(bits & ((1 << F32_MANTISSA_BITS) - 1)) << NAN_PAYLOAD_SHIFT;
    f64::from_bits(sign | (0x7FF_u64 << F64_MANTISSA_BITS) | mantissa)
}

fn narrow_f64(double: f64) -> f32 {
    if !double.is_nan() {
        return double as f32;
    }

    let bits = double.to_bits();
    #[allow(clippy::cast_possible_truncation)]
    let sign = ((bits >> 63) as u32) << 31;
    #[allow(clippy::cast_possible_truncation)]
    let mut mantissa = ((bits & ((1 << F64_MANTISSA_BITS) - 1)) >> NAN_PAYLOAD_SHIFT) as u32;
    if mantissa == 0 {
        // Payload lived only in the low bits; keep the result a NaN.
        mantissa = 1 << (F32_MANTISSA_BITS - 1);
    }
    f32::from_bits(sign | (0xFF << F32_MANTISSA_BITS) | mantissa)
}
