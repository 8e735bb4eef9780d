use thiserror::Error;

use crate::{
    registry::Architecture,
    types::{ByteOrder, ScalarKind},
};

macro_rules! composition_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::UnsupportedComposition($msg.to_string())
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::UnsupportedComposition(format!($fmt, $($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every operation in this crate is a pure transformation, so each variant describes exactly one
/// way a lookup, a type definition, or a pack/unpack call can be rejected. Errors are returned
/// to the direct caller immediately; nothing is retried and no partial output is produced.
///
/// # Error Categories
///
/// ## Lookup Errors
/// - [`Error::TypeNotFound`] - Symbolic name is not bound in the resolved registry
/// - [`Error::UnknownIdentity`] - An architecture or byte-order string did not parse
///
/// ## Buffer Errors
/// - [`Error::LengthMismatch`] - Buffer length differs from the declared width
///
/// ## Value Errors
/// - [`Error::ValueOutOfRange`] - Value does not fit the target kind and width
/// - [`Error::NotIntegral`] - Non-integral value supplied to an integer kind
/// - [`Error::TypeMismatch`] - Scalar given a list, or composite given a scalar
/// - [`Error::ArityMismatch`] - Wrong number of members supplied to a composite
///
/// ## Definition Errors
/// - [`Error::UnsupportedComposition`] - Malformed scalar, array or struct definition
///
/// # Examples
///
/// ```rust
/// use bintypes::{registry, Architecture, ByteOrder, Error};
///
/// let arm = registry(Architecture::Arm, ByteOrder::BigEndian).unwrap();
/// match arm.lookup("foo") {
///     Err(Error::TypeNotFound { name, .. }) => assert_eq!(name, "foo"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested symbolic name is not bound in the registry.
    ///
    /// The message format is a stable contract:
    /// `unknown <ARCHITECTURE> (<byte-order>) type: <name>`.
    #[error("unknown {architecture} ({order}) type: {name}")]
    TypeNotFound {
        /// The name that was requested
        name: String,
        /// Architecture of the registry the lookup ran against
        architecture: Architecture,
        /// Byte order of the registry the lookup ran against
        order: ByteOrder,
    },

    /// The supplied buffer does not have the length the type requires.
    #[error("expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// The declared width of the type
        expected: usize,
        /// The length of the supplied buffer
        actual: usize,
    },

    /// The value cannot be represented by the target kind and width.
    #[error("value {value} is out of range for {kind} of {width} bytes")]
    ValueOutOfRange {
        /// Rendering of the rejected value
        value: String,
        /// Kind of the target scalar
        kind: ScalarKind,
        /// Width of the target scalar in bytes
        width: usize,
    },

    /// A non-integral value was supplied to an integer kind.
    #[error("non-integral value supplied to {kind} of {width} bytes")]
    NotIntegral {
        /// Kind of the target scalar
        kind: ScalarKind,
        /// Width of the target scalar in bytes
        width: usize,
    },

    /// The value's shape does not match the type's shape.
    ///
    /// Raised when a list is packed as a scalar, or a scalar as an array or struct.
    #[error("expected a {expected} value")]
    TypeMismatch {
        /// Shape that was expected, `scalar` or `list`
        expected: &'static str,
    },

    /// A composite was given the wrong number of member values.
    #[error("expected {expected} values, got {actual}")]
    ArityMismatch {
        /// Declared element or field count
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// A type definition is malformed.
    ///
    /// Detected when the type is constructed, never during pack or unpack.
    #[error("unsupported composition - {0}")]
    UnsupportedComposition(String),

    /// An architecture or byte order name could not be parsed.
    #[error("unknown architecture or byte order - {0}")]
    UnknownIdentity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_not_found_text() {
        let err = Error::TypeNotFound {
            name: "foo".to_string(),
            architecture: Architecture::Mips64,
            order: ByteOrder::LittleEndian,
        };
        assert_eq!(err.to_string(), "unknown MIPS64 (little-endian) type: foo");
    }

    #[test]
    fn composition_macro() {
        let err = composition_error!("duplicate field '{}'", "magic");
        assert_eq!(
            err.to_string(),
            "unsupported composition - duplicate field 'magic'"
        );
    }
}
