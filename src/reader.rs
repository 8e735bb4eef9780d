//! Cursor-based decoding of symbolic types from a byte buffer.
//!
//! [`TypeReader`] walks a byte slice and decodes values by symbolic name, resolving every name
//! against one [`TypeRegistry`]. This is the usual way to pull a sequence of target-specific
//! fields (`pointer`, `long`, `uint16`, ...) out of a memory dump or file header without
//! hard-coding widths or byte order.
//!
//! # Key Components
//!
//! ## Navigation
//! - [`TypeReader::pos`] / [`TypeReader::remaining`] / [`TypeReader::has_more_data`]
//! - [`TypeReader::seek`] / [`TypeReader::skip`]
//! - [`TypeReader::transactional`] - Speculative reads that roll back on failure
//!
//! ## Decoding
//! - [`TypeReader::read`] / [`TypeReader::read_name`] - By symbolic name
//! - [`TypeReader::read_names`] - A sequence of names
//! - [`TypeReader::read_scalar`] / [`TypeReader::read_type`] / [`TypeReader::read_struct`]
//!
//! # Examples
//!
//! ```rust
//! use bintypes::{default_registry, Architecture, TypeReader, Value};
//!
//! let data = [0x00, 0x00, 0x10, 0x00, 0x2a, 0x00];
//! let mut reader = TypeReader::new(&data, default_registry(Architecture::Arm));
//!
//! assert_eq!(reader.read("pointer")?, Value::Int(0x1000));
//! assert_eq!(reader.read("short")?, Value::Int(0x2a00));
//! assert!(!reader.has_more_data());
//! # Ok::<(), bintypes::Error>(())
//! ```
//!
//! # Error Handling
//!
//! A read that runs past the end of the buffer returns [`crate::Error::LengthMismatch`] and
//! leaves the cursor where it was. Unknown names return [`crate::Error::TypeNotFound`].

use crate::{
    registry::{TypeName, TypeRegistry},
    types::{ScalarType, StructType, Type, Value},
    Error::LengthMismatch,
    Result,
};

/// A cursor over a byte slice that decodes symbolic types of one registry.
#[derive(Debug, Clone)]
pub struct TypeReader<'a> {
    data: &'a [u8],
    position: usize,
    registry: &'a TypeRegistry,
}

impl<'a> TypeReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8], registry: &'a TypeRegistry) -> Self {
        TypeReader {
            data,
            position: 0,
            registry,
        }
    }

    /// Registry that names are resolved against
    #[must_use]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Length of the underlying buffer
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying buffer is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current offset of the cursor
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Bytes left between the cursor and the end of the buffer
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Returns `true` if the cursor is before the end of the buffer.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Moves the cursor to `pos`. Seeking to the very end of the buffer is allowed.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if `pos` is past the end of the buffer.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(LengthMismatch {
                expected: pos,
                actual: self.data.len(),
            });
        }

        self.position = pos;
        Ok(())
    }

    /// Advances the cursor by `count` bytes without decoding them.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if fewer than `count` bytes remain.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(LengthMismatch {
                expected: count,
                actual: self.remaining(),
            });
        }

        self.position += count;
        Ok(())
    }

    /// Runs `f` against this reader and restores the cursor if it fails.
    ///
    /// On success the cursor reflects every read `f` performed. Calls may nest; an inner
    /// failure only rolls back to the inner starting point.
    ///
    /// # Errors
    /// Returns whatever error `f` returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintypes::{default_registry, Architecture, TypeReader};
    ///
    /// let data = [0x01, 0x02, 0x03];
    /// let mut reader = TypeReader::new(&data, default_registry(Architecture::X86));
    ///
    /// let pair = reader.transactional(|r| Ok((r.read("uint8")?, r.read("pointer")?)));
    /// assert!(pair.is_err());
    /// assert_eq!(reader.pos(), 0);
    /// ```
    pub fn transactional<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved_position = self.position;
        let result = f(self);
        if result.is_err() {
            self.position = saved_position;
        }
        result
    }

    /// Decodes one value of a scalar type and advances the cursor.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if fewer than the scalar's width remain.
    pub fn read_scalar(&mut self, scalar: ScalarType) -> Result<Value> {
        scalar.unpack_at(self.data, &mut self.position)
    }

    /// Decodes one value of any type and advances the cursor.
    ///
    /// Composites decode to a [`Value::List`].
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if fewer than the type's width remain.
    pub fn read_type(&mut self, ty: &Type) -> Result<Value> {
        ty.unpack_at(self.data, &mut self.position)
    }

    /// Decodes the members of a struct and advances the cursor past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::LengthMismatch`] if fewer than the struct's width remain.
    pub fn read_struct(&mut self, structure: &StructType) -> Result<Vec<Value>> {
        structure.unpack_at(self.data, &mut self.position)
    }

    /// Decodes one value of the type bound to an already parsed name.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the name is not bound in the registry, or
    /// [`crate::Error::LengthMismatch`] if too few bytes remain.
    pub fn read_name(&mut self, name: TypeName) -> Result<Value> {
        let scalar = self.registry.resolve(name)?;
        self.read_scalar(scalar)
    }

    /// Decodes one value of the named type.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] for an unknown name, or
    /// [`crate::Error::LengthMismatch`] if too few bytes remain.
    pub fn read(&mut self, name: &str) -> Result<Value> {
        let scalar = self.registry.lookup(name)?;
        self.read_scalar(scalar)
    }

    /// Decodes one value for each name, in order.
    ///
    /// Either every value is decoded or none is: on failure the cursor is restored to where it
    /// was before the call.
    ///
    /// # Errors
    /// The first error from [`TypeReader::read`].
    pub fn read_names(&mut self, names: &[&str]) -> Result<Vec<Value>> {
        self.transactional(|reader| names.iter().map(|name| reader.read(name)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        registry::{default_registry, registry, Architecture},
        types::ByteOrder,
        Error,
    };

    #[test]
    fn reads_in_registry_order() {
        let data = [0x12, 0x34, 0x56, 0x78];

        let mut big = TypeReader::new(&data, default_registry(Architecture::Ppc));
        assert_eq!(big.read("uint32").unwrap(), Value::Int(0x1234_5678));

        let mut little = TypeReader::new(&data, default_registry(Architecture::Mips));
        assert_eq!(little.read("dword").unwrap(), Value::Int(0x7856_3412));
    }

    #[test]
    fn pointer_width_follows_architecture() {
        let data = [0xff; 8];

        let mut arm = TypeReader::new(&data, default_registry(Architecture::Arm));
        arm.read_name(TypeName::Pointer).unwrap();
        assert_eq!(arm.pos(), 4);

        let mut arm64 = TypeReader::new(&data, default_registry(Architecture::Arm64));
        assert_eq!(arm64.read_name(TypeName::Pointer).unwrap(), Value::Int(u64::MAX.into()));
        assert_eq!(arm64.pos(), 8);
    }

    #[test]
    fn short_read_keeps_position() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = TypeReader::new(&data, default_registry(Architecture::X86_64));

        reader.skip(1).unwrap();
        assert_eq!(
            reader.read("uint32"),
            Err(Error::LengthMismatch {
                expected: 4,
                actual: 2
            })
        );
        assert_eq!(reader.pos(), 1);
        assert_eq!(reader.read("uint16").unwrap(), Value::Int(0x0302));
        assert!(!reader.has_more_data());
    }

    #[test]
    fn unknown_name() {
        let mut reader = TypeReader::new(&[0; 4], default_registry(Architecture::Mips64));
        assert_eq!(
            reader.read("int128").unwrap_err().to_string(),
            "unknown MIPS64 (little-endian) type: int128"
        );
        assert_eq!(reader.pos(), 0);
    }

    #[test]
    fn read_names_is_all_or_nothing() {
        let data = [0x01, 0x00, 0x02, 0x00];
        let mut reader = TypeReader::new(&data, default_registry(Architecture::X86));

        assert!(reader.read_names(&["uint16", "uint32"]).is_err());
        assert_eq!(reader.pos(), 0);

        let values = reader.read_names(&["ushort", "short"]).unwrap();
        assert_eq!(values, [Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn seek_and_skip() {
        let data = [0u8; 4];
        let mut reader = TypeReader::new(&data, default_registry(Architecture::Arm));

        reader.seek(4).unwrap();
        assert_eq!(reader.remaining(), 0);
        assert!(reader.seek(5).is_err());
        assert_eq!(reader.pos(), 4);

        reader.seek(1).unwrap();
        assert!(reader.skip(4).is_err());
        reader.skip(3).unwrap();
        assert_eq!(reader.pos(), 4);
    }

    #[test]
    fn nested_transactional() {
        let data = [0x01, 0x02, 0x03];
        let arm_le = registry(Architecture::Arm, ByteOrder::LittleEndian).unwrap();
        let mut reader = TypeReader::new(&data, arm_le);

        let first = reader
            .transactional(|outer| {
                let first = outer.read("uint8")?;
                assert!(outer.transactional(|inner| inner.read("uint32")).is_err());
                assert_eq!(outer.pos(), 1);
                Ok(first)
            })
            .unwrap();

        assert_eq!(first, Value::Int(1));
        assert_eq!(reader.pos(), 1);
    }

    #[test]
    fn composites() {
        let mips = default_registry(Architecture::Mips);
        let header = mips
            .resolve_struct(&[("kind", "uint16"), ("size", "uint32")])
            .unwrap();
        let data = [0x02, 0x00, 0x10, 0x00, 0x00, 0x00, 0xaa, 0xbb];
        let mut reader = TypeReader::new(&data, mips);

        assert_eq!(
            reader.read_struct(&header).unwrap(),
            [Value::Int(2), Value::Int(16)]
        );

        let tail = Type::from(mips.array("uint8", 2).unwrap());
        assert_eq!(
            reader.read_type(&tail).unwrap(),
            Value::List(vec![Value::Int(0xaa), Value::Int(0xbb)])
        );
        assert_eq!(reader.remaining(), 0);
    }
}
