//! Appending encoder for symbolic types.
//!
//! [`TypeWriter`] is the counterpart of [`crate::TypeReader`]: it encodes values by symbolic
//! name against one registry and appends them to a growing buffer.
//!
//! # Examples
//!
//! ```rust
//! use bintypes::{default_registry, Architecture, TypeWriter, Value};
//!
//! let mut writer = TypeWriter::new(default_registry(Architecture::Arm64));
//! writer.write("uint16", &Value::from(0x1234u16))?;
//! writer.pad(2)?;
//! writer.write("pointer", &Value::from(0x10u64))?;
//!
//! assert_eq!(writer.len(), 12);
//! assert_eq!(&writer.into_bytes()[..4], [0x12, 0x34, 0x00, 0x00]);
//! # Ok::<(), bintypes::Error>(())
//! ```

use crate::{
    registry::{TypeName, TypeRegistry},
    types::{ScalarType, Type, Value},
    Result,
};

/// An append-only buffer that encodes symbolic types of one registry.
///
/// A failed write leaves the buffer exactly as it was before the call.
#[derive(Debug, Clone)]
pub struct TypeWriter<'a> {
    data: Vec<u8>,
    registry: &'a TypeRegistry,
}

impl<'a> TypeWriter<'a> {
    /// Creates an empty writer.
    #[must_use]
    pub fn new(registry: &'a TypeRegistry) -> Self {
        TypeWriter {
            data: Vec::new(),
            registry,
        }
    }

    /// Registry that names are resolved against
    #[must_use]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Number of bytes written so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The bytes written so far
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the writer and returns its buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Appends `value` encoded as a scalar type.
    ///
    /// # Errors
    /// Any error from [`ScalarType::pack`].
    pub fn write_scalar(&mut self, scalar: ScalarType, value: &Value) -> Result<()> {
        let bytes = scalar.pack(value)?;
        self.data.extend_from_slice(&bytes);
        Ok(())
    }

    /// Appends `value` encoded as any type.
    ///
    /// # Errors
    /// Any error from [`Type::pack`].
    pub fn write_type(&mut self, ty: &Type, value: &Value) -> Result<()> {
        let bytes = ty.pack(value)?;
        self.data.extend_from_slice(&bytes);
        Ok(())
    }

    /// Appends `value` encoded as the type bound to an already parsed name.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the name is unbound, or any pack error.
    pub fn write_name(&mut self, name: TypeName, value: &Value) -> Result<()> {
        let scalar = self.registry.resolve(name)?;
        self.write_scalar(scalar, value)
    }

    /// Appends `value` encoded as the named type.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] for an unknown name, or any pack error.
    pub fn write(&mut self, name: &str, value: &Value) -> Result<()> {
        let scalar = self.registry.lookup(name)?;
        self.write_scalar(scalar, value)
    }

    /// Appends `count` zero bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedComposition`] if the buffer cannot grow by `count`
    /// bytes. The buffer is unchanged in that case.
    pub fn pad(&mut self, count: usize) -> Result<()> {
        let Some(len) = self.data.len().checked_add(count) else {
            return Err(composition_error!("padding of {} bytes overflows the buffer", count));
        };
        if self.data.try_reserve(count).is_err() {
            return Err(composition_error!("padding of {} bytes exceeds the buffer capacity", count));
        }

        self.data.resize(len, 0);
        Ok(())
    }
}
