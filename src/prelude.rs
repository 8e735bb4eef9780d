//! # bintypes Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and functions
//! from the bintypes library. Import it to get the registry facade, the type model and the
//! cursor I/O in one go.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bintypes operations
pub use crate::Error;

/// The result type used throughout bintypes
pub use crate::Result;

// ================================================================================================
// Registries
// ================================================================================================

/// Architecture identity and registry types
pub use crate::{Architecture, RegistryId, TypeName, TypeRegistry};

/// Registry access facade
pub use crate::{default_registry, lookup, registries, registry};

// ================================================================================================
// Type Model
// ================================================================================================

/// Scalar types and their encoding parameters
pub use crate::{ByteOrder, ScalarKind, ScalarType};

/// Composite types
pub use crate::{ArrayType, StructBuilder, StructType, Type};

/// Dynamic value model
pub use crate::Value;

// ================================================================================================
// Cursor I/O
// ================================================================================================

/// Sequential decoding and encoding by symbolic name
pub use crate::{TypeReader, TypeWriter};
