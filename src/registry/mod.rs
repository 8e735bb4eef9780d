//! Symbolic type registries.
//!
//! A registry maps symbolic names such as `uint32`, `long` or `pointer` to concrete
//! [`crate::ScalarType`]s for one architecture and byte order. Registries are layered:
//!
//! 1. Two base tables, one per byte order, bind every architecture-independent name
//!    ([`base_table`]).
//! 2. Each architecture registry is a base table with the four word-sized names bound to the
//!    architecture's word width ([`derive`], [`TypeRegistry`]).
//!
//! Derivation is a pure function of the base and the overrides, and every table is immutable
//! once built, so registries can be shared freely between threads.
//!
//! # Key Components
//!
//! - [`TypeName`] - The closed set of symbolic names
//! - [`TypeTable`] / [`derive`] / [`base_table`] - Name tables and the base layer
//! - [`Architecture`] / [`TypeRegistry`] - Per-architecture registries
//! - [`registry`] / [`default_registry`] / [`registries`] / [`lookup`] - Access facade
//! - [`RegistryId`] - Parsable `ARCH[:ORDER]` identity
//!
//! # Examples
//!
//! ```rust
//! use bintypes::{default_registry, lookup, Architecture, ByteOrder, Value};
//!
//! let mips64 = default_registry(Architecture::Mips64);
//! let pointer = lookup(mips64, "pointer")?;
//!
//! assert_eq!(pointer.order(), ByteOrder::LittleEndian);
//! assert_eq!(pointer.pack(&Value::from(0x1000u64))?, [0x00, 0x10, 0, 0, 0, 0, 0, 0]);
//! # Ok::<(), bintypes::Error>(())
//! ```

mod arch;
mod name;
mod table;

pub use arch::{
    default_registry, lookup, registries, registry, Architecture, RegistryId, TypeRegistry,
    WordOverrides, WordSize,
};
pub use name::TypeName;
pub use table::{base_table, derive, TypeTable};
