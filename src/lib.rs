// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # bintypes
//!
//! A binary type system for reading and writing architecture-specific data layouts.
//!
//! `bintypes` maps symbolic type names such as `uint32`, `long` or `pointer` to concrete
//! fixed-width encodings for a given CPU architecture and byte order, and packs and unpacks
//! values of those types, including arrays and packed structs built from them.
//!
//! ## Features
//!
//! - **Scalar types** - Signed, unsigned and IEEE-754 encodings of 1, 2, 4 and 8 bytes in either
//!   byte order, with strict range checking and bit-exact NaN handling
//! - **Composite types** - Fixed-size arrays and packed structs that nest arbitrarily
//! - **Architecture registries** - ARM, ARM64, MIPS, MIPS64, x86, x86-64, PPC and PPC64 in
//!   every byte order they run in, with `long`, `ulong`, `machine_word` and `pointer` sized to
//!   the architecture
//! - **Cursor I/O** - [`TypeReader`] and [`TypeWriter`] decode and encode sequences of
//!   symbolic types
//!
//! ## Quick Start
//!
//! ```rust
//! use bintypes::prelude::*;
//!
//! let arm = registry(Architecture::Arm, ByteOrder::BigEndian).unwrap();
//! let pointer = arm.lookup("pointer")?;
//!
//! assert_eq!(arm.address_size(), 4);
//! assert_eq!(pointer.pack(&Value::from(0xdead_beefu32))?, [0xde, 0xad, 0xbe, 0xef]);
//! assert_eq!(pointer.unpack(&[0, 0, 0, 1])?, Value::Int(1));
//! # Ok::<(), bintypes::Error>(())
//! ```
//!
//! ### Composite Layouts
//!
//! ```rust
//! use bintypes::{default_registry, Architecture, Value};
//!
//! let mips = default_registry(Architecture::Mips);
//! let header = mips.resolve_struct(&[("magic", "uint16"), ("entry", "pointer")])?;
//!
//! let bytes = header.pack(&[Value::from(0x7f45u16), Value::from(0x0040_0000u32)])?;
//! assert_eq!(bytes, [0x45, 0x7f, 0x00, 0x00, 0x40, 0x00]);
//! assert_eq!(header.unpack(&bytes)?, [Value::Int(0x7f45), Value::Int(0x0040_0000)]);
//! # Ok::<(), bintypes::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Scalar and composite types and the [`Value`] model
//! - [`registry`](mod@registry) - Base tables, per-architecture registries and the lookup facade
//! - [`io`] - Byte order aware primitive reads and writes
//! - [`TypeReader`] / [`TypeWriter`] - Cursor-based decoding and encoding by symbolic name
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! Registry construction is reported through the [`log`] facade at `debug` level. Nothing is
//! logged on the pack/unpack paths.
//!
//! ## Thread Safety
//!
//! Every public type is `Send + Sync`. The built-in registries are built once on first access
//! and shared as `&'static` references; they can be read from any number of threads without
//! locking.

#[macro_use]
pub(crate) mod error;

pub mod io;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use bintypes::prelude::*;
///
/// let x86 = default_registry(Architecture::X86);
/// let mut reader = TypeReader::new(&[0x01, 0x00], x86);
/// assert_eq!(reader.read("ushort")?, Value::Int(1));
/// # Ok::<(), bintypes::Error>(())
/// ```
pub mod prelude;

mod reader;
pub mod registry;
pub mod types;
mod writer;

/// `bintypes` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `bintypes` Error type
///
/// The error type for every fallible operation in this crate.
pub use error::Error;

pub use reader::TypeReader;
pub use registry::{
    base_table, default_registry, derive, lookup, registries, registry, Architecture, RegistryId,
    TypeName, TypeRegistry, TypeTable, WordOverrides, WordSize,
};
pub use types::{
    ArrayType, ByteOrder, ScalarKind, ScalarType, StructBuilder, StructField, StructType, Type,
    Value,
};
pub use writer::TypeWriter;
