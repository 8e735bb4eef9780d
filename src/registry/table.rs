//! Immutable name-to-scalar tables and the byte-order base tables.
//!
//! A [`TypeTable`] binds a subset of [`TypeName`]s to [`ScalarType`]s. Tables are never mutated
//! once built; new tables are produced from existing ones with [`derive`], which copies the base
//! and replaces the entries named by the overrides.
//!
//! The two base tables returned by [`base_table`] hold the architecture-independent names for
//! one byte order each. They are built once, on first use.

use std::sync::OnceLock;

use strum::{EnumCount, IntoEnumIterator};

use crate::{
    registry::TypeName,
    types::{ByteOrder, ScalarType},
};

/// An immutable mapping from [`TypeName`] to [`ScalarType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTable {
    entries: [Option<ScalarType>; TypeName::COUNT],
}

impl TypeTable {
    /// Builds a table from `(name, type)` pairs. Later pairs win over earlier ones.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (TypeName, ScalarType)>) -> Self {
        derive(&TypeTable::empty(), entries)
    }

    /// A table with no bindings.
    #[must_use]
    pub const fn empty() -> Self {
        TypeTable {
            entries: [None; TypeName::COUNT],
        }
    }

    /// The type bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: TypeName) -> Option<ScalarType> {
        self.entries[name as usize]
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: TypeName) -> bool {
        self.get(name).is_some()
    }

    /// Number of bound names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Returns `true` if no name is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bound `(name, type)` pairs in [`TypeName`] declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeName, ScalarType)> + '_ {
        TypeName::iter().filter_map(|name| self.get(name).map(|scalar| (name, scalar)))
    }

    /// Derives a new table from this one. See [`derive`].
    #[must_use]
    pub fn derive(&self, overrides: impl IntoIterator<Item = (TypeName, ScalarType)>) -> Self {
        derive(self, overrides)
    }
}

/// Produces a new table from `base` with `overrides` applied.
///
/// Every override replaces the same-named entry of `base` (or adds it if `base` does not bind
/// the name); every other entry of `base` passes through unchanged. `base` itself is not
/// modified.
///
/// # Examples
///
/// ```rust
/// use bintypes::{base_table, derive, ByteOrder, ScalarType, TypeName};
///
/// let base = base_table(ByteOrder::BigEndian);
/// let wide = derive(base, [(TypeName::Int, ScalarType::int64(ByteOrder::BigEndian))]);
///
/// assert_eq!(wide.get(TypeName::Int), Some(ScalarType::int64(ByteOrder::BigEndian)));
/// assert_eq!(base.get(TypeName::Int), Some(ScalarType::int32(ByteOrder::BigEndian)));
/// assert_eq!(wide.get(TypeName::Short), base.get(TypeName::Short));
/// ```
#[must_use]
pub fn derive(
    base: &TypeTable,
    overrides: impl IntoIterator<Item = (TypeName, ScalarType)>,
) -> TypeTable {
    let mut table = base.clone();
    for (name, scalar) in overrides {
        table.entries[name as usize] = Some(scalar);
    }
    table
}

static BIG_ENDIAN: OnceLock<TypeTable> = OnceLock::new();
static LITTLE_ENDIAN: OnceLock<TypeTable> = OnceLock::new();

/// The architecture-independent base table for `order`.
///
/// Binds the fixed-width names (`int8` .. `float64`) and their C-style and Intel-style aliases.
/// The word-sized names (`long`, `ulong`, `machine_word`, `pointer`) are left unbound; they are
/// supplied by the architecture registries.
#[must_use]
pub fn base_table(order: ByteOrder) -> &'static TypeTable {
    let cell = match order {
        ByteOrder::BigEndian => &BIG_ENDIAN,
        ByteOrder::LittleEndian => &LITTLE_ENDIAN,
    };

    cell.get_or_init(|| {
        let table = build_base(order);
        log::debug!("built {} base table with {} types", order, table.len());
        table
    })
}

fn build_base(order: ByteOrder) -> TypeTable {
    let int8 = ScalarType::int8(order);
    let uint8 = ScalarType::uint8(order);
    let int16 = ScalarType::int16(order);
    let uint16 = ScalarType::uint16(order);
    let int32 = ScalarType::int32(order);
    let uint32 = ScalarType::uint32(order);
    let int64 = ScalarType::int64(order);
    let uint64 = ScalarType::uint64(order);
    let float32 = ScalarType::float32(order);
    let float64 = ScalarType::float64(order);

    TypeTable::from_entries([
        (TypeName::Int8, int8),
        (TypeName::UInt8, uint8),
        (TypeName::Int16, int16),
        (TypeName::UInt16, uint16),
        (TypeName::Int32, int32),
        (TypeName::UInt32, uint32),
        (TypeName::Int64, int64),
        (TypeName::UInt64, uint64),
        (TypeName::Float32, float32),
        (TypeName::Float64, float64),
        // C names
        (TypeName::Char, int8),
        (TypeName::UChar, uint8),
        (TypeName::Short, int16),
        (TypeName::UShort, uint16),
        (TypeName::Int, int32),
        (TypeName::UInt, uint32),
        (TypeName::LongLong, int64),
        (TypeName::ULongLong, uint64),
        (TypeName::Float, float32),
        (TypeName::Double, float64),
        // Intel names
        (TypeName::Byte, uint8),
        (TypeName::Word, uint16),
        (TypeName::DWord, uint32),
        (TypeName::QWord, uint64),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_tables_bound_to_order() {
        for order in ByteOrder::iter() {
            let table = base_table(order);
            assert!(table.iter().all(|(_, scalar)| scalar.order() == order));
            assert_eq!(table.len(), 24);
        }
    }

    #[test]
    fn base_tables_leave_word_sized_unbound() {
        for order in ByteOrder::iter() {
            let table = base_table(order);
            for name in TypeName::iter() {
                assert_eq!(table.contains(name), !name.is_word_sized(), "{name}");
            }
        }
    }

    #[test]
    fn base_table_is_shared() {
        let first = base_table(ByteOrder::LittleEndian);
        let second = base_table(ByteOrder::LittleEndian);
        assert!(std::ptr::eq(first, second));
        assert!(!std::ptr::eq(first, base_table(ByteOrder::BigEndian)));
    }

    #[test]
    fn derive_overrides_and_passes_through() {
        let order = ByteOrder::BigEndian;
        let base = TypeTable::from_entries([
            (TypeName::Int8, ScalarType::int8(order)),
            (TypeName::Long, ScalarType::int32(order)),
        ]);

        let derived = derive(
            &base,
            [
                (TypeName::Long, ScalarType::int64(order)),
                (TypeName::Pointer, ScalarType::uint64(order)),
            ],
        );

        assert_eq!(derived.get(TypeName::Int8), Some(ScalarType::int8(order)));
        assert_eq!(derived.get(TypeName::Long), Some(ScalarType::int64(order)));
        assert_eq!(derived.get(TypeName::Pointer), Some(ScalarType::uint64(order)));
        assert_eq!(derived.len(), 3);

        // base is untouched
        assert_eq!(base.get(TypeName::Long), Some(ScalarType::int32(order)));
        assert_eq!(base.get(TypeName::Pointer), None);
    }

    #[test]
    fn empty_table() {
        let table = TypeTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
        assert_eq!(derive(&table, std::iter::empty()), table);
    }
}
