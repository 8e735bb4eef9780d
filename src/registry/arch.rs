//! CPU architectures and their derived type registries.
//!
//! Each architecture registry is the byte-order base table for its byte order with the four
//! word-sized names bound to the architecture's word width. The built-in registries are
//! constructed once, on first access, and handed out as `&'static` references.
//!
//! | Architecture | Default order | Alternate order | `ADDRESS_SIZE` |
//! |--------------|---------------|-----------------|----------------|
//! | `ARM`        | big-endian    | little-endian   | 4              |
//! | `ARM64`      | big-endian    | little-endian   | 8              |
//! | `MIPS`       | little-endian | big-endian      | 4              |
//! | `MIPS64`     | little-endian | big-endian      | 8              |
//! | `X86`        | little-endian | -               | 4              |
//! | `X86_64`     | little-endian | -               | 8              |
//! | `PPC`        | big-endian    | little-endian   | 4              |
//! | `PPC64`      | big-endian    | little-endian   | 8              |

use std::{fmt, str::FromStr, sync::OnceLock};

use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{
    registry::{base_table, derive, TypeName, TypeTable},
    types::{ArrayType, ByteOrder, ScalarType, StructType, Type},
    Error::{TypeNotFound, UnknownIdentity},
    Result,
};

/// Natural integer width of an architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSize {
    /// 4-byte words and pointers
    Bits32,
    /// 8-byte words and pointers
    Bits64,
}

impl WordSize {
    /// Width of a word in bytes
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            WordSize::Bits32 => 4,
            WordSize::Bits64 => 8,
        }
    }
}

/// A CPU family with a type registry.
///
/// Renders as its canonical short name (`ARM64`, `MIPS`, ...), which is the form used in lookup
/// error messages. Parsing is case-insensitive and also accepts common aliases such as
/// `aarch64`, `amd64` or `powerpc`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Architecture {
    /// 32-bit ARM
    #[strum(to_string = "ARM", serialize = "armv7")]
    Arm,
    /// 64-bit ARM
    #[strum(to_string = "ARM64", serialize = "aarch64")]
    Arm64,
    /// 32-bit MIPS
    #[strum(to_string = "MIPS")]
    Mips,
    /// 64-bit MIPS
    #[strum(to_string = "MIPS64")]
    Mips64,
    /// 32-bit x86
    #[strum(to_string = "X86", serialize = "i386", serialize = "i686", serialize = "ia32")]
    X86,
    /// 64-bit x86
    #[strum(
        to_string = "X86_64",
        serialize = "x86-64",
        serialize = "amd64",
        serialize = "x64"
    )]
    X86_64,
    /// 32-bit PowerPC
    #[strum(to_string = "PPC", serialize = "powerpc")]
    Ppc,
    /// 64-bit PowerPC
    #[strum(to_string = "PPC64", serialize = "powerpc64")]
    Ppc64,
}

impl Architecture {
    /// Natural word width
    #[must_use]
    pub const fn word_size(self) -> WordSize {
        match self {
            Architecture::Arm | Architecture::Mips | Architecture::X86 | Architecture::Ppc => {
                WordSize::Bits32
            }
            Architecture::Arm64
            | Architecture::Mips64
            | Architecture::X86_64
            | Architecture::Ppc64 => WordSize::Bits64,
        }
    }

    /// Width of a pointer in bytes, the `ADDRESS_SIZE` of every registry of this architecture
    #[must_use]
    pub const fn address_size(self) -> usize {
        self.word_size().bytes()
    }

    /// Byte order of the architecture's primary registry
    #[must_use]
    pub const fn default_order(self) -> ByteOrder {
        match self {
            Architecture::Arm | Architecture::Arm64 | Architecture::Ppc | Architecture::Ppc64 => {
                ByteOrder::BigEndian
            }
            Architecture::Mips
            | Architecture::Mips64
            | Architecture::X86
            | Architecture::X86_64 => ByteOrder::LittleEndian,
        }
    }

    /// Byte order of the second registry, for architectures with selectable endianness
    #[must_use]
    pub const fn alternate_order(self) -> Option<ByteOrder> {
        match self {
            Architecture::X86 | Architecture::X86_64 => None,
            _ => Some(self.default_order().opposite()),
        }
    }

    /// Returns `true` if the architecture has a registry for `order`.
    #[must_use]
    pub fn supports(self, order: ByteOrder) -> bool {
        self.default_order() == order || self.alternate_order() == Some(order)
    }

    /// Parses an architecture from its canonical name or an alias, ignoring ASCII case.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownIdentity`] if the name is not recognised.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| UnknownIdentity(format!("architecture '{name}'")))
    }
}

/// The architecture-specific bindings applied on top of a base table.
///
/// The set of overridden names is fixed by the fields of this struct, so an override table can
/// never be partially applied or name anything but the four word-sized types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordOverrides {
    /// Binding for `long`
    pub long: ScalarType,
    /// Binding for `ulong`
    pub ulong: ScalarType,
    /// Binding for `machine_word`
    pub machine_word: ScalarType,
    /// Binding for `pointer`
    pub pointer: ScalarType,
}

impl WordOverrides {
    /// Overrides for a word of `word_size` in byte order `order`.
    ///
    /// `long` is signed; `ulong`, `machine_word` and `pointer` are unsigned.
    #[must_use]
    pub const fn new(word_size: WordSize, order: ByteOrder) -> Self {
        let (signed, unsigned) = match word_size {
            WordSize::Bits32 => (ScalarType::int32(order), ScalarType::uint32(order)),
            WordSize::Bits64 => (ScalarType::int64(order), ScalarType::uint64(order)),
        };

        WordOverrides {
            long: signed,
            ulong: unsigned,
            machine_word: unsigned,
            pointer: unsigned,
        }
    }

    fn entries(self) -> [(TypeName, ScalarType); 4] {
        [
            (TypeName::Long, self.long),
            (TypeName::ULong, self.ulong),
            (TypeName::MachineWord, self.machine_word),
            (TypeName::Pointer, self.pointer),
        ]
    }
}

/// The complete symbolic type table for one architecture and byte order.
///
/// Registries are immutable. The built-in ones are obtained through [`registry`],
/// [`default_registry`] and [`registries`].
///
/// # Examples
///
/// ```rust
/// use bintypes::{registry, Architecture, ByteOrder, TypeName};
///
/// let arm64 = registry(Architecture::Arm64, ByteOrder::BigEndian).unwrap();
/// assert_eq!(arm64.address_size(), 8);
/// assert_eq!(arm64.lookup("pointer")?.width(), 8);
/// assert_eq!(
///     arm64.lookup("foo").unwrap_err().to_string(),
///     "unknown ARM64 (big-endian) type: foo"
/// );
/// # Ok::<(), bintypes::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    architecture: Architecture,
    order: ByteOrder,
    address_size: usize,
    table: TypeTable,
}

impl TypeRegistry {
    /// Derives the registry for `architecture` in byte order `order`.
    ///
    /// This always succeeds; whether the architecture actually runs in `order` is the caller's
    /// concern. Use [`registry`] for the shared built-in registries.
    #[must_use]
    pub fn derive(architecture: Architecture, order: ByteOrder) -> Self {
        let overrides = WordOverrides::new(architecture.word_size(), order);
        let table = derive(base_table(order), overrides.entries());

        TypeRegistry {
            architecture,
            order,
            address_size: overrides.pointer.width(),
            table,
        }
    }

    /// Architecture this registry describes
    #[must_use]
    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Byte order of every type in this registry
    #[must_use]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// `ADDRESS_SIZE`: the byte width of `pointer` and `machine_word`
    #[must_use]
    pub fn address_size(&self) -> usize {
        self.address_size
    }

    /// The underlying name-to-type table
    #[must_use]
    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    /// The type bound to an already parsed name.
    #[must_use]
    pub fn get(&self, name: TypeName) -> Option<ScalarType> {
        self.table.get(name)
    }

    /// Resolves a symbolic name.
    ///
    /// Lookup is exact and case-sensitive; there is no fallback.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`], rendered as
    /// `unknown <ARCHITECTURE> (<byte-order>) type: <name>`, if the name is not bound.
    pub fn lookup(&self, name: &str) -> Result<ScalarType> {
        name.parse::<TypeName>()
            .ok()
            .and_then(|parsed| self.get(parsed))
            .ok_or_else(|| self.not_found(name))
    }

    /// Resolves an already parsed name, failing like [`TypeRegistry::lookup`].
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the name is not bound.
    pub fn resolve(&self, name: TypeName) -> Result<ScalarType> {
        self.get(name).ok_or_else(|| self.not_found(name.as_str()))
    }

    /// Builds an array of `count` elements of the named type.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] for an unknown element name, or any error from
    /// [`ArrayType::new`].
    pub fn array(&self, name: &str, count: usize) -> Result<ArrayType> {
        ArrayType::new(self.lookup(name)?, count)
    }

    /// Builds a struct from `(field name, type name)` pairs.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] for the first unknown type name, or any error from
    /// [`StructType::new`].
    pub fn resolve_struct(&self, fields: &[(&str, &str)]) -> Result<StructType> {
        let mut members = Vec::with_capacity(fields.len());
        for &(field, name) in fields {
            members.push((field, Type::from(self.lookup(name)?)));
        }

        StructType::new(members)
    }

    fn not_found(&self, name: &str) -> crate::Error {
        TypeNotFound {
            name: name.to_string(),
            architecture: self.architecture,
            order: self.order,
        }
    }
}

struct ArchRegistries {
    default: TypeRegistry,
    alternate: Option<TypeRegistry>,
}

impl ArchRegistries {
    fn build(architecture: Architecture) -> Self {
        let default = TypeRegistry::derive(architecture, architecture.default_order());
        let alternate = architecture
            .alternate_order()
            .map(|order| TypeRegistry::derive(architecture, order));

        log::debug!(
            "built {} registries ({}{}), ADDRESS_SIZE {}",
            architecture,
            default.order,
            alternate
                .as_ref()
                .map(|registry| format!(", {}", registry.order))
                .unwrap_or_default(),
            default.address_size,
        );

        ArchRegistries { default, alternate }
    }
}

static REGISTRIES: OnceLock<Vec<ArchRegistries>> = OnceLock::new();

fn builtin() -> &'static [ArchRegistries] {
    REGISTRIES.get_or_init(|| Architecture::iter().map(ArchRegistries::build).collect())
}

/// The built-in registry for `architecture` in byte order `order`.
///
/// Returns `None` if the architecture has no registry for that byte order (e.g. big-endian x86).
/// All registries are built together on the first call; concurrent first callers block until
/// construction finishes and all observe the same tables.
#[must_use]
pub fn registry(architecture: Architecture, order: ByteOrder) -> Option<&'static TypeRegistry> {
    let entry = &builtin()[architecture as usize];
    if entry.default.order == order {
        Some(&entry.default)
    } else {
        entry
            .alternate
            .as_ref()
            .filter(|registry| registry.order == order)
    }
}

/// The built-in registry for `architecture` in its default byte order.
#[must_use]
pub fn default_registry(architecture: Architecture) -> &'static TypeRegistry {
    &builtin()[architecture as usize].default
}

/// Every built-in registry, default byte order first within each architecture.
pub fn registries() -> impl Iterator<Item = &'static TypeRegistry> {
    builtin()
        .iter()
        .flat_map(|entry| std::iter::once(&entry.default).chain(entry.alternate.as_ref()))
}

/// Resolves `name` against `registry`. Equivalent to [`TypeRegistry::lookup`].
///
/// # Errors
/// Returns [`crate::Error::TypeNotFound`] if the name is not bound.
pub fn lookup(registry: &TypeRegistry, name: &str) -> Result<ScalarType> {
    registry.lookup(name)
}

/// Identity of a registry: an architecture and a byte order.
///
/// Parses from `ARCH` (default byte order) or `ARCH:ORDER`, e.g. `arm64`, `MIPS:be`,
/// `x86_64:little-endian`. This is the form in which tools accept a target on the command line.
///
/// # Examples
///
/// ```rust
/// use bintypes::{Architecture, ByteOrder, RegistryId};
///
/// let id: RegistryId = "mips64:be".parse()?;
/// assert_eq!(id.architecture, Architecture::Mips64);
/// assert_eq!(id.order, ByteOrder::BigEndian);
/// assert_eq!(id.registry()?.address_size(), 8);
/// assert_eq!(id.to_string(), "MIPS64 (big-endian)");
/// # Ok::<(), bintypes::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryId {
    /// Target architecture
    pub architecture: Architecture,
    /// Target byte order
    pub order: ByteOrder,
}

impl RegistryId {
    /// Identity of the default-order registry of `architecture`.
    #[must_use]
    pub const fn default_for(architecture: Architecture) -> Self {
        RegistryId {
            architecture,
            order: architecture.default_order(),
        }
    }

    /// The built-in registry with this identity.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownIdentity`] if the architecture has no registry for the
    /// byte order.
    pub fn registry(&self) -> Result<&'static TypeRegistry> {
        registry(self.architecture, self.order)
            .ok_or_else(|| UnknownIdentity(format!("no {self} registry")))
    }
}

impl FromStr for RegistryId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((architecture, order)) => Ok(RegistryId {
                architecture: Architecture::from_name(architecture.trim())?,
                order: ByteOrder::from_name(order.trim())?,
            }),
            None => Ok(RegistryId::default_for(Architecture::from_name(s.trim())?)),
        }
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.architecture, self.order)
    }
}

impl From<&TypeRegistry> for RegistryId {
    fn from(registry: &TypeRegistry) -> Self {
        RegistryId {
            architecture: registry.architecture,
            order: registry.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const BE: ByteOrder = ByteOrder::BigEndian;
    const LE: ByteOrder = ByteOrder::LittleEndian;

    #[test]
    fn pointer_width_is_address_size() {
        for registry in registries() {
            let pointer = registry.lookup("pointer").unwrap();
            let word = registry.lookup("machine_word").unwrap();
            assert_eq!(pointer.width(), registry.address_size(), "{}", RegistryId::from(registry));
            assert_eq!(word.width(), registry.address_size());
            assert_eq!(registry.address_size(), registry.architecture().address_size());
        }
    }

    #[test]
    fn override_correctness() {
        let arm = registry(Architecture::Arm, BE).unwrap();
        assert_eq!(arm.get(TypeName::Long), base_table(BE).get(TypeName::Int32));

        let arm64 = registry(Architecture::Arm64, BE).unwrap();
        assert_eq!(arm64.get(TypeName::Long), base_table(BE).get(TypeName::Int64));

        let mips = registry(Architecture::Mips, LE).unwrap();
        assert_eq!(mips.get(TypeName::ULong), base_table(LE).get(TypeName::UInt32));

        let mips64 = registry(Architecture::Mips64, LE).unwrap();
        assert_eq!(mips64.get(TypeName::ULong), base_table(LE).get(TypeName::UInt64));
    }

    #[test]
    fn overrides_follow_registry_order() {
        for registry in registries() {
            for (_, scalar) in registry.table().iter() {
                assert_eq!(scalar.order(), registry.order());
            }
        }
    }

    #[test]
    fn non_word_entries_pass_through() {
        for registry in registries() {
            for (name, scalar) in base_table(registry.order()).iter() {
                assert_eq!(registry.get(name), Some(scalar));
            }
        }
    }

    #[test]
    fn not_found_text() {
        let cases = [
            (Architecture::Arm, BE, "unknown ARM (big-endian) type: foo"),
            (Architecture::Arm, LE, "unknown ARM (little-endian) type: foo"),
            (Architecture::Arm64, BE, "unknown ARM64 (big-endian) type: foo"),
            (Architecture::Mips, LE, "unknown MIPS (little-endian) type: foo"),
            (Architecture::Mips64, LE, "unknown MIPS64 (little-endian) type: foo"),
            (Architecture::Mips64, BE, "unknown MIPS64 (big-endian) type: foo"),
        ];

        for (architecture, order, expected) in cases {
            let registry = registry(architecture, order).unwrap();
            assert_eq!(registry.lookup("foo").unwrap_err().to_string(), expected);
        }
    }

    #[test]
    fn lookup_is_exact() {
        let arm = default_registry(Architecture::Arm);
        assert!(arm.lookup("uint32").is_ok());
        assert_eq!(
            arm.lookup("UINT32"),
            Err(Error::TypeNotFound {
                name: "UINT32".to_string(),
                architecture: Architecture::Arm,
                order: BE,
            })
        );
        assert!(arm.lookup("uint32 ").is_err());
        assert!(lookup(arm, "").is_err());
    }

    #[test]
    fn available_orders() {
        assert!(registry(Architecture::X86, BE).is_none());
        assert!(registry(Architecture::X86_64, LE).is_some());
        assert!(registry(Architecture::Ppc64, LE).is_some());
        assert_eq!(registries().count(), 14);
        for architecture in Architecture::iter() {
            assert_eq!(default_registry(architecture).order(), architecture.default_order());
            for order in ByteOrder::iter() {
                assert_eq!(registry(architecture, order).is_some(), architecture.supports(order));
            }
        }
    }

    #[test]
    fn shared_instances() {
        let first = registry(Architecture::Mips, LE).unwrap();
        let second = default_registry(Architecture::Mips);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn architecture_names() {
        assert_eq!(Architecture::X86_64.to_string(), "X86_64");
        assert_eq!(Architecture::from_name("aarch64").unwrap(), Architecture::Arm64);
        assert_eq!(Architecture::from_name("mips").unwrap(), Architecture::Mips);
        assert_eq!(Architecture::from_name("AMD64").unwrap(), Architecture::X86_64);
        assert_eq!(
            Architecture::from_name("sparc"),
            Err(Error::UnknownIdentity("architecture 'sparc'".to_string()))
        );
    }

    #[test]
    fn registry_id() {
        let id: RegistryId = "ARM".parse().unwrap();
        assert_eq!(id, RegistryId::default_for(Architecture::Arm));
        assert_eq!(id.order, BE);

        let id: RegistryId = "x86 : le".parse().unwrap();
        assert_eq!(id.registry().unwrap().address_size(), 4);

        let id: RegistryId = "x86:be".parse().unwrap();
        assert_eq!(
            id.registry(),
            Err(Error::UnknownIdentity("no X86 (big-endian) registry".to_string()))
        );

        assert!("arm:middle".parse::<RegistryId>().is_err());
    }

    #[test]
    fn composite_helpers() {
        let mips = default_registry(Architecture::Mips);
        let addresses = mips.array("pointer", 4).unwrap();
        assert_eq!(addresses.width(), 16);

        let header = mips
            .resolve_struct(&[("magic", "uint32"), ("entry", "pointer"), ("flags", "ushort")])
            .unwrap();
        assert_eq!(header.width(), 10);
        assert_eq!(header.offset_of("flags"), Some(8));

        assert_eq!(
            mips.resolve_struct(&[("magic", "u32")]).unwrap_err().to_string(),
            "unknown MIPS (little-endian) type: u32"
        );
        assert_eq!(
            mips.resolve(TypeName::Pointer).unwrap(),
            ScalarType::uint32(LE)
        );
    }

    #[test]
    fn derive_matches_builtin() {
        for registry in registries() {
            assert_eq!(
                &TypeRegistry::derive(registry.architecture(), registry.order()),
                registry
            );
        }
    }
}
