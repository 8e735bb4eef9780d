use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Every symbolic type name a registry can bind.
///
/// The set is closed: a string that does not parse into a `TypeName` can never be found in any
/// registry. Parsing is exact and case-sensitive (`"uint32"` parses, `"UINT32"` does not).
///
/// # Examples
///
/// ```rust
/// use bintypes::TypeName;
///
/// assert_eq!("machine_word".parse::<TypeName>().ok(), Some(TypeName::MachineWord));
/// assert_eq!(TypeName::ULongLong.to_string(), "ulong_long");
/// assert!("Int32".parse::<TypeName>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum TypeName {
    /// Signed 8-bit integer
    #[strum(serialize = "int8")]
    Int8,
    /// Unsigned 8-bit integer
    #[strum(serialize = "uint8")]
    UInt8,
    /// Signed 16-bit integer
    #[strum(serialize = "int16")]
    Int16,
    /// Unsigned 16-bit integer
    #[strum(serialize = "uint16")]
    UInt16,
    /// Signed 32-bit integer
    #[strum(serialize = "int32")]
    Int32,
    /// Unsigned 32-bit integer
    #[strum(serialize = "uint32")]
    UInt32,
    /// Signed 64-bit integer
    #[strum(serialize = "int64")]
    Int64,
    /// Unsigned 64-bit integer
    #[strum(serialize = "uint64")]
    UInt64,
    /// IEEE-754 binary32
    #[strum(serialize = "float32")]
    Float32,
    /// IEEE-754 binary64
    #[strum(serialize = "float64")]
    Float64,
    /// C `long`, as wide as the machine word
    #[strum(serialize = "long")]
    Long,
    /// C `unsigned long`, as wide as the machine word
    #[strum(serialize = "ulong")]
    ULong,
    /// The architecture's natural unsigned integer
    #[strum(serialize = "machine_word")]
    MachineWord,
    /// An address, as wide as the machine word
    #[strum(serialize = "pointer")]
    Pointer,
    /// Alias of `uint8`
    #[strum(serialize = "byte")]
    Byte,
    /// Alias of `int8`
    #[strum(serialize = "char")]
    Char,
    /// Alias of `uint8`
    #[strum(serialize = "uchar")]
    UChar,
    /// Alias of `int16`
    #[strum(serialize = "short")]
    Short,
    /// Alias of `uint16`
    #[strum(serialize = "ushort")]
    UShort,
    /// Alias of `int32`
    #[strum(serialize = "int")]
    Int,
    /// Alias of `uint32`
    #[strum(serialize = "uint")]
    UInt,
    /// Alias of `int64`
    #[strum(serialize = "long_long")]
    LongLong,
    /// Alias of `uint64`
    #[strum(serialize = "ulong_long")]
    ULongLong,
    /// Alias of `uint16`
    #[strum(serialize = "word")]
    Word,
    /// Alias of `uint32`
    #[strum(serialize = "dword")]
    DWord,
    /// Alias of `uint64`
    #[strum(serialize = "qword")]
    QWord,
    /// Alias of `float32`
    #[strum(serialize = "float")]
    Float,
    /// Alias of `float64`
    #[strum(serialize = "double")]
    Double,
}

impl TypeName {
    /// Returns `true` for the names whose width depends on the architecture.
    ///
    /// These are exactly the names an architecture registry overrides: `long`, `ulong`,
    /// `machine_word` and `pointer`.
    #[must_use]
    pub const fn is_word_sized(self) -> bool {
        matches!(
            self,
            TypeName::Long | TypeName::ULong | TypeName::MachineWord | TypeName::Pointer
        )
    }

    /// The symbolic name as a static string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parse_round_trip() {
        for name in TypeName::iter() {
            assert_eq!(name.as_str().parse::<TypeName>().unwrap(), name);
            assert_eq!(name.to_string(), name.as_str());
        }
    }

    #[test]
    fn case_sensitive() {
        assert!("Pointer".parse::<TypeName>().is_err());
        assert!("POINTER".parse::<TypeName>().is_err());
        assert!(" pointer".parse::<TypeName>().is_err());
        assert!("pointer".parse::<TypeName>().is_ok());
    }

    #[test]
    fn word_sized() {
        let word_sized: Vec<_> = TypeName::iter().filter(|name| name.is_word_sized()).collect();
        assert_eq!(
            word_sized,
            [
                TypeName::Long,
                TypeName::ULong,
                TypeName::MachineWord,
                TypeName::Pointer
            ]
        );
    }
}
