use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{Error::UnknownIdentity, Result};

/// Ordering of the bytes within a multi-byte encoding.
///
/// Fixed when a [`crate::ScalarType`] is constructed and never changed afterwards. Renders as
/// `big-endian` / `little-endian`, which is the form used in lookup error messages.
///
/// # Examples
///
/// ```rust
/// use bintypes::ByteOrder;
///
/// assert_eq!(ByteOrder::BigEndian.to_string(), "big-endian");
/// assert_eq!(ByteOrder::from_name("le")?, ByteOrder::LittleEndian);
/// # Ok::<(), bintypes::Error>(())
/// ```
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
pub enum ByteOrder {
    /// Most significant byte first
    #[strum(to_string = "big-endian", serialize = "be", serialize = "big")]
    BigEndian,
    /// Least significant byte first
    #[strum(to_string = "little-endian", serialize = "le", serialize = "little")]
    LittleEndian,
}

impl ByteOrder {
    /// Byte order of the host this code is running on.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    /// The other byte order.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
        }
    }

    /// Parses a byte order from its canonical or short name, ignoring ASCII case.
    ///
    /// Accepts `big-endian`, `be`, `big`, `little-endian`, `le` and `little`.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownIdentity`] for any other input.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| UnknownIdentity(format!("byte order '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render() {
        assert_eq!(ByteOrder::BigEndian.to_string(), "big-endian");
        assert_eq!(ByteOrder::LittleEndian.to_string(), "little-endian");
        let name: &'static str = ByteOrder::LittleEndian.into();
        assert_eq!(name, "little-endian");
    }

    #[test]
    fn parse() {
        assert_eq!(ByteOrder::from_name("BE").unwrap(), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::from_name("big-endian").unwrap(), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::from_name("Little").unwrap(), ByteOrder::LittleEndian);
        assert_eq!(
            ByteOrder::from_name("middle"),
            Err(UnknownIdentity("byte order 'middle'".to_string()))
        );
    }

    #[test]
    fn opposite() {
        assert_eq!(ByteOrder::BigEndian.opposite(), ByteOrder::LittleEndian);
        assert_eq!(ByteOrder::native().opposite().opposite(), ByteOrder::native());
    }
}
