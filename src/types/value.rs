use std::fmt;

/// A decoded value, or a value to be encoded.
///
/// Integers of every supported kind and width fit losslessly in `i128`, so a single variant
/// carries them all; range checking happens when the value is packed into a concrete
/// [`crate::ScalarType`]. Composite types exchange a [`Value::List`] holding one value per array
/// element or struct field, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value of any signedness
    Int(i128),
    /// IEEE-754 floating point value
    Float(f64),
    /// Array elements or struct fields, in declared order
    List(Vec<Value>),
}

impl Value {
    /// Returns the integer value if it is an `Int` that fits into `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Returns the integer value if it is an `Int` that fits into `u64`.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers are converted, possibly losing precision.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            Value::List(_) => None,
        }
    }

    /// Returns the members of a `List`.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns `true` for `Int` and `Float` values.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::List(values) => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i128::from(value))
                }
            }
        )*
    };
}

value_from_int!(i8, u8, i16, u16, i32, u32, i64, u64);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}
