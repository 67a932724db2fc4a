use std::fmt;

/// A decoded value of any catalogue type.
///
/// Produced by [`AnyDecoder`](crate::AnyDecoder) when the decoder is only
/// known at runtime. Integers widen to 64 bits, floats to `f64`; both
/// widenings are exact.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Value>),
}

impl Value {
    /// The value as a signed integer, if it is an integer that fits.
    ///
    /// Used to feed a decoded count or length back into a decoder.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($variant:ident, $wide:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(<$wide>::from(v))
                }
            }
        )+
    };
}

value_from!(Int, i64: i8, i16, i32, i64);
value_from!(UInt, u64: u8, u16, u32, u64);
value_from!(Float, f64: f32, f64);

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

/// Human-readable rendering used by the CLI.
///
/// ```text
///   Int / UInt / Float   42   -1   65504   inf   NaN
///   Bytes                <01 f0 ff>
///   Text                 "てすと!"
///   Array                [0, 127, -1]
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bytes(bytes) => {
                f.write_str("<")?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{b:02x}")?;
                }
                f.write_str(">")
            }
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_conversions() {
        assert_eq!(Value::from(-1i8), Value::Int(-1));
        assert_eq!(Value::from(u32::MAX), Value::UInt(4_294_967_295));
        assert_eq!(Value::from(65504.0f32), Value::Float(65504.0));
    }

    #[test]
    fn integer_view() {
        assert_eq!(Value::Int(-3).as_i64(), Some(-3));
        assert_eq!(Value::UInt(7).as_i64(), Some(7));
        assert_eq!(Value::UInt(u64::MAX).as_i64(), None);
        assert_eq!(Value::Float(1.0).as_i64(), None);
    }

    #[test]
    fn display_scalars() {
        assert_eq!(Value::Int(-1).to_string(), "-1");
        assert_eq!(Value::UInt(255).to_string(), "255");
        assert_eq!(Value::Float(-2.0).to_string(), "-2");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn display_composites() {
        assert_eq!(Value::Bytes(vec![0x01, 0xF0, 0xFF]).to_string(), "<01 f0 ff>");
        assert_eq!(Value::Bytes(vec![]).to_string(), "<>");
        assert_eq!(Value::Text("a\"b".into()).to_string(), r#""a\"b""#);
        let array = Value::Array(vec![Value::Int(0), Value::Int(127), Value::Int(-1)]);
        assert_eq!(array.to_string(), "[0, 127, -1]");
    }
}
