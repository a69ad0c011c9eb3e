//! Scalar operands for the array-scalar commands
//!
//! Clients send a scalar as a `(value, dtype)` string pair; the declared
//! dtype picks the accessor that parses the value, and promotion uses the
//! declared dtype, not the storage variant.

use crate::dtype::{DType, FromElement};
use crate::error::{Error, Result};
use num_bigint::BigInt;
use std::str::FromStr;

/// A parsed scalar value: a tagged union over the five storage types
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    /// Signed integer storage (all int8..int64 dtypes)
    Int(i64),
    /// Unsigned integer storage (all uint8..uint64 dtypes)
    UInt(u64),
    /// Float storage (float32/float64 dtypes)
    Real(f64),
    /// Boolean storage
    Bool(bool),
    /// Arbitrary-precision storage
    Bigint(BigInt),
}

impl ScalarValue {
    /// Parse a value string according to its declared dtype
    pub fn parse(value: &str, dtype: DType) -> Result<Self> {
        let bad = |reason: String| Error::BadArgument {
            arg: "value",
            reason,
        };
        match dtype {
            DType::Bool => match value {
                "True" | "true" => Ok(Self::Bool(true)),
                "False" | "false" => Ok(Self::Bool(false)),
                _ => Err(bad(format!("not a bool literal: {value}"))),
            },
            DType::I8 | DType::I16 | DType::I32 | DType::I64 => i64::from_str(value)
                .map(Self::Int)
                .map_err(|e| bad(format!("not an int literal: {e}"))),
            DType::U8 | DType::U16 | DType::U32 | DType::U64 => u64::from_str(value)
                .map(Self::UInt)
                .map_err(|e| bad(format!("not a uint literal: {e}"))),
            DType::F32 | DType::F64 => f64::from_str(value)
                .map(Self::Real)
                .map_err(|e| bad(format!("not a float literal: {e}"))),
            DType::BigInt => BigInt::from_str(value)
                .map(Self::Bigint)
                .map_err(|e| bad(format!("not a bigint literal: {e}"))),
            other => Err(bad(format!("no scalar accessor for dtype {other}"))),
        }
    }

    /// Signed integer accessor
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Unsigned integer accessor
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Float accessor
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Bool accessor
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Bigint accessor, widening the fixed-width variants
    ///
    /// Floats stay out: there is no exact bigint for an arbitrary float.
    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Self::Bigint(v) => Some(v.clone()),
            Self::Int(v) => Some(BigInt::from(*v)),
            Self::UInt(v) => Some(BigInt::from(*v)),
            Self::Bool(v) => Some(BigInt::from(*v as u8)),
            Self::Real(_) => None,
        }
    }

    /// Cast into a concrete element type for the non-bigint kernels
    ///
    /// `None` for bigint storage, which only the bigint kernels accept.
    pub fn to_elem<O: FromElement>(&self) -> Option<O> {
        match self {
            Self::Int(v) => Some(O::from_i64(*v)),
            Self::UInt(v) => Some(O::from_u64(*v)),
            Self::Real(v) => Some(O::from_f64(*v)),
            Self::Bool(v) => Some(O::from_bool(*v)),
            Self::Bigint(_) => None,
        }
    }

    /// Signed view used for shift amounts and exponents
    pub fn to_int_lane(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => Some(*v as i64),
            Self::Bool(v) => Some(*v as i64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_per_dtype() {
        assert_eq!(
            ScalarValue::parse("5", DType::I32).unwrap(),
            ScalarValue::Int(5)
        );
        assert_eq!(
            ScalarValue::parse("5", DType::U8).unwrap(),
            ScalarValue::UInt(5)
        );
        assert_eq!(
            ScalarValue::parse("-2.5", DType::F64).unwrap(),
            ScalarValue::Real(-2.5)
        );
        assert_eq!(
            ScalarValue::parse("True", DType::Bool).unwrap(),
            ScalarValue::Bool(true)
        );
        assert_eq!(
            ScalarValue::parse("123456789012345678901234567890", DType::BigInt).unwrap(),
            ScalarValue::Bigint("123456789012345678901234567890".parse().unwrap())
        );
        assert!(ScalarValue::parse("5", DType::Str).is_err());
        assert!(ScalarValue::parse("x", DType::I64).is_err());
    }

    #[test]
    fn test_parse_float_specials() {
        assert_eq!(
            ScalarValue::parse("inf", DType::F64).unwrap(),
            ScalarValue::Real(f64::INFINITY)
        );
    }

    #[test]
    fn test_to_elem() {
        let s = ScalarValue::Int(-3);
        assert_eq!(s.to_elem::<f64>(), Some(-3.0));
        assert_eq!(s.to_elem::<i8>(), Some(-3));
        let b = ScalarValue::Bigint(BigInt::from(7));
        assert_eq!(b.to_elem::<i64>(), None);
        assert_eq!(b.as_bigint(), Some(BigInt::from(7)));
    }
}
