//! Data type system for arrayd arrays
//!
//! This module provides the `DType` enum representing all element types the
//! server understands, along with NumPy-style type promotion rules and the
//! `Element` trait connecting dtypes to concrete Rust types.

mod complex;
mod element;
mod promotion;

pub use complex::{Complex64, Complex128};
pub use element::{
    ArithElement, BitElement, CastTo, ClipElement, CompareElement, ComplexElement, Element,
    FloatElement, FromElement, IntElement,
};
pub use promotion::{
    common_dtype, common_dtype_special, div_dtype, promote_to_next_complex,
    promote_to_next_float, promote_to_next_signed,
};

use std::fmt;

/// Element types supported by server-side arrays
///
/// Using an enum (rather than generics) allows runtime type selection from
/// client requests and mixed-type binary operations; kernels monomorphize
/// over the concrete type once the result dtype is known.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// Boolean
    Bool,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
    /// Complex with f32 real and imaginary parts
    Complex64,
    /// Complex with f64 real and imaginary parts
    Complex128,
    /// Arbitrary-precision integer, optionally reduced modulo 2^max_bits
    BigInt,
    /// UTF-8 string (symbol table only; no elementwise kernels)
    Str,
    /// Sentinel for unknown dtype strings
    Undef,
}

/// Scalar-kind classifier used by the promotion algebra
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DTypeKind {
    /// Signed or unsigned fixed-width integers, and bigint
    Integer,
    /// IEEE floating point
    Float,
    /// Complex floating point
    Complex,
    /// Boolean
    Bool,
    /// Strings and the undefined sentinel
    Other,
}

impl DType {
    /// In-memory footprint of one element in bytes
    ///
    /// `BigInt` reports a nominal estimate of 16; `Str` and `Undef` report 0.
    #[inline]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::Bool | Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 | Self::Complex64 => 8,
            Self::Complex128 | Self::BigInt => 16,
            Self::Str | Self::Undef => 0,
        }
    }

    /// Scalar-kind classifier
    #[inline]
    pub const fn kind(self) -> DTypeKind {
        match self {
            Self::Bool => DTypeKind::Bool,
            Self::U8
            | Self::U16
            | Self::U32
            | Self::U64
            | Self::I8
            | Self::I16
            | Self::I32
            | Self::I64
            | Self::BigInt => DTypeKind::Integer,
            Self::F32 | Self::F64 => DTypeKind::Float,
            Self::Complex64 | Self::Complex128 => DTypeKind::Complex,
            Self::Str | Self::Undef => DTypeKind::Other,
        }
    }

    /// Returns true if this is a signed fixed-width integer type
    #[inline]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Returns true if this is an unsigned fixed-width integer type
    #[inline]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    /// Returns true if this is any fixed-width integer type
    #[inline]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Returns true if this is a complex type
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Returns true if this is the boolean type
    #[inline]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Wire name as clients spell it (NumPy spelling)
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::BigInt => "bigint",
            Self::Str => "str",
            Self::Undef => "undef",
        }
    }

    /// Parse a wire name; unknown strings map to `Undef`
    pub fn from_name(s: &str) -> Self {
        match s {
            "bool" => Self::Bool,
            "uint8" => Self::U8,
            "uint16" => Self::U16,
            "uint32" => Self::U32,
            "uint64" => Self::U64,
            "int8" => Self::I8,
            "int16" => Self::I16,
            "int32" => Self::I32,
            "int64" => Self::I64,
            "float32" => Self::F32,
            "float64" => Self::F64,
            "complex64" => Self::Complex64,
            "complex128" => Self::Complex128,
            "bigint" => Self::BigInt,
            "str" => Self::Str,
            _ => Self::Undef,
        }
    }

    /// Message-template spelling, e.g. `Int64` in the negative-exponent error
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::U8 => "UInt8",
            Self::U16 => "UInt16",
            Self::U32 => "UInt32",
            Self::U64 => "UInt64",
            Self::I8 => "Int8",
            Self::I16 => "Int16",
            Self::I32 => "Int32",
            Self::I64 => "Int64",
            Self::F32 => "Float32",
            Self::F64 => "Float64",
            Self::Complex64 => "Complex64",
            Self::Complex128 => "Complex128",
            Self::BigInt => "BigInt",
            Self::Str => "Str",
            Self::Undef => "Undef",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The operand with the greater byte size; left on tie
#[inline]
pub fn max_dtype(a: DType, b: DType) -> DType {
    if b.byte_size() > a.byte_size() {
        b
    } else {
        a
    }
}
