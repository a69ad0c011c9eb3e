//! Typed element storage for server-side arrays
//!
//! `Buffer` is a tagged union over one `Vec` per dtype. An enum (rather
//! than an erased byte buffer) keeps the bigint arm, whose elements own
//! heap storage and are not `Copy`, in the same representation as the
//! dense arms, and lets kernels pattern-match their way to a typed slice.

use crate::dtype::{Complex64, Complex128, DType, Element};
use num_bigint::BigInt;

/// Element storage for one array
#[derive(Clone, Debug, PartialEq)]
pub enum Buffer {
    /// Boolean lanes
    Bool(Vec<bool>),
    /// 8-bit unsigned lanes
    U8(Vec<u8>),
    /// 16-bit unsigned lanes
    U16(Vec<u16>),
    /// 32-bit unsigned lanes
    U32(Vec<u32>),
    /// 64-bit unsigned lanes
    U64(Vec<u64>),
    /// 8-bit signed lanes
    I8(Vec<i8>),
    /// 16-bit signed lanes
    I16(Vec<i16>),
    /// 32-bit signed lanes
    I32(Vec<i32>),
    /// 64-bit signed lanes
    I64(Vec<i64>),
    /// 32-bit float lanes
    F32(Vec<f32>),
    /// 64-bit float lanes
    F64(Vec<f64>),
    /// complex64 lanes
    C64(Vec<Complex64>),
    /// complex128 lanes
    C128(Vec<Complex128>),
    /// Arbitrary-precision integer lanes with the optional wrap width
    Bigint {
        /// Lane values
        data: Vec<BigInt>,
        /// When set, every arithmetic result is reduced modulo 2^max_bits
        max_bits: Option<u32>,
    },
    /// String lanes (symbol-table payloads; no elementwise kernels)
    Str(Vec<String>),
}

impl Buffer {
    /// Element type tag of this buffer
    pub fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::U8(_) => DType::U8,
            Self::U16(_) => DType::U16,
            Self::U32(_) => DType::U32,
            Self::U64(_) => DType::U64,
            Self::I8(_) => DType::I8,
            Self::I16(_) => DType::I16,
            Self::I32(_) => DType::I32,
            Self::I64(_) => DType::I64,
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
            Self::C64(_) => DType::Complex64,
            Self::C128(_) => DType::Complex128,
            Self::Bigint { .. } => DType::BigInt,
            Self::Str(_) => DType::Str,
        }
    }

    /// Number of lanes
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::U64(v) => v.len(),
            Self::I8(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::C64(v) => v.len(),
            Self::C128(v) => v.len(),
            Self::Bigint { data, .. } => data.len(),
            Self::Str(v) => v.len(),
        }
    }

    /// True when the buffer holds no lanes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Element types that live in a dense `Buffer` arm
///
/// Connects a concrete element type to its enum arm; `BigInt` and `String`
/// lanes are intentionally outside (their kernels match the arm directly).
pub trait BufferItem: Element {
    /// Wrap a vector of lanes into a buffer
    fn into_buffer(data: Vec<Self>) -> Buffer;

    /// Typed view of a buffer, `None` when the arm does not match
    fn slice(buf: &Buffer) -> Option<&[Self]>;

    /// Typed mutable view of a buffer
    fn slice_mut(buf: &mut Buffer) -> Option<&mut [Self]>;
}

macro_rules! impl_buffer_item {
    ($($ty:ty => $arm:ident),+ $(,)?) => {
        $(
            impl BufferItem for $ty {
                #[inline]
                fn into_buffer(data: Vec<Self>) -> Buffer {
                    Buffer::$arm(data)
                }

                #[inline]
                fn slice(buf: &Buffer) -> Option<&[Self]> {
                    match buf {
                        Buffer::$arm(v) => Some(v.as_slice()),
                        _ => None,
                    }
                }

                #[inline]
                fn slice_mut(buf: &mut Buffer) -> Option<&mut [Self]> {
                    match buf {
                        Buffer::$arm(v) => Some(v.as_mut_slice()),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_buffer_item! {
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Complex64 => C64,
    Complex128 => C128,
}
