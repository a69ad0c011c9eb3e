//! Server-side array entries
//!
//! An [`NdArray`] is what the symbol table stores: an element type tag, a
//! shape, and the element buffer. Entries are immutable in dtype and shape
//! after creation; only the compound-assign kernels mutate elements.

mod buffer;
mod scalar;

pub use buffer::{Buffer, BufferItem};
pub use scalar::ScalarValue;

use crate::dtype::{DType, FromElement};
use crate::error::{Error, Result};
use num_bigint::BigInt;
use smallvec::SmallVec;
use std::fmt;

/// Stack allocation threshold for dimensions; most arrays are rank <= 4
const STACK_DIMS: usize = 4;

/// Shape of an array: a tuple of extents
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Shape(SmallVec<[usize; STACK_DIMS]>);

impl Shape {
    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.0.iter().product()
    }

    /// View as a slice of extents
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self(SmallVec::from_slice(dims))
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(dims))
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self(SmallVec::from_slice(&dims))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{d}")?;
        }
        if self.0.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

/// A server-side array: dtype tag, shape, and the element buffer
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray {
    shape: Shape,
    data: Buffer,
}

impl NdArray {
    /// Create an array from a typed vector of lanes
    ///
    /// Fails with [`Error::ShapeMismatch`] when the lane count does not
    /// match the shape.
    pub fn from_vec<T: BufferItem>(data: Vec<T>, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        if data.len() != shape.numel() {
            return Err(Error::ShapeMismatch {
                lhs: vec![data.len()],
                rhs: shape.as_slice().to_vec(),
            });
        }
        Ok(Self {
            shape,
            data: T::into_buffer(data),
        })
    }

    /// Create a bigint array with an optional wrap width
    pub fn bigint_from_vec(
        data: Vec<BigInt>,
        shape: impl Into<Shape>,
        max_bits: Option<u32>,
    ) -> Result<Self> {
        let shape = shape.into();
        if data.len() != shape.numel() {
            return Err(Error::ShapeMismatch {
                lhs: vec![data.len()],
                rhs: shape.as_slice().to_vec(),
            });
        }
        Ok(Self {
            shape,
            data: Buffer::Bigint { data, max_bits },
        })
    }

    /// Create an array directly from a buffer (kernel result path)
    pub(crate) fn from_buffer(data: Buffer, shape: Shape) -> Self {
        debug_assert_eq!(data.len(), shape.numel());
        Self { shape, data }
    }

    /// Element type tag
    #[inline]
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Shape of the array
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of lanes
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Wrap width of a bigint array; `None` for unbounded or non-bigint
    pub fn max_bits(&self) -> Option<u32> {
        match &self.data {
            Buffer::Bigint { max_bits, .. } => *max_bits,
            _ => None,
        }
    }

    /// Typed view of the lanes, `None` when the dtype does not match
    #[inline]
    pub fn values<T: BufferItem>(&self) -> Option<&[T]> {
        T::slice(&self.data)
    }

    /// Bigint lanes, `None` for non-bigint arrays
    pub fn bigint_values(&self) -> Option<&[BigInt]> {
        match &self.data {
            Buffer::Bigint { data, .. } => Some(data.as_slice()),
            _ => None,
        }
    }

    /// The raw buffer
    #[inline]
    pub fn buffer(&self) -> &Buffer {
        &self.data
    }

    /// Take the buffer out of the array (kernel result path)
    pub(crate) fn into_buffer(self) -> Buffer {
        self.data
    }

    /// Replace the buffer in place, keeping dtype and shape
    ///
    /// Used by the compound-assign kernels after computing into a fresh
    /// buffer; the entry keeps its identity in the symbol table.
    pub(crate) fn replace_buffer(&mut self, data: Buffer) {
        debug_assert_eq!(data.dtype(), self.data.dtype());
        debug_assert_eq!(data.len(), self.data.len());
        self.data = data;
    }

    /// Cast every lane into the element type `O`
    ///
    /// This is the operand-widening step of the kernels: the promoted
    /// result type is picked at runtime and both operands are converted
    /// into it before the monomorphic lane loop runs. Returns `None` for
    /// bigint and string buffers, which have their own kernel family.
    pub fn cast_lanes<O: FromElement>(&self) -> Option<Vec<O>> {
        Some(match &self.data {
            Buffer::Bool(v) => v.iter().map(|&x| O::from_bool(x)).collect(),
            Buffer::U8(v) => v.iter().map(|&x| O::from_u8(x)).collect(),
            Buffer::U16(v) => v.iter().map(|&x| O::from_u16(x)).collect(),
            Buffer::U32(v) => v.iter().map(|&x| O::from_u32(x)).collect(),
            Buffer::U64(v) => v.iter().map(|&x| O::from_u64(x)).collect(),
            Buffer::I8(v) => v.iter().map(|&x| O::from_i8(x)).collect(),
            Buffer::I16(v) => v.iter().map(|&x| O::from_i16(x)).collect(),
            Buffer::I32(v) => v.iter().map(|&x| O::from_i32(x)).collect(),
            Buffer::I64(v) => v.iter().map(|&x| O::from_i64(x)).collect(),
            Buffer::F32(v) => v.iter().map(|&x| O::from_f32(x)).collect(),
            Buffer::F64(v) => v.iter().map(|&x| O::from_f64(x)).collect(),
            Buffer::C64(v) => v.iter().map(|&x| O::from_c64(x)).collect(),
            Buffer::C128(v) => v.iter().map(|&x| O::from_c128(x)).collect(),
            Buffer::Bigint { .. } | Buffer::Str(_) => return None,
        })
    }

    /// Widen every lane into a bigint value
    ///
    /// Supported for bigint, integer, and bool arrays (the operand set of
    /// the bigint kernels); `None` otherwise.
    pub fn bigint_lanes(&self) -> Option<Vec<BigInt>> {
        Some(match &self.data {
            Buffer::Bigint { data, .. } => data.clone(),
            Buffer::Bool(v) => v.iter().map(|&x| BigInt::from(x as u8)).collect(),
            Buffer::U8(v) => v.iter().map(|&x| BigInt::from(x)).collect(),
            Buffer::U16(v) => v.iter().map(|&x| BigInt::from(x)).collect(),
            Buffer::U32(v) => v.iter().map(|&x| BigInt::from(x)).collect(),
            Buffer::U64(v) => v.iter().map(|&x| BigInt::from(x)).collect(),
            Buffer::I8(v) => v.iter().map(|&x| BigInt::from(x)).collect(),
            Buffer::I16(v) => v.iter().map(|&x| BigInt::from(x)).collect(),
            Buffer::I32(v) => v.iter().map(|&x| BigInt::from(x)).collect(),
            Buffer::I64(v) => v.iter().map(|&x| BigInt::from(x)).collect(),
            _ => return None,
        })
    }

    /// Signed-integer view of the lanes, used for shift amounts and bigint
    /// exponents; `None` for non-integral buffers
    pub fn int_lanes(&self) -> Option<Vec<i64>> {
        match &self.data {
            Buffer::Bool(_)
            | Buffer::U8(_)
            | Buffer::U16(_)
            | Buffer::U32(_)
            | Buffer::U64(_)
            | Buffer::I8(_)
            | Buffer::I16(_)
            | Buffer::I32(_)
            | Buffer::I64(_) => self.cast_lanes::<i64>(),
            _ => None,
        }
    }
}
