//! Clip kernel: elementwise bounded min/max
//!
//! `clip(a, lo, hi)` returns a new array of the same dtype and shape with
//! every lane forced into `[lo, hi]` (as `min(max(a, lo), hi)`). Each bound
//! is a scalar or an array: scalar bounds cast to the array's element type,
//! array bounds must already match the array's dtype and shape. Supported
//! element types are the signed and unsigned integers, float64, and bool.

use super::dispatch::dispatch_clip;
use super::lanes::{fill_lanes, Src};
use crate::array::{BufferItem, NdArray, ScalarValue, Shape};
use crate::dtype::{ClipElement, FromElement};
use crate::error::{Error, Result};

/// One clip bound: a scalar or an array
pub enum ClipBound<'a> {
    /// Scalar bound, cast to the array's element type
    Scalar(&'a ScalarValue),
    /// Array bound, same dtype and shape as the clipped array
    Array(&'a NdArray),
}

impl ClipBound<'_> {
    fn lanes<O>(&self, routine: &'static str, a: &NdArray) -> Result<Src<O>>
    where
        O: ClipElement + FromElement + BufferItem,
    {
        match self {
            Self::Scalar(v) => v
                .to_elem::<O>()
                .map(Src::One)
                .ok_or_else(|| Error::not_implemented(routine, a.dtype(), "clip", a.dtype())),
            Self::Array(b) => {
                if b.shape() != a.shape() {
                    return Err(Error::ShapeMismatch {
                        lhs: a.shape().as_slice().to_vec(),
                        rhs: b.shape().as_slice().to_vec(),
                    });
                }
                b.values::<O>()
                    .map(|v| Src::Many(v.to_vec()))
                    .ok_or_else(|| Error::not_implemented(routine, a.dtype(), "clip", b.dtype()))
            }
        }
    }
}

/// Clip every lane of `a` into `[lo, hi]`
pub fn clip(
    routine: &'static str,
    a: &NdArray,
    lo: ClipBound<'_>,
    hi: ClipBound<'_>,
) -> Result<NdArray> {
    let len = a.numel();
    let shape: Shape = a.shape().clone();
    dispatch_clip!(a.dtype(), O => {
        let av = a
            .values::<O>()
            .ok_or_else(|| Error::not_implemented(routine, a.dtype(), "clip", a.dtype()))?;
        let lo: Src<O> = lo.lanes(routine, a)?;
        let hi: Src<O> = hi.lanes(routine, a)?;
        let out = fill_lanes(len, |i| av[i].clip_to(lo.at(i), hi.at(i)));
        Ok(NdArray::from_buffer(O::into_buffer(out), shape))
    }, Err(Error::not_implemented(routine, a.dtype(), "clip", a.dtype())))
}
