//! Elementwise binary-operation kernels for the non-bigint dtypes
//!
//! One entry point per operand shape (`vv`, `vs`, `sv`), all funneling into
//! [`bin_op`], which re-derives the promoted result type, picks the
//! algorithm family from the operand kinds, and instantiates the
//! monomorphic lane loop for the result type. A request whose result type
//! disagrees with promotion, or whose operand pair has no specialization
//! for the operator, is refused with the not-implemented template and no
//! lane is written.

use super::dispatch::{
    dispatch_bitwise, dispatch_complex, dispatch_element, dispatch_float, dispatch_float_complex,
    dispatch_int, dispatch_numeric,
};
use super::lanes::{fill_lanes, Src};
use super::numeric::{float_mod, floor_div};
use crate::array::{Buffer, BufferItem, NdArray, ScalarValue, Shape};
use crate::dtype::{
    common_dtype, common_dtype_special, div_dtype, ArithElement, BitElement, CastTo,
    CompareElement, ComplexElement, DType, DTypeKind, Element, FloatElement, FromElement,
    IntElement,
};
use crate::error::{Error, Result};
use crate::ops::{BinaryOp, OpCategory};

/// One side of a binary operation: an array or a typed scalar
pub(crate) enum Operand<'a> {
    /// Array operand
    Arr(&'a NdArray),
    /// Scalar operand with its declared dtype
    Scl(&'a ScalarValue, DType),
}

impl Operand<'_> {
    pub(crate) fn dtype(&self) -> DType {
        match self {
            Self::Arr(a) => a.dtype(),
            Self::Scl(_, dt) => *dt,
        }
    }

    /// Widen into the promoted element type
    fn cast<O: FromElement>(&self) -> Option<Src<O>> {
        match self {
            Self::Arr(a) => a.cast_lanes::<O>().map(Src::Many),
            Self::Scl(v, _) => v.to_elem::<O>().map(Src::One),
        }
    }

    /// Signed integer view, used for shift and rotate amounts
    fn int_amounts(&self) -> Option<Src<i64>> {
        match self {
            Self::Arr(a) => a.int_lanes().map(Src::Many),
            Self::Scl(v, _) => v.to_int_lane().map(Src::One),
        }
    }
}

/// Array-array kernel; operand shapes must match
pub fn bin_op_vv(
    routine: &'static str,
    l: &NdArray,
    r: &NdArray,
    et: DType,
    op: BinaryOp,
) -> Result<NdArray> {
    if l.shape() != r.shape() {
        return Err(Error::ShapeMismatch {
            lhs: l.shape().as_slice().to_vec(),
            rhs: r.shape().as_slice().to_vec(),
        });
    }
    bin_op(
        routine,
        Operand::Arr(l),
        Operand::Arr(r),
        et,
        op,
        l.shape().clone(),
        l.numel(),
    )
}

/// Array-scalar kernel
pub fn bin_op_vs(
    routine: &'static str,
    l: &NdArray,
    value: &ScalarValue,
    value_dtype: DType,
    et: DType,
    op: BinaryOp,
) -> Result<NdArray> {
    bin_op(
        routine,
        Operand::Arr(l),
        Operand::Scl(value, value_dtype),
        et,
        op,
        l.shape().clone(),
        l.numel(),
    )
}

/// Scalar-array kernel
pub fn bin_op_sv(
    routine: &'static str,
    value: &ScalarValue,
    value_dtype: DType,
    r: &NdArray,
    et: DType,
    op: BinaryOp,
) -> Result<NdArray> {
    bin_op(
        routine,
        Operand::Scl(value, value_dtype),
        Operand::Arr(r),
        et,
        op,
        r.shape().clone(),
        r.numel(),
    )
}

/// Shared kernel body for every operand shape
pub(crate) fn bin_op(
    routine: &'static str,
    l: Operand<'_>,
    r: Operand<'_>,
    et: DType,
    op: BinaryOp,
    shape: Shape,
    len: usize,
) -> Result<NdArray> {
    let lt = l.dtype();
    let rt = r.dtype();
    let reject = move || Error::not_implemented(routine, lt, op.as_str(), rt);

    // str and undef have no elementwise form at all
    if lt.kind() == DTypeKind::Other || rt.kind() == DTypeKind::Other {
        return Err(Error::unrecognized(routine, lt, rt));
    }
    if et == DType::Undef {
        return Err(reject());
    }

    match op.category() {
        OpCategory::BasicArithmetic => {
            // bool+bool has no arithmetic form; callers route it through |^&
            if lt.is_bool() && rt.is_bool() {
                return Err(reject());
            }
            if et != common_dtype(lt, rt) {
                return Err(reject());
            }
            dispatch_numeric!(et, O => {
                let a: Src<O> = l.cast().ok_or_else(reject)?;
                let b: Src<O> = r.cast().ok_or_else(reject)?;
                let out = match op {
                    BinaryOp::Add => fill_lanes(len, |i| a.at(i).add_elem(b.at(i))),
                    BinaryOp::Sub => fill_lanes(len, |i| a.at(i).sub_elem(b.at(i))),
                    BinaryOp::Mul => fill_lanes(len, |i| a.at(i).mul_elem(b.at(i))),
                    _ => unreachable!("non-arithmetic operator in arithmetic branch"),
                };
                Ok(NdArray::from_buffer(O::into_buffer(out), shape))
            }, Err(reject()))
        }

        OpCategory::TrueDivision => {
            if et != div_dtype(lt, rt) {
                return Err(reject());
            }
            dispatch_float_complex!(et, O => {
                let a: Src<O> = l.cast().ok_or_else(reject)?;
                let b: Src<O> = r.cast().ok_or_else(reject)?;
                let out = fill_lanes(len, |i| a.at(i) / b.at(i));
                Ok(NdArray::from_buffer(O::into_buffer(out), shape))
            }, Err(reject()))
        }

        OpCategory::Comparison => {
            if et != DType::Bool {
                return Err(reject());
            }
            // compare in the common type; complex lanes compare real parts
            let ct = common_dtype(lt, rt);
            if ct == DType::Undef {
                return Err(reject());
            }
            dispatch_element!(ct, O => {
                let a: Src<O> = l.cast().ok_or_else(reject)?;
                let b: Src<O> = r.cast().ok_or_else(reject)?;
                let out: Vec<bool> = match op {
                    BinaryOp::Eq => fill_lanes(len, |i| a.at(i).eq_lanes(b.at(i))),
                    BinaryOp::Ne => fill_lanes(len, |i| !a.at(i).eq_lanes(b.at(i))),
                    BinaryOp::Lt => fill_lanes(len, |i| a.at(i).lt_lanes(b.at(i))),
                    BinaryOp::Gt => fill_lanes(len, |i| b.at(i).lt_lanes(a.at(i))),
                    BinaryOp::Le => fill_lanes(len, |i| a.at(i).le_lanes(b.at(i))),
                    BinaryOp::Ge => fill_lanes(len, |i| b.at(i).le_lanes(a.at(i))),
                    _ => unreachable!("non-comparison operator in comparison branch"),
                };
                Ok(NdArray::from_buffer(Buffer::Bool(out), shape))
            }, Err(reject()))
        }

        OpCategory::BitwiseLogic => {
            if !(lt.is_int() || lt.is_bool()) || !(rt.is_int() || rt.is_bool()) {
                return Err(reject());
            }
            if et != common_dtype(lt, rt) {
                return Err(reject());
            }
            dispatch_bitwise!(et, O => {
                let a: Src<O> = l.cast().ok_or_else(reject)?;
                let b: Src<O> = r.cast().ok_or_else(reject)?;
                let out = match op {
                    BinaryOp::And => fill_lanes(len, |i| a.at(i).bit_and(b.at(i))),
                    BinaryOp::Or => fill_lanes(len, |i| a.at(i).bit_or(b.at(i))),
                    BinaryOp::Xor => fill_lanes(len, |i| a.at(i).bit_xor(b.at(i))),
                    _ => unreachable!("non-bitwise operator in bitwise branch"),
                };
                Ok(NdArray::from_buffer(O::into_buffer(out), shape))
            }, Err(reject()))
        }

        OpCategory::BitwiseShift => {
            if !(lt.is_int() || lt.is_bool()) || !(rt.is_int() || rt.is_bool()) {
                return Err(reject());
            }
            // special-bool promotion; a mixed 64-bit pair promotes to real,
            // which shifts cannot produce
            if et != common_dtype_special(lt, rt) || !et.is_int() {
                return Err(reject());
            }
            let amounts = r.int_amounts().ok_or_else(reject)?;
            dispatch_int!(et, O => {
                let a: Src<O> = l.cast().ok_or_else(reject)?;
                // scalar amount: hoist the range guard out of the loop
                if let Some(s) = amounts.splat() {
                    if !(0..64).contains(&s) {
                        let zeros = vec![O::zero(); len];
                        return Ok(NdArray::from_buffer(O::into_buffer(zeros), shape));
                    }
                }
                let out = match op {
                    BinaryOp::Shl => fill_lanes(len, |i| {
                        let s = amounts.at(i);
                        if (0..64).contains(&s) {
                            a.at(i).shl_or_zero(s as u32)
                        } else {
                            O::zero()
                        }
                    }),
                    BinaryOp::Shr => fill_lanes(len, |i| {
                        let s = amounts.at(i);
                        if (0..64).contains(&s) {
                            a.at(i).shr_or_zero(s as u32)
                        } else {
                            O::zero()
                        }
                    }),
                    _ => unreachable!("non-shift operator in shift branch"),
                };
                Ok(NdArray::from_buffer(O::into_buffer(out), shape))
            }, Err(reject()))
        }

        OpCategory::BitwiseRot => {
            if !lt.is_int() || !rt.is_int() {
                return Err(reject());
            }
            if et != common_dtype(lt, rt) || !et.is_int() {
                return Err(reject());
            }
            let amounts = r.int_amounts().ok_or_else(reject)?;
            dispatch_int!(et, O => {
                let a: Src<O> = l.cast().ok_or_else(reject)?;
                let bits = <O as IntElement>::BITS as i64;
                let out = match op {
                    BinaryOp::Rotl => fill_lanes(len, |i| {
                        a.at(i).rotl(amounts.at(i).rem_euclid(bits) as u32)
                    }),
                    BinaryOp::Rotr => fill_lanes(len, |i| {
                        a.at(i).rotr(amounts.at(i).rem_euclid(bits) as u32)
                    }),
                    _ => unreachable!("non-rotate operator in rotate branch"),
                };
                Ok(NdArray::from_buffer(O::into_buffer(out), shape))
            }, Err(reject()))
        }

        OpCategory::FancyArithmetic => {
            if et != common_dtype_special(lt, rt) {
                return Err(reject());
            }
            if lt.is_complex() || rt.is_complex() {
                // complex supports ** only; // and % have no complex form
                if op != BinaryOp::Pow {
                    return Err(reject());
                }
                dispatch_complex!(et, O => {
                    let a: Src<O> = l.cast().ok_or_else(reject)?;
                    let b: Src<O> = r.cast().ok_or_else(reject)?;
                    let out = fill_lanes(len, |i| a.at(i).powc_elem(b.at(i)));
                    Ok(NdArray::from_buffer(O::into_buffer(out), shape))
                }, Err(reject()))
            } else if lt.is_float() || rt.is_float() {
                dispatch_float!(et, O => {
                    let a: Src<O> = l.cast().ok_or_else(reject)?;
                    let b: Src<O> = r.cast().ok_or_else(reject)?;
                    let out = match op {
                        BinaryOp::FloorDiv => fill_lanes(len, |i| floor_div(a.at(i), b.at(i))),
                        BinaryOp::Mod => fill_lanes(len, |i| float_mod(a.at(i), b.at(i))),
                        BinaryOp::Pow => fill_lanes(len, |i| a.at(i).powf_elem(b.at(i))),
                        _ => unreachable!("non-fancy operator in fancy branch"),
                    };
                    Ok(NdArray::from_buffer(O::into_buffer(out), shape))
                }, Err(reject()))
            } else {
                // integer and bool operands; bool behaves as a signed i8
                let l_signed = lt.is_signed_int() || lt.is_bool();
                let r_signed = rt.is_signed_int() || rt.is_bool();
                if l_signed != r_signed {
                    // mixed signedness: real-valued helpers, cast back
                    if op == BinaryOp::Pow {
                        return Err(reject());
                    }
                    dispatch_element!(et, O => {
                        let a: Src<f64> = l.cast().ok_or_else(reject)?;
                        let b: Src<f64> = r.cast().ok_or_else(reject)?;
                        let out: Vec<O> = match op {
                            BinaryOp::FloorDiv => {
                                fill_lanes(len, |i| {
                                    FromElement::from_f64(floor_div(a.at(i), b.at(i)))
                                })
                            }
                            BinaryOp::Mod => {
                                fill_lanes(len, |i| {
                                    FromElement::from_f64(float_mod(a.at(i), b.at(i)))
                                })
                            }
                            _ => unreachable!("non-fancy operator in fancy branch"),
                        };
                        Ok(NdArray::from_buffer(O::into_buffer(out), shape))
                    }, Err(reject()))
                } else {
                    dispatch_int!(et, O => {
                        let a: Src<O> = l.cast().ok_or_else(reject)?;
                        let b: Src<O> = r.cast().ok_or_else(reject)?;
                        let out = match op {
                            BinaryOp::FloorDiv => {
                                fill_lanes(len, |i| a.at(i).div_or_zero(b.at(i)))
                            }
                            BinaryOp::Mod => fill_lanes(len, |i| a.at(i).rem_or_zero(b.at(i))),
                            BinaryOp::Pow => {
                                if <O as IntElement>::SIGNED
                                    && b.any(len, |x| x.is_negative_int())
                                {
                                    return Err(Error::NegativeExponent { base: lt });
                                }
                                fill_lanes(len, |i| {
                                    a.at(i).pow_wrap(CastTo::<u64>::cast(b.at(i)))
                                })
                            }
                            _ => unreachable!("non-fancy operator in fancy branch"),
                        };
                        Ok(NdArray::from_buffer(O::into_buffer(out), shape))
                    }, Err(reject()))
                }
            }
        }
    }
}
