//! Compound-assign kernels: `a op= b` mutating the left entry
//!
//! Legality is codified once: the category-promoted type of `(lt, rt)` must
//! equal the left dtype, so an assignment that would widen (sign change,
//! width change, int to real) is refused before any lane is touched. The
//! kernel computes into a fresh buffer and swaps it into the entry, so a
//! failed precondition (illegal pair, negative exponent) leaves the operand
//! untouched.

use super::bigint::bigint_bin_op;
use super::binop::{bin_op, Operand};
use crate::array::{NdArray, ScalarValue};
use crate::dtype::{common_dtype, common_dtype_special, div_dtype, DType};
use crate::error::{Error, Result};
use crate::ops::{BinaryOp, OpCategory};

/// Array-array compound assignment
pub fn op_eq_vv(
    routine: &'static str,
    l: &mut NdArray,
    r: &NdArray,
    op: BinaryOp,
) -> Result<()> {
    if l.shape() != r.shape() {
        return Err(Error::ShapeMismatch {
            lhs: l.shape().as_slice().to_vec(),
            rhs: r.shape().as_slice().to_vec(),
        });
    }
    op_eq(routine, l, Operand::Arr(r), op)
}

/// Array-scalar compound assignment
pub fn op_eq_vs(
    routine: &'static str,
    l: &mut NdArray,
    value: &ScalarValue,
    value_dtype: DType,
    op: BinaryOp,
) -> Result<()> {
    op_eq(routine, l, Operand::Scl(value, value_dtype), op)
}

fn op_eq(routine: &'static str, l: &mut NdArray, r: Operand<'_>, op: BinaryOp) -> Result<()> {
    let lt = l.dtype();
    let rt = r.dtype();
    let reject = move || Error::not_implemented(routine, lt, op.as_str(), rt);

    // only the arithmetic and bitwise-logic operators have assign forms
    match op.category() {
        OpCategory::BasicArithmetic
        | OpCategory::TrueDivision
        | OpCategory::FancyArithmetic
        | OpCategory::BitwiseLogic => {}
        _ => return Err(reject()),
    }

    if lt == DType::BigInt {
        // the entry keeps its own width; an operand carrying a different
        // one cannot be assigned into it
        let rmb = match &r {
            Operand::Arr(a) => a.max_bits(),
            Operand::Scl(..) => None,
        };
        if rmb.is_some() && rmb != l.max_bits() {
            return Err(Error::BadArgument {
                arg: "b",
                reason: format!("max_bits mismatch: {:?} vs {:?}", l.max_bits(), rmb),
            });
        }
        let out = {
            let lref: &NdArray = l;
            bigint_bin_op(
                routine,
                Operand::Arr(lref),
                r,
                op,
                lref.shape().clone(),
                lref.numel(),
            )?
        };
        l.replace_buffer(out.into_buffer());
        return Ok(());
    }

    if rt == DType::BigInt {
        return Err(reject());
    }

    let expect = match op.category() {
        OpCategory::TrueDivision => div_dtype(lt, rt),
        OpCategory::FancyArithmetic => common_dtype_special(lt, rt),
        _ => common_dtype(lt, rt),
    };
    if expect != lt {
        return Err(reject());
    }

    let out = {
        let lref: &NdArray = l;
        bin_op(
            routine,
            Operand::Arr(lref),
            r,
            lt,
            op,
            lref.shape().clone(),
            lref.numel(),
        )?
    };
    l.replace_buffer(out.into_buffer());
    Ok(())
}
