//! Command handlers and the registry the embedding server registers
//!
//! Every handler parses its argument map, resolves operands against the
//! symbol table, derives the result dtype, routes to a kernel family
//! (bigint operands go to the bigint kernels before promotion), and maps
//! any [`Error`] onto an ERROR reply carrying the wire template.

use super::message::{MsgArgs, Reply};
use super::symtab::SymbolTable;
use crate::array::{NdArray, ScalarValue};
use crate::dtype::{common_dtype, common_dtype_special, div_dtype, DType};
use crate::error::{Error, Result};
use crate::kernels::{
    bigint_bin_op_sv, bigint_bin_op_vs, bigint_bin_op_vv, bin_op_sv, bin_op_vs, bin_op_vv, clip,
    op_eq_vs, op_eq_vv, ClipBound,
};
use crate::ops::{BinaryOp, OpCategory};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A registered command handler
pub type Handler = fn(&MsgArgs, &SymbolTable) -> Reply;

/// The name-to-handler registry of this crate's commands
pub fn command_table() -> HashMap<&'static str, Handler> {
    HashMap::from([
        ("binopvv", binopvv_msg as Handler),
        ("binopvs", binopvs_msg as Handler),
        ("binopsv", binopsv_msg as Handler),
        ("opeqvv", opeqvv_msg as Handler),
        ("opeqvs", opeqvs_msg as Handler),
        ("clip", clip_msg as Handler),
    ])
}

/// Result element type of `lt op rt` under the category's promotion rule
pub fn result_dtype(lt: DType, rt: DType, op: BinaryOp) -> DType {
    match op.category() {
        OpCategory::Comparison => DType::Bool,
        OpCategory::TrueDivision => div_dtype(lt, rt),
        OpCategory::FancyArithmetic | OpCategory::BitwiseShift => common_dtype_special(lt, rt),
        _ => common_dtype(lt, rt),
    }
}

fn run(
    routine: &'static str,
    f: fn(&MsgArgs, &SymbolTable) -> Result<Reply>,
    args: &MsgArgs,
    st: &SymbolTable,
) -> Reply {
    match f(args, st) {
        Ok(reply) => reply,
        Err(e) => {
            warn!(routine, error = %e, "command failed");
            e.into()
        }
    }
}

fn created_reply(name: &str, array: &NdArray) -> Reply {
    Reply::normal(format!(
        "created {name} {} {}",
        array.dtype(),
        array.shape()
    ))
}

fn scalar_args(args: &MsgArgs) -> Result<(ScalarValue, DType)> {
    let dt = DType::from_name(args.get("dtype")?);
    let value = ScalarValue::parse(args.get("value")?, dt)?;
    Ok((value, dt))
}

/// Compound spellings (`+=` .. `^=`) map onto their base operator
fn parse_assign_op(s: &str) -> Result<BinaryOp> {
    let base = match s {
        "+=" => "+",
        "-=" => "-",
        "*=" => "*",
        "/=" => "/",
        "//=" => "//",
        "%=" => "%",
        "**=" => "**",
        "|=" => "|",
        "&=" => "&",
        "^=" => "^",
        other => other,
    };
    BinaryOp::parse(base)
}

/// Binary operation between two named arrays
pub fn binopvv_msg(args: &MsgArgs, st: &SymbolTable) -> Reply {
    run("binopvv", binopvv_inner, args, st)
}

fn binopvv_inner(args: &MsgArgs, st: &SymbolTable) -> Result<Reply> {
    const ROUTINE: &str = "binopvv";
    let op = BinaryOp::parse(args.get("op")?)?;
    let a = st.get(args.get("a")?)?;
    let b = st.get(args.get("b")?)?;
    debug!(routine = ROUTINE, op = %op, lt = %a.dtype(), rt = %b.dtype(), "dispatching");

    let result = if a.dtype() == DType::BigInt || b.dtype() == DType::BigInt {
        bigint_bin_op_vv(ROUTINE, &a, &b, op)?
    } else {
        let et = result_dtype(a.dtype(), b.dtype(), op);
        bin_op_vv(ROUTINE, &a, &b, et, op)?
    };
    let name = st.add(result);
    let entry = st.get(&name)?;
    Ok(created_reply(&name, &entry))
}

/// Binary operation between a named array and a scalar
pub fn binopvs_msg(args: &MsgArgs, st: &SymbolTable) -> Reply {
    run("binopvs", binopvs_inner, args, st)
}

fn binopvs_inner(args: &MsgArgs, st: &SymbolTable) -> Result<Reply> {
    const ROUTINE: &str = "binopvs";
    let op = BinaryOp::parse(args.get("op")?)?;
    let a = st.get(args.get("a")?)?;
    let (value, dt) = scalar_args(args)?;
    debug!(routine = ROUTINE, op = %op, lt = %a.dtype(), rt = %dt, "dispatching");

    let result = if a.dtype() == DType::BigInt || dt == DType::BigInt {
        bigint_bin_op_vs(ROUTINE, &a, &value, dt, op)?
    } else {
        let et = result_dtype(a.dtype(), dt, op);
        bin_op_vs(ROUTINE, &a, &value, dt, et, op)?
    };
    let name = st.add(result);
    let entry = st.get(&name)?;
    Ok(created_reply(&name, &entry))
}

/// Binary operation between a scalar and a named array
pub fn binopsv_msg(args: &MsgArgs, st: &SymbolTable) -> Reply {
    run("binopsv", binopsv_inner, args, st)
}

fn binopsv_inner(args: &MsgArgs, st: &SymbolTable) -> Result<Reply> {
    const ROUTINE: &str = "binopsv";
    let op = BinaryOp::parse(args.get("op")?)?;
    let b = st.get(args.get("a")?)?;
    let (value, dt) = scalar_args(args)?;
    debug!(routine = ROUTINE, op = %op, lt = %dt, rt = %b.dtype(), "dispatching");

    let result = if b.dtype() == DType::BigInt || dt == DType::BigInt {
        bigint_bin_op_sv(ROUTINE, &value, dt, &b, op)?
    } else {
        let et = result_dtype(dt, b.dtype(), op);
        bin_op_sv(ROUTINE, &value, dt, &b, et, op)?
    };
    let name = st.add(result);
    let entry = st.get(&name)?;
    Ok(created_reply(&name, &entry))
}

/// Compound assignment between two named arrays
pub fn opeqvv_msg(args: &MsgArgs, st: &SymbolTable) -> Reply {
    run("opeqvv", opeqvv_inner, args, st)
}

fn opeqvv_inner(args: &MsgArgs, st: &SymbolTable) -> Result<Reply> {
    const ROUTINE: &str = "opeqvv";
    let op = parse_assign_op(args.get("op")?)?;
    let a_name = args.get("a")?;
    let b = st.get(args.get("b")?)?;
    debug!(routine = ROUTINE, op = %op, a = a_name, "dispatching");

    st.mutate(a_name, |a| op_eq_vv(ROUTINE, a, &b, op))?;
    Ok(Reply::normal(format!("{a_name} success")))
}

/// Compound assignment between a named array and a scalar
pub fn opeqvs_msg(args: &MsgArgs, st: &SymbolTable) -> Reply {
    run("opeqvs", opeqvs_inner, args, st)
}

fn opeqvs_inner(args: &MsgArgs, st: &SymbolTable) -> Result<Reply> {
    const ROUTINE: &str = "opeqvs";
    let op = parse_assign_op(args.get("op")?)?;
    let a_name = args.get("a")?;
    let (value, dt) = scalar_args(args)?;
    debug!(routine = ROUTINE, op = %op, a = a_name, rt = %dt, "dispatching");

    st.mutate(a_name, |a| op_eq_vs(ROUTINE, a, &value, dt, op))?;
    Ok(Reply::normal(format!("{a_name} success")))
}

/// Clip a named array to `[min, max]` bounds, each scalar or array
pub fn clip_msg(args: &MsgArgs, st: &SymbolTable) -> Reply {
    run("clip", clip_inner, args, st)
}

fn clip_inner(args: &MsgArgs, st: &SymbolTable) -> Result<Reply> {
    const ROUTINE: &str = "clip";
    let a = st.get(args.get("name")?)?;

    // a bound naming a live entry is an array bound; anything else must
    // parse as a scalar literal of the array's dtype
    let resolve = |key: &'static str| -> Result<BoundArg> {
        let raw = args.get(key)?;
        if st.contains(raw) {
            Ok(BoundArg::Array(st.get(raw)?))
        } else {
            ScalarValue::parse(raw, a.dtype())
                .map(BoundArg::Scalar)
                .map_err(|_| Error::BadArgument {
                    arg: key,
                    reason: format!("neither a known array nor a {} literal: {raw}", a.dtype()),
                })
        }
    };
    let lo = resolve("min")?;
    let hi = resolve("max")?;
    debug!(routine = ROUTINE, dtype = %a.dtype(), "dispatching");

    let result = clip(ROUTINE, &a, lo.as_bound(), hi.as_bound())?;
    let name = st.add(result);
    let entry = st.get(&name)?;
    Ok(created_reply(&name, &entry))
}

/// Owned form of a resolved clip bound (keeps array handles alive)
enum BoundArg {
    Scalar(ScalarValue),
    Array(Arc<NdArray>),
}

impl BoundArg {
    fn as_bound(&self) -> ClipBound<'_> {
        match self {
            Self::Scalar(v) => ClipBound::Scalar(v),
            Self::Array(a) => ClipBound::Array(a),
        }
    }
}
