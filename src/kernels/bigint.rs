//! Elementwise kernels for bigint arrays
//!
//! A bigint array carries an optional `max_bits` width; when present every
//! arithmetic or bitwise result is reduced modulo 2^max_bits, so capped
//! arrays stay in `[0, 2^max_bits)`. Rotations only exist on capped arrays
//! (there is no bit width to rotate through otherwise), and exponentiation
//! on a capped array goes through modular exponentiation instead of
//! materializing the full power.
//!
//! Operands widen lane-wise into `BigInt` (integers and bools included), so
//! the loops run on one representation; the per-lane temporaries double as
//! the per-task scratch the big-integer library reuses.

use super::binop::Operand;
use super::lanes::fill_lanes;
use crate::array::{Buffer, NdArray, ScalarValue, Shape};
use crate::dtype::{DType, DTypeKind};
use crate::error::{Error, Result};
use crate::ops::{BinaryOp, OpCategory};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Lane source for a bigint operand: a widened buffer or one scalar
enum BigSrc {
    Many(Vec<BigInt>),
    One(BigInt),
}

impl BigSrc {
    #[inline]
    fn at(&self, i: usize) -> &BigInt {
        match self {
            Self::Many(v) => &v[i],
            Self::One(x) => x,
        }
    }

    fn any(&self, len: usize, pred: impl Fn(&BigInt) -> bool) -> bool {
        match self {
            Self::Many(v) => v.iter().any(|x| pred(x)),
            Self::One(x) => len > 0 && pred(x),
        }
    }
}

fn big_lanes(o: &Operand<'_>) -> Option<BigSrc> {
    match o {
        Operand::Arr(a) => a.bigint_lanes().map(BigSrc::Many),
        Operand::Scl(v, _) => v.as_bigint().map(BigSrc::One),
    }
}

/// Shift/rotate amounts as signed lanes; huge bigint amounts saturate
fn amount_lanes(o: &Operand<'_>) -> Option<AmountSrc> {
    let sat = |x: &BigInt| x.to_i64().unwrap_or(if x.is_negative() { i64::MIN } else { i64::MAX });
    match o {
        Operand::Arr(a) => {
            if let Some(v) = a.int_lanes() {
                Some(AmountSrc::Many(v))
            } else {
                a.bigint_values()
                    .map(|v| AmountSrc::Many(v.iter().map(sat).collect()))
            }
        }
        Operand::Scl(v, _) => match v {
            ScalarValue::Bigint(x) => Some(AmountSrc::One(sat(x))),
            _ => v.to_int_lane().map(AmountSrc::One),
        },
    }
}

/// Signed amount lanes (the i64 sibling of [`BigSrc`])
enum AmountSrc {
    Many(Vec<i64>),
    One(i64),
}

impl AmountSrc {
    #[inline]
    fn at(&self, i: usize) -> i64 {
        match self {
            Self::Many(v) => v[i],
            Self::One(x) => *x,
        }
    }

    fn any(&self, len: usize, pred: impl Fn(i64) -> bool) -> bool {
        match self {
            Self::Many(v) => v.iter().any(|&x| pred(x)),
            Self::One(x) => len > 0 && pred(*x),
        }
    }

    /// Apply `f` to every amount (hoists the scalar case out of the loop)
    fn map(self, f: impl Fn(i64) -> i64) -> Self {
        match self {
            Self::Many(v) => Self::Many(v.into_iter().map(f).collect()),
            Self::One(x) => Self::One(f(x)),
        }
    }
}

fn is_int_like(dt: DType) -> bool {
    dt == DType::BigInt || dt.is_int() || dt.is_bool()
}

/// Array-array bigint kernel
pub fn bigint_bin_op_vv(
    routine: &'static str,
    l: &NdArray,
    r: &NdArray,
    op: BinaryOp,
) -> Result<NdArray> {
    if l.shape() != r.shape() {
        return Err(Error::ShapeMismatch {
            lhs: l.shape().as_slice().to_vec(),
            rhs: r.shape().as_slice().to_vec(),
        });
    }
    bigint_bin_op(
        routine,
        Operand::Arr(l),
        Operand::Arr(r),
        op,
        l.shape().clone(),
        l.numel(),
    )
}

/// Array-scalar bigint kernel
pub fn bigint_bin_op_vs(
    routine: &'static str,
    l: &NdArray,
    value: &ScalarValue,
    value_dtype: DType,
    op: BinaryOp,
) -> Result<NdArray> {
    bigint_bin_op(
        routine,
        Operand::Arr(l),
        Operand::Scl(value, value_dtype),
        op,
        l.shape().clone(),
        l.numel(),
    )
}

/// Scalar-array bigint kernel
pub fn bigint_bin_op_sv(
    routine: &'static str,
    value: &ScalarValue,
    value_dtype: DType,
    r: &NdArray,
    op: BinaryOp,
) -> Result<NdArray> {
    bigint_bin_op(
        routine,
        Operand::Scl(value, value_dtype),
        Operand::Arr(r),
        op,
        r.shape().clone(),
        r.numel(),
    )
}

/// Shared bigint kernel body
pub(crate) fn bigint_bin_op(
    routine: &'static str,
    l: Operand<'_>,
    r: Operand<'_>,
    op: BinaryOp,
    shape: Shape,
    len: usize,
) -> Result<NdArray> {
    let lt = l.dtype();
    let rt = r.dtype();
    let reject = move || Error::not_implemented(routine, lt, op.as_str(), rt);

    // str and undef have no elementwise form; real and complex operands
    // never mix with bigint
    if lt.kind() == DTypeKind::Other || rt.kind() == DTypeKind::Other {
        return Err(Error::unrecognized(routine, lt, rt));
    }
    if !is_int_like(lt) || !is_int_like(rt) {
        return Err(reject());
    }

    if op.category() == OpCategory::Comparison {
        return big_compare(l, r, op, shape, len, reject);
    }

    // result width: inherited from the capped operand; two capped operands
    // must agree
    let lmb = match &l {
        Operand::Arr(a) => a.max_bits(),
        Operand::Scl(..) => None,
    };
    let rmb = match &r {
        Operand::Arr(a) => a.max_bits(),
        Operand::Scl(..) => None,
    };
    let mb = match (lmb, rmb) {
        (Some(a), Some(b)) if a != b => {
            return Err(Error::BadArgument {
                arg: "b",
                reason: format!("max_bits mismatch: {a} vs {b}"),
            });
        }
        (a, b) => a.or(b),
    };
    let mask = mb.map(|k| (BigInt::one() << k as usize) - 1);
    let clamp = |x: BigInt| -> BigInt {
        match &mask {
            Some(m) => x & m,
            None => x,
        }
    };

    let out: Vec<BigInt> = match op.category() {
        OpCategory::BasicArithmetic => {
            // symmetric: one side bigint, the other bigint/int/bool
            if lt != DType::BigInt && rt != DType::BigInt {
                return Err(reject());
            }
            let a = big_lanes(&l).ok_or_else(reject)?;
            let b = big_lanes(&r).ok_or_else(reject)?;
            match op {
                BinaryOp::Add => fill_lanes(len, |i| clamp(a.at(i) + b.at(i))),
                BinaryOp::Sub => fill_lanes(len, |i| clamp(a.at(i) - b.at(i))),
                BinaryOp::Mul => fill_lanes(len, |i| clamp(a.at(i) * b.at(i))),
                _ => unreachable!("non-arithmetic operator in arithmetic branch"),
            }
        }

        OpCategory::TrueDivision => {
            if lt != DType::BigInt || rt != DType::BigInt {
                return Err(reject());
            }
            let a = big_lanes(&l).ok_or_else(reject)?;
            let b = big_lanes(&r).ok_or_else(reject)?;
            fill_lanes(len, |i| {
                let d = b.at(i);
                if d.is_zero() {
                    BigInt::zero()
                } else {
                    clamp(a.at(i) / d)
                }
            })
        }

        OpCategory::BitwiseLogic => {
            if lt != DType::BigInt || rt != DType::BigInt {
                return Err(reject());
            }
            let a = big_lanes(&l).ok_or_else(reject)?;
            let b = big_lanes(&r).ok_or_else(reject)?;
            match op {
                BinaryOp::And => fill_lanes(len, |i| clamp(a.at(i) & b.at(i))),
                BinaryOp::Or => fill_lanes(len, |i| clamp(a.at(i) | b.at(i))),
                BinaryOp::Xor => fill_lanes(len, |i| clamp(a.at(i) ^ b.at(i))),
                _ => unreachable!("non-bitwise operator in bitwise branch"),
            }
        }

        OpCategory::BitwiseShift => {
            if lt != DType::BigInt || rt == DType::Bool {
                return Err(reject());
            }
            let a = big_lanes(&l).ok_or_else(reject)?;
            let amounts = amount_lanes(&r).ok_or_else(reject)?;
            if mb.is_none()
                && op == BinaryOp::Shl
                && amounts.any(len, |s| s > u32::MAX as i64)
            {
                // an unbounded left shift by 2^32+ bits is an allocation
                // bomb, not a computable lane
                return Err(Error::BadArgument {
                    arg: "b",
                    reason: "shift amount too large for an unbounded bigint array".into(),
                });
            }
            let cap = mb.map(|k| k as i64);
            fill_lanes(len, |i| {
                let s = amounts.at(i);
                if s < 0 {
                    return BigInt::zero();
                }
                if let Some(k) = cap {
                    if s >= k {
                        return BigInt::zero();
                    }
                }
                match op {
                    BinaryOp::Shl => clamp(a.at(i) << s as usize),
                    BinaryOp::Shr => {
                        let s = s.min(u32::MAX as i64) as usize;
                        clamp(a.at(i) >> s)
                    }
                    _ => unreachable!("non-shift operator in shift branch"),
                }
            })
        }

        OpCategory::BitwiseRot => {
            if lt != DType::BigInt || rt == DType::Bool {
                return Err(reject());
            }
            let k = mb.ok_or(Error::RotationWithoutWidth)?;
            let a = big_lanes(&l).ok_or_else(reject)?;
            let amounts = amount_lanes(&r).ok_or_else(reject)?;
            if k == 0 {
                fill_lanes(len, |_| BigInt::zero())
            } else {
                // normalize once; for a scalar amount this hoists the mod
                // out of the loop
                let amounts = amounts.map(|s| s.rem_euclid(k as i64));
                let k = k as usize;
                match op {
                    BinaryOp::Rotl => fill_lanes(len, |i| {
                        let s = amounts.at(i) as usize;
                        let x = a.at(i);
                        clamp((x << s) | (x >> (k - s)))
                    }),
                    BinaryOp::Rotr => fill_lanes(len, |i| {
                        let s = amounts.at(i) as usize;
                        let x = a.at(i);
                        clamp((x >> s) | (x << (k - s)))
                    }),
                    _ => unreachable!("non-rotate operator in rotate branch"),
                }
            }
        }

        OpCategory::FancyArithmetic => {
            if lt != DType::BigInt || rt == DType::Bool {
                return Err(reject());
            }
            let a = big_lanes(&l).ok_or_else(reject)?;
            let b = big_lanes(&r).ok_or_else(reject)?;
            match op {
                BinaryOp::FloorDiv => fill_lanes(len, |i| {
                    let d = b.at(i);
                    if d.is_zero() {
                        BigInt::zero()
                    } else {
                        clamp(a.at(i).div_floor(d))
                    }
                }),
                BinaryOp::Mod => fill_lanes(len, |i| {
                    let d = b.at(i);
                    if d.is_zero() {
                        BigInt::zero()
                    } else {
                        clamp(a.at(i).mod_floor(d))
                    }
                }),
                BinaryOp::Pow => {
                    if b.any(len, |x| x.is_negative()) {
                        return Err(Error::NegativeExponent {
                            base: DType::BigInt,
                        });
                    }
                    match &mask {
                        Some(m) => {
                            let modulus = m + BigInt::one();
                            fill_lanes(len, |i| {
                                let base = a.at(i) & m;
                                base.modpow(b.at(i), &modulus)
                            })
                        }
                        None => {
                            if b.any(len, |x| x.to_u64().is_none()) {
                                return Err(Error::BadArgument {
                                    arg: "b",
                                    reason: "exponent too large for an unbounded bigint array"
                                        .into(),
                                });
                            }
                            fill_lanes(len, |i| {
                                big_pow(a.at(i), b.at(i).to_u64().unwrap_or(0))
                            })
                        }
                    }
                }
                _ => unreachable!("non-fancy operator in fancy branch"),
            }
        }

        OpCategory::Comparison => unreachable!("comparisons handled above"),
    };

    NdArray::bigint_from_vec(out, shape, mb)
}

/// Comparison variant: Bool result, no masking
fn big_compare(
    l: Operand<'_>,
    r: Operand<'_>,
    op: BinaryOp,
    shape: Shape,
    len: usize,
    reject: impl Fn() -> Error + Copy,
) -> Result<NdArray> {
    if l.dtype() != DType::BigInt && r.dtype() != DType::BigInt {
        return Err(reject());
    }
    let a = big_lanes(&l).ok_or_else(reject)?;
    let b = big_lanes(&r).ok_or_else(reject)?;
    let out: Vec<bool> = match op {
        BinaryOp::Eq => fill_lanes(len, |i| a.at(i) == b.at(i)),
        BinaryOp::Ne => fill_lanes(len, |i| a.at(i) != b.at(i)),
        BinaryOp::Lt => fill_lanes(len, |i| a.at(i) < b.at(i)),
        BinaryOp::Gt => fill_lanes(len, |i| a.at(i) > b.at(i)),
        BinaryOp::Le => fill_lanes(len, |i| a.at(i) <= b.at(i)),
        BinaryOp::Ge => fill_lanes(len, |i| a.at(i) >= b.at(i)),
        _ => unreachable!("non-comparison operator in comparison branch"),
    };
    Ok(NdArray::from_buffer(Buffer::Bool(out), shape))
}

/// Integer power by repeated squaring (0^0 = 1, the NumPy convention)
fn big_pow(base: &BigInt, mut e: u64) -> BigInt {
    let mut acc = BigInt::one();
    let mut sq = base.clone();
    while e > 0 {
        if e & 1 == 1 {
            acc = &acc * &sq;
        }
        e >>= 1;
        if e > 0 {
            sq = &sq * &sq;
        }
    }
    acc
}
