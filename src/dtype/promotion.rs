//! NumPy-style type promotion rules for binary operations
//!
//! These are pure functions over [`DType`]; the dispatch front-end calls
//! them once per request to pick the result element type, and the kernels
//! re-derive them to refuse a result buffer of the wrong type.
//!
//! `BigInt`, `Str`, and `Undef` never enter the algebra: bigint operands are
//! routed to the bigint kernel family before promotion, and the functions
//! here answer `Undef` for them.

use super::{max_dtype, DType, DTypeKind};

/// Next signed type able to hold the operand, per the promotion lattice
///
/// Unsigned 64-bit has no signed container and widens to `F64`.
pub fn promote_to_next_signed(dt: DType) -> DType {
    use DType::*;
    match dt {
        Bool => I8,
        U8 => I16,
        U16 => I32,
        U32 => I64,
        U64 => F64,
        I8 => I16,
        I16 => I32,
        I32 => I64,
        I64 => F64,
        F32 => F64,
        F64 => F64,
        Complex64 => Complex128,
        Complex128 => Complex128,
        _ => Undef,
    }
}

/// Next float type able to hold the operand
pub fn promote_to_next_float(dt: DType) -> DType {
    use DType::*;
    match dt {
        Bool | U8 | U16 | I8 | I16 => F32,
        U32 | U64 | I32 | I64 | F32 | F64 => F64,
        Complex64 | Complex128 => Complex128,
        _ => Undef,
    }
}

/// Next complex type able to hold the operand
pub fn promote_to_next_complex(dt: DType) -> DType {
    use DType::*;
    match dt {
        Bool | U8 | U16 | I8 | I16 | F32 => Complex64,
        U32 | U64 | I32 | I64 | F64 | Complex64 => Complex128,
        Complex128 => Complex128,
        _ => Undef,
    }
}

fn in_algebra(dt: DType) -> bool {
    !matches!(dt, DType::BigInt | DType::Str | DType::Undef)
}

/// Result element type of `a op b` under NumPy promotion rules
pub fn common_dtype(a: DType, b: DType) -> DType {
    use DTypeKind::*;

    if !in_algebra(a) || !in_algebra(b) {
        return DType::Undef;
    }

    match (a.kind(), b.kind()) {
        (Integer, Integer) => {
            if a.is_signed_int() == b.is_signed_int() {
                max_dtype(a, b)
            } else {
                // widen the unsigned side into the signed lattice first
                let (u, s) = if a.is_unsigned_int() { (a, b) } else { (b, a) };
                max_dtype(promote_to_next_signed(u), s)
            }
        }
        (Integer, Float) => max_dtype(promote_to_next_float(a), b),
        (Float, Integer) => max_dtype(promote_to_next_float(b), a),
        (Integer, Complex) => max_dtype(promote_to_next_complex(a), b),
        (Complex, Integer) => max_dtype(promote_to_next_complex(b), a),
        (Float, Float) => max_dtype(a, b),
        (Float, Complex) => max_dtype(promote_to_next_complex(a), b),
        (Complex, Float) => max_dtype(promote_to_next_complex(b), a),
        (Complex, Complex) => max_dtype(a, b),
        (Bool, Bool) => DType::Bool,
        (Bool, _) => b,
        (_, Bool) => a,
        _ => DType::Undef,
    }
}

/// [`common_dtype`] with the special-bool rule: (Bool, Bool) promotes to I8
///
/// Used by the fancy-arithmetic and shift categories, where booleans must be
/// treated as 8-bit integers.
pub fn common_dtype_special(a: DType, b: DType) -> DType {
    if a.is_bool() && b.is_bool() {
        DType::I8
    } else {
        common_dtype(a, b)
    }
}

/// Result element type of true division `a / b`
///
/// Differs from [`common_dtype`] exactly where both operands are
/// integer-or-bool: true division always produces a float, and the default
/// float is F64. (The small-int-with-F32 rule of the promotion lattice is
/// already captured by `promote_to_next_float`.)
pub fn div_dtype(a: DType, b: DType) -> DType {
    use DTypeKind::*;

    if !in_algebra(a) || !in_algebra(b) {
        return DType::Undef;
    }

    match (a.kind(), b.kind()) {
        (Integer | Bool, Integer | Bool) => DType::F64,
        _ => common_dtype(a, b),
    }
}
