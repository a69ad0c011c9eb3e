//! Element trait and the cast layer connecting Rust types to `DType`
//!
//! Kernels monomorphize over a concrete element type once the promoted
//! result dtype is known; the traits here supply the per-type semantics
//! (wrapping integer arithmetic, IEEE float helpers, real-part complex
//! comparison) that the generic lane loops rely on.

use super::complex::{Complex64, Complex128};
use super::DType;

/// Trait for types that can be elements of a server-side array
///
/// This trait connects Rust's type system to the runtime dtype system.
/// `BigInt` elements are deliberately not `Element`: they are heap values
/// with their own kernel family.
pub trait Element:
    Copy + Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Zero value
    fn zero() -> Self;
}

macro_rules! impl_element {
    ($($ty:ty => $dt:ident, $zero:expr;)*) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dt;

                #[inline]
                fn zero() -> Self {
                    $zero
                }
            }
        )*
    };
}

impl_element! {
    bool => Bool, false;
    u8 => U8, 0;
    u16 => U16, 0;
    u32 => U32, 0;
    u64 => U64, 0;
    i8 => I8, 0;
    i16 => I16, 0;
    i32 => I32, 0;
    i64 => I64, 0;
    f32 => F32, 0.0;
    f64 => F64, 0.0;
    Complex64 => Complex64, Complex64::ZERO;
    Complex128 => Complex128, Complex128::ZERO;
}

// ============================================================================
// Casts
// ============================================================================

/// Lane-wise conversion into another element type
///
/// Semantics are the `as`-cast family: int/float casts truncate or saturate
/// the way `as` does, bool maps to 0/1, real-to-complex fills the real part,
/// complex-to-real takes the real part, and numeric-to-bool is a zero test.
/// The relation is total over the catalog so the dispatch layer can cast any
/// operand into any promoted type.
pub trait CastTo<O: Element>: Element {
    /// Convert one lane value
    fn cast(self) -> O;
}

macro_rules! impl_cast_identity {
    ($($ty:ty),+) => {
        $(
            impl CastTo<$ty> for $ty {
                #[inline]
                fn cast(self) -> $ty {
                    self
                }
            }
        )+
    };
}

impl_cast_identity!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, Complex64, Complex128);

macro_rules! impl_cast_as {
    ($src:ty => $($dst:ty),+) => {
        $(
            impl CastTo<$dst> for $src {
                #[inline]
                fn cast(self) -> $dst {
                    self as $dst
                }
            }
        )+
    };
}

impl_cast_as!(u8 => u16, u32, u64, i8, i16, i32, i64, f32, f64);
impl_cast_as!(u16 => u8, u32, u64, i8, i16, i32, i64, f32, f64);
impl_cast_as!(u32 => u8, u16, u64, i8, i16, i32, i64, f32, f64);
impl_cast_as!(u64 => u8, u16, u32, i8, i16, i32, i64, f32, f64);
impl_cast_as!(i8 => u8, u16, u32, u64, i16, i32, i64, f32, f64);
impl_cast_as!(i16 => u8, u16, u32, u64, i8, i32, i64, f32, f64);
impl_cast_as!(i32 => u8, u16, u32, u64, i8, i16, i64, f32, f64);
impl_cast_as!(i64 => u8, u16, u32, u64, i8, i16, i32, f32, f64);
impl_cast_as!(f32 => u8, u16, u32, u64, i8, i16, i32, i64, f64);
impl_cast_as!(f64 => u8, u16, u32, u64, i8, i16, i32, i64, f32);

macro_rules! impl_cast_bool_src {
    ($($dst:ty),+) => {
        $(
            impl CastTo<$dst> for bool {
                #[inline]
                fn cast(self) -> $dst {
                    (self as u8) as $dst
                }
            }
        )+
    };
}

impl_cast_bool_src!(u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl CastTo<u8> for bool {
    #[inline]
    fn cast(self) -> u8 {
        self as u8
    }
}

macro_rules! impl_cast_to_bool {
    ($($src:ty),+) => {
        $(
            impl CastTo<bool> for $src {
                #[inline]
                fn cast(self) -> bool {
                    self != 0
                }
            }
        )+
    };
}

impl_cast_to_bool!(u8, u16, u32, u64, i8, i16, i32, i64);

impl CastTo<bool> for f32 {
    #[inline]
    fn cast(self) -> bool {
        self != 0.0
    }
}

impl CastTo<bool> for f64 {
    #[inline]
    fn cast(self) -> bool {
        self != 0.0
    }
}

macro_rules! impl_cast_to_complex {
    ($($src:ty),+) => {
        $(
            impl CastTo<Complex64> for $src {
                #[inline]
                fn cast(self) -> Complex64 {
                    Complex64::new(CastTo::<f32>::cast(self), 0.0)
                }
            }

            impl CastTo<Complex128> for $src {
                #[inline]
                fn cast(self) -> Complex128 {
                    Complex128::new(CastTo::<f64>::cast(self), 0.0)
                }
            }
        )+
    };
}

impl_cast_to_complex!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

macro_rules! impl_cast_from_complex {
    ($src:ty => $($dst:ty),+) => {
        $(
            impl CastTo<$dst> for $src {
                #[inline]
                fn cast(self) -> $dst {
                    self.re as $dst
                }
            }
        )+
    };
}

impl_cast_from_complex!(Complex64 => u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
impl_cast_from_complex!(Complex128 => u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl CastTo<bool> for Complex64 {
    #[inline]
    fn cast(self) -> bool {
        self != Complex64::ZERO
    }
}

impl CastTo<bool> for Complex128 {
    #[inline]
    fn cast(self) -> bool {
        self != Complex128::ZERO
    }
}

impl CastTo<Complex128> for Complex64 {
    #[inline]
    fn cast(self) -> Complex128 {
        self.into()
    }
}

impl CastTo<Complex64> for Complex128 {
    #[inline]
    fn cast(self) -> Complex64 {
        self.into()
    }
}

/// Conversion from every catalog element type, used when widening an
/// operand buffer into the promoted type
///
/// Implemented blanket-wise on top of [`CastTo`], so there is exactly one
/// source of truth for cast semantics.
pub trait FromElement: Element {
    /// Convert from a bool lane
    fn from_bool(v: bool) -> Self;
    /// Convert from a u8 lane
    fn from_u8(v: u8) -> Self;
    /// Convert from a u16 lane
    fn from_u16(v: u16) -> Self;
    /// Convert from a u32 lane
    fn from_u32(v: u32) -> Self;
    /// Convert from a u64 lane
    fn from_u64(v: u64) -> Self;
    /// Convert from an i8 lane
    fn from_i8(v: i8) -> Self;
    /// Convert from an i16 lane
    fn from_i16(v: i16) -> Self;
    /// Convert from an i32 lane
    fn from_i32(v: i32) -> Self;
    /// Convert from an i64 lane
    fn from_i64(v: i64) -> Self;
    /// Convert from an f32 lane
    fn from_f32(v: f32) -> Self;
    /// Convert from an f64 lane
    fn from_f64(v: f64) -> Self;
    /// Convert from a complex64 lane
    fn from_c64(v: Complex64) -> Self;
    /// Convert from a complex128 lane
    fn from_c128(v: Complex128) -> Self;
}

impl<O> FromElement for O
where
    O: Element,
    bool: CastTo<O>,
    u8: CastTo<O>,
    u16: CastTo<O>,
    u32: CastTo<O>,
    u64: CastTo<O>,
    i8: CastTo<O>,
    i16: CastTo<O>,
    i32: CastTo<O>,
    i64: CastTo<O>,
    f32: CastTo<O>,
    f64: CastTo<O>,
    Complex64: CastTo<O>,
    Complex128: CastTo<O>,
{
    #[inline]
    fn from_bool(v: bool) -> Self {
        v.cast()
    }

    #[inline]
    fn from_u8(v: u8) -> Self {
        v.cast()
    }

    #[inline]
    fn from_u16(v: u16) -> Self {
        v.cast()
    }

    #[inline]
    fn from_u32(v: u32) -> Self {
        v.cast()
    }

    #[inline]
    fn from_u64(v: u64) -> Self {
        v.cast()
    }

    #[inline]
    fn from_i8(v: i8) -> Self {
        v.cast()
    }

    #[inline]
    fn from_i16(v: i16) -> Self {
        v.cast()
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        v.cast()
    }

    #[inline]
    fn from_i64(v: i64) -> Self {
        v.cast()
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v.cast()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v.cast()
    }

    #[inline]
    fn from_c64(v: Complex64) -> Self {
        v.cast()
    }

    #[inline]
    fn from_c128(v: Complex128) -> Self {
        v.cast()
    }
}

// ============================================================================
// Capability traits used by the kernels
// ============================================================================

/// `+ - *` with the overflow semantics of the dtype: fixed-width integers
/// wrap, floats and complexes follow IEEE
pub trait ArithElement: Element {
    /// Addition lane op
    fn add_elem(self, rhs: Self) -> Self;
    /// Subtraction lane op
    fn sub_elem(self, rhs: Self) -> Self;
    /// Multiplication lane op
    fn mul_elem(self, rhs: Self) -> Self;
}

macro_rules! impl_arith_int {
    ($($ty:ty),+) => {
        $(
            impl ArithElement for $ty {
                #[inline]
                fn add_elem(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline]
                fn sub_elem(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline]
                fn mul_elem(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }
            }
        )+
    };
}

impl_arith_int!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! impl_arith_ieee {
    ($($ty:ty),+) => {
        $(
            impl ArithElement for $ty {
                #[inline]
                fn add_elem(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn sub_elem(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn mul_elem(self, rhs: Self) -> Self {
                    self * rhs
                }
            }
        )+
    };
}

impl_arith_ieee!(f32, f64, Complex64, Complex128);

/// Fixed-width integer capabilities: division with the zero sentinel,
/// wrapping pow, guarded shifts, rotate intrinsics
pub trait IntElement: Element + Eq + Ord + ArithElement {
    /// Bit width of the type
    const BITS: u32;

    /// Whether the type is signed
    const SIGNED: bool;

    /// Truncating division; a zero divisor yields 0 (NumPy policy).
    /// Wrapping, so `MIN / -1` does not abort the lane.
    fn div_or_zero(self, rhs: Self) -> Self;

    /// Truncating remainder; a zero divisor yields 0
    fn rem_or_zero(self, rhs: Self) -> Self;

    /// Wrapping integer power. The exponent keeps its low 32 bits, which
    /// preserves parity for the |base| <= 1 cases where it matters.
    fn pow_wrap(self, exp: u64) -> Self;

    /// Left shift; amounts at or beyond the bit width yield 0
    fn shl_or_zero(self, n: u32) -> Self;

    /// Right shift (arithmetic for signed types); amounts at or beyond the
    /// bit width yield 0
    fn shr_or_zero(self, n: u32) -> Self;

    /// Rotate left by `n mod BITS`
    fn rotl(self, n: u32) -> Self;

    /// Rotate right by `n mod BITS`
    fn rotr(self, n: u32) -> Self;

    /// True when the lane value is negative (always false for unsigned)
    fn is_negative_int(self) -> bool;
}

macro_rules! impl_int_element {
    ($($ty:ty => $signed:expr, $is_neg:expr;)+) => {
        $(
            impl IntElement for $ty {
                const BITS: u32 = <$ty>::BITS;
                const SIGNED: bool = $signed;

                #[inline]
                fn div_or_zero(self, rhs: Self) -> Self {
                    if rhs == 0 {
                        0
                    } else {
                        self.wrapping_div(rhs)
                    }
                }

                #[inline]
                fn rem_or_zero(self, rhs: Self) -> Self {
                    if rhs == 0 {
                        0
                    } else {
                        self.wrapping_rem(rhs)
                    }
                }

                #[inline]
                fn pow_wrap(self, exp: u64) -> Self {
                    self.wrapping_pow((exp & u32::MAX as u64) as u32)
                }

                #[inline]
                fn shl_or_zero(self, n: u32) -> Self {
                    self.checked_shl(n).unwrap_or(0)
                }

                #[inline]
                fn shr_or_zero(self, n: u32) -> Self {
                    self.checked_shr(n).unwrap_or(0)
                }

                #[inline]
                fn rotl(self, n: u32) -> Self {
                    self.rotate_left(n % Self::BITS)
                }

                #[inline]
                fn rotr(self, n: u32) -> Self {
                    self.rotate_right(n % Self::BITS)
                }

                #[inline]
                fn is_negative_int(self) -> bool {
                    $is_neg(self)
                }
            }
        )+
    };
}

impl_int_element! {
    u8 => false, |_v: u8| false;
    u16 => false, |_v: u16| false;
    u32 => false, |_v: u32| false;
    u64 => false, |_v: u64| false;
    i8 => true, |v: i8| v < 0;
    i16 => true, |v: i16| v < 0;
    i32 => true, |v: i32| v < 0;
    i64 => true, |v: i64| v < 0;
}

/// `| & ^` lane ops, shared by integers and bool
pub trait BitElement: Element {
    /// Bitwise (logical for bool) and
    fn bit_and(self, rhs: Self) -> Self;
    /// Bitwise (logical for bool) or
    fn bit_or(self, rhs: Self) -> Self;
    /// Bitwise (logical for bool) xor
    fn bit_xor(self, rhs: Self) -> Self;
}

macro_rules! impl_bit_element {
    ($($ty:ty),+) => {
        $(
            impl BitElement for $ty {
                #[inline]
                fn bit_and(self, rhs: Self) -> Self {
                    self & rhs
                }

                #[inline]
                fn bit_or(self, rhs: Self) -> Self {
                    self | rhs
                }

                #[inline]
                fn bit_xor(self, rhs: Self) -> Self {
                    self ^ rhs
                }
            }
        )+
    };
}

impl_bit_element!(bool, u8, u16, u32, u64, i8, i16, i32, i64);

/// IEEE float capabilities used by the floor-division/mod helpers and the
/// true-division and fancy-arithmetic kernels
pub trait FloatElement:
    Element
    + PartialOrd
    + std::ops::Add<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Rem<Output = Self>
{
    /// Largest integral value not greater than self
    fn floor(self) -> Self;
    /// Raise to a floating power
    fn powf_elem(self, exp: Self) -> Self;
    /// IEEE infinity test
    fn is_infinite(self) -> bool;
    /// Lossless widening to f64
    fn to_f64(self) -> f64;
    /// Narrowing (for f32) or identity conversion from f64
    fn from_f64(v: f64) -> Self;
    /// Quiet NaN
    fn nan() -> Self;
}

impl FloatElement for f32 {
    #[inline]
    fn floor(self) -> Self {
        self.floor()
    }

    #[inline]
    fn powf_elem(self, exp: Self) -> Self {
        self.powf(exp)
    }

    #[inline]
    fn is_infinite(self) -> bool {
        self.is_infinite()
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn nan() -> Self {
        f32::NAN
    }
}

impl FloatElement for f64 {
    #[inline]
    fn floor(self) -> Self {
        self.floor()
    }

    #[inline]
    fn powf_elem(self, exp: Self) -> Self {
        self.powf(exp)
    }

    #[inline]
    fn is_infinite(self) -> bool {
        self.is_infinite()
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn nan() -> Self {
        f64::NAN
    }
}

/// Complex capabilities beyond plain arithmetic
pub trait ComplexElement: Element + std::ops::Div<Output = Self> + ArithElement {
    /// Principal-branch complex power
    fn powc_elem(self, exp: Self) -> Self;
}

impl ComplexElement for Complex64 {
    #[inline]
    fn powc_elem(self, exp: Self) -> Self {
        self.powc(exp)
    }
}

impl ComplexElement for Complex128 {
    #[inline]
    fn powc_elem(self, exp: Self) -> Self {
        self.powc(exp)
    }
}

/// Lane comparison in the promoted type
///
/// Scalar types compare natively; complex types compare real parts only,
/// matching NumPy's ordering of complex arrays.
pub trait CompareElement: Element {
    /// `==` lane op
    fn eq_lanes(self, rhs: Self) -> bool;
    /// `<` lane op
    fn lt_lanes(self, rhs: Self) -> bool;
    /// `<=` lane op
    fn le_lanes(self, rhs: Self) -> bool;
}

macro_rules! impl_compare_scalar {
    ($($ty:ty),+) => {
        $(
            impl CompareElement for $ty {
                #[inline]
                fn eq_lanes(self, rhs: Self) -> bool {
                    self == rhs
                }

                #[inline]
                fn lt_lanes(self, rhs: Self) -> bool {
                    self < rhs
                }

                #[inline]
                fn le_lanes(self, rhs: Self) -> bool {
                    self <= rhs
                }
            }
        )+
    };
}

impl_compare_scalar!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

macro_rules! impl_compare_complex {
    ($($ty:ty),+) => {
        $(
            impl CompareElement for $ty {
                #[inline]
                fn eq_lanes(self, rhs: Self) -> bool {
                    self.re == rhs.re
                }

                #[inline]
                fn lt_lanes(self, rhs: Self) -> bool {
                    self.re < rhs.re
                }

                #[inline]
                fn le_lanes(self, rhs: Self) -> bool {
                    self.re <= rhs.re
                }
            }
        )+
    };
}

impl_compare_complex!(Complex64, Complex128);

/// Marker + bounded min/max for the clip kernel's supported types
pub trait ClipElement: Element + PartialOrd {
    /// `min(max(self, lo), hi)`
    #[inline]
    fn clip_to(self, lo: Self, hi: Self) -> Self {
        let v = if self > lo { self } else { lo };
        if v < hi {
            v
        } else {
            hi
        }
    }
}

impl ClipElement for bool {}
impl ClipElement for u8 {}
impl ClipElement for u16 {}
impl ClipElement for u32 {}
impl ClipElement for u64 {}
impl ClipElement for i8 {}
impl ClipElement for i16 {}
impl ClipElement for i32 {}
impl ClipElement for i64 {}
impl ClipElement for f64 {}
