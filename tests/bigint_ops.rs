//! Bigint kernel coverage: wrap-around, rotations, modular exponentiation

mod common;

use arrayd::dtype::DType;
use arrayd::kernels::{bigint_bin_op_vs, bigint_bin_op_vv};
use arrayd::prelude::*;
use common::*;
use num_bigint::BigInt;
use num_traits::Zero;

fn run_big_vv(l: &NdArray, r: &NdArray, op: &str) -> Result<NdArray> {
    bigint_bin_op_vv("test", l, r, BinaryOp::parse(op)?)
}

fn run_big_vs(l: &NdArray, value: &str, dtype: DType, op: &str) -> Result<NdArray> {
    let v = ScalarValue::parse(value, dtype)?;
    bigint_bin_op_vs("test", l, &v, dtype, BinaryOp::parse(op)?)
}

#[test]
fn capped_addition_wraps() {
    let a = bigint_array(&[10], Some(4));
    let b = bigint_array(&[7], None);
    let c = run_big_vv(&a, &b, "+").unwrap();
    assert_eq!(c.dtype(), DType::BigInt);
    assert_eq!(c.max_bits(), Some(4));
    assert_eq!(bigint_values_i64(&c), vec![1]); // 17 mod 16
}

#[test]
fn uncapped_arithmetic_does_not_wrap() {
    let a = bigint_array(&[1_000_000_007], None);
    let b = bigint_array(&[1_000_000_007], None);
    let c = run_big_vv(&a, &b, "*").unwrap();
    assert_eq!(
        c.bigint_values().unwrap()[0],
        BigInt::from(1_000_000_007i64) * BigInt::from(1_000_000_007i64)
    );
    assert_eq!(c.max_bits(), None);
}

#[test]
fn wrap_keeps_every_lane_in_range() {
    let k = 4u32;
    let a = bigint_array(&[-7, 13, 200, 5], Some(k));
    let b = bigint_array(&[3, 9, 77, 2], None);
    for op in ["+", "-", "*", "<<", "**"] {
        let c = run_big_vv(&a, &b, op).unwrap();
        for lane in c.bigint_values().unwrap() {
            assert!(
                lane >= &BigInt::zero() && lane < &BigInt::from(16),
                "{op}: lane {lane} out of [0, 2^{k})"
            );
        }
    }
}

#[test]
fn int_operand_widens_into_bigint() {
    let a = bigint_array(&[10, 20], Some(8));
    let b = int_array(&[1, 2]);
    let c = run_big_vv(&a, &b, "+").unwrap();
    assert_eq!(bigint_values_i64(&c), vec![11, 22]);
    // symmetric: int on the left of a basic op
    let d = run_big_vv(&b, &a, "+").unwrap();
    assert_eq!(bigint_values_i64(&d), vec![11, 22]);
}

#[test]
fn true_division_truncates_and_guards_zero() {
    let a = bigint_array(&[17, 5], None);
    let b = bigint_array(&[5, 0], None);
    let c = run_big_vv(&a, &b, "/").unwrap();
    assert_eq!(bigint_values_i64(&c), vec![3, 0]);
}

#[test]
fn floored_modulo_has_divisor_sign() {
    let a = bigint_array(&[-7, 7, 0], None);
    let b = bigint_array(&[3, 3, 0], None);
    let m = run_big_vv(&a, &b, "%").unwrap();
    assert_eq!(bigint_values_i64(&m), vec![2, 1, 0]);
    let q = run_big_vv(&a, &b, "//").unwrap();
    assert_eq!(bigint_values_i64(&q), vec![-3, 2, 0]);
}

#[test]
fn capped_shift_by_width_or_more_is_zero() {
    let a = bigint_array(&[0b1011], Some(4));
    assert_eq!(
        bigint_values_i64(&run_big_vs(&a, "1", DType::I64, "<<").unwrap()),
        vec![0b0110]
    );
    assert_eq!(
        bigint_values_i64(&run_big_vs(&a, "4", DType::I64, "<<").unwrap()),
        vec![0]
    );
    assert_eq!(
        bigint_values_i64(&run_big_vs(&a, "2", DType::I64, ">>").unwrap()),
        vec![0b10]
    );
}

#[test]
fn rotation_round_trips_under_the_mask() {
    let k = 8u32;
    let a = bigint_array(&[0xAB, 0x01, 0xF0], Some(k));
    let s = int_array(&[3, 7, 11]);
    let left = run_big_vv(&a, &s, "<<<").unwrap();
    let back = run_big_vv(&left, &s, ">>>").unwrap();
    assert_eq!(bigint_values_i64(&back), vec![0xAB, 0x01, 0xF0]);
}

#[test]
fn rotation_moves_bits() {
    let a = bigint_array(&[0b1000_0001], Some(8));
    let c = run_big_vs(&a, "1", DType::I64, "<<<").unwrap();
    assert_eq!(bigint_values_i64(&c), vec![0b0000_0011]);
    let d = run_big_vs(&a, "1", DType::I64, ">>>").unwrap();
    assert_eq!(bigint_values_i64(&d), vec![0b1100_0000]);
}

#[test]
fn rotation_without_width_is_an_error() {
    let a = bigint_array(&[5], None);
    let err = run_big_vs(&a, "1", DType::I64, "<<<").unwrap_err();
    assert_eq!(err, Error::RotationWithoutWidth);
}

#[test]
fn capped_power_uses_modular_exponentiation() {
    let a = bigint_array(&[3], Some(8));
    let c = run_big_vs(&a, "100", DType::I64, "**").unwrap();
    // 3^100 mod 256 == 209
    assert_eq!(bigint_values_i64(&c), vec![209]);
}

#[test]
fn uncapped_power() {
    let a = bigint_array(&[2], None);
    let c = run_big_vs(&a, "100", DType::I64, "**").unwrap();
    assert_eq!(c.bigint_values().unwrap()[0], BigInt::from(1) << 100usize);
}

#[test]
fn negative_bigint_exponent_is_an_error() {
    let a = bigint_array(&[3], Some(8));
    let err = run_big_vs(&a, "-1", DType::I64, "**").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Attempt to exponentiate base of type BigInt to negative exponent"
    );
}

#[test]
fn bigint_comparison_returns_bool() {
    let a = bigint_array(&[1, 5, 9], None);
    let b = int_array(&[2, 5, 3]);
    let c = run_big_vv(&a, &b, "<").unwrap();
    assert_eq!(c.dtype(), DType::Bool);
    assert_eq!(c.values::<bool>().unwrap(), &[true, false, false]);
    let e = run_big_vv(&a, &b, "==").unwrap();
    assert_eq!(e.values::<bool>().unwrap(), &[false, true, false]);
}

#[test]
fn real_operands_are_rejected() {
    let a = bigint_array(&[1], None);
    let b = real_array(&[1.0]);
    assert!(run_big_vv(&a, &b, "+").is_err());
    assert!(run_big_vs(&a, "1.5", DType::F64, "+").is_err());
}

#[test]
fn mismatched_caps_are_rejected() {
    let a = bigint_array(&[1], Some(4));
    let b = bigint_array(&[1], Some(8));
    assert!(run_big_vv(&a, &b, "+").is_err());
}

#[test]
fn bitwise_logic_requires_bigint_on_both_sides() {
    let a = bigint_array(&[0b1100], Some(4));
    let b = bigint_array(&[0b1010], Some(4));
    let c = run_big_vv(&a, &b, "&").unwrap();
    assert_eq!(bigint_values_i64(&c), vec![0b1000]);
    let i = int_array(&[1]);
    let a1 = bigint_array(&[1], None);
    assert!(run_big_vv(&a1, &i, "&").is_err());
}
