//! Array-array kernel coverage: arithmetic, fancy arithmetic, comparisons,
//! bitwise families, and the per-type special cases

mod common;

use arrayd::dtype::{Complex128, DType};
use arrayd::prelude::*;
use common::*;

#[test]
fn int_addition() {
    let a = int_array(&[1, 2, 3]);
    let b = int_array(&[4, 5, 6]);
    let c = run_vv(&a, &b, "+").unwrap();
    assert_eq!(c.dtype(), DType::I64);
    assert_eq!(c.values::<i64>().unwrap(), &[5, 7, 9]);
}

#[test]
fn add_and_mul_are_commutative() {
    let a = int_array(&[3, -7, 11]);
    let b = int_array(&[2, 9, -5]);
    for op in ["+", "*", "==", "&"] {
        let ab = run_vv(&a, &b, op).unwrap();
        let ba = run_vv(&b, &a, op).unwrap();
        assert_eq!(ab, ba, "{op} not commutative");
    }
}

#[test]
fn floor_div_zero_divisor_is_zero() {
    let a = int_array(&[1, 2, 3]);
    let b = int_array(&[2, 2, 0]);
    let c = run_vv(&a, &b, "//").unwrap();
    assert_eq!(c.values::<i64>().unwrap(), &[0, 1, 0]);
    let m = run_vv(&a, &b, "%").unwrap();
    assert_eq!(m.values::<i64>().unwrap(), &[1, 0, 0]);
}

#[test]
fn negative_int_exponent_is_an_error() {
    let a = int_array(&[7]);
    let b = int_array(&[-2]);
    let err = run_vv(&a, &b, "**").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Attempt to exponentiate base of type Int64 to negative exponent"
    );
}

#[test]
fn int_power() {
    let a = int_array(&[2, 3, 10]);
    let b = int_array(&[10, 0, 3]);
    let c = run_vv(&a, &b, "**").unwrap();
    assert_eq!(c.values::<i64>().unwrap(), &[1024, 1, 1000]);
}

#[test]
fn mixed_sign_addition_widens_to_real() {
    let a = int_array(&[5]);
    let b = uint_array(&[2]);
    let c = run_vv(&a, &b, "+").unwrap();
    assert_eq!(c.dtype(), DType::F64);
    assert_eq!(c.values::<f64>().unwrap(), &[7.0]);
}

#[test]
fn mixed_sign_floor_div_goes_through_real_helpers() {
    let a = NdArray::from_vec(vec![-7i32, 9], [2]).unwrap();
    let b = NdArray::from_vec(vec![2u32, 4], [2]).unwrap();
    let c = run_vv(&a, &b, "//").unwrap();
    // i32 with u32 promotes to i64; floor(-3.5) = -4
    assert_eq!(c.dtype(), DType::I64);
    assert_eq!(c.values::<i64>().unwrap(), &[-4, 2]);
    // ** has no mixed-sign form
    assert!(run_vv(&a, &b, "**").is_err());
}

#[test]
fn true_division_of_ints_is_real() {
    let a = int_array(&[1, 7, -1]);
    let b = int_array(&[2, 2, 0]);
    let c = run_vv(&a, &b, "/").unwrap();
    assert_eq!(c.dtype(), DType::F64);
    let v = c.values::<f64>().unwrap();
    assert_eq!(v[0], 0.5);
    assert_eq!(v[1], 3.5);
    assert_eq!(v[2], f64::NEG_INFINITY);
}

#[test]
fn float_floor_div_infinity_edges() {
    let a = real_array(&[1.0, -1.0]);
    let b = real_array(&[f64::INFINITY, f64::INFINITY]);
    let c = run_vv(&a, &b, "//").unwrap();
    assert_eq!(c.values::<f64>().unwrap(), &[0.0, -1.0]);

    let z = run_vv(&real_array(&[0.0]), &real_array(&[0.0]), "//").unwrap();
    assert!(z.values::<f64>().unwrap()[0].is_nan());
}

#[test]
fn float_mod_matches_python_sign() {
    let a = real_array(&[7.0, -7.0, 7.0, -7.0]);
    let b = real_array(&[3.0, 3.0, -3.0, -3.0]);
    let c = run_vv(&a, &b, "%").unwrap();
    assert_allclose_f64(
        c.values::<f64>().unwrap(),
        &[1.0, 2.0, -2.0, -1.0],
        0.0,
        0.0,
        "float mod",
    );
}

#[test]
fn floor_div_consistency_with_mod() {
    let a = real_array(&[7.3, -7.3, 7.3, -7.3]);
    let b = real_array(&[2.1, 2.1, -2.1, -2.1]);
    let q = run_vv(&a, &b, "//").unwrap();
    let m = run_vv(&a, &b, "%").unwrap();
    let (av, bv) = (a.values::<f64>().unwrap(), b.values::<f64>().unwrap());
    let (qv, mv) = (q.values::<f64>().unwrap(), m.values::<f64>().unwrap());
    for i in 0..av.len() {
        assert!((qv[i] * bv[i] + mv[i] - av[i]).abs() < 1e-12);
    }
}

#[test]
fn comparisons_yield_bool_arrays() {
    let a = int_array(&[1, 5, 3]);
    let b = int_array(&[2, 5, 1]);
    let lt = run_vv(&a, &b, "<").unwrap();
    assert_eq!(lt.dtype(), DType::Bool);
    assert_eq!(lt.values::<bool>().unwrap(), &[true, false, false]);
    let ge = run_vv(&a, &b, ">=").unwrap();
    assert_eq!(ge.values::<bool>().unwrap(), &[false, true, true]);
}

#[test]
fn complex_comparison_uses_real_parts_only() {
    let a = NdArray::from_vec(
        vec![Complex128::new(1.0, 2.0), Complex128::new(3.0, 4.0)],
        [2],
    )
    .unwrap();
    let b = NdArray::from_vec(
        vec![Complex128::new(1.0, 9.0), Complex128::new(3.0, 0.0)],
        [2],
    )
    .unwrap();
    let c = run_vv(&a, &b, "==").unwrap();
    assert_eq!(c.values::<bool>().unwrap(), &[true, true]);
}

#[test]
fn int_vs_real_comparison_widens() {
    let a = int_array(&[1, 2, 3]);
    let b = real_array(&[1.5, 2.0, 2.5]);
    let c = run_vv(&a, &b, "<").unwrap();
    assert_eq!(c.values::<bool>().unwrap(), &[true, false, false]);
}

#[test]
fn bitwise_logic_on_ints_and_bools() {
    let a = int_array(&[0b1100, 0b1010]);
    let b = int_array(&[0b1010, 0b0110]);
    assert_eq!(
        run_vv(&a, &b, "&").unwrap().values::<i64>().unwrap(),
        &[0b1000, 0b0010]
    );
    assert_eq!(
        run_vv(&a, &b, "^").unwrap().values::<i64>().unwrap(),
        &[0b0110, 0b1100]
    );

    let p = bool_array(&[true, true, false]);
    let q = bool_array(&[false, true, false]);
    let r = run_vv(&p, &q, "|").unwrap();
    assert_eq!(r.dtype(), DType::Bool);
    assert_eq!(r.values::<bool>().unwrap(), &[true, true, false]);
}

#[test]
fn bool_plus_bool_is_rejected() {
    let p = bool_array(&[true]);
    let q = bool_array(&[false]);
    let err = run_vv(&p, &q, "+").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error: test: not implemented for (bool, +, bool)"
    );
}

#[test]
fn bitwise_logic_rejects_floats() {
    let a = real_array(&[1.0]);
    let b = real_array(&[2.0]);
    assert!(run_vv(&a, &b, "&").is_err());
}

#[test]
fn shift_amounts_clamp_to_zero() {
    let a = int_array(&[1, 1, 1, -8]);
    let b = int_array(&[3, 64, -1, 1]);
    let c = run_vv(&a, &b, "<<").unwrap();
    assert_eq!(c.values::<i64>().unwrap(), &[8, 0, 0, -16]);
    let d = run_vv(&int_array(&[-8, 16]), &int_array(&[1, 100]), ">>").unwrap();
    assert_eq!(d.values::<i64>().unwrap(), &[-4, 0]);
}

#[test]
fn bool_shift_widens_to_i8() {
    let p = bool_array(&[true, false]);
    let q = bool_array(&[true, true]);
    let c = run_vv(&p, &q, "<<").unwrap();
    assert_eq!(c.dtype(), DType::I8);
    assert_eq!(c.values::<i8>().unwrap(), &[2, 0]);
}

#[test]
fn shift_of_mixed_64bit_pair_is_rejected() {
    // i64 with u64 promotes to real, which shifts cannot produce
    let a = int_array(&[1]);
    let b = uint_array(&[1]);
    assert!(run_vv(&a, &b, "<<").is_err());
}

#[test]
fn rotations_wrap_the_promoted_width() {
    let a = NdArray::from_vec(vec![0b1000_0001u8, 0b0000_0011], [2]).unwrap();
    let b = NdArray::from_vec(vec![1u8, 9], [2]).unwrap();
    let c = run_vv(&a, &b, "<<<").unwrap();
    assert_eq!(c.values::<u8>().unwrap(), &[0b0000_0011, 0b0000_0110]);
    let d = run_vv(&c, &b, ">>>").unwrap();
    assert_eq!(d.values::<u8>().unwrap(), a.values::<u8>().unwrap());
}

#[test]
fn rotation_rejects_bool_operands() {
    let p = bool_array(&[true]);
    assert!(run_vv(&p, &p, "<<<").is_err());
}

#[test]
fn complex_power() {
    let a = NdArray::from_vec(vec![Complex128::new(0.0, 1.0)], [1]).unwrap();
    let b = NdArray::from_vec(vec![Complex128::new(2.0, 0.0)], [1]).unwrap();
    let c = run_vv(&a, &b, "**").unwrap();
    let v = c.values::<Complex128>().unwrap()[0];
    assert!((v.re + 1.0).abs() < 1e-12 && v.im.abs() < 1e-12);
    // // and % have no complex form
    assert!(run_vv(&a, &b, "//").is_err());
    assert!(run_vv(&a, &b, "%").is_err());
}

#[test]
fn complex_division_promotes() {
    let a = NdArray::from_vec(vec![Complex128::new(4.0, 2.0)], [1]).unwrap();
    let b = int_array(&[2]);
    let c = run_vv(&a, &b, "/").unwrap();
    assert_eq!(c.dtype(), DType::Complex128);
    assert_eq!(
        c.values::<Complex128>().unwrap()[0],
        Complex128::new(2.0, 1.0)
    );
}

#[test]
fn shape_mismatch_is_rejected() {
    let a = int_array(&[1, 2, 3]);
    let b = int_array(&[1, 2]);
    assert!(matches!(
        run_vv(&a, &b, "+"),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn wrong_result_type_is_refused() {
    // the kernel checks the result dtype against promotion itself
    let a = int_array(&[1]);
    let b = int_array(&[2]);
    let err = arrayd::kernels::bin_op_vv("test", &a, &b, DType::I32, BinaryOp::Add).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error: test: not implemented for (int64, +, int64)"
    );
}

#[test]
fn unrecognized_dtype_template() {
    // a declared scalar dtype outside the catalog hits the second template
    let a = int_array(&[1]);
    let v = ScalarValue::Int(1);
    let err =
        arrayd::kernels::bin_op_vs("test", &a, &v, DType::Str, DType::I64, BinaryOp::Add)
            .unwrap_err();
    assert_eq!(err.to_string(), "Error: test: unrecognized type (int64, str)");
}

#[test]
fn uint_fancy_with_float_takes_real_path() {
    let a = uint_array(&[7, 9]);
    let b = real_array(&[2.0, -4.5]);
    let c = run_vv(&a, &b, "//").unwrap();
    assert_eq!(c.dtype(), DType::F64);
    assert_eq!(c.values::<f64>().unwrap(), &[3.0, -2.0]);
}
