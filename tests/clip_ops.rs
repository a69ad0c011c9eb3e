//! Clip kernel coverage: all four bound-shape variants

mod common;

use arrayd::dtype::DType;
use arrayd::kernels::{clip, ClipBound};
use arrayd::prelude::*;
use common::*;

#[test]
fn scalar_scalar_bounds() {
    let a = int_array(&[3, -2, 0]);
    let lo = ScalarValue::parse("0", DType::I64).unwrap();
    let hi = ScalarValue::parse("2", DType::I64).unwrap();
    let c = clip("clip", &a, ClipBound::Scalar(&lo), ClipBound::Scalar(&hi)).unwrap();
    assert_eq!(c.dtype(), DType::I64);
    assert_eq!(c.values::<i64>().unwrap(), &[2, 0, 0]);
}

#[test]
fn scalar_bounds_cast_to_the_array_dtype() {
    let a = real_array(&[3.5, -2.0, 0.5]);
    let lo = ScalarValue::parse("0", DType::I64).unwrap();
    let hi = ScalarValue::parse("2", DType::I64).unwrap();
    let c = clip("clip", &a, ClipBound::Scalar(&lo), ClipBound::Scalar(&hi)).unwrap();
    assert_eq!(c.values::<f64>().unwrap(), &[2.0, 0.0, 0.5]);
}

#[test]
fn array_bounds() {
    let a = int_array(&[5, 5, 5]);
    let lo = int_array(&[0, 6, 2]);
    let hi = int_array(&[4, 9, 9]);
    let c = clip("clip", &a, ClipBound::Array(&lo), ClipBound::Array(&hi)).unwrap();
    assert_eq!(c.values::<i64>().unwrap(), &[4, 6, 5]);
}

#[test]
fn mixed_bound_shapes() {
    let a = int_array(&[1, 5, 9]);
    let lo = int_array(&[2, 2, 2]);
    let hi = ScalarValue::parse("6", DType::I64).unwrap();
    let c = clip("clip", &a, ClipBound::Array(&lo), ClipBound::Scalar(&hi)).unwrap();
    assert_eq!(c.values::<i64>().unwrap(), &[2, 5, 6]);

    let lo2 = ScalarValue::parse("2", DType::I64).unwrap();
    let hi2 = int_array(&[6, 6, 6]);
    let d = clip("clip", &a, ClipBound::Scalar(&lo2), ClipBound::Array(&hi2)).unwrap();
    assert_eq!(d.values::<i64>().unwrap(), &[2, 5, 6]);
}

#[test]
fn bool_clip() {
    let a = bool_array(&[true, false]);
    let lo = ScalarValue::parse("False", DType::Bool).unwrap();
    let hi = ScalarValue::parse("False", DType::Bool).unwrap();
    let c = clip("clip", &a, ClipBound::Scalar(&lo), ClipBound::Scalar(&hi)).unwrap();
    assert_eq!(c.values::<bool>().unwrap(), &[false, false]);
}

#[test]
fn unsigned_clip() {
    let a = uint_array(&[1, 200, 50]);
    let lo = ScalarValue::parse("10", DType::U64).unwrap();
    let hi = ScalarValue::parse("100", DType::U64).unwrap();
    let c = clip("clip", &a, ClipBound::Scalar(&lo), ClipBound::Scalar(&hi)).unwrap();
    assert_eq!(c.values::<u64>().unwrap(), &[10, 100, 50]);
}

#[test]
fn complex_arrays_are_unsupported() {
    use arrayd::dtype::Complex128;
    let a = NdArray::from_vec(vec![Complex128::new(1.0, 0.0)], [1]).unwrap();
    let lo = ScalarValue::parse("0", DType::I64).unwrap();
    let hi = ScalarValue::parse("2", DType::I64).unwrap();
    assert!(clip("clip", &a, ClipBound::Scalar(&lo), ClipBound::Scalar(&hi)).is_err());
}

#[test]
fn bound_shape_mismatch_is_rejected() {
    let a = int_array(&[1, 2, 3]);
    let lo = int_array(&[0, 0]);
    let hi = ScalarValue::parse("2", DType::I64).unwrap();
    assert!(matches!(
        clip("clip", &a, ClipBound::Array(&lo), ClipBound::Scalar(&hi)),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn bound_dtype_mismatch_is_rejected() {
    let a = int_array(&[1, 2, 3]);
    let lo = real_array(&[0.0, 0.0, 0.0]);
    let hi = ScalarValue::parse("2", DType::I64).unwrap();
    assert!(clip("clip", &a, ClipBound::Array(&lo), ClipBound::Scalar(&hi)).is_err());
}
