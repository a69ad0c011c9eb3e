//! Common test utilities
#![allow(dead_code)]

use arrayd::prelude::*;
use num_bigint::BigInt;

/// Build a 1-D i64 array
pub fn int_array(values: &[i64]) -> NdArray {
    NdArray::from_vec(values.to_vec(), [values.len()]).unwrap()
}

/// Build a 1-D u64 array
pub fn uint_array(values: &[u64]) -> NdArray {
    NdArray::from_vec(values.to_vec(), [values.len()]).unwrap()
}

/// Build a 1-D f64 array
pub fn real_array(values: &[f64]) -> NdArray {
    NdArray::from_vec(values.to_vec(), [values.len()]).unwrap()
}

/// Build a 1-D bool array
pub fn bool_array(values: &[bool]) -> NdArray {
    NdArray::from_vec(values.to_vec(), [values.len()]).unwrap()
}

/// Build a 1-D bigint array from i64 seeds
pub fn bigint_array(values: &[i64], max_bits: Option<u32>) -> NdArray {
    let data: Vec<BigInt> = values.iter().map(|&v| BigInt::from(v)).collect();
    NdArray::bigint_from_vec(data, [values.len()], max_bits).unwrap()
}

/// Bigint lanes of an array as i64 (test arrays stay small)
pub fn bigint_values_i64(a: &NdArray) -> Vec<i64> {
    use num_traits::ToPrimitive;
    a.bigint_values()
        .unwrap()
        .iter()
        .map(|x| x.to_i64().unwrap())
        .collect()
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|; NaN matches NaN.
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{msg}: length mismatch");
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        if x.is_nan() && y.is_nan() {
            continue;
        }
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{msg}: element {i} differs: {x} vs {y} (diff={diff}, tol={tol})"
        );
    }
}

/// Run one vv operation through the kernel API with the promoted dtype
pub fn run_vv(l: &NdArray, r: &NdArray, op: &str) -> Result<NdArray> {
    let op = BinaryOp::parse(op)?;
    let et = result_dtype(l.dtype(), r.dtype(), op);
    arrayd::kernels::bin_op_vv("test", l, r, et, op)
}
