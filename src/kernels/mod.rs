//! Elementwise kernels
//!
//! Three kernel families, per the dispatch front-end's routing:
//!
//! - [`binop`]: the non-bigint vv/vs/sv kernels for every operator category
//! - [`bigint`]: bigint arithmetic with the mask-after-op wrap policy
//! - [`opeq`] and [`clip`]: compound assignment and the bounded min/max op
//!
//! Lanes are independent; every loop routes through [`lanes::fill_lanes`],
//! which parallelizes under the `rayon` feature and guarantees the result
//! is fully populated before the kernel returns.

mod bigint;
mod binop;
mod clip;
mod dispatch;
mod lanes;
mod numeric;
mod opeq;

pub use bigint::{bigint_bin_op_sv, bigint_bin_op_vs, bigint_bin_op_vv};
pub use binop::{bin_op_sv, bin_op_vs, bin_op_vv};
pub use clip::{clip, ClipBound};
pub use opeq::{op_eq_vs, op_eq_vv};
