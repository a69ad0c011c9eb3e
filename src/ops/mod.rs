//! Operator taxonomy
//!
//! This module defines the closed operator set of the binary-operation
//! commands and its category classification. Categories decide both the
//! promotion rule (true division and fancy arithmetic diverge from the
//! common rule) and the kernel family a request routes to.

mod operator;

pub use operator::{BinaryOp, OpCategory};
