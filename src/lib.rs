//! # arrayd
//!
//! **Type-promotion and elementwise binary-operation kernel for a
//! NumPy-compatible array server.**
//!
//! Client requests name two arrays (or an array and a scalar) in a
//! server-side symbol table together with an operator string; this crate
//! derives the result element type under NumPy's promotion rules,
//! allocates the result, and evaluates the operation elementwise with
//! the full set of per-type special cases: integer division by zero
//! yielding 0, signed/unsigned mixing widening to real, boolean promotion,
//! real-part-only complex comparison, and bounded big-integer arithmetic
//! reduced modulo `2^max_bits`.
//!
//! ## Quick Start
//!
//! ```rust
//! use arrayd::prelude::*;
//!
//! let st = SymbolTable::new();
//! let a = st.add(NdArray::from_vec(vec![1i64, 2, 3], [3]).unwrap());
//! let b = st.add(NdArray::from_vec(vec![4i64, 5, 6], [3]).unwrap());
//!
//! let args = MsgArgs::from_pairs([("op", "+"), ("a", a.as_str()), ("b", b.as_str())]);
//! let reply = binopvv_msg(&args, &st);
//! assert_eq!(reply.msg_type, MsgType::Normal);
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): multi-threaded lane loops
//!
//! ## What stays outside
//!
//! Broadcasting across different shapes, reductions, linear algebra,
//! indexing, persistence, and the request wire format are the embedding
//! server's business; handlers here consume already-parsed argument maps.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod dtype;
pub mod error;
pub mod kernels;
pub mod ops;
pub mod server;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::array::{NdArray, ScalarValue, Shape};
    pub use crate::dtype::{DType, DTypeKind};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{BinaryOp, OpCategory};
    pub use crate::server::{
        binopsv_msg, binopvs_msg, binopvv_msg, clip_msg, command_table, opeqvs_msg, opeqvv_msg,
        result_dtype, MsgArgs, MsgType, Reply, SymbolTable,
    };
}
