//! Error types for arrayd

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using arrayd's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while dispatching or executing a kernel
///
/// Display strings for the first three variants are wire templates: the
/// server layer forwards them verbatim inside an ERROR reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The (left dtype, operator, right dtype) triple has no kernel
    /// specialization
    #[error("Error: {routine}: not implemented for ({lt}, {op}, {rt})")]
    NotImplemented {
        /// Command routine that rejected the request
        routine: &'static str,
        /// Left operand dtype
        lt: DType,
        /// Operator string
        op: String,
        /// Right operand dtype
        rt: DType,
    },

    /// An operand dtype outside the supported catalog reached a dispatcher
    #[error("Error: {routine}: unrecognized type ({lt}, {rt})")]
    UnrecognizedType {
        /// Command routine that rejected the request
        routine: &'static str,
        /// Left operand dtype
        lt: DType,
        /// Right operand dtype
        rt: DType,
    },

    /// Integer exponentiation with a negative exponent
    #[error("Attempt to exponentiate base of type {} to negative exponent", .base.label())]
    NegativeExponent {
        /// Element type of the base array
        base: DType,
    },

    /// The operator string is not in the closed operator set
    #[error("unsupported operator: {op}")]
    UnsupportedOperator {
        /// The offending operator string
        op: String,
    },

    /// Rotation requested on a bigint array with no max_bits attribute
    #[error("rotation of a bigint array requires a max_bits attribute")]
    RotationWithoutWidth,

    /// Operand shapes differ (broadcasting across shapes is out of scope)
    #[error("shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        /// Left operand shape
        lhs: Vec<usize>,
        /// Right operand shape
        rhs: Vec<usize>,
    },

    /// Symbol table lookup failed
    #[error("undefined symbol: {name}")]
    UndefinedSymbol {
        /// The name that was looked up
        name: String,
    },

    /// A required argument key is missing or malformed
    #[error("bad argument '{arg}': {reason}")]
    BadArgument {
        /// Argument key
        arg: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

impl Error {
    /// Shorthand for the not-implemented template
    pub fn not_implemented(
        routine: &'static str,
        lt: DType,
        op: impl Into<String>,
        rt: DType,
    ) -> Self {
        Self::NotImplemented {
            routine,
            lt,
            op: op.into(),
            rt,
        }
    }

    /// Shorthand for the unrecognized-type template
    pub fn unrecognized(routine: &'static str, lt: DType, rt: DType) -> Self {
        Self::UnrecognizedType { routine, lt, rt }
    }
}
