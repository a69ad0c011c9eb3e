//! Lane-parallel loop helpers
//!
//! Every elementwise kernel funnels through [`fill_lanes`]: lanes are
//! independent, so the loop is a flat data-parallel map with no cross-lane
//! ordering. With the `rayon` feature the map runs on the global pool;
//! without it the same closure runs serially. Either way the call returns
//! only after every lane has been written.

use crate::dtype::Element;

/// One operand of a lane loop: a full buffer or a loop-invariant scalar
///
/// The scalar arm is what the vs/sv kernels capture per task, so the lane
/// closure stays branch-uniform across a call.
pub(crate) enum Src<T> {
    /// Per-lane values
    Many(Vec<T>),
    /// One value for every lane
    One(T),
}

impl<T: Element> Src<T> {
    /// Value at lane `i`
    #[inline]
    pub(crate) fn at(&self, i: usize) -> T {
        match self {
            Self::Many(v) => v[i],
            Self::One(x) => *x,
        }
    }

    /// The scalar value, when this is the scalar arm
    #[inline]
    pub(crate) fn splat(&self) -> Option<T> {
        match self {
            Self::One(x) => Some(*x),
            Self::Many(_) => None,
        }
    }

    /// True when any lane satisfies the predicate (pre-pass reductions)
    pub(crate) fn any(&self, len: usize, pred: impl Fn(T) -> bool) -> bool {
        match self {
            Self::Many(v) => v.iter().any(|&x| pred(x)),
            Self::One(x) => len > 0 && pred(*x),
        }
    }
}

/// Fill a fresh lane vector by evaluating `f` at every index
#[cfg(feature = "rayon")]
pub(crate) fn fill_lanes<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    use rayon::prelude::*;
    (0..len).into_par_iter().map(f).collect()
}

/// Fill a fresh lane vector by evaluating `f` at every index
#[cfg(not(feature = "rayon"))]
pub(crate) fn fill_lanes<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    (0..len).map(f).collect()
}
