use num::{PrimInt, Unsigned};
use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Unsigned integer type usable as a vector component (e.g. one color channel).
///
/// Components are widened to [`u64`] for summation and to [`f64`] for distance calculations,
/// so neither centroid sums nor differences can overflow / underflow.
pub trait Component: PrimInt + Unsigned + Hash + Default + Display + Debug + Sync + Send + 'static {}
impl Component for u8 {}
impl Component for u16 {}
impl Component for u32 {}
