//! Shared helpers for the tests of the workspace crates.

mod approx_eq;
pub mod asset;

pub use crate::approx_eq::ApproxEqIter;
#[doc(hidden)]
pub use float_cmp::approx_eq;
