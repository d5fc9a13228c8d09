//! Exact rational arithmetic on a pair of fixed-width integers, as a drop-in replacement for
//! floating-point numbers where ratios need to stay exact.
//!
//! ```
//! use ratio::{ratio, Ratio};
//!
//! let r = ratio!(3 / 2) + ratio!(1 / 2);
//! assert_eq!(r, ratio!(2));
//! assert_eq!(Ratio::from_real(1.5), ratio!(3 / 2));
//! assert_eq!(format!("{}", ratio!(-6 / 4)), "(-3/2)");
//! ```

mod arith;
mod math;
pub mod parsing;
pub mod ratio;
pub mod real;

pub use ratio::{gcd, BaseInt, Ratio, RatioError, WideInt};
pub use real::{Real, DEFAULT_ITERATION_BUDGET};
