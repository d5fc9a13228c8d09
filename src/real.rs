//! Conversion between [`Ratio`] and the primitive number types. Floats are turned into ratios by
//! continued-fraction expansion, which is an approximation: only reals with a short expansion come
//! back exactly.

use num_traits::{Bounded, Float, FromPrimitive, ToPrimitive};

use crate::ratio::{or_panic, BaseInt, Ratio, RatioError, WideInt};

/// The maximum number of partial quotients used when converting a float to a [`Ratio`].
pub const DEFAULT_ITERATION_BUDGET: u32 = 100;

mod sealed {
    pub trait Sealed {}
}

/// A primitive number that can become a [`Ratio`]: every built-in integer and float type. This is
/// the bound on every generic constructor and on the mixed scalar operators, so non-numeric
/// operands are rejected at compile time.
pub trait Real: Copy + PartialOrd + ToPrimitive + sealed::Sealed {
    /// Converts `self` to a ratio. Floats use at most `budget` partial quotients of their
    /// continued-fraction expansion. Integers are exact.
    fn to_ratio(self, budget: u32) -> Result<Ratio, RatioError>;
}

macro_rules! impl_real_int {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Real for $t {
            fn to_ratio(self, _budget: u32) -> Result<Ratio, RatioError> {
                BaseInt::try_from(self)
                    .map(Ratio::from_integer)
                    .map_err(|_| RatioError::Overflow)
            }
        }
    )*};
}

macro_rules! impl_real_float {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Real for $t {
            fn to_ratio(self, budget: u32) -> Result<Ratio, RatioError> {
                continued_fraction(self, budget)
            }
        }
    )*};
}

impl_real_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_real_float!(f32, f64);

/// Expands `real` as a continued fraction `a0 + 1/(a1 + 1/(a2 + ...))` and returns the last
/// convergent, computed in the float's own width.
///
/// A partial quotient is taken for each integer part extracted: at most `budget` of them, and
/// never one that would push the convergent outside [`BaseInt`]. The leading zero quotient of a
/// value in `(0, 1)` does not count against the budget. Zero, or an empty budget, gives `0/1`.
pub(crate) fn continued_fraction<F: Float>(real: F, budget: u32) -> Result<Ratio, RatioError> {
    if !real.is_finite() {
        return Err(RatioError::InvalidOperand(real.to_f64().unwrap_or(f64::NAN)));
    }
    if real.is_zero() || budget == 0 {
        return Ok(Ratio::ZERO);
    }

    let negative = real < F::zero();
    let mut x = real.abs();

    // (h, k) is the current convergent, (h_prev, k_prev) the one before it.
    let (mut h, mut k): (WideInt, WideInt) = (1, 0);
    let (mut h_prev, mut k_prev): (WideInt, WideInt) = (0, 1);
    let mut has_term = false;

    if x < F::one() {
        (h, k, h_prev, k_prev) = (0, 1, h, k);
        has_term = true;
        x = x.recip();
    }

    let bound = WideInt::from(BaseInt::MAX);
    let mut remaining = budget;
    while remaining > 0 {
        let q = x.floor();
        let next = q.to_i64().and_then(|a| {
            let h_next = a.checked_mul(h)?.checked_add(h_prev)?;
            let k_next = a.checked_mul(k)?.checked_add(k_prev)?;
            (h_next <= bound && k_next <= bound).then_some((h_next, k_next))
        });
        let Some((h_next, k_next)) = next else {
            break;
        };

        (h, k, h_prev, k_prev) = (h_next, k_next, h, k);
        has_term = true;
        remaining -= 1;

        let rem = x - q;
        if rem.is_zero() {
            break;
        }
        x = rem.recip();
    }

    if !has_term {
        return Err(RatioError::Overflow);
    }

    Ratio::reduce(if negative { -h } else { h }, k)
}

impl Ratio {
    /// Converts any primitive number to a ratio, using [`DEFAULT_ITERATION_BUDGET`] for floats.
    pub fn try_from_real<T: Real>(real: T) -> Result<Self, RatioError> {
        real.to_ratio(DEFAULT_ITERATION_BUDGET)
    }

    /// Like [`Ratio::try_from_real`], with an explicit iteration budget. Smaller budgets give
    /// coarser approximations of floats.
    pub fn try_from_real_with_budget<T: Real>(real: T, budget: u32) -> Result<Self, RatioError> {
        real.to_ratio(budget)
    }

    /// Converts any primitive number to a ratio.
    ///
    /// # Panics
    /// If `real` is NaN or infinite, or its integer part does not fit in [`BaseInt`].
    pub fn from_real<T: Real>(real: T) -> Self {
        or_panic(Self::try_from_real(real))
    }
}

macro_rules! impl_from_lossless {
    ($($t:ty),*) => {$(
        impl From<$t> for Ratio {
            fn from(value: $t) -> Self {
                Ratio::from_integer(value.into())
            }
        }
    )*};
}

macro_rules! impl_try_from {
    ($($t:ty),*) => {$(
        impl TryFrom<$t> for Ratio {
            type Error = RatioError;

            fn try_from(value: $t) -> Result<Self, Self::Error> {
                Ratio::try_from_real(value)
            }
        }
    )*};
}

impl_from_lossless!(i8, i16, i32, u8, u16);
impl_try_from!(i64, i128, isize, u32, u64, u128, usize, f32, f64);

impl From<Ratio> for f64 {
    fn from(value: Ratio) -> Self {
        value.to_f64()
    }
}

impl From<Ratio> for f32 {
    fn from(value: Ratio) -> Self {
        (value.numerator() as f32) / (value.denominator() as f32)
    }
}

impl ToPrimitive for Ratio {
    /// Truncates toward zero.
    fn to_i64(&self) -> Option<i64> {
        Some(WideInt::from(self.numerator()) / WideInt::from(self.denominator()))
    }

    /// Truncates toward zero; `None` at or below `-1`.
    fn to_u64(&self) -> Option<u64> {
        self.to_i64().and_then(|n| u64::try_from(n).ok())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Ratio::to_f64(*self))
    }
}

impl FromPrimitive for Ratio {
    fn from_i64(n: i64) -> Option<Self> {
        Self::try_from_real(n).ok()
    }

    fn from_u64(n: u64) -> Option<Self> {
        Self::try_from_real(n).ok()
    }

    fn from_f32(n: f32) -> Option<Self> {
        Self::try_from_real(n).ok()
    }

    fn from_f64(n: f64) -> Option<Self> {
        Self::try_from_real(n).ok()
    }
}

impl Bounded for Ratio {
    fn min_value() -> Self {
        Ratio::from_integer(BaseInt::MIN)
    }

    fn max_value() -> Self {
        Ratio::from_integer(BaseInt::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio;

    use approx::assert_ulps_eq;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_short_expansions_are_exact() {
        let r = Ratio::from_real(1.5);
        assert_eq!(r, ratio!(3 / 2));
        assert_eq!(r.numerator() as f64 / r.denominator() as f64, 1.5);

        let r = Ratio::from_real(3.5f32);
        assert_eq!(r, ratio!(7 / 2));
        assert_eq!(r.numerator() as f32 / r.denominator() as f32, 3.5);

        let r = Ratio::from_real(2);
        assert_eq!(r, ratio!(2));

        assert_eq!(Ratio::from_real(0.75), ratio!(3 / 4));
        assert_eq!(Ratio::from_real(0.125), ratio!(1 / 8));
        assert_eq!(Ratio::from_real(2.5), ratio!(5 / 2));
    }

    #[test]
    fn test_sign() {
        assert_eq!(Ratio::from_real(-1.5), ratio!(-3 / 2));
        assert_eq!(Ratio::from_real(-0.25f32), ratio!(-1 / 4));
        assert_eq!(Ratio::from_real(-7i64), ratio!(-7));
    }

    #[test]
    fn test_zero() {
        assert_eq!(Ratio::from_real(0.0), Ratio::ZERO);
        assert_eq!(Ratio::from_real(-0.0), Ratio::ZERO);
        assert_eq!(Ratio::from_real(0u8), Ratio::ZERO);
    }

    #[test]
    fn test_budget() {
        assert_eq!(Ratio::try_from_real_with_budget(1.5, 0), Ok(Ratio::ZERO));
        // only the integer part fits in one partial quotient
        assert_eq!(Ratio::try_from_real_with_budget(1.5, 1), Ok(ratio!(1)));
        assert_eq!(Ratio::try_from_real_with_budget(1.5, 2), Ok(ratio!(3 / 2)));
        // the leading zero of a proper fraction is free
        assert_eq!(Ratio::try_from_real_with_budget(0.5, 1), Ok(ratio!(1 / 2)));

        // pi = [3; 7, 15, 1, 292, ...]
        let pi = std::f64::consts::PI;
        assert_eq!(Ratio::try_from_real_with_budget(pi, 1), Ok(ratio!(3)));
        assert_eq!(Ratio::try_from_real_with_budget(pi, 2), Ok(ratio!(22 / 7)));
        assert_eq!(Ratio::try_from_real_with_budget(pi, 3), Ok(ratio!(333 / 106)));
        assert_eq!(Ratio::try_from_real_with_budget(pi, 4), Ok(ratio!(355 / 113)));
    }

    #[test]
    fn test_long_expansion_stays_in_range() {
        let r = Ratio::from_real(std::f64::consts::PI);
        assert!(r.denominator() > 113);
        assert!((r.to_f64() - std::f64::consts::PI).abs() < 1e-15);

        let r = Ratio::from_real(1.0 / 3.0);
        assert_eq!(r, ratio!(1 / 3));
    }

    #[test]
    fn test_tiny_values_round_to_zero() {
        assert_eq!(Ratio::from_real(1e-300), Ratio::ZERO);
        assert_eq!(Ratio::from_real(-1e-12), Ratio::ZERO);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            Ratio::try_from_real(f64::NAN),
            Err(RatioError::InvalidOperand(_))
        ));
        assert_eq!(
            Ratio::try_from_real(f64::INFINITY),
            Err(RatioError::InvalidOperand(f64::INFINITY))
        );
        assert_eq!(Ratio::try_from_real(1e10), Err(RatioError::Overflow));
        assert_eq!(Ratio::try_from_real(u64::MAX), Err(RatioError::Overflow));
        assert_eq!(Ratio::try_from(-3_000_000_000i64), Err(RatioError::Overflow));
    }

    #[test]
    #[should_panic(expected = "not a finite number")]
    fn test_nan_panics() {
        Ratio::from_real(f64::NAN);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Ratio::from(3u8), ratio!(3));
        assert_eq!(Ratio::from(-3i16), ratio!(-3));
        assert_eq!(Ratio::try_from(0.5f64), Ok(ratio!(1 / 2)));
        assert_eq!(Ratio::try_from(12u64), Ok(ratio!(12)));

        assert_ulps_eq!(f64::from(ratio!(1 / 3)), 1.0 / 3.0);
        assert_ulps_eq!(f32::from(ratio!(-7 / 4)), -1.75f32);

        assert_eq!(ratio!(7 / 2).to_i64(), Some(3));
        assert_eq!(ratio!(-7 / 2).to_i64(), Some(-3));
        assert_eq!(ratio!(-7 / 2).to_u64(), None);
        assert_eq!(ratio!(-1 / 2).to_u64(), Some(0));

        assert_eq!(Ratio::from_i64(1 << 40), None);
        assert_eq!(Ratio::from_f64(0.25), Some(ratio!(1 / 4)));
        assert_eq!(Ratio::max_value(), ratio!(BaseInt::MAX));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]
        #[test]
        fn test_dyadic_roundtrip(n in -(1i32 << 20)..(1i32 << 20), shift in 0u32..10) {
            // n / 2^shift has a short, exactly representable expansion
            let x = n as f64 / (1u32 << shift) as f64;
            let r = Ratio::from_real(x);
            prop_assert_eq!(r.to_f64(), x);
            prop_assert_eq!(r, Ratio::new(n, 1 << shift));
        }

        #[test]
        fn test_approximation_is_close(x in -1e6f64..1e6f64) {
            let r = Ratio::from_real(x);
            prop_assert!((r.to_f64() - x).abs() <= 1e-6 * (1.0 + x.abs()));
        }
    }
}
