//! Elementary functions on [`Ratio`].
//!
//! Rounding functions (`abs`, `floor`, `ceil`, `trunc`, `round`, `fract`) are exact. The
//! transcendental functions are not: they evaluate the `f64` function on the ratio's value and
//! convert the result back with [`Ratio::from_real`], so they are only as precise as that
//! conversion. Avoid them where an exact rational result is required.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use num_traits::Pow;

use crate::{
    ratio::{or_panic, Ratio, RatioError, WideInt},
    real::Real,
};

impl Ratio {
    pub fn abs(self) -> Self {
        let (n, d) = self.wide();
        or_panic(Self::reduce(n.abs(), d))
    }

    /// The greatest integer not above this ratio.
    pub fn floor(self) -> Self {
        let (n, d) = self.wide();
        or_panic(Self::reduce(n.div_euclid(d), 1))
    }

    /// The least integer not below this ratio.
    pub fn ceil(self) -> Self {
        let (n, d) = self.wide();
        or_panic(Self::reduce(-(-n).div_euclid(d), 1))
    }

    /// Rounds toward zero.
    pub fn trunc(self) -> Self {
        let (n, d) = self.wide();
        or_panic(Self::reduce(n / d, 1))
    }

    /// Rounds to the nearest integer, with halves rounded away from zero.
    pub fn round(self) -> Self {
        let (n, d) = self.wide();
        or_panic(Self::reduce((2 * n + n.signum() * d) / (2 * d), 1))
    }

    /// `self - self.trunc()`, which has the sign of `self`.
    pub fn fract(self) -> Self {
        let (n, d) = self.wide();
        or_panic(Self::reduce(n % d, d))
    }

    pub fn signum(self) -> Self {
        Self::from_integer(self.numerator().signum())
    }

    pub fn sin(self) -> Self {
        Self::from_real(self.to_f64().sin())
    }

    pub fn cos(self) -> Self {
        Self::from_real(self.to_f64().cos())
    }

    /// `sin / cos`.
    ///
    /// # Panics
    /// When the cosine converts to zero.
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    pub fn exp(self) -> Self {
        Self::from_real(self.to_f64().exp())
    }

    /// The natural logarithm.
    ///
    /// # Panics
    /// If this ratio is not positive.
    pub fn log(self) -> Self {
        Self::from_real(self.to_f64().ln())
    }

    /// # Panics
    /// If this ratio is negative.
    pub fn sqrt(self) -> Self {
        Self::from_real(self.to_f64().sqrt())
    }

    /// Raises this ratio to the power `exponent`. See [`Ratio::try_pow`].
    ///
    /// # Panics
    /// Whenever [`Ratio::try_pow`] errors.
    pub fn pow<T: Real>(self, exponent: T) -> Self {
        or_panic(self.try_pow(exponent))
    }

    /// Raises the numerator and denominator separately to the power `exponent`. A negative
    /// exponent inverts the base first.
    ///
    /// Integral exponents are exact, and error with [`RatioError::Overflow`] once a component
    /// leaves the range. Fractional exponents raise each component as a float: when both powers
    /// are whole numbers they become the new fields, otherwise their quotient is converted back
    /// approximately.
    pub fn try_pow<T: Real>(self, exponent: T) -> Result<Self, RatioError> {
        let mut exponent = exponent.to_f64().unwrap_or(f64::NAN);
        if !exponent.is_finite() {
            return Err(RatioError::InvalidOperand(exponent));
        }
        if exponent == 0.0 {
            return Ok(Self::ONE);
        }

        let mut base = self;
        if exponent < 0.0 {
            base = base.try_recip()?;
            exponent = -exponent;
        }

        let (n, d) = base.wide();
        if exponent.fract() == 0.0 {
            // 0, 1 and -1 are fixed points for any exponent, up to the sign of -1
            if d == 1 && n.abs() <= 1 {
                let odd = exponent % 2.0 == 1.0;
                return Ok(if n == -1 && !odd { Self::ONE } else { base });
            }
            let e = u32::try_from(exponent as u64).map_err(|_| RatioError::Overflow)?;
            let pow = |x: WideInt| x.checked_pow(e).ok_or(RatioError::Overflow);
            Self::reduce(pow(n)?, pow(d)?)
        } else {
            let (pn, pd) = ((n as f64).powf(exponent), (d as f64).powf(exponent));
            match (whole(pn), whole(pd)) {
                (Some(pn), Some(pd)) => Self::reduce(pn, pd),
                _ => Self::try_from_real(pn / pd),
            }
        }
    }
}

/// `x` as an integer, if it is one that `f64` represents exactly.
fn whole(x: f64) -> Option<WideInt> {
    let exact = (1u64 << f64::MANTISSA_DIGITS) as f64;
    (x.fract() == 0.0 && x.abs() <= exact).then_some(x as WideInt)
}

impl<T: Real> Pow<T> for Ratio {
    type Output = Self;

    fn pow(self, rhs: T) -> Self::Output {
        Ratio::pow(self, rhs)
    }
}

// Tolerance comparisons on the `f64` values. Exact comparison is just `==`.

impl AbsDiffEq for Ratio {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.to_f64(), &other.to_f64(), epsilon)
    }
}

impl RelativeEq for Ratio {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        f64::relative_eq(&self.to_f64(), &other.to_f64(), epsilon, max_relative)
    }
}

impl UlpsEq for Ratio {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        f64::ulps_eq(&self.to_f64(), &other.to_f64(), epsilon, max_ulps)
    }
}
