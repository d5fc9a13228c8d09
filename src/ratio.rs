//! A rational data type that is always kept in lowest terms, intended to replace floating-point
//! arithmetic wherever ratios have to stay exact.

use std::{
    cmp::Ordering,
    fmt::{self, Display},
};

use thiserror::Error;

/// The base type used for both fields. Callers are expected to keep magnitudes in this range.
pub type BaseInt = i32;

/// Intermediate results are computed at this width: the product of any two [`BaseInt`]s, and the
/// sum of two such products, fits without overflowing.
pub type WideInt = i64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatioError {
    #[error("attempt to divide by zero")]
    DivideByZero,
    #[error("Could not convert {0} to a ratio: not a finite number")]
    InvalidOperand(f64),
    #[error("ratio does not fit in {} bits", BaseInt::BITS)]
    Overflow,
    #[error("Could not parse {0}")]
    Parse(String),
}

/// A rational number `numerator / denominator`.
///
/// Every value is normalized: the two fields share no common factor and the denominator is
/// strictly positive, so the sign always lives on the numerator and zero is `0/1`. Since the
/// representation is unique, equality and hashing compare fields directly.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct Ratio {
    numerator: BaseInt,
    denominator: BaseInt,
}

/// Greatest common divisor of the magnitudes of `p` and `q`. `gcd(0, q) == |q|`.
pub const fn gcd(p: WideInt, q: WideInt) -> WideInt {
    let mut p = p.unsigned_abs();
    let mut q = q.unsigned_abs();
    while q != 0 {
        let r = p % q;
        p = q;
        q = r;
    }

    p as WideInt
}

/// Unwraps the result of a fallible operation in a context that cannot return it, such as an
/// operator impl, panicking with the error message.
pub(crate) fn or_panic(result: Result<Ratio, RatioError>) -> Ratio {
    match result {
        Ok(r) => r,
        Err(e) => panic!("{}", e),
    }
}

impl Ratio {
    pub const ZERO: Ratio = Ratio::from_integer(0);

    pub const ONE: Ratio = Ratio::from_integer(1);

    pub const NEG_ONE: Ratio = Ratio::from_integer(-1);

    /// Creates a new `Ratio` in lowest terms.
    ///
    /// # Panics
    /// If `denominator` is zero, or if the normalized value does not fit (only `BaseInt::MIN`
    /// over a negative denominator can fail this way).
    pub fn new(numerator: BaseInt, denominator: BaseInt) -> Self {
        or_panic(Self::try_new(numerator, denominator))
    }

    /// Creates a new `Ratio` in lowest terms, or errors if `denominator` is zero.
    pub fn try_new(numerator: BaseInt, denominator: BaseInt) -> Result<Self, RatioError> {
        Self::reduce(numerator.into(), denominator.into())
    }

    /// The ratio `n/1`.
    pub const fn from_integer(n: BaseInt) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    /// Builds a normalized ratio from wide intermediate values, then narrows it back to
    /// [`BaseInt`]. All arithmetic funnels through here.
    pub(crate) fn reduce(numerator: WideInt, denominator: WideInt) -> Result<Self, RatioError> {
        if denominator == 0 {
            return Err(RatioError::DivideByZero);
        }

        let g = gcd(numerator, denominator);
        let (mut n, mut d) = (numerator / g, denominator / g);
        if d < 0 {
            n = n.checked_neg().ok_or(RatioError::Overflow)?;
            d = d.checked_neg().ok_or(RatioError::Overflow)?;
        }

        Ok(Self {
            numerator: BaseInt::try_from(n).map_err(|_| RatioError::Overflow)?,
            denominator: BaseInt::try_from(d).map_err(|_| RatioError::Overflow)?,
        })
    }

    pub const fn numerator(&self) -> BaseInt {
        self.numerator
    }

    pub const fn denominator(&self) -> BaseInt {
        self.denominator
    }

    /// Mutable access to the numerator. Writing through this can break normalization: call
    /// [`Ratio::irreducible`] afterwards.
    pub fn numerator_mut(&mut self) -> &mut BaseInt {
        &mut self.numerator
    }

    /// Mutable access to the denominator. Writing through this can break normalization: call
    /// [`Ratio::irreducible`] afterwards.
    pub fn denominator_mut(&mut self) -> &mut BaseInt {
        &mut self.denominator
    }

    /// Both fields, widened for intermediate arithmetic.
    pub(crate) fn wide(self) -> (WideInt, WideInt) {
        (self.numerator.into(), self.denominator.into())
    }

    /// Puts this ratio back into lowest terms with a positive denominator. A no-op on any value
    /// that has not been edited through the `_mut` accessors.
    ///
    /// # Panics
    /// If the denominator has been set to zero.
    pub fn irreducible(&mut self) {
        let (n, d) = self.wide();
        *self = or_panic(Self::reduce(n, d));
    }

    /// Replaces this ratio with its reciprocal, keeping the sign on the numerator.
    ///
    /// # Panics
    /// If this ratio is zero.
    pub fn inverse(&mut self) {
        *self = self.recip();
    }

    /// Replaces this ratio with its reciprocal, or errors (leaving it untouched) if it is zero.
    pub fn try_inverse(&mut self) -> Result<(), RatioError> {
        *self = self.try_recip()?;
        Ok(())
    }

    /// The reciprocal `1 / self`.
    ///
    /// # Panics
    /// If this ratio is zero.
    pub fn recip(self) -> Self {
        or_panic(self.try_recip())
    }

    pub fn try_recip(self) -> Result<Self, RatioError> {
        if self.numerator == 0 {
            return Err(RatioError::DivideByZero);
        }
        let (n, d) = self.wide();
        Self::reduce(d, n)
    }

    pub const fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    /// The nearest `f64` to this ratio.
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Ord for Ratio {
    /// Compares by cross-multiplication, which is exact because both denominators are positive.
    fn cmp(&self, other: &Self) -> Ordering {
        let (n1, d1) = self.wide();
        let (n2, d2) = other.wide();
        (n1 * d2).cmp(&(n2 * d1))
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{})", self.numerator, self.denominator)
    }
}

impl fmt::Debug for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ratio!({} / {})", self.numerator, self.denominator)
    }
}

/// Builds a [`Ratio`]: `ratio!(3 / 4)`, `ratio!(n / d)` or `ratio!(-2)`. The numerator of the first
/// form is a single token, optionally negated; wrap anything longer in parentheses.
#[macro_export]
macro_rules! ratio {
    ($num:tt / $denom:expr) => {
        $crate::ratio::Ratio::new($num, $denom)
    };
    (- $num:tt / $denom:expr) => {
        $crate::ratio::Ratio::new(-$num, $denom)
    };
    ($num:expr) => {
        $crate::ratio::Ratio::from_integer($num)
    };
}
