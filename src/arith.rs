//! Arithmetic on [`Ratio`]: the operators against other ratios and against primitive scalars,
//! their checked forms, and the `num-traits` algebra traits built on them.
//!
//! Every result is computed in [`WideInt`](crate::ratio::WideInt) and reduced before narrowing, so
//! intermediate products never overflow. A reduced result outside the
//! [`BaseInt`](crate::ratio::BaseInt) range is an error.

use std::{
    iter::{Product, Sum},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
};

use num_traits::{
    CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Inv, Num, One, Signed, Zero,
};

use crate::{
    ratio::{or_panic, BaseInt, Ratio, RatioError},
    real::Real,
};

impl Ratio {
    pub fn try_add(self, rhs: Self) -> Result<Self, RatioError> {
        let ((n1, d1), (n2, d2)) = (self.wide(), rhs.wide());
        Self::reduce(n1 * d2 + d1 * n2, d1 * d2)
    }

    pub fn try_sub(self, rhs: Self) -> Result<Self, RatioError> {
        let ((n1, d1), (n2, d2)) = (self.wide(), rhs.wide());
        Self::reduce(n1 * d2 - d1 * n2, d1 * d2)
    }

    pub fn try_mul(self, rhs: Self) -> Result<Self, RatioError> {
        let ((n1, d1), (n2, d2)) = (self.wide(), rhs.wide());
        Self::reduce(n1 * n2, d1 * d2)
    }

    /// `self * rhs.recip()`, or [`RatioError::DivideByZero`] if `rhs` is zero.
    pub fn try_div(self, rhs: Self) -> Result<Self, RatioError> {
        self.try_mul(rhs.try_recip()?)
    }

    /// The remainder of truncated division, with the sign of `self`, like `%` on floats.
    pub fn try_rem(self, rhs: Self) -> Result<Self, RatioError> {
        let ((n1, d1), (n2, d2)) = (self.wide(), rhs.wide());
        let (a, b) = (n1 * d2, n2 * d1);
        if b == 0 {
            return Err(RatioError::DivideByZero);
        }
        Self::reduce(a % b, d1 * d2)
    }

    pub fn try_neg(self) -> Result<Self, RatioError> {
        let (n, d) = self.wide();
        Self::reduce(-n, d)
    }
}

impl Add for Ratio {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        or_panic(self.try_add(rhs))
    }
}

impl Sub for Ratio {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        or_panic(self.try_sub(rhs))
    }
}

impl Mul for Ratio {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        or_panic(self.try_mul(rhs))
    }
}

impl Div for Ratio {
    type Output = Self;

    /// Note: panics when dividing by zero. Use [`Ratio::try_div`] to get an error instead.
    fn div(self, rhs: Self) -> Self::Output {
        or_panic(self.try_div(rhs))
    }
}

impl Rem for Ratio {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        or_panic(self.try_rem(rhs))
    }
}

impl Neg for Ratio {
    type Output = Self;

    fn neg(self) -> Self::Output {
        or_panic(self.try_neg())
    }
}

// Scalars go through `Ratio::from_real`, so a non-integral float operand is only as exact as its
// continued-fraction expansion.
macro_rules! impl_scalar_ops {
    ($(($op:ident, $method:ident, $op_assign:ident, $method_assign:ident)),*) => {$(
        impl $op_assign for Ratio {
            fn $method_assign(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }

        impl<T: Real> $op<T> for Ratio {
            type Output = Self;

            fn $method(self, rhs: T) -> Self::Output {
                $op::$method(self, Ratio::from_real(rhs))
            }
        }

        impl<T: Real> $op_assign<T> for Ratio {
            fn $method_assign(&mut self, rhs: T) {
                *self = $op::$method(*self, Ratio::from_real(rhs));
            }
        }
    )*};
}

impl_scalar_ops!(
    (Add, add, AddAssign, add_assign),
    (Sub, sub, SubAssign, sub_assign),
    (Mul, mul, MulAssign, mul_assign),
    (Div, div, DivAssign, div_assign),
    (Rem, rem, RemAssign, rem_assign)
);

macro_rules! impl_scalar_lhs {
    ($($t:ty),*) => {$(
        impl Add<Ratio> for $t {
            type Output = Ratio;

            fn add(self, rhs: Ratio) -> Ratio {
                Ratio::from_real(self) + rhs
            }
        }

        impl Sub<Ratio> for $t {
            type Output = Ratio;

            fn sub(self, rhs: Ratio) -> Ratio {
                Ratio::from_real(self) - rhs
            }
        }

        impl Mul<Ratio> for $t {
            type Output = Ratio;

            fn mul(self, rhs: Ratio) -> Ratio {
                Ratio::from_real(self) * rhs
            }
        }

        impl Div<Ratio> for $t {
            type Output = Ratio;

            fn div(self, rhs: Ratio) -> Ratio {
                Ratio::from_real(self) / rhs
            }
        }
    )*};
}

impl_scalar_lhs!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Sum for Ratio {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Ratio::ZERO, Add::add)
    }
}

impl Product for Ratio {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Ratio::ONE, Mul::mul)
    }
}

impl CheckedAdd for Ratio {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        self.try_add(*v).ok()
    }
}

impl CheckedSub for Ratio {
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        self.try_sub(*v).ok()
    }
}

impl CheckedMul for Ratio {
    fn checked_mul(&self, v: &Self) -> Option<Self> {
        self.try_mul(*v).ok()
    }
}

impl CheckedDiv for Ratio {
    fn checked_div(&self, v: &Self) -> Option<Self> {
        self.try_div(*v).ok()
    }
}

impl Inv for Ratio {
    type Output = Self;

    fn inv(self) -> Self::Output {
        self.recip()
    }
}

impl Zero for Ratio {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.numerator() == 0
    }
}

impl One for Ratio {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        *self == Self::ONE
    }
}

impl Num for Ratio {
    type FromStrRadixErr = RatioError;

    /// Reads `n` or `n/d`, with both parts in the given radix.
    fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        let int = |part: &str| {
            BaseInt::from_str_radix(part.trim(), radix)
                .map_err(|_| RatioError::Parse(s.to_owned()))
        };
        match s.split_once('/') {
            Some((n, d)) => Self::try_new(int(n)?, int(d)?),
            None => int(s).map(Self::from_integer),
        }
    }
}

impl Signed for Ratio {
    fn abs(&self) -> Self {
        Ratio::abs(*self)
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::ZERO
        } else {
            *self - *other
        }
    }

    fn signum(&self) -> Self {
        Ratio::signum(*self)
    }

    fn is_positive(&self) -> bool {
        self.numerator() > 0
    }

    fn is_negative(&self) -> bool {
        self.numerator() < 0
    }
}
