//! Parsing ratios from text. The `(n/d)` form written by `Display` reads back exactly, as do `n/d`
//! and plain integers. Anything else that parses as a float goes through
//! [`Ratio::try_from_real`].

use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{i32 as base_int, multispace0};
use nom::combinator::{all_consuming, opt};
use nom::error::ParseError;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

use crate::ratio::{BaseInt, Ratio, RatioError};

/// A combinator that takes a parser `inner` and produces a parser that also consumes both leading and
/// trailing whitespace, returning the output of `inner`.
fn ws<'a, F: 'a, O, E: ParseError<&'a str>>(
    inner: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: Fn(&'a str) -> IResult<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses a signed integer that fits in [`BaseInt`].
pub fn integer(input: &str) -> IResult<&str, BaseInt> {
    base_int(input)
}

/// Parses `n` or `n/d`, returning the numerator and the denominator if there is one.
pub fn fraction(input: &str) -> IResult<&str, (BaseInt, Option<BaseInt>)> {
    pair(ws(integer), opt(preceded(tag("/"), ws(integer))))(input)
}

/// Parses a fraction, optionally wrapped in parentheses as `Display` writes it.
pub fn ratio_literal(input: &str) -> IResult<&str, (BaseInt, Option<BaseInt>)> {
    alt((delimited(ws(tag("(")), fraction, ws(tag(")"))), fraction))(input)
}

impl FromStr for Ratio {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match all_consuming(ratio_literal)(s) {
            Ok((_, (n, Some(d)))) => Ratio::try_new(n, d),
            Ok((_, (n, None))) => Ok(Ratio::from_integer(n)),
            Err(_) => f64::from_str(s.trim())
                .map_err(|_| RatioError::Parse(s.to_owned()))
                .and_then(Ratio::try_from_real),
        }
    }
}
