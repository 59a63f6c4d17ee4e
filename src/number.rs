//! The two kinds of number the language knows about, and the arithmetic
//! between them. Integer-only arithmetic is exact and checked; as soon as a
//! float is involved the other operand is promoted to a float.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;

pub type Int = i64;

#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(Int),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumericError {
    DivideByZero,
    IntegerOverflow,
    NotAnInteger(f64),
    Domain(&'static str),
    Range(&'static str),
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivideByZero => write!(f, "cannot divide by zero!"),
            NumericError::IntegerOverflow => write!(f, "integer overflow"),
            NumericError::NotAnInteger(x) => write!(f, "cannot convert {:?} to an integer", x),
            NumericError::Domain(name) => write!(f, "math domain error in {}", name),
            NumericError::Range(name) => write!(f, "math range error in {}", name),
        }
    }
}

pub type Result<T = Number> = std::result::Result<T, NumericError>;

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(x) => x as f64,
            Number::Float(x) => x,
        }
    }

    pub fn as_integer(self) -> Option<Int> {
        match self {
            Number::Integer(x) => Some(x),
            Number::Float(_) => None,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Integer(x) => x == 0,
            Number::Float(x) => x == 0.0,
        }
    }

    fn combine(
        self,
        other: Number,
        int_op: fn(Int, Int) -> Option<Int>,
        float_op: fn(f64, f64) -> f64,
    ) -> Result {
        match (self, other) {
            (Number::Integer(x), Number::Integer(y)) => int_op(x, y)
                .map(Number::Integer)
                .ok_or(NumericError::IntegerOverflow),
            (x, y) => Ok(Number::Float(float_op(x.as_f64(), y.as_f64()))),
        }
    }

    pub fn add(self, other: Number) -> Result {
        self.combine(other, Int::checked_add, |x, y| x + y)
    }

    pub fn sub(self, other: Number) -> Result {
        self.combine(other, Int::checked_sub, |x, y| x - y)
    }

    pub fn mul(self, other: Number) -> Result {
        self.combine(other, Int::checked_mul, |x, y| x * y)
    }

    /// True division: the quotient is always a float.
    pub fn div(self, other: Number) -> Result {
        if other.is_zero() {
            return Err(NumericError::DivideByZero);
        }
        Ok(Number::Float(self.as_f64() / other.as_f64()))
    }

    pub fn abs(self) -> Result {
        match self {
            Number::Integer(x) => x
                .checked_abs()
                .map(Number::Integer)
                .ok_or(NumericError::IntegerOverflow),
            Number::Float(x) => Ok(Number::Float(x.abs())),
        }
    }

    /// Raise to a power. A non-negative integer power of an integer stays an
    /// integer; every other combination is computed with floats.
    pub fn pow(self, exponent: Number) -> Result {
        match (self, exponent) {
            (Number::Integer(base), Number::Integer(exp)) if exp >= 0 => {
                let exp = u32::try_from(exp).map_err(|_| NumericError::IntegerOverflow)?;
                base.checked_pow(exp)
                    .map(Number::Integer)
                    .ok_or(NumericError::IntegerOverflow)
            }
            (base, exp) => {
                let (base, exp) = (base.as_f64(), exp.as_f64());
                if base == 0.0 && exp < 0.0 {
                    return Err(NumericError::DivideByZero);
                }
                if base < 0.0 && exp.is_finite() && exp.fract() != 0.0 {
                    return Err(NumericError::Domain("expt"));
                }
                let result = base.powf(exp);
                if result.is_infinite() && base.is_finite() && exp.is_finite() {
                    return Err(NumericError::Range("expt"));
                }
                Ok(Number::Float(result))
            }
        }
    }

    /// Round half to even, producing an integer.
    pub fn round(self) -> Result {
        match self {
            Number::Integer(_) => Ok(self),
            Number::Float(x) => float_to_int(x.round_ties_even()).map(Number::Integer),
        }
    }

    /// Round half to even at `digits` decimal places. Floats stay floats and
    /// integers stay integers; a negative `digits` rounds to tens, hundreds...
    pub fn round_to(self, digits: Int) -> Result {
        match self {
            Number::Integer(_) if digits >= 0 => Ok(self),
            Number::Integer(x) => {
                let scale = u32::try_from(digits.unsigned_abs())
                    .ok()
                    .and_then(|d| 10i128.checked_pow(d));
                let rounded = match scale {
                    // 10^d is beyond twice any Int, so everything rounds to zero
                    None => 0,
                    Some(scale) => round_to_multiple(i128::from(x), scale),
                };
                Int::try_from(rounded)
                    .map(Number::Integer)
                    .map_err(|_| NumericError::IntegerOverflow)
            }
            Number::Float(x) if !x.is_finite() => Ok(self),
            Number::Float(x) => {
                let digits = digits.clamp(Int::from(i32::MIN), Int::from(i32::MAX)) as i32;
                let scale = 10f64.powi(digits);
                if scale == 0.0 {
                    return Ok(Number::Float(0.0_f64.copysign(x)));
                }
                let scaled = x * scale;
                if !scaled.is_finite() {
                    return Ok(self);
                }
                Ok(Number::Float(scaled.round_ties_even() / scale))
            }
        }
    }
}

fn round_to_multiple(x: i128, scale: i128) -> i128 {
    let quotient = x.div_euclid(scale);
    let remainder = x.rem_euclid(scale);
    let rest = scale - remainder;
    let round_up = remainder > rest || (remainder == rest && quotient % 2 != 0);
    let quotient = if round_up { quotient + 1 } else { quotient };
    quotient * scale
}

/// Convert an integral float to an `Int`, failing for NaN, infinities and
/// anything outside the range of `Int`.
pub fn float_to_int(x: f64) -> Result<Int> {
    // 2^63 is exactly representable, Int::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if x.is_nan() || x.is_infinite() {
        return Err(NumericError::NotAnInteger(x));
    }
    if x >= LIMIT || x < -LIMIT {
        return Err(NumericError::IntegerOverflow);
    }
    Ok(x as Int)
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(x), Number::Integer(y)) => x == y,
            (x, y) => x.as_f64() == y.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(x), Number::Integer(y)) => x.partial_cmp(y),
            (x, y) => x.as_f64().partial_cmp(&y.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(x) => write!(f, "{}", x),
            // Debug keeps the trailing ".0" that distinguishes a float
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<Int> for Number {
    fn from(x: Int) -> Self {
        Number::Integer(x)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Float(x)
    }
}
