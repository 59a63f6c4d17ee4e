//! Real-valued constants and functions under their conventional short names.
//!
//! The functions accept integers or floats. A finite argument that produces
//! NaN is a domain error; one that produces an infinity is either a domain
//! error (at a pole, like `log10` of zero) or a range error (overflow, like
//! `exp` of a large number).

use crate::evaluator;
use crate::number::{float_to_int, Int, Number, NumericError};
use crate::types::{Arity, PrimitiveFn, Value};
use std::convert::TryFrom;
use std::f64::consts;

pub static CONSTANTS: [(&str, f64); 5] = [
    ("pi", consts::PI),
    ("e", consts::E),
    ("tau", 2.0 * consts::PI),
    ("inf", f64::INFINITY),
    ("nan", f64::NAN),
];

fn check(
    name: &'static str,
    inputs: &[f64],
    output: f64,
    on_infinite: fn(&'static str) -> NumericError,
) -> Result<f64, NumericError> {
    if output.is_nan() && !inputs.iter().any(|x| x.is_nan()) {
        return Err(NumericError::Domain(name));
    }
    if output.is_infinite() && inputs.iter().all(|x| x.is_finite()) {
        return Err(on_infinite(name));
    }
    Ok(output)
}

fn unary_(
    args: &[Value],
    name: &'static str,
    func: fn(f64) -> f64,
    on_infinite: fn(&'static str) -> NumericError,
) -> evaluator::Result {
    let x = args[0].as_number()?.as_f64();
    Ok(Value::float(check(name, &[x], func(x), on_infinite)?))
}

fn binary_(
    args: &[Value],
    name: &'static str,
    func: fn(f64, f64) -> f64,
) -> evaluator::Result {
    let x = args[0].as_number()?.as_f64();
    let y = args[1].as_number()?.as_f64();
    Ok(Value::float(check(name, &[x, y], func(x, y), NumericError::Range)?))
}

macro_rules! unary_math_primitive {
    ($NAME:ident) => {
        unary_math_primitive!($NAME, f64::$NAME, Range);
    };
    ($NAME:ident, $FUNC:expr) => {
        unary_math_primitive!($NAME, $FUNC, Range);
    };
    ($NAME:ident, $FUNC:expr, $ON_INFINITE:ident) => {
        paste::item! {
            static [<$NAME:upper>]: PrimitiveFn = PrimitiveFn {
                name: stringify!($NAME),
                fn_ptr: |args: &[Value]| {
                    unary_(args, stringify!($NAME), $FUNC, NumericError::$ON_INFINITE)
                },
                arity: Arity::exactly(1),
            };
        }
    };
}

macro_rules! binary_math_primitive {
    ($NAME:ident, $FUNC:expr) => {
        paste::item! {
            static [<$NAME:upper>]: PrimitiveFn = PrimitiveFn {
                name: stringify!($NAME),
                fn_ptr: |args: &[Value]| binary_(args, stringify!($NAME), $FUNC),
                arity: Arity::exactly(2),
            };
        }
    };
}

unary_math_primitive!(sin);
unary_math_primitive!(cos);
unary_math_primitive!(tan);
unary_math_primitive!(asin);
unary_math_primitive!(acos);
unary_math_primitive!(atan);
unary_math_primitive!(sinh);
unary_math_primitive!(cosh);
unary_math_primitive!(tanh);
unary_math_primitive!(asinh);
unary_math_primitive!(acosh);
unary_math_primitive!(atanh, f64::atanh, Domain);
unary_math_primitive!(exp);
unary_math_primitive!(expm1, f64::exp_m1);
unary_math_primitive!(log10, f64::log10, Domain);
unary_math_primitive!(log2, f64::log2, Domain);
unary_math_primitive!(log1p, f64::ln_1p, Domain);
unary_math_primitive!(sqrt);
unary_math_primitive!(fabs, f64::abs);
unary_math_primitive!(degrees, f64::to_degrees);
unary_math_primitive!(radians, f64::to_radians);
unary_math_primitive!(cbrt);
unary_math_primitive!(exp2);
unary_math_primitive!(erf, libm::erf);
unary_math_primitive!(erfc, libm::erfc);

binary_math_primitive!(atan2, f64::atan2);
binary_math_primitive!(hypot, f64::hypot);
binary_math_primitive!(fmod, |x: f64, y: f64| x % y);
binary_math_primitive!(copysign, f64::copysign);

static POW: PrimitiveFn = PrimitiveFn {
    name: "pow",
    fn_ptr: pow_,
    arity: Arity::exactly(2),
};

fn pow_(args: &[Value]) -> evaluator::Result {
    let x = args[0].as_number()?.as_f64();
    let y = args[1].as_number()?.as_f64();
    if x == 0.0 && y < 0.0 {
        return Err(NumericError::Domain("pow").into());
    }
    binary_(args, "pow", f64::powf)
}

// Both gamma functions have poles at zero and the negative integers.
fn gamma_like_(args: &[Value], name: &'static str, func: fn(f64) -> f64) -> evaluator::Result {
    let x = args[0].as_number()?.as_f64();
    if x <= 0.0 && x.fract() == 0.0 {
        return Err(NumericError::Domain(name).into());
    }
    unary_(args, name, func, NumericError::Range)
}

static GAMMA: PrimitiveFn = PrimitiveFn {
    name: "gamma",
    fn_ptr: |args| gamma_like_(args, "gamma", libm::tgamma),
    arity: Arity::exactly(1),
};

static LGAMMA: PrimitiveFn = PrimitiveFn {
    name: "lgamma",
    fn_ptr: |args| gamma_like_(args, "lgamma", libm::lgamma),
    arity: Arity::exactly(1),
};

static LOG: PrimitiveFn = PrimitiveFn {
    name: "log",
    fn_ptr: log_,
    arity: Arity::Between(1..=2),
};

// Natural logarithm, or logarithm to the given base.
fn log_(args: &[Value]) -> evaluator::Result {
    let ln = |value: &Value| -> evaluator::Result<f64> {
        let x = value.as_number()?.as_f64();
        Ok(check("log", &[x], x.ln(), NumericError::Domain)?)
    };
    let numerator = ln(&args[0])?;
    match args.get(1) {
        None => Ok(Value::float(numerator)),
        Some(base) => {
            let denominator = ln(base)?;
            if denominator == 0.0 {
                return Err(NumericError::DivideByZero.into());
            }
            Ok(Value::float(numerator / denominator))
        }
    }
}

fn integral_(args: &[Value], func: fn(f64) -> f64) -> evaluator::Result {
    match args[0].as_number()? {
        Number::Integer(x) => Ok(Value::integer(x)),
        Number::Float(x) => Ok(Value::integer(float_to_int(func(x))?)),
    }
}

static FLOOR: PrimitiveFn = PrimitiveFn {
    name: "floor",
    fn_ptr: |args| integral_(args, f64::floor),
    arity: Arity::exactly(1),
};

static CEIL: PrimitiveFn = PrimitiveFn {
    name: "ceil",
    fn_ptr: |args| integral_(args, f64::ceil),
    arity: Arity::exactly(1),
};

static TRUNC: PrimitiveFn = PrimitiveFn {
    name: "trunc",
    fn_ptr: |args| integral_(args, f64::trunc),
    arity: Arity::exactly(1),
};

static FACTORIAL: PrimitiveFn = PrimitiveFn {
    name: "factorial",
    fn_ptr: factorial_,
    arity: Arity::exactly(1),
};

fn factorial_(args: &[Value]) -> evaluator::Result {
    let n = args[0].as_int()?;
    if n < 0 {
        return Err(NumericError::Domain("factorial").into());
    }
    let product = (2..=n).try_fold(1 as Int, |acc, k| acc.checked_mul(k));
    product
        .map(Value::integer)
        .ok_or_else(|| NumericError::IntegerOverflow.into())
}

static GCD: PrimitiveFn = PrimitiveFn {
    name: "gcd",
    fn_ptr: gcd_,
    arity: Arity::at_least(0),
};

fn gcd(mut x: u64, mut y: u64) -> u64 {
    while y != 0 {
        let remainder = x % y;
        x = y;
        y = remainder;
    }
    x
}

fn to_int(x: u64) -> evaluator::Result {
    Int::try_from(x)
        .map(Value::integer)
        .map_err(|_| NumericError::IntegerOverflow.into())
}

fn gcd_(args: &[Value]) -> evaluator::Result {
    let mut result: u64 = 0;
    for arg in args {
        result = gcd(result, arg.as_int()?.unsigned_abs());
    }
    to_int(result)
}

static LCM: PrimitiveFn = PrimitiveFn {
    name: "lcm",
    fn_ptr: lcm_,
    arity: Arity::at_least(0),
};

fn lcm_(args: &[Value]) -> evaluator::Result {
    let mut result: u64 = 1;
    for arg in args {
        let x = arg.as_int()?.unsigned_abs();
        if x == 0 || result == 0 {
            result = 0;
            continue;
        }
        result = (result / gcd(result, x))
            .checked_mul(x)
            .ok_or(NumericError::IntegerOverflow)?;
    }
    to_int(result)
}

static ISQRT: PrimitiveFn = PrimitiveFn {
    name: "isqrt",
    fn_ptr: isqrt_,
    arity: Arity::exactly(1),
};

fn isqrt_(args: &[Value]) -> evaluator::Result {
    let n = args[0].as_int()?;
    if n < 0 {
        return Err(NumericError::Domain("isqrt").into());
    }
    let n = n as u128;
    // The float estimate can be off by one either way near the top of the range
    let mut root = (n as f64).sqrt() as u128;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    to_int(root as u64)
}

fn non_negative(value: &Value, name: &'static str) -> Result<u64, evaluator::Error> {
    let x = value.as_int()?;
    u64::try_from(x).map_err(|_| NumericError::Domain(name).into())
}

static COMB: PrimitiveFn = PrimitiveFn {
    name: "comb",
    fn_ptr: comb_,
    arity: Arity::exactly(2),
};

// Ways to choose k of n items without order.
fn comb_(args: &[Value]) -> evaluator::Result {
    let n = non_negative(&args[0], "comb")?;
    let k = non_negative(&args[1], "comb")?;
    if k > n {
        return Ok(Value::integer(0));
    }
    // C(n, i) grows with i up to n/2, so an overflow part way is final
    let mut result: u128 = 1;
    for i in 0..k.min(n - k) {
        result = result * u128::from(n - i) / u128::from(i + 1);
        if result > Int::MAX as u128 {
            return Err(NumericError::IntegerOverflow.into());
        }
    }
    to_int(result as u64)
}

static PERM: PrimitiveFn = PrimitiveFn {
    name: "perm",
    fn_ptr: perm_,
    arity: Arity::Between(1..=2),
};

// Ways to choose k of n items in order; k defaults to n.
fn perm_(args: &[Value]) -> evaluator::Result {
    let n = non_negative(&args[0], "perm")?;
    let k = match args.get(1) {
        Some(k) => non_negative(k, "perm")?,
        None => n,
    };
    if k > n {
        return Ok(Value::integer(0));
    }
    let product = ((n - k + 1)..=n).try_fold(1u64, |acc, x| acc.checked_mul(x));
    product
        .ok_or(evaluator::Error::from(NumericError::IntegerOverflow))
        .and_then(to_int)
}

static ISNAN: PrimitiveFn = PrimitiveFn {
    name: "isnan",
    fn_ptr: |args| Ok(Value::Bool(args[0].as_number()?.as_f64().is_nan())),
    arity: Arity::exactly(1),
};

static ISINF: PrimitiveFn = PrimitiveFn {
    name: "isinf",
    fn_ptr: |args| Ok(Value::Bool(args[0].as_number()?.as_f64().is_infinite())),
    arity: Arity::exactly(1),
};

static ISFINITE: PrimitiveFn = PrimitiveFn {
    name: "isfinite",
    fn_ptr: |args| Ok(Value::Bool(args[0].as_number()?.as_f64().is_finite())),
    arity: Arity::exactly(1),
};

pub(crate) static PRIMITIVES: &[&PrimitiveFn] = &[
    // Trigonometry
    &SIN, &COS, &TAN, &ASIN, &ACOS, &ATAN, &ATAN2, &HYPOT, &DEGREES, &RADIANS,
    // Hyperbolic functions
    &SINH, &COSH, &TANH, &ASINH, &ACOSH, &ATANH,
    // Powers and logarithms
    &EXP, &EXPM1, &EXP2, &LOG, &LOG10, &LOG2, &LOG1P, &SQRT, &CBRT, &POW,
    // Number-theoretic and representation functions
    &FABS, &FMOD, &COPYSIGN, &FLOOR, &CEIL, &TRUNC, &FACTORIAL, &GCD, &LCM, &ISQRT,
    &COMB, &PERM,
    // Special functions
    &ERF, &ERFC, &GAMMA, &LGAMMA,
    // Classification
    &ISNAN, &ISINF, &ISFINITE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{call_primitive, Error};

    fn call(func: &PrimitiveFn, args: &[Value]) -> evaluator::Result {
        call_primitive(func, args)
    }

    #[test]
    fn functions_take_integers_and_floats() {
        assert_eq!(call(&SQRT, &[Value::integer(16)]).unwrap(), Value::float(4.0));
        assert_eq!(call(&SQRT, &[Value::float(2.25)]).unwrap(), Value::float(1.5));
        assert_eq!(call(&SIN, &[Value::integer(0)]).unwrap(), Value::float(0.0));
        assert_eq!(call(&FABS, &[Value::integer(-2)]).unwrap(), Value::float(2.0));
    }

    #[test]
    fn domain_errors() {
        assert!(matches!(
            call(&SQRT, &[Value::integer(-1)]),
            Err(Error::Numeric(NumericError::Domain("sqrt")))
        ));
        assert!(matches!(
            call(&LOG, &[Value::integer(0)]),
            Err(Error::Numeric(NumericError::Domain("log")))
        ));
        assert!(matches!(
            call(&LOG10, &[Value::integer(0)]),
            Err(Error::Numeric(NumericError::Domain("log10")))
        ));
        assert!(matches!(
            call(&FACTORIAL, &[Value::integer(-3)]),
            Err(Error::Numeric(NumericError::Domain("factorial")))
        ));
    }

    #[test]
    fn range_errors() {
        assert!(matches!(
            call(&EXP, &[Value::integer(1000)]),
            Err(Error::Numeric(NumericError::Range("exp")))
        ));
    }

    #[test]
    fn nan_in_nan_out_is_fine() {
        let result = call(&SQRT, &[Value::float(f64::NAN)]).unwrap();
        assert!(matches!(result, Value::Number(Number::Float(x)) if x.is_nan()));
    }

    #[test]
    fn logarithms_with_a_base() {
        assert_eq!(
            call(&LOG, &[Value::integer(8), Value::integer(2)]).unwrap(),
            Value::float(3.0)
        );
        assert!(matches!(
            call(&LOG, &[Value::integer(8), Value::integer(1)]),
            Err(Error::Numeric(NumericError::DivideByZero))
        ));
    }

    #[test]
    fn integral_functions_return_integers() {
        assert_eq!(call(&FLOOR, &[Value::float(-1.5)]).unwrap(), Value::integer(-2));
        assert_eq!(call(&CEIL, &[Value::float(1.2)]).unwrap(), Value::integer(2));
        assert_eq!(call(&TRUNC, &[Value::float(-1.7)]).unwrap(), Value::integer(-1));
        assert_eq!(call(&FLOOR, &[Value::integer(5)]).unwrap(), Value::integer(5));
        assert!(matches!(
            call(&FLOOR, &[Value::float(f64::INFINITY)]),
            Err(Error::Numeric(NumericError::NotAnInteger(_)))
        ));
    }

    #[test]
    fn factorial_and_gcd() {
        assert_eq!(call(&FACTORIAL, &[Value::integer(5)]).unwrap(), Value::integer(120));
        assert_eq!(call(&FACTORIAL, &[Value::integer(0)]).unwrap(), Value::integer(1));
        assert!(matches!(
            call(&FACTORIAL, &[Value::integer(100)]),
            Err(Error::Numeric(NumericError::IntegerOverflow))
        ));
        assert_eq!(
            call(&GCD, &[Value::integer(12), Value::integer(-18)]).unwrap(),
            Value::integer(6)
        );
        assert_eq!(call(&GCD, &[]).unwrap(), Value::integer(0));
    }

    #[test]
    fn pow_and_fmod() {
        assert_eq!(
            call(&POW, &[Value::integer(2), Value::integer(10)]).unwrap(),
            Value::float(1024.0)
        );
        assert!(matches!(
            call(&POW, &[Value::integer(0), Value::integer(-1)]),
            Err(Error::Numeric(NumericError::Domain("pow")))
        ));
        assert!(matches!(
            call(&FMOD, &[Value::integer(1), Value::integer(0)]),
            Err(Error::Numeric(NumericError::Domain("fmod")))
        ));
    }

    #[test]
    fn integer_combinatorics() {
        assert_eq!(call(&ISQRT, &[Value::integer(0)]).unwrap(), Value::integer(0));
        assert_eq!(call(&ISQRT, &[Value::integer(24)]).unwrap(), Value::integer(4));
        assert_eq!(call(&ISQRT, &[Value::integer(25)]).unwrap(), Value::integer(5));
        assert_eq!(
            call(&ISQRT, &[Value::integer(Int::MAX)]).unwrap(),
            Value::integer(3_037_000_499)
        );
        assert!(matches!(
            call(&ISQRT, &[Value::integer(-1)]),
            Err(Error::Numeric(NumericError::Domain("isqrt")))
        ));
        assert_eq!(
            call(&LCM, &[Value::integer(4), Value::integer(-6)]).unwrap(),
            Value::integer(12)
        );
        assert_eq!(
            call(&LCM, &[Value::integer(0), Value::integer(5)]).unwrap(),
            Value::integer(0)
        );
        assert_eq!(call(&LCM, &[]).unwrap(), Value::integer(1));
        assert_eq!(
            call(&COMB, &[Value::integer(10), Value::integer(3)]).unwrap(),
            Value::integer(120)
        );
        assert_eq!(
            call(&COMB, &[Value::integer(3), Value::integer(5)]).unwrap(),
            Value::integer(0)
        );
        assert!(matches!(
            call(&COMB, &[Value::integer(200), Value::integer(100)]),
            Err(Error::Numeric(NumericError::IntegerOverflow))
        ));
        assert_eq!(
            call(&PERM, &[Value::integer(5), Value::integer(2)]).unwrap(),
            Value::integer(20)
        );
        assert_eq!(call(&PERM, &[Value::integer(5)]).unwrap(), Value::integer(120));
        assert!(matches!(
            call(&PERM, &[Value::integer(-1)]),
            Err(Error::Numeric(NumericError::Domain("perm")))
        ));
    }

    #[test]
    fn special_functions() {
        assert_eq!(call(&ERF, &[Value::integer(0)]).unwrap(), Value::float(0.0));
        assert_eq!(call(&ERFC, &[Value::integer(0)]).unwrap(), Value::float(1.0));
        assert_eq!(call(&CBRT, &[Value::integer(-8)]).unwrap(), Value::float(-2.0));
        assert_eq!(call(&EXP2, &[Value::integer(3)]).unwrap(), Value::float(8.0));
        assert!(matches!(
            call(&GAMMA, &[Value::integer(-2)]),
            Err(Error::Numeric(NumericError::Domain("gamma")))
        ));
        assert!(matches!(
            call(&LGAMMA, &[Value::integer(0)]),
            Err(Error::Numeric(NumericError::Domain("lgamma")))
        ));
        assert!(matches!(
            call(&GAMMA, &[Value::integer(200)]),
            Err(Error::Numeric(NumericError::Range("gamma")))
        ));
    }

    #[test]
    fn classification() {
        assert_eq!(call(&ISNAN, &[Value::float(f64::NAN)]).unwrap(), Value::Bool(true));
        assert_eq!(call(&ISINF, &[Value::integer(1)]).unwrap(), Value::Bool(false));
        assert_eq!(call(&ISFINITE, &[Value::float(1.5)]).unwrap(), Value::Bool(true));
    }
}
