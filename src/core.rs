use crate::number::{Int, Number, NumericError};
use crate::types::{callable, truthy, Arity, PrimitiveFn, TypeMismatch, Value};
use crate::{evaluator, maths};
use itertools::Itertools;
use std::collections::HashMap;
use std::convert::TryFrom;

fn number_pair(args: &[Value]) -> Result<(Number, Number), TypeMismatch> {
    Ok((args[0].as_number()?, args[1].as_number()?))
}

static SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: sum_,
    arity: Arity::exactly(2),
};

// Numbers add, lists concatenate.
fn sum_(args: &[Value]) -> evaluator::Result {
    match (&args[0], &args[1]) {
        (Value::Number(x), Value::Number(y)) => Ok(x.add(*y)?.into()),
        (Value::List(x), Value::List(y)) => {
            Ok(Value::wrap_list(x.iter().chain(y.iter()).cloned().collect()))
        }
        _ => Err(TypeMismatch::BadOperands("+").into()),
    }
}

/// Shares its implementation with `+`, so `(append 1 2)` is `3`.
static APPEND: PrimitiveFn = PrimitiveFn {
    name: "append",
    fn_ptr: sum_,
    arity: Arity::exactly(2),
};

static SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: sub_,
    arity: Arity::exactly(2),
};

fn sub_(args: &[Value]) -> evaluator::Result {
    let (x, y) = number_pair(args)?;
    Ok(x.sub(y)?.into())
}

static MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: mul_,
    arity: Arity::exactly(2),
};

// A list times an integer (either way round) repeats the list.
fn mul_(args: &[Value]) -> evaluator::Result {
    match (&args[0], &args[1]) {
        (Value::Number(x), Value::Number(y)) => Ok(x.mul(*y)?.into()),
        (Value::List(list), Value::Number(Number::Integer(n)))
        | (Value::Number(Number::Integer(n)), Value::List(list)) => {
            let times = match list.is_empty() {
                true => 0,
                false => usize::try_from(*n).unwrap_or(0),
            };
            let elements = (0..times).flat_map(|_| list.iter().cloned()).collect();
            Ok(Value::wrap_list(elements))
        }
        _ => Err(TypeMismatch::BadOperands("*").into()),
    }
}

static DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::exactly(2),
};

fn div_(args: &[Value]) -> evaluator::Result {
    let (x, y) = number_pair(args)?;
    Ok(x.div(y)?.into())
}

fn comparison_(args: &[Value], comp: fn(&Number, &Number) -> bool) -> evaluator::Result {
    let (x, y) = number_pair(args)?;
    Ok(Value::Bool(comp(&x, &y)))
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            static $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[Value]| comparison_(args, Number:: [<$NAME:lower>]),
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(<, LT);
comparison_primitive!(<=, LE);
comparison_primitive!(>, GT);
comparison_primitive!(>=, GE);

static EQUAL: PrimitiveFn = PrimitiveFn {
    name: "=",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

static EQUAL_TEST: PrimitiveFn = PrimitiveFn {
    name: "equal?",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

fn equal_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0] == args[1]))
}

static EQ_TEST: PrimitiveFn = PrimitiveFn {
    name: "eq?",
    fn_ptr: eq_test_,
    arity: Arity::exactly(2),
};

fn eq_test_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0].is_same(&args[1])))
}

static NOT: PrimitiveFn = PrimitiveFn {
    name: "not",
    fn_ptr: |args| Ok(Value::Bool(!truthy(&args[0]))),
    arity: Arity::exactly(1),
};

static CONS: PrimitiveFn = PrimitiveFn {
    name: "cons",
    fn_ptr: cons_,
    arity: Arity::exactly(2),
};

fn cons_(args: &[Value]) -> evaluator::Result {
    let head = &args[0];
    let tail = args[1].as_list()?;

    let mut elements = Vec::with_capacity(tail.len() + 1);
    elements.push(head.clone());
    elements.extend(tail.iter().cloned());
    Ok(Value::wrap_list(elements))
}

static CAR: PrimitiveFn = PrimitiveFn {
    name: "car",
    fn_ptr: car_,
    arity: Arity::exactly(1),
};

fn car_(args: &[Value]) -> evaluator::Result {
    let list = args[0].as_list()?;
    list.first()
        .cloned()
        .ok_or_else(|| TypeMismatch::EmptyList.into())
}

static CDR: PrimitiveFn = PrimitiveFn {
    name: "cdr",
    fn_ptr: cdr_,
    arity: Arity::exactly(1),
};

fn cdr_(args: &[Value]) -> evaluator::Result {
    let list = args[0].as_list()?;
    match list.split_first() {
        Some((_, rest)) => Ok(Value::wrap_list(rest.to_vec())),
        None => Err(TypeMismatch::EmptyList.into()),
    }
}

static LIST: PrimitiveFn = PrimitiveFn {
    name: "list",
    fn_ptr: list_,
    arity: Arity::at_least(0),
};

fn list_(args: &[Value]) -> evaluator::Result {
    Ok(Value::wrap_list(args.to_vec()))
}

static LENGTH: PrimitiveFn = PrimitiveFn {
    name: "length",
    fn_ptr: length_,
    arity: Arity::exactly(1),
};

fn length_(args: &[Value]) -> evaluator::Result {
    let list = args[0].as_list()?;
    let length = Int::try_from(list.len()).map_err(|_| NumericError::IntegerOverflow)?;
    Ok(Value::integer(length))
}

static NULL_TEST: PrimitiveFn = PrimitiveFn {
    name: "null?",
    fn_ptr: |args| Ok(Value::Bool(args[0].as_list().map_or(false, |l| l.is_empty()))),
    arity: Arity::exactly(1),
};

static NUMBER_TEST: PrimitiveFn = PrimitiveFn {
    name: "number?",
    fn_ptr: |args| Ok(Value::Bool(args[0].is_number())),
    arity: Arity::exactly(1),
};

static SYMBOL_TEST: PrimitiveFn = PrimitiveFn {
    name: "symbol?",
    fn_ptr: |args| Ok(Value::Bool(args[0].is_symbol())),
    arity: Arity::exactly(1),
};

static LIST_TEST: PrimitiveFn = PrimitiveFn {
    name: "list?",
    fn_ptr: |args| Ok(Value::Bool(args[0].is_list())),
    arity: Arity::exactly(1),
};

static PROCEDURE_TEST: PrimitiveFn = PrimitiveFn {
    name: "procedure?",
    fn_ptr: |args| Ok(Value::Bool(callable(&args[0]))),
    arity: Arity::exactly(1),
};

static APPLY: PrimitiveFn = PrimitiveFn {
    name: "apply",
    fn_ptr: apply_,
    arity: Arity::exactly(2),
};

fn apply_(args: &[Value]) -> evaluator::Result {
    let arguments = args[1].as_list()?;
    evaluator::apply(&args[0], arguments)
}

static MAP: PrimitiveFn = PrimitiveFn {
    name: "map",
    fn_ptr: map_,
    arity: Arity::at_least(2),
};

// Walks the lists in step and stops at the end of the shortest one.
fn map_(args: &[Value]) -> evaluator::Result {
    let (func, lists) = (&args[0], &args[1..]);
    if !callable(func) {
        return Err(TypeMismatch::NotCallable.into());
    }
    let lists = lists
        .iter()
        .map(Value::as_list)
        .collect::<Result<Vec<_>, _>>()?;
    let shortest = lists.iter().map(|list| list.len()).min().unwrap_or(0);
    let results = (0..shortest)
        .map(|i| {
            let row = lists.iter().map(|list| list[i].clone()).collect_vec();
            evaluator::apply(func, &row)
        })
        .collect::<evaluator::Result<Vec<_>>>()?;
    Ok(Value::wrap_list(results))
}

fn extremum_(args: &[Value], replace: fn(&Number, &Number) -> bool) -> evaluator::Result {
    let candidates: &[Value] = match args {
        [only] => &only.as_list()?[..],
        _ => args,
    };
    let mut best: Option<(Number, &Value)> = None;
    for value in candidates {
        let number = value.as_number()?;
        best = match best {
            Some((current, _)) if replace(&number, &current) => Some((number, value)),
            None => Some((number, value)),
            unchanged => unchanged,
        };
    }
    best.map(|(_, value)| value.clone())
        .ok_or_else(|| TypeMismatch::EmptyList.into())
}

static MAX: PrimitiveFn = PrimitiveFn {
    name: "max",
    fn_ptr: |args| extremum_(args, Number::gt),
    arity: Arity::at_least(1),
};

static MIN: PrimitiveFn = PrimitiveFn {
    name: "min",
    fn_ptr: |args| extremum_(args, Number::lt),
    arity: Arity::at_least(1),
};

static ABS: PrimitiveFn = PrimitiveFn {
    name: "abs",
    fn_ptr: |args| Ok(args[0].as_number()?.abs()?.into()),
    arity: Arity::exactly(1),
};

static ROUND: PrimitiveFn = PrimitiveFn {
    name: "round",
    fn_ptr: round_,
    arity: Arity::Between(1..=2),
};

fn round_(args: &[Value]) -> evaluator::Result {
    let number = args[0].as_number()?;
    let rounded = match args.get(1) {
        None => number.round()?,
        Some(digits) => number.round_to(digits.as_int()?)?,
    };
    Ok(rounded.into())
}

static EXPT: PrimitiveFn = PrimitiveFn {
    name: "expt",
    fn_ptr: |args| {
        let (base, exponent) = number_pair(args)?;
        Ok(base.pow(exponent)?.into())
    },
    arity: Arity::exactly(2),
};

static PRINT: PrimitiveFn = PrimitiveFn {
    name: "print",
    fn_ptr: print_,
    arity: Arity::at_least(0),
};

fn print_(args: &[Value]) -> evaluator::Result {
    println!("{}", args.iter().join(" "));
    Ok(Value::Unit)
}

static BEGIN: PrimitiveFn = PrimitiveFn {
    name: "begin",
    fn_ptr: begin_,
    arity: Arity::at_least(1),
};

// The arguments have already been evaluated, in order, by the time we get
// here; all that is left is to hand back the last one.
fn begin_(args: &[Value]) -> evaluator::Result {
    args.last()
        .cloned()
        .ok_or_else(|| TypeMismatch::EmptyList.into())
}

static PRIMITIVES: &[&PrimitiveFn] = &[
    // Arithmetic
    &SUM, &SUB, &MUL, &DIV, &ABS, &ROUND, &EXPT, &MAX, &MIN,
    // Comparisons
    &GT, &GE, &LT, &LE, &EQUAL, &EQUAL_TEST, &EQ_TEST, &NOT,
    // Working with lists
    &CONS, &CAR, &CDR, &APPEND, &LIST, &LENGTH, &APPLY, &MAP,
    // Testing
    &NULL_TEST, &NUMBER_TEST, &SYMBOL_TEST, &LIST_TEST, &PROCEDURE_TEST,
    // Other
    &PRINT, &BEGIN,
];

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub static ref CORE: Namespace = {
        let mut map = Namespace::new();
        for &func in PRIMITIVES.iter().chain(maths::PRIMITIVES.iter()) {
            map.insert(func.name, func);
        }
        map
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{call_primitive, Error};

    fn ints(xs: &[i64]) -> Value {
        Value::wrap_list(xs.iter().copied().map(Value::integer).collect())
    }

    fn call(name: &str, args: &[Value]) -> evaluator::Result {
        call_primitive(CORE[name], args)
    }

    #[test]
    fn every_primitive_is_registered_once() {
        let total = PRIMITIVES.len() + maths::PRIMITIVES.len();
        assert_eq!(CORE.len(), total);
    }

    #[test]
    fn cons_prepends() {
        assert_eq!(
            call("cons", &[Value::integer(1), ints(&[2, 3])]).unwrap(),
            ints(&[1, 2, 3])
        );
        assert!(matches!(
            call("cons", &[Value::integer(1), Value::integer(2)]),
            Err(Error::TypeMismatch(TypeMismatch::NotAList))
        ));
    }

    #[test]
    fn car_and_cdr() {
        assert_eq!(call("car", &[ints(&[1, 2, 3])]).unwrap(), Value::integer(1));
        assert_eq!(call("cdr", &[ints(&[1, 2, 3])]).unwrap(), ints(&[2, 3]));
        assert_eq!(call("cdr", &[ints(&[1])]).unwrap(), ints(&[]));
    }

    #[test]
    fn car_and_cdr_of_empty_list_fail() {
        assert!(matches!(
            call("car", &[ints(&[])]),
            Err(Error::TypeMismatch(TypeMismatch::EmptyList))
        ));
        assert!(matches!(
            call("cdr", &[ints(&[])]),
            Err(Error::TypeMismatch(TypeMismatch::EmptyList))
        ));
    }

    #[test]
    fn plus_concatenates_lists_and_append_is_plus() {
        assert_eq!(
            call("+", &[ints(&[1]), ints(&[2, 3])]).unwrap(),
            ints(&[1, 2, 3])
        );
        assert_eq!(
            call("append", &[ints(&[1]), ints(&[2])]).unwrap(),
            ints(&[1, 2])
        );
        assert_eq!(
            call("append", &[Value::integer(1), Value::integer(2)]).unwrap(),
            Value::integer(3)
        );
        assert!(matches!(
            call("+", &[Value::integer(1), ints(&[2])]),
            Err(Error::TypeMismatch(TypeMismatch::BadOperands("+")))
        ));
    }

    #[test]
    fn times_repeats_lists() {
        assert_eq!(
            call("*", &[ints(&[1, 2]), Value::integer(2)]).unwrap(),
            ints(&[1, 2, 1, 2])
        );
        assert_eq!(
            call("*", &[Value::integer(-1), ints(&[1, 2])]).unwrap(),
            ints(&[])
        );
    }

    #[test]
    fn comparisons_produce_bools() {
        let (one, two) = (Value::integer(1), Value::float(2.0));
        assert_eq!(call("<", &[one.clone(), two.clone()]).unwrap(), Value::Bool(true));
        assert_eq!(call(">=", &[one.clone(), two.clone()]).unwrap(), Value::Bool(false));
        assert_eq!(call("<=", &[one.clone(), one.clone()]).unwrap(), Value::Bool(true));
        assert_eq!(call("=", &[one.clone(), Value::float(1.0)]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn equality_and_identity() {
        let list = ints(&[1, 2]);
        assert_eq!(
            call("equal?", &[list.clone(), ints(&[1, 2])]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            call("eq?", &[list.clone(), ints(&[1, 2])]).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            call("eq?", &[list.clone(), list]).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn predicates() {
        assert_eq!(call("null?", &[ints(&[])]).unwrap(), Value::Bool(true));
        assert_eq!(call("null?", &[Value::integer(0)]).unwrap(), Value::Bool(false));
        assert_eq!(call("number?", &[Value::float(1.5)]).unwrap(), Value::Bool(true));
        assert_eq!(call("symbol?", &[Value::new_symbol("a")]).unwrap(), Value::Bool(true));
        assert_eq!(call("list?", &[Value::integer(1)]).unwrap(), Value::Bool(false));
        let car = Value::Primitive(CORE["car"]);
        assert_eq!(call("procedure?", &[car]).unwrap(), Value::Bool(true));
        assert_eq!(call("not", &[Value::wrap_list(vec![])]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn length_counts_elements() {
        assert_eq!(call("length", &[ints(&[4, 5, 6])]).unwrap(), Value::integer(3));
        assert_eq!(call("length", &[ints(&[])]).unwrap(), Value::integer(0));
    }

    #[test]
    fn apply_and_map() {
        let plus = Value::Primitive(CORE["+"]);
        assert_eq!(
            call("apply", &[plus.clone(), ints(&[3, 4])]).unwrap(),
            Value::integer(7)
        );
        assert_eq!(
            call("map", &[plus, ints(&[1, 2, 3]), ints(&[10, 20])]).unwrap(),
            ints(&[11, 22])
        );
        let abs = Value::Primitive(CORE["abs"]);
        assert_eq!(call("map", &[abs, ints(&[-1, 2])]).unwrap(), ints(&[1, 2]));
        assert!(matches!(
            call("map", &[Value::integer(1), ints(&[1])]),
            Err(Error::TypeMismatch(TypeMismatch::NotCallable))
        ));
    }

    #[test]
    fn max_and_min() {
        let args = [Value::integer(3), Value::float(7.5), Value::integer(-2)];
        assert_eq!(call("max", &args).unwrap(), Value::float(7.5));
        assert_eq!(call("min", &args).unwrap(), Value::integer(-2));
        assert_eq!(call("max", &[ints(&[4, 9, 1])]).unwrap(), Value::integer(9));
        assert!(matches!(
            call("min", &[ints(&[])]),
            Err(Error::TypeMismatch(TypeMismatch::EmptyList))
        ));
    }

    #[test]
    fn rounding_and_powers() {
        assert_eq!(call("round", &[Value::float(2.5)]).unwrap(), Value::integer(2));
        assert_eq!(
            call("round", &[Value::float(3.14159), Value::integer(2)]).unwrap(),
            Value::float(3.14)
        );
        assert_eq!(
            call("expt", &[Value::integer(2), Value::integer(8)]).unwrap(),
            Value::integer(256)
        );
        assert_eq!(call("abs", &[Value::integer(-3)]).unwrap(), Value::integer(3));
    }

    #[test]
    fn begin_and_print_return_as_expected() {
        assert_eq!(
            call("begin", &[Value::integer(1), Value::integer(2)]).unwrap(),
            Value::integer(2)
        );
        assert_eq!(call("print", &[Value::integer(1)]).unwrap(), Value::Unit);
    }
}
