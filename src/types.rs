extern crate derive_more;
use crate::evaluator;
use crate::number::{Int, Number};
use derive_more::{Deref, DerefMut, Display};

use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

#[derive(Deref, DerefMut, Debug)]
pub struct List(pub Vec<Value>);

#[derive(Deref, Display, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(name.into())
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

/// A builtin procedure. The evaluator checks `arity` before calling
/// `fn_ptr`, so implementations may index their arguments directly.
pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Number(Number),
    Symbol(Symbol),
    List(Rc<List>),
    Bool(bool),
    Primitive(&'static PrimitiveFn),
    Unit,
}

/// What the reader produces. Only the `Number`, `Symbol` and `List` cases
/// ever come out of it; the rest only appear at runtime.
pub type Expression = Value;

pub(crate) fn truthy(obj: &Value) -> bool {
    use Value::*;
    match obj {
        Number(n) => !n.is_zero(),
        List(list) => !list.is_empty(),
        Bool(t) => *t,
        Symbol(_) | Primitive(_) => true,
        Unit => false,
    }
}

pub(crate) fn callable(obj: &Value) -> bool {
    use Value::*;
    match obj {
        Primitive(_) => true,
        Number(_) => false,
        Symbol(_) => false,
        List(_) => false,
        Bool(_) => false,
        Unit => false,
    }
}

#[derive(Debug, PartialEq)]
pub enum TypeMismatch {
    NotANumber,
    NotAnInt,
    NotAList,
    NotASymbol,
    NotCallable,
    EmptyList,
    BadOperands(&'static str),
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeMismatch::NotANumber => write!(f, "expected a number"),
            TypeMismatch::NotAnInt => write!(f, "expected an integer"),
            TypeMismatch::NotAList => write!(f, "expected a list"),
            TypeMismatch::NotASymbol => write!(f, "expected a symbol"),
            TypeMismatch::NotCallable => write!(f, "value is not a procedure"),
            TypeMismatch::EmptyList => write!(f, "list is empty"),
            TypeMismatch::BadOperands(op) => write!(f, "unsupported operand types for {}", op),
        }
    }
}

impl Value {
    pub(crate) fn as_number(&self) -> Result<Number, TypeMismatch> {
        match self {
            Value::Number(x) => Ok(*x),
            _ => Err(TypeMismatch::NotANumber),
        }
    }

    pub(crate) fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Value::Number(Number::Integer(x)) => Ok(*x),
            _ => Err(TypeMismatch::NotAnInt),
        }
    }

    pub(crate) fn as_list(&self) -> Result<&List, TypeMismatch> {
        match self {
            Value::List(x) => Ok(x),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub(crate) fn as_symbol(&self) -> Result<&Symbol, TypeMismatch> {
        match self {
            Value::Symbol(s) => Ok(s),
            _ => Err(TypeMismatch::NotASymbol),
        }
    }

    pub(crate) fn as_primitive(&self) -> Result<&'static PrimitiveFn, TypeMismatch> {
        match self {
            Value::Primitive(f) => Ok(*f),
            _ => Err(TypeMismatch::NotCallable),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    /// Identity in the sense of `eq?`: atoms compare by value, lists and
    /// procedures only match themselves.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(Number::Integer(x)), Value::Number(Number::Integer(y))) => x == y,
            (Value::Number(Number::Float(x)), Value::Number(Number::Float(y))) => {
                x.to_bits() == y.to_bits()
            }
            (Value::List(x), Value::List(y)) => Rc::ptr_eq(x, y),
            (Value::Number(_), Value::Number(_)) => false,
            (x, y) => x == y,
        }
    }
}

impl Value {
    pub(crate) fn wrap_list(elements: Vec<Value>) -> Self {
        Self::List(Rc::new(List(elements)))
    }
    pub(crate) fn new_symbol(name: &str) -> Self {
        Self::Symbol(Symbol(name.into()))
    }
    pub(crate) fn integer(x: Int) -> Self {
        Self::Number(Number::Integer(x))
    }
    pub(crate) fn float(x: f64) -> Self {
        Self::Number(Number::Float(x))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

/// Structural equality, as used by `=` and `equal?`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Number(x), Number(y)) => x == y,
            (Symbol(x), Symbol(y)) => x == y,
            (List(x), List(y)) => equal_sequences(x, y),
            (Bool(x), Bool(y)) => x == y,
            (Primitive(x), Primitive(y)) => std::ptr::eq(*x, *y),
            (Unit, Unit) => true,
            (_, _) => false,
        }
    }
}

fn equal_sequences(xs: &[Value], ys: &[Value]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x == y)
}
