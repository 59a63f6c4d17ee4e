use crate::environment::{Environment, UnknownSymbol};
use crate::number::NumericError;
use crate::special_forms;
use crate::types::{BadArgCount, Expression, PrimitiveFn, TypeMismatch, Value};

use itertools::Itertools;
use std::fmt;

pub type Result<T = Value> = std::result::Result<T, Error>;
#[derive(Debug)]
pub enum Error {
    UnknownSymbol(UnknownSymbol),
    EmptyApplication,
    TypeMismatch(TypeMismatch),
    BadArgCount(BadArgCount),
    Numeric(NumericError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSymbol(UnknownSymbol(s)) => write!(f, "'{}' not found", s),
            Error::EmptyApplication => write!(f, "cannot evaluate an empty list"),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::Numeric(e) => write!(f, "{}", e),
        }
    }
}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<NumericError> for Error {
    fn from(e: NumericError) -> Self {
        Self::Numeric(e)
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::BadArgCount(e)
    }
}

/// Reduce `ast` to a value. Symbols are looked up, lists headed by `if` or
/// `define` are special forms, any other non-empty list is a procedure call
/// and everything else evaluates to itself.
pub fn eval(ast: &Expression, env: &mut Environment) -> Result {
    use Value::{List, Symbol};
    log::trace!("eval {}", ast);
    match ast {
        Symbol(s) => env.fetch(s).map_err(Error::UnknownSymbol),
        List(list) => match list.split_first() {
            None => Err(Error::EmptyApplication),
            Some((head, rest)) => {
                if let Symbol(name) = head {
                    match name.as_str() {
                        "if" => return special_forms::apply_if(rest, env),
                        "define" => return special_forms::apply_define(rest, env),
                        // Any other initial symbol is a procedure call,
                        // handled below
                        _ => (),
                    }
                }
                let callable = eval(head, env)?;
                let args = evaluate_sequence_elementwise(rest, env)?;
                apply(&callable, &args)
            }
        },
        _ => Ok(ast.clone()),
    }
}

/// Evaluate each element in turn, left to right, stopping at the first
/// failure.
pub fn evaluate_sequence_elementwise(
    seq: &[Expression],
    env: &mut Environment,
) -> std::result::Result<Vec<Value>, Error> {
    seq.iter().map(|obj| eval(obj, env)).collect()
}

pub(crate) fn apply(callable: &Value, args: &[Value]) -> Result {
    let func = callable.as_primitive()?;
    call_primitive(func, args)
}

pub(crate) fn pretty_print_args(args: &[Value]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_primitive(func: &PrimitiveFn, args: &[Value]) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}
