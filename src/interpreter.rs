use crate::environment::Environment;
use crate::types::{Expression, Value};
use crate::{evaluator, printer, reader};
use std::fmt;

pub type Result<T = Value> = std::result::Result<T, Error>;
#[derive(Debug)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "syntax error: {}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl From<reader::Error> for Error {
    fn from(e: reader::Error) -> Self {
        Self::Read(e)
    }
}

impl From<evaluator::Error> for Error {
    fn from(e: evaluator::Error) -> Self {
        Self::Eval(e)
    }
}

pub fn read(line: &str) -> Result<Expression> {
    reader::read_str(line).map_err(Error::Read)
}

pub fn eval(obj: &Expression, env: &mut Environment) -> Result {
    evaluator::eval(obj, env).map_err(Error::Eval)
}

/// Read the first expression in `program` and evaluate it.
pub fn run(program: &str, env: &mut Environment) -> Result {
    read(program).and_then(|ast| eval(&ast, env))
}

/// Read, evaluate and print. `None` means there is nothing to show, which is
/// what `define` and `print` give back.
pub fn rep(line: &str, env: &mut Environment) -> Result<Option<String>> {
    let value = run(line, env)?;
    match value {
        Value::Unit => Ok(None),
        value => Ok(Some(printer::pr_str(&value))),
    }
}
