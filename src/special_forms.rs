use crate::environment::Environment;
use crate::evaluator::{eval, Result};
use crate::types::{truthy, Arity, Expression, Value};

/// `(if test conseq alt)`. Only the chosen branch is evaluated.
pub fn apply_if(args: &[Expression], env: &mut Environment) -> Result {
    Arity::exactly(3).validate_for(args.len(), "if")?;
    let condition = eval(&args[0], env)?;
    let branch = match truthy(&condition) {
        true => &args[1],
        false => &args[2],
    };
    eval(branch, env)
}

/// `(define name expr)`. The value is computed before anything is bound, so
/// a failing `expr` leaves the environment as it was.
pub fn apply_define(args: &[Expression], env: &mut Environment) -> Result {
    Arity::exactly(2).validate_for(args.len(), "define")?;
    let key = args[0].as_symbol()?;
    let value = eval(&args[1], env)?;
    log::debug!("define {} as {}", key, value);
    env.set(key.clone(), value);
    Ok(Value::Unit)
}
