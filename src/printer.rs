use crate::types::Value;
use itertools::Itertools;
use std::fmt;

pub fn pr_str(object: &Value) -> String {
    match object {
        Value::List(elements) => format!("({})", elements.iter().map(pr_str).join(" ")),
        Value::Number(n) => n.to_string(),
        Value::Symbol(name) => name.to_string(),
        Value::Bool(true) => String::from("#t"),
        Value::Bool(false) => String::from("#f"),
        Value::Primitive(f) => format!("#<procedure {}>", f.name),
        Value::Unit => String::from("#<void>"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pr_str(self))
    }
}
