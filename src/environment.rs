use crate::types::{Symbol, Value};
use crate::{core, maths};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, PartialEq)]
pub struct UnknownSymbol(pub Symbol);

/// The one flat table of bindings used for every lookup and every `define`.
/// There are no nested scopes.
#[derive(Debug)]
pub struct Environment {
    bindings: HashMap<Symbol, Value>,
}

impl Environment {
    /// An environment with nothing bound at all, not even the builtins.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn set<T>(&mut self, key: T, value: Value) -> Option<Value>
    where
        T: Into<Symbol>,
    {
        self.bindings.insert(key.into(), value)
    }

    pub fn get(&self, key: &Symbol) -> Option<&Value> {
        self.bindings.get(key)
    }

    pub fn fetch(&self, key: &Symbol) -> Result<Value, UnknownSymbol> {
        self.get(key)
            .cloned()
            .ok_or_else(|| UnknownSymbol(key.clone()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Environment {
    fn default() -> Self {
        let mut env = Self::empty();
        for (&name, &func) in core::CORE.iter() {
            env.set(name, Value::Primitive(func));
        }
        for &(name, value) in maths::CONSTANTS.iter() {
            env.set(name, Value::float(value));
        }
        log::debug!("seeded environment with {} bindings", env.len());
        env
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.bindings.keys().map(Symbol::as_ref).collect();
        names.sort_unstable();
        write!(f, "Environment{{{}}}", names.join(", "))
    }
}
