pub mod cmdline;
pub mod environment;
pub mod evaluator;
pub mod interpreter;
pub mod number;
pub mod printer;
pub mod reader;
pub mod special_forms;
pub mod tokens;
pub mod types;

#[macro_use]
extern crate lazy_static;

mod core;
mod maths;

pub use environment::Environment;
pub use types::{Expression, Value};
