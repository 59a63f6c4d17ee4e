use crate::number::{Int, Number};
use crate::tokens::{tokenize, Token};
use crate::types::{Expression, Value};
use std::fmt;
use std::iter::Peekable;
use std::slice;

pub type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

pub type Result<T = Expression> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnexpectedEof,
    UnexpectedCloseParen,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEof => write!(f, "unexpected EOF"),
            Error::UnexpectedCloseParen => write!(f, "unexpected )"),
        }
    }
}

/// Read the first expression in `input`. Anything after it is ignored.
pub fn read_str(input: &str) -> Result {
    let tokens = tokenize(input);
    let mut reader = tokens.iter().peekable();
    let form = read_from_tokens(&mut reader)?;
    if reader.len() > 0 {
        log::warn!(
            "ignoring {} token(s) after the first expression in {:?}",
            reader.len(),
            input
        );
    }
    Ok(form)
}

/// Read one expression, advancing `reader` past exactly the tokens it used.
pub fn read_from_tokens(reader: &mut Reader<'_>) -> Result {
    match reader.next() {
        Some(Token::OpenRoundBracket) => read_list(reader).map(Value::wrap_list),
        Some(Token::CloseRoundBracket) => Err(Error::UnexpectedCloseParen),
        Some(Token::PlainChars(chars)) => Ok(atom(chars)),
        None => Err(Error::UnexpectedEof),
    }
}

fn read_list(reader: &mut Reader<'_>) -> Result<Vec<Expression>> {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Token::CloseRoundBracket) => {
                reader.next();
                break;
            }
            Some(_) => elements.push(read_from_tokens(reader)?),
            None => return Err(Error::UnexpectedEof),
        }
    }
    Ok(elements)
}

/// Integers if possible, then floats, and symbols for everything else.
pub fn atom(token: &str) -> Expression {
    if let Ok(x) = token.parse::<Int>() {
        return Value::Number(Number::Integer(x));
    }
    if let Ok(x) = token.parse::<f64>() {
        return Value::Number(Number::Float(x));
    }
    Value::new_symbol(token)
}
