use regex::Regex;
use std::fmt;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    OpenRoundBracket,
    CloseRoundBracket,
    PlainChars(&'a str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenRoundBracket => write!(f, "("),
            Token::CloseRoundBracket => write!(f, ")"),
            Token::PlainChars(chars) => write!(f, "{}", chars),
        }
    }
}

fn create_token(captured: &str) -> Token<'_> {
    match captured {
        "(" => Token::OpenRoundBracket,
        ")" => Token::CloseRoundBracket,
        _ => Token::PlainChars(captured),
    }
}

/// Split `input` into tokens. Round brackets always stand alone; everything
/// else is separated by whitespace. There are no strings or comments, so this
/// cannot fail.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)              # ignore whitespace in this pattern & allow comments
                [()]             # a single bracket
                |[^\s()]+        # or a run of anything but whitespace and brackets
            "#
        )
        .unwrap();
    }
    TOKEN_RE
        .find_iter(input)
        .map(|m| create_token(m.as_str()))
        .collect()
}
