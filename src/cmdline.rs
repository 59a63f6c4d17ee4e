use crate::environment::Environment;
use crate::interpreter;
use ansi_term::Colour;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fmt;
use std::fs::read_to_string;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    IOError(std::io::Error),
    Usage(String),
    Script {
        path: String,
        line: usize,
        error: interpreter::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IOError(e) => write!(f, "io error: {}", e),
            Error::Usage(program) => write!(f, "usage: {} [FILE]", program),
            Error::Script { path, line, error } => write!(f, "{}:{}: {}", path, line, error),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("lispy")?;
    interface.set_prompt("lispy> ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".lispy_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

fn paint_error(message: String) -> String {
    match atty::is(atty::Stream::Stdout) {
        true => Colour::Red.paint(message).to_string(),
        false => message,
    }
}

/// Read lines until EOF, evaluating each against the same environment. A
/// failing line is reported and leaves the environment as it was.
pub fn repl<T: Terminal>(interface: &Interface<T>, env: &mut Environment) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                interface.add_history_unique(line.clone());
                match interpreter::rep(&line, env) {
                    Ok(Some(text)) => {
                        writeln!(interface, "{}", text).ok();
                    }
                    Ok(None) => (),
                    Err(e) => {
                        log::debug!("evaluating {:?} failed: {:?}", line, e);
                        writeln!(interface, "{}", paint_error(format!("Error: {}", e))).ok();
                    }
                }
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

/// Evaluate a file one line at a time, since each read takes a single
/// expression. Stops at the first failure.
pub fn run_file(path: &str, env: &mut Environment) -> Result<(), Error> {
    let source = read_to_string(path)?;
    for (index, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match interpreter::rep(line, env) {
            Ok(Some(text)) => println!("{}", text),
            Ok(None) => (),
            Err(error) => {
                return Err(Error::Script {
                    path: path.into(),
                    line: index + 1,
                    error,
                })
            }
        }
    }
    Ok(())
}

pub fn launch(args: Vec<String>, env: &mut Environment) -> Result<(), Error> {
    match args.as_slice() {
        [_] | [] => {
            let interface = setup()?;
            repl(&interface, env);
            save_history(&interface)?;
            Ok(())
        }
        [_, path] => run_file(path, env),
        [program, ..] => Err(Error::Usage(program.clone())),
    }
}
