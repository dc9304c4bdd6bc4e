use arch::{Field, Shape};
use color_print::cprintln;
use thiserror::Error;

use crate::parser::Line;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown computation: `{0}`")]
    UnknownComp(String),

    #[error("Unknown destination: `{0}`")]
    UnknownDest(String),

    #[error("Unknown jump condition: `{0}`")]
    UnknownJump(String),

    #[error("More argument required")]
    MissingArgument,

    #[error("Cannot parse `{0}` as address")]
    ParseArgument(String),

    #[error("Encoded word `{word}` is {width} bits, expected {expect}")]
    WordWidth {
        word: String,
        width: usize,
        expect: usize,
    },

    #[error("No opcode for `{0}` instructions")]
    NoOpcode(Shape),

    #[error("No field layout for `{0}` instructions")]
    NoFormat(Shape),

    #[error("Field `{0}` has no value in `{1}` instructions")]
    UnexpectedField(Field, Shape),

    #[error(transparent)]
    Isa(#[from] arch::Error),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self);
    }
}

/// An error tied to the source line it came from.
#[derive(Error, Debug)]
#[error("{}: {}", .line.pos(), .error)]
pub struct LineError {
    pub line: Line,
    #[source]
    pub error: Error,
}

impl LineError {
    pub fn new(line: &Line, error: Error) -> Self {
        LineError {
            line: line.clone(),
            error,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self) {
        cprintln!("<red,bold>error</>: {}", self.error);
        cprintln!("     <blue>--></> <underline>{}</>", self.line.pos());
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.line.no(), self.line.raw);
        cprintln!("      <blue>|</>");
    }
}
