use color_print::cprintln;
use hasm::Line;
use thiserror::Error;

use crate::command::Segment;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),

    #[error("Unknown segment: `{0}`")]
    UnknownSegment(String),

    #[error("Invalid label or function name: `{0}`")]
    BadIdentifier(String),

    #[error("More argument required")]
    MissingArgument,

    #[error("Unexpected argument: `{0}`")]
    UnexpectedArgument(String),

    #[error("Cannot parse `{0}` as {1}")]
    ParseArgument(String, String),

    #[error("Index {1} is out of range for segment `{0}`")]
    IndexOutOfRange(Segment, u16),

    #[error("Cannot pop into `constant`")]
    PopConstant,

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("No `.vm` file found in {0}")]
    NoSource(String),
}

impl Error {
    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self);
    }
}

/// A decode failure and the VM line that caused it.
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

    pub fn print_diag(&self) {
        cprintln!("<red,bold>error</>: {}", self.error);
        cprintln!("     <blue>--></> <underline>{}</>", self.line.pos());
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.line.no(), self.line.raw);
        cprintln!("      <blue>|</>");
        cprintln!("<yellow>note</>: translation stopped, no output written");
    }
}
