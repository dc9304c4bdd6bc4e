use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("line {0}: {1}")]
    Parse(usize, #[source] arch::Error),

    #[error("line {0}: `{1}` is not an instruction")]
    Decode(usize, String),

    #[error("Program of {0} words does not fit in ROM")]
    RomSize(usize),

    #[error("Failed to parse dump config: {0}")]
    DumpConfig(String, #[source] serde_yaml::Error),
}

impl Error {
    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self);
    }
}
