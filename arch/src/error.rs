use thiserror::Error;

use crate::format::{Field, Shape};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot parse `{0}` as bit pattern")]
    ParseBits(String),

    #[error("No opcode for `{0}` instructions")]
    MissingOpcode(Shape),

    #[error("No field layout for `{0}` instructions")]
    MissingFormat(Shape),

    #[error("`{shape}` layout is {width} bits wide, word is {word} bits")]
    FormatWidth {
        shape: Shape,
        width: usize,
        word: usize,
    },

    #[error("`{shape}` opcode `{opcode}` does not fit its {field}-bit field")]
    OpcodeWidth {
        shape: Shape,
        opcode: String,
        field: usize,
    },

    #[error("`{field}` code for `{key}` is {width} bits, field is {expect} bits")]
    TableWidth {
        field: Field,
        key: String,
        width: usize,
        expect: usize,
    },

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to parse descriptor: {0}")]
    Parse(String, #[source] serde_yaml::Error),
}
