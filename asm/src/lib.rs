//! Two-pass symbolic assembler.
//!
//! Pass 1 binds every `(LABEL)` to the index of the next instruction.
//! Pass 2 resolves `@symbol` operands, allocating unseen names as variables
//! in first-use order, and encodes each instruction from the descriptor's
//! field layout. Output is all-or-nothing: one bad line and no word is
//! returned.

mod encode;
pub mod error;
pub mod parser;
pub mod symbols;
pub mod util;

use arch::{Bits, Isa};

pub use error::{Error, LineError};
pub use parser::{Code, Imm, Line, Stmt};
pub use symbols::{Kind, Symbols};

#[derive(Debug, Clone)]
pub struct Program {
    pub words: Vec<Bits>,
    pub symbols: Symbols,
}

pub fn assemble(lines: &[Line], isa: &Isa) -> Result<Program, Vec<LineError>> {
    let mut symbols = Symbols::new(isa);
    let mut errors = vec![];

    // 1. Collect labels
    let mut queue = vec![];
    let mut pc: u32 = 0;
    for line in lines {
        match Stmt::parse(line.code()) {
            Ok(None) => {}
            Ok(Some(Stmt::Label(label))) => {
                symbols.bind_label(&label, pc);
            }
            Ok(Some(Stmt::Code(code))) => {
                queue.push((line, code));
                pc += 1;
            }
            Err(error) => {
                errors.push(LineError::new(line, error));
                pc += 1;
            }
        }
    }

    // 2. Resolve symbols and encode
    let mut words = Vec::with_capacity(queue.len());
    for (line, code) in queue {
        match code.encode(&mut symbols, isa) {
            Ok(word) => words.push(word),
            Err(error) => errors.push(LineError::new(line, error)),
        }
    }

    if errors.is_empty() {
        Ok(Program { words, symbols })
    } else {
        Err(errors)
    }
}

impl Program {
    /// One bit string per line.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for word in &self.words {
            text.push_str(&word.to_string());
            text.push('\n');
        }
        text
    }

    /// Little-endian words, `word_size` rounded up to whole bytes.
    pub fn to_bytes(&self, word_size: usize) -> Vec<u8> {
        let len = word_size.div_ceil(8);
        self.words
            .iter()
            .flat_map(|word| word.val().to_le_bytes().into_iter().take(len))
            .collect()
    }
}
