use arch::{Bits, Field, Isa};

use crate::error::Error;
use crate::parser::Code;
use crate::symbols::Symbols;

impl Code {
    /// Build the machine word by walking the shape's field layout in order.
    /// The result must be exactly one word wide.
    pub fn encode(&self, symbols: &mut Symbols, isa: &Isa) -> Result<Bits, Error> {
        let shape = self.shape();
        let format = isa.format(shape).ok_or(Error::NoFormat(shape))?;

        let mut word = Bits::default();
        for (field, width) in format.iter() {
            let bits = match (field, self) {
                (Field::Opcode, _) => *isa.opcode(shape).ok_or(Error::NoOpcode(shape))?,
                (Field::Value, Code::Address(imm)) => Bits::new(imm.resolve(symbols), *width),
                (Field::Comp, Code::Compute { comp, .. }) => isa
                    .comp(comp)
                    .ok_or_else(|| Error::UnknownComp(comp.clone()))?,
                (Field::Dest, Code::Compute { dest, .. }) => isa
                    .dest(dest)
                    .ok_or_else(|| Error::UnknownDest(dest.clone()))?,
                (Field::Jump, Code::Compute { jump, .. }) => isa
                    .jump(jump)
                    .ok_or_else(|| Error::UnknownJump(jump.clone()))?,
                (field, _) => return Err(Error::UnexpectedField(*field, shape)),
            };
            word.push(bits);
        }

        if word.width() != isa.word_size {
            return Err(Error::WordWidth {
                word: word.to_string(),
                width: word.width(),
                expect: isa.word_size,
            });
        }
        Ok(word)
    }
}
