use bimap::BiMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::bits::Bits;
use crate::error::Error;
use crate::format::{Field, Format, Shape};

/// Instruction-format descriptor of one target architecture.
///
/// Built once and only read afterwards. The assembler encodes purely from
/// these tables, so a different target is a different `Isa` value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Isa {
    pub name: String,
    pub word_size: usize,
    pub opcodes: IndexMap<Shape, Bits>,
    pub formats: IndexMap<Shape, Format>,
    pub comp: BiMap<String, Bits>,
    pub dest: BiMap<String, Bits>,
    pub jump: BiMap<String, Bits>,
    /// Names bound before any source is read (pointer cells, registers, ports).
    pub symbols: IndexMap<String, u32>,
    /// First address handed out to variables.
    pub var_base: u32,
}

impl Isa {
    pub fn opcode(&self, shape: Shape) -> Option<&Bits> {
        self.opcodes.get(&shape)
    }

    pub fn format(&self, shape: Shape) -> Option<&Format> {
        self.formats.get(&shape)
    }

    pub fn comp(&self, mnemonic: &str) -> Option<Bits> {
        self.comp.get_by_left(mnemonic).copied()
    }

    pub fn dest(&self, mnemonic: &str) -> Option<Bits> {
        self.dest.get_by_left(mnemonic).copied()
    }

    pub fn jump(&self, mnemonic: &str) -> Option<Bits> {
        self.jump.get_by_left(mnemonic).copied()
    }

    /// Shape whose opcode tag prefixes `word`.
    pub fn shape_of(&self, word: &Bits) -> Option<Shape> {
        self.opcodes
            .iter()
            .find(|(_, opcode)| word.starts_with(opcode))
            .map(|(shape, _)| *shape)
    }
}

impl Isa {
    /// Check that every layout fills exactly one word and every code fits
    /// the field it is written into.
    pub fn validate(&self) -> Result<(), Error> {
        for shape in Shape::iter() {
            let opcode = self.opcode(shape).ok_or(Error::MissingOpcode(shape))?;
            let format = self.format(shape).ok_or(Error::MissingFormat(shape))?;
            if format.width() != self.word_size {
                return Err(Error::FormatWidth {
                    shape,
                    width: format.width(),
                    word: self.word_size,
                });
            }
            if format.field(Field::Opcode) != Some(opcode.width()) {
                return Err(Error::OpcodeWidth {
                    shape,
                    opcode: opcode.to_string(),
                    field: format.field(Field::Opcode).unwrap_or(0),
                });
            }
        }

        let compute = self.format(Shape::Compute);
        for (field, table) in [
            (Field::Comp, &self.comp),
            (Field::Dest, &self.dest),
            (Field::Jump, &self.jump),
        ] {
            let expect = compute.and_then(|f| f.field(field)).unwrap_or(0);
            for (key, bits) in table {
                if bits.width() != expect {
                    return Err(Error::TableWidth {
                        field,
                        key: key.clone(),
                        width: bits.width(),
                        expect,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn from_yaml(name: &str, text: &str) -> Result<Self, Error> {
        let isa: Isa =
            serde_yaml::from_str(text).map_err(|e| Error::Parse(name.to_string(), e))?;
        isa.validate()?;
        Ok(isa)
    }

    pub fn load(path: &str) -> Result<Self, Error> {
        let text =
            std::fs::read_to_string(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        Self::from_yaml(path, &text)
    }
}
