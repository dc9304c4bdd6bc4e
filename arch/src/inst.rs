use color_print::cformat;

use crate::bits::Bits;
use crate::format::{Field, Shape};
use crate::isa::Isa;

/// One machine word split back into its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    Address(u32),
    Compute { comp: Bits, dest: Bits, jump: Bits },
}

impl Inst {
    pub fn decode(word: Bits, isa: &Isa) -> Option<Inst> {
        let shape = isa.shape_of(&word)?;
        let format = isa.format(shape)?;

        let (mut value, mut comp, mut dest, mut jump) = (None, None, None, None);
        let mut offset = 0;
        for (field, width) in format.iter() {
            let bits = word.slice(offset, *width);
            offset += width;
            match field {
                Field::Opcode => {}
                Field::Value => value = Some(bits.val() as u32),
                Field::Comp => comp = Some(bits),
                Field::Dest => dest = Some(bits),
                Field::Jump => jump = Some(bits),
            }
        }

        match shape {
            Shape::Address => Some(Inst::Address(value?)),
            Shape::Compute => Some(Inst::Compute {
                comp: comp?,
                dest: dest?,
                jump: jump?,
            }),
        }
    }
}

impl Inst {
    /// Assembly text, e.g. `@17` or `AM=M-1`. Codes missing from the
    /// tables print as `?`.
    pub fn format(&self, isa: &Isa) -> String {
        match self {
            Inst::Address(value) => format!("@{}", value),
            Inst::Compute { comp, dest, jump } => {
                let name = |table: &bimap::BiMap<String, Bits>, bits: &Bits| {
                    table
                        .get_by_right(bits)
                        .cloned()
                        .unwrap_or_else(|| "?".to_string())
                };
                let mut text = String::new();
                let dest = name(&isa.dest, dest);
                if dest != "null" {
                    text.push_str(&dest);
                    text.push('=');
                }
                text.push_str(&name(&isa.comp, comp));
                let jump = name(&isa.jump, jump);
                if jump != "null" {
                    text.push(';');
                    text.push_str(&jump);
                }
                text
            }
        }
    }

    pub fn cformat(&self, isa: &Isa) -> String {
        match self {
            Inst::Address(_) => cformat!("<y>{}</>", self.format(isa)),
            Inst::Compute { .. } => cformat!("<r>{}</>", self.format(isa)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hack::HACK;

    macro_rules! test_decode {
        ($($name:ident: $word:expr => $text:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let word: Bits = $word.parse().unwrap();
                    let inst = Inst::decode(word, &HACK).unwrap();
                    assert_eq!(inst.format(&HACK), $text);
                }
            )*
        }
    }

    test_decode! {
        decode_address: "0000000000010001" => "@17",
        decode_address_max: "0111111111111111" => "@32767",
        decode_load: "1110110000010000" => "D=A",
        decode_pop: "1111110010101000" => "AM=M-1",
        decode_jump: "1110101010000111" => "0;JMP",
        decode_branch: "1110001100000100" => "D;JLT",
        decode_all_dest: "1110111111111000" => "AMD=1",
    }

    #[test]
    fn undefined_opcode() {
        let word: Bits = "1010101010101010".parse().unwrap();
        assert_eq!(Inst::decode(word, &HACK), None);
    }
}
