use bimap::BiMap;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::bits::Bits;
use crate::format::{Field, Format, Shape};
use crate::isa::Isa;
use crate::reg::{self, Reg};

/// The Hack computer: 16-bit words, `@value` and `dest=comp;jump`.
pub static HACK: Lazy<Isa> = Lazy::new(hack);

// a-bit followed by c1..c6
const COMP: [(&str, &str); 28] = [
    ("0", "0101010"),
    ("1", "0111111"),
    ("-1", "0111010"),
    ("D", "0001100"),
    ("A", "0110000"),
    ("!D", "0001101"),
    ("!A", "0110001"),
    ("-D", "0001111"),
    ("-A", "0110011"),
    ("D+1", "0011111"),
    ("A+1", "0110111"),
    ("D-1", "0001110"),
    ("A-1", "0110010"),
    ("D+A", "0000010"),
    ("D-A", "0010011"),
    ("A-D", "0000111"),
    ("D&A", "0000000"),
    ("D|A", "0010101"),
    ("M", "1110000"),
    ("!M", "1110001"),
    ("-M", "1110011"),
    ("M+1", "1110111"),
    ("M-1", "1110010"),
    ("D+M", "1000010"),
    ("D-M", "1010011"),
    ("M-D", "1000111"),
    ("D&M", "1000000"),
    ("D|M", "1010101"),
];

const DEST: [(&str, &str); 8] = [
    ("null", "000"),
    ("M", "001"),
    ("D", "010"),
    ("MD", "011"),
    ("A", "100"),
    ("AM", "101"),
    ("AD", "110"),
    ("AMD", "111"),
];

const JUMP: [(&str, &str); 8] = [
    ("null", "000"),
    ("JGT", "001"),
    ("JEQ", "010"),
    ("JGE", "011"),
    ("JLT", "100"),
    ("JNE", "101"),
    ("JLE", "110"),
    ("JMP", "111"),
];

fn table(entries: &[(&str, &str)]) -> BiMap<String, Bits> {
    entries
        .iter()
        .map(|(key, bits)| (key.to_string(), Bits::lit(bits)))
        .collect()
}

fn hack() -> Isa {
    let mut symbols = IndexMap::new();
    for reg in [Reg::SP, Reg::LCL, Reg::ARG, Reg::THIS, Reg::THAT] {
        symbols.insert(reg.to_string(), u16::from(reg) as u32);
    }
    for n in 0..16 {
        symbols.insert(format!("R{n}"), n);
    }
    symbols.insert("SCREEN".to_string(), reg::SCREEN as u32);
    symbols.insert("KBD".to_string(), reg::KBD as u32);

    Isa {
        name: "hack".to_string(),
        word_size: 16,
        opcodes: IndexMap::from([
            (Shape::Address, Bits::lit("0")),
            (Shape::Compute, Bits::lit("111")),
        ]),
        formats: IndexMap::from([
            (
                Shape::Address,
                Format(vec![(Field::Opcode, 1), (Field::Value, 15)]),
            ),
            (
                Shape::Compute,
                Format(vec![
                    (Field::Opcode, 3),
                    (Field::Comp, 7),
                    (Field::Dest, 3),
                    (Field::Jump, 3),
                ]),
            ),
        ]),
        comp: table(&COMP),
        dest: table(&DEST),
        jump: table(&JUMP),
        symbols,
        var_base: reg::VAR_BASE as u32,
    }
}
