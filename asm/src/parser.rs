use color_print::cformat;

use crate::error::Error;
use crate::symbols::Symbols;
use arch::Shape;

const COMMENT: &str = "//";

// ----------------------------------------------------------------------------
// Line

#[derive(Debug, Clone)]
pub struct Line {
    pub file: String,
    pub idx: usize,
    pub raw: String,
}

impl Line {
    pub fn new(file: &str, idx: usize, raw: &str) -> Self {
        Line {
            file: file.to_string(),
            idx,
            raw: raw.to_string(),
        }
    }

    /// Split `text` into lines attributed to `file`.
    pub fn read(file: &str, text: &str) -> Vec<Line> {
        text.lines()
            .enumerate()
            .map(|(idx, raw)| Line::new(file, idx, raw))
            .collect()
    }

    /// Source text without comment and surrounding whitespace.
    pub fn code(&self) -> &str {
        match self.raw.split_once(COMMENT) {
            Some((code, _)) => code.trim(),
            None => self.raw.trim(),
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.raw.split_once(COMMENT).map(|(_, comment)| comment)
    }

    pub fn pos(&self) -> String {
        format!("{}:{}", self.file, self.no())
    }

    pub fn no(&self) -> usize {
        self.idx + 1
    }
}

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `(NAME)`
    Label(String),
    Code(Code),
}

impl Stmt {
    pub fn parse(code: &str) -> Result<Option<Stmt>, Error> {
        if code.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = code.strip_prefix('(') {
            let label = rest.split(')').next().unwrap_or_default().trim();
            return Ok(Some(Stmt::Label(label.to_string())));
        }

        Code::parse(code).map(|code| Some(Stmt::Code(code)))
    }
}

// ----------------------------------------------------------------------------
// Instruction

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    /// `@value`
    Address(Imm),
    /// `dest=comp;jump`
    Compute {
        dest: String,
        comp: String,
        jump: String,
    },
}

impl Code {
    fn parse(code: &str) -> Result<Code, Error> {
        if let Some(operand) = code.strip_prefix('@') {
            return Ok(Code::Address(Imm::parse(operand.trim())?));
        }

        let code: String = code.split_whitespace().collect();
        let (dest, rest) = code.split_once('=').unwrap_or(("null", code.as_str()));
        let (comp, jump) = rest.split_once(';').unwrap_or((rest, "null"));
        Ok(Code::Compute {
            dest: dest.to_string(),
            comp: comp.to_string(),
            jump: jump.to_string(),
        })
    }

    pub fn shape(&self) -> Shape {
        match self {
            Code::Address(_) => Shape::Address,
            Code::Compute { .. } => Shape::Compute,
        }
    }

    pub fn cformat(&self) -> String {
        match self {
            Code::Address(imm) => cformat!("<y>@</>{}", imm.cfmt()),
            Code::Compute { dest, comp, jump } => {
                let dest = match dest.as_str() {
                    "null" => String::new(),
                    dest => cformat!("<b>{}</>=", dest),
                };
                let jump = match jump.as_str() {
                    "null" => String::new(),
                    jump => cformat!(";<m>{}</>", jump),
                };
                cformat!("{}<r>{}</>{}", dest, comp, jump)
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Immidiate

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(u64),
    Symbol(String),
}

impl Imm {
    /// Only plain decimal digits make a literal; anything else names a symbol.
    fn parse(s: &str) -> Result<Imm, Error> {
        if s.is_empty() {
            return Err(Error::MissingArgument);
        }
        if s.bytes().all(|c| c.is_ascii_digit()) {
            s.parse()
                .map(Imm::Literal)
                .map_err(|_| Error::ParseArgument(s.to_string()))
        } else {
            Ok(Imm::Symbol(s.to_string()))
        }
    }

    /// Value of the operand. An unbound symbol becomes a new variable.
    pub fn resolve(&self, symbols: &mut Symbols) -> u64 {
        match self {
            Imm::Literal(val) => *val,
            Imm::Symbol(name) => symbols.resolve(name) as u64,
        }
    }

    fn cfmt(&self) -> String {
        match self {
            Imm::Literal(val) => cformat!("<y>{}</>", val),
            Imm::Symbol(name) => cformat!("<g>{}</>", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(dest: &str, comp: &str, jump: &str) -> Option<Stmt> {
        Some(Stmt::Code(Code::Compute {
            dest: dest.to_string(),
            comp: comp.to_string(),
            jump: jump.to_string(),
        }))
    }

    macro_rules! test_parse {
        ($($name:ident: $code:expr => $stmt:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let line = Line::new("test.asm", 0, $code);
                    assert_eq!(Stmt::parse(line.code()).unwrap(), $stmt);
                }
            )*
        }
    }

    test_parse! {
        parse_blank: "   " => None,
        parse_comment_only: "// push constant 7" => None,
        parse_label: "(LOOP)" => Some(Stmt::Label("LOOP".to_string())),
        parse_label_comment: "  (END) // halt" => Some(Stmt::Label("END".to_string())),
        parse_literal: "@21" => Some(Stmt::Code(Code::Address(Imm::Literal(21)))),
        parse_symbol: "@Foo.3" => Some(Stmt::Code(Code::Address(Imm::Symbol("Foo.3".to_string())))),
        parse_negative_is_symbol: "@-1" => Some(Stmt::Code(Code::Address(Imm::Symbol("-1".to_string())))),
        parse_assign: "M=D+M" => compute("M", "D+M", "null"),
        parse_jump: "0;JMP" => compute("null", "0", "JMP"),
        parse_full: "AM=M-1;JNE // both" => compute("AM", "M-1", "JNE"),
        parse_spaced: "D = D - A" => compute("D", "D-A", "null"),
    }

    #[test]
    fn empty_address() {
        assert!(matches!(Stmt::parse("@"), Err(Error::MissingArgument)));
    }

    #[test]
    fn oversized_literal() {
        assert!(matches!(
            Stmt::parse("@99999999999999999999999"),
            Err(Error::ParseArgument(_))
        ));
    }
}
