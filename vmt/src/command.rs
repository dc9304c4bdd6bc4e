use std::fmt;

use arch::reg::TEMP_SIZE;
use strum::{Display, EnumString};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    And,
    Or,
    Not,
    Eq,
    Lt,
    Gt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Arith(ArithOp),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u16),
    Call(String, u16),
    Return,
}

impl Command {
    /// Decode one comment-free VM line. Blank lines give `None`.
    pub fn parse(code: &str) -> Result<Option<Command>, Error> {
        let mut words = code.split_whitespace();
        let Some(op) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        macro_rules! arg {
            ($index:expr) => {{
                let arg = args.get($index).ok_or(Error::MissingArgument)?;
                ident(arg)?
            }};
            ($index:expr, Segment) => {{
                let arg = args.get($index).ok_or(Error::MissingArgument)?;
                arg.parse::<Segment>()
                    .map_err(|_| Error::UnknownSegment(arg.to_string()))?
            }};
            ($index:expr, $Type:ty) => {{
                let arg = args.get($index).ok_or(Error::MissingArgument)?;
                arg.parse::<$Type>().map_err(|_| {
                    Error::ParseArgument(arg.to_string(), stringify!($Type).to_string())
                })?
            }};
        }

        let (command, arity) = match op {
            "push" => (Command::Push(arg!(0, Segment), arg!(1, u16)), 2),
            "pop" => (Command::Pop(arg!(0, Segment), arg!(1, u16)), 2),
            "label" => (Command::Label(arg!(0)), 1),
            "goto" => (Command::Goto(arg!(0)), 1),
            "if-goto" => (Command::IfGoto(arg!(0)), 1),
            "function" => (Command::Function(arg!(0), arg!(1, u16)), 2),
            "call" => (Command::Call(arg!(0), arg!(1, u16)), 2),
            "return" => (Command::Return, 0),
            op => match op.parse::<ArithOp>() {
                Ok(op) => (Command::Arith(op), 0),
                Err(_) => return Err(Error::UnknownCommand(op.to_string())),
            },
        };
        if let Some(extra) = args.get(arity) {
            return Err(Error::UnexpectedArgument(extra.to_string()));
        }

        command.check()?;
        Ok(Some(command))
    }

    fn check(&self) -> Result<(), Error> {
        match *self {
            Command::Pop(Segment::Constant, _) => Err(Error::PopConstant),
            Command::Push(seg @ Segment::Temp, idx) | Command::Pop(seg @ Segment::Temp, idx)
                if idx >= TEMP_SIZE =>
            {
                Err(Error::IndexOutOfRange(seg, idx))
            }
            Command::Push(seg @ Segment::Pointer, idx)
            | Command::Pop(seg @ Segment::Pointer, idx)
                if idx > 1 =>
            {
                Err(Error::IndexOutOfRange(seg, idx))
            }
            _ => Ok(()),
        }
    }
}

/// Label and function names: letters, digits, `_ . $ :`, not starting with
/// a digit. Anything else would be misread as an assembly literal or label.
fn ident(name: &str) -> Result<String, Error> {
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':'))
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(name.to_string())
    } else {
        Err(Error::BadIdentifier(name.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Arith(op) => write!(f, "{}", op),
            Command::Push(seg, idx) => write!(f, "push {} {}", seg, idx),
            Command::Pop(seg, idx) => write!(f, "pop {} {}", seg, idx),
            Command::Label(label) => write!(f, "label {}", label),
            Command::Goto(label) => write!(f, "goto {}", label),
            Command::IfGoto(label) => write!(f, "if-goto {}", label),
            Command::Function(name, n) => write!(f, "function {} {}", name, n),
            Command::Call(name, n) => write!(f, "call {} {}", name, n),
            Command::Return => write!(f, "return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_parse {
        ($($name:ident: $code:expr => $cmd:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(Command::parse($code).unwrap(), Some($cmd));
                }
            )*
        }
    }

    test_parse! {
        parse_push: "push constant 7" => Command::Push(Segment::Constant, 7),
        parse_pop: "pop local 2" => Command::Pop(Segment::Local, 2),
        parse_extra_space: "  push   static\t3 " => Command::Push(Segment::Static, 3),
        parse_add: "add" => Command::Arith(ArithOp::Add),
        parse_not: "not" => Command::Arith(ArithOp::Not),
        parse_gt: "gt" => Command::Arith(ArithOp::Gt),
        parse_label: "label LOOP" => Command::Label("LOOP".to_string()),
        parse_if_goto: "if-goto END" => Command::IfGoto("END".to_string()),
        parse_function: "function Main.main 2" => Command::Function("Main.main".to_string(), 2),
        parse_call: "call Math.multiply 2" => Command::Call("Math.multiply".to_string(), 2),
        parse_return: "return" => Command::Return,
        parse_ident_chars: "label a_1.b$c:d" => Command::Label("a_1.b$c:d".to_string()),
        parse_pointer_1: "pop pointer 1" => Command::Pop(Segment::Pointer, 1),
        parse_temp_7: "push temp 7" => Command::Push(Segment::Temp, 7),
    }

    macro_rules! test_reject {
        ($($name:ident: $code:expr => $err:pat,)*) => {
            $(
                #[test]
                fn $name() {
                    let err = Command::parse($code).unwrap_err();
                    assert!(matches!(err, $err), "{}", err);
                }
            )*
        }
    }

    test_reject! {
        reject_unknown: "mul" => Error::UnknownCommand(_),
        reject_segment: "push heap 1" => Error::UnknownSegment(_),
        reject_missing_index: "push local" => Error::MissingArgument,
        reject_missing_label: "goto" => Error::MissingArgument,
        reject_bad_index: "push local x" => Error::ParseArgument(_, _),
        reject_negative: "push constant -1" => Error::ParseArgument(_, _),
        reject_extra: "add 1" => Error::UnexpectedArgument(_),
        reject_pop_constant: "pop constant 0" => Error::PopConstant,
        reject_temp: "push temp 8" => Error::IndexOutOfRange(Segment::Temp, 8),
        reject_pointer: "pop pointer 2" => Error::IndexOutOfRange(Segment::Pointer, 2),
        reject_case: "Push constant 1" => Error::UnknownCommand(_),
        reject_numeric_label: "label 3" => Error::BadIdentifier(_),
        reject_numeric_goto: "goto 3" => Error::BadIdentifier(_),
        reject_paren_label: "if-goto a)b" => Error::BadIdentifier(_),
        reject_digit_function: "function 1f 0" => Error::BadIdentifier(_),
        reject_at_call: "call @f 0" => Error::BadIdentifier(_),
    }

    #[test]
    fn blank() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn display_round_trips_text() {
        for code in ["push argument 1", "call Foo.bar 3", "if-goto L", "eq"] {
            let cmd = Command::parse(code).unwrap().unwrap();
            assert_eq!(cmd.to_string(), code);
        }
    }
}
