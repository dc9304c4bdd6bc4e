use arch::reg::{Reg, STACK_BASE, TEMP_BASE};
use hasm::Line;

use crate::command::{ArithOp, Command, Segment};
use crate::error::LineError;

/// Translator state for one program build.
///
/// Every unit fed to the same `CodeGen` shares the branch and return
/// counters, so generated labels stay unique across the linked program.
#[derive(Debug, Default)]
pub struct CodeGen {
    output: Vec<String>,
    branch_id: usize,
    return_id: usize,
    unit: String,
}

impl CodeGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a single unit, optionally with the bootstrap prologue.
    pub fn generate(
        unit: &str,
        lines: &[Line],
        entry: Option<&str>,
    ) -> Result<Vec<String>, LineError> {
        let mut codegen = CodeGen::new();
        if let Some(entry) = entry {
            codegen.bootstrap(entry);
        }
        codegen.translate(unit, lines)?;
        Ok(codegen.finish())
    }

    /// Set SP to the stack base and call `entry` with no arguments.
    pub fn bootstrap(&mut self, entry: &str) {
        self.emit("// bootstrap");
        self.emit(format!("@{}", STACK_BASE));
        self.emit("D=A");
        self.emit(format!("@{}", Reg::SP));
        self.emit("M=D");
        self.gen(&Command::Call(entry.to_string(), 0));
    }

    /// Append the translation of `lines`. Statics are named `<unit>.<index>`.
    ///
    /// Stops at the first line that does not decode; nothing from this unit
    /// is kept in that case.
    pub fn translate(&mut self, unit: &str, lines: &[Line]) -> Result<(), LineError> {
        let start = self.output.len();
        self.unit = unit.to_string();
        for line in lines {
            match Command::parse(line.code()) {
                Ok(Some(command)) => self.gen(&command),
                Ok(None) => {}
                Err(error) => {
                    self.output.truncate(start);
                    return Err(LineError::new(line, error));
                }
            }
        }
        Ok(())
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn finish(self) -> Vec<String> {
        self.output
    }

    fn emit(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    fn gen(&mut self, command: &Command) {
        self.emit(format!("// {}", command));
        match command {
            Command::Arith(op) => self.gen_arith(*op),
            Command::Push(seg, idx) => self.gen_push(*seg, *idx),
            Command::Pop(seg, idx) => self.gen_pop(*seg, *idx),
            Command::Label(label) => self.emit(format!("({})", label)),
            Command::Goto(label) => {
                self.emit(format!("@{}", label));
                self.emit("0;JMP");
            }
            Command::IfGoto(label) => {
                // Only the all-ones `true` (sign bit set) branches.
                self.pop_d();
                self.emit(format!("@{}", label));
                self.emit("D;JLT");
            }
            Command::Function(name, locals) => self.gen_function(name, *locals),
            Command::Call(name, args) => self.gen_call(name, *args),
            Command::Return => self.gen_return(),
        }
    }
}

// ----------------------------------------------------------------------------
// Stack primitives

impl CodeGen {
    /// *SP = D; SP++
    fn push_d(&mut self) {
        self.emit(format!("@{}", Reg::SP));
        self.emit("A=M");
        self.emit("M=D");
        self.emit(format!("@{}", Reg::SP));
        self.emit("M=M+1");
    }

    /// SP--; D = *SP
    fn pop_d(&mut self) {
        self.emit(format!("@{}", Reg::SP));
        self.emit("AM=M-1");
        self.emit("D=M");
    }
}

// ----------------------------------------------------------------------------
// Memory access

impl CodeGen {
    fn gen_push(&mut self, seg: Segment, idx: u16) {
        match seg {
            Segment::Constant => {
                self.emit(format!("@{}", idx));
                self.emit("D=A");
            }
            Segment::Local | Segment::Argument | Segment::This | Segment::That => {
                self.emit(format!("@{}", idx));
                self.emit("D=A");
                self.emit(format!("@{}", base(seg)));
                self.emit("A=D+M");
                self.emit("D=M");
            }
            Segment::Temp | Segment::Pointer | Segment::Static => {
                self.emit(format!("@{}", self.direct(seg, idx)));
                self.emit("D=M");
            }
        }
        self.push_d();
    }

    fn gen_pop(&mut self, seg: Segment, idx: u16) {
        match seg {
            // Rejected when the command is decoded.
            Segment::Constant => unreachable!("pop constant"),
            Segment::Local | Segment::Argument | Segment::This | Segment::That => {
                self.emit(format!("@{}", idx));
                self.emit("D=A");
                self.emit(format!("@{}", base(seg)));
                self.emit("D=D+M");
                self.emit(format!("@{}", Reg::R13));
                self.emit("M=D");
                self.pop_d();
                self.emit(format!("@{}", Reg::R13));
                self.emit("A=M");
                self.emit("M=D");
            }
            Segment::Temp | Segment::Pointer | Segment::Static => {
                self.pop_d();
                self.emit(format!("@{}", self.direct(seg, idx)));
                self.emit("M=D");
            }
        }
    }

    /// Symbol of a directly addressed segment cell.
    fn direct(&self, seg: Segment, idx: u16) -> String {
        match seg {
            Segment::Pointer if idx == 0 => Reg::THIS.to_string(),
            Segment::Pointer => Reg::THAT.to_string(),
            Segment::Static => format!("{}.{}", self.unit, idx),
            _ => format!("{}", TEMP_BASE + idx),
        }
    }
}

/// Pointer cell holding the base of an indirectly addressed segment.
fn base(seg: Segment) -> Reg {
    match seg {
        Segment::Local => Reg::LCL,
        Segment::Argument => Reg::ARG,
        Segment::This => Reg::THIS,
        _ => Reg::THAT,
    }
}

// ----------------------------------------------------------------------------
// Arithmetic

impl CodeGen {
    fn gen_arith(&mut self, op: ArithOp) {
        match op {
            ArithOp::Add => self.binary("M=D+M"),
            ArithOp::Sub => self.binary("M=M-D"),
            ArithOp::And => self.binary("M=D&M"),
            ArithOp::Or => self.binary("M=D|M"),
            ArithOp::Neg => self.unary("M=-M"),
            ArithOp::Not => self.unary("M=!M"),
            ArithOp::Eq => self.compare(op, "JNE"),
            ArithOp::Lt => self.compare(op, "JGE"),
            ArithOp::Gt => self.compare(op, "JLE"),
        }
    }

    /// D = y, A = &x
    fn pop_y_to_x(&mut self) {
        self.pop_d();
        self.emit("A=A-1");
    }

    fn binary(&mut self, comp: &str) {
        self.pop_y_to_x();
        self.emit(comp);
    }

    fn unary(&mut self, comp: &str) {
        self.emit(format!("@{}", Reg::SP));
        self.emit("A=M-1");
        self.emit(comp);
    }

    /// x op y as -1 / 0. `skip` is the jump taken on `x - y` when the
    /// comparison is false.
    fn compare(&mut self, op: ArithOp, skip: &str) {
        let op = op.to_string().to_uppercase();
        let id = self.branch_id;
        self.branch_id += 1;
        let not = format!("NOT_{}_{}", op, id);
        let end = format!("END_{}_{}", op, id);

        self.pop_y_to_x();
        self.emit("D=M-D");
        self.emit(format!("@{}", not));
        self.emit(format!("D;{}", skip));
        self.unary("M=-1");
        self.emit(format!("@{}", end));
        self.emit("0;JMP");
        self.emit(format!("({})", not));
        self.unary("M=0");
        self.emit(format!("({})", end));
    }
}

// ----------------------------------------------------------------------------
// Functions

impl CodeGen {
    fn gen_function(&mut self, name: &str, locals: u16) {
        self.emit(format!("({})", name));
        self.emit(format!("@{}", Reg::SP));
        self.emit("D=M");
        self.emit(format!("@{}", Reg::LCL));
        self.emit("M=D");
        if locals > 0 {
            self.emit("D=0");
            for _ in 0..locals {
                self.push_d();
            }
        }
    }

    fn gen_call(&mut self, name: &str, args: u16) {
        let ret = format!("{}$ret.{}", name, self.return_id);
        self.return_id += 1;

        self.emit(format!("@{}", ret));
        self.emit("D=A");
        self.push_d();
        for reg in [Reg::LCL, Reg::ARG, Reg::THIS, Reg::THAT] {
            self.emit(format!("@{}", reg));
            self.emit("D=M");
            self.push_d();
        }

        // ARG = SP - 5 - args
        self.emit(format!("@{}", Reg::SP));
        self.emit("D=M");
        self.emit(format!("@{}", 5 + args as u32));
        self.emit("D=D-A");
        self.emit(format!("@{}", Reg::ARG));
        self.emit("M=D");

        // LCL = SP
        self.emit(format!("@{}", Reg::SP));
        self.emit("D=M");
        self.emit(format!("@{}", Reg::LCL));
        self.emit("M=D");

        self.emit(format!("@{}", name));
        self.emit("0;JMP");
        self.emit(format!("({})", ret));
    }

    fn gen_return(&mut self) {
        // R13 = FRAME = LCL
        self.emit(format!("@{}", Reg::LCL));
        self.emit("D=M");
        self.emit(format!("@{}", Reg::R13));
        self.emit("M=D");

        // R14 = *(FRAME - 5)
        self.emit("@5");
        self.emit("A=D-A");
        self.emit("D=M");
        self.emit(format!("@{}", Reg::R14));
        self.emit("M=D");

        // *ARG = pop; SP = ARG + 1
        self.pop_d();
        self.emit(format!("@{}", Reg::ARG));
        self.emit("A=M");
        self.emit("M=D");
        self.emit(format!("@{}", Reg::ARG));
        self.emit("D=M+1");
        self.emit(format!("@{}", Reg::SP));
        self.emit("M=D");

        for reg in [Reg::THAT, Reg::THIS, Reg::ARG, Reg::LCL] {
            self.emit(format!("@{}", Reg::R13));
            self.emit("AM=M-1");
            self.emit("D=M");
            self.emit(format!("@{}", reg));
            self.emit("M=D");
        }

        self.emit(format!("@{}", Reg::R14));
        self.emit("A=M");
        self.emit("0;JMP");
    }
}
