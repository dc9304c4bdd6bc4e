use arch::alu::{alu, jump};
use arch::reg::{Reg, STACK_BASE};
use arch::{Bits, Inst, Isa, HACK};

use crate::error::Error;

pub const RAM_SIZE: usize = 0x8000;
pub const ROM_SIZE: usize = 0x8000;

pub struct State {
    rom: Vec<Inst>,
    ram: Vec<u16>,
    pub a: u16,
    pub d: u16,
    pub pc: u16,
}

// Memory access
impl State {
    pub fn get(&self, addr: impl Into<u16>) -> u16 {
        self.ram[addr.into() as usize % RAM_SIZE]
    }

    pub fn set(&mut self, addr: impl Into<u16>, val: u16) {
        self.ram[addr.into() as usize % RAM_SIZE] = val;
    }

    /// Stack contents from the stack base up to SP.
    pub fn stack(&self) -> &[u16] {
        let base = STACK_BASE as usize;
        let sp = (self.get(Reg::SP) as usize).clamp(base, RAM_SIZE);
        &self.ram[base..sp]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        State {
            rom: vec![],
            ram: vec![0; RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
        }
    }

    pub fn rom(&self) -> &[Inst] {
        &self.rom
    }

    /// Load `.hack` text: one bit string per line, blank lines skipped.
    pub fn load_hack(&mut self, text: &str, isa: &Isa) -> Result<(), Error> {
        let mut rom = vec![];
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let word: Bits = line.parse().map_err(|e| Error::Parse(idx + 1, e))?;
            let inst = Inst::decode(word, isa).ok_or(Error::Decode(idx + 1, line.to_string()))?;
            rom.push(inst);
        }
        if rom.len() > ROM_SIZE {
            return Err(Error::RomSize(rom.len()));
        }
        self.rom = rom;
        self.pc = 0;
        Ok(())
    }

    pub fn load_rom_file(&mut self, fname: &str) -> Result<(), Error> {
        let text =
            std::fs::read_to_string(fname).map_err(|e| Error::FileOpen(fname.to_string(), e))?;
        self.load_hack(&text, &HACK)
    }

    /// Halted once the PC runs past the last instruction.
    pub fn is_terminated(&self) -> bool {
        self.pc as usize >= self.rom.len()
    }

    /// Execute one instruction. Returns its address and the instruction.
    pub fn exec(&mut self) -> Option<(u16, Inst)> {
        let pc = self.pc;
        let inst = *self.rom.get(pc as usize)?;
        match inst {
            Inst::Address(value) => {
                self.a = value as u16;
                self.pc += 1;
            }
            Inst::Compute { comp, dest, jump: cond } => {
                let comp = comp.val() as u8;
                let y = if comp & 0b100_0000 != 0 {
                    self.get(self.a)
                } else {
                    self.a
                };
                let out = alu(comp & 0b11_1111, self.d, y);

                // M and the jump target use A from before this instruction.
                let addr = self.a;
                let dest = dest.val();
                if dest & 0b001 != 0 {
                    self.set(addr, out);
                }
                if dest & 0b010 != 0 {
                    self.d = out;
                }
                if dest & 0b100 != 0 {
                    self.a = out;
                }
                self.pc = if jump(cond.val() as u8, out) {
                    addr
                } else {
                    pc + 1
                };
            }
        }
        Some((pc, inst))
    }

    /// Run until halted or `tmax` steps. Returns the number of steps taken.
    pub fn run(&mut self, tmax: u64) -> u64 {
        let mut time = 0;
        while time < tmax && self.exec().is_some() {
            time += 1;
        }
        time
    }
}
