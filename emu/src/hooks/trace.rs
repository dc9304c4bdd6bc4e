use arch::{Inst, HACK};
use hemu::State;

use super::Hook;

/// Print every executed instruction.
pub struct Trace {
    on: bool,
}

impl Trace {
    pub fn new(on: bool) -> Self {
        Self { on }
    }
}

impl Hook for Trace {
    fn init(&mut self, state: State) -> State {
        if self.on {
            println!(" * Trace");
        }
        state
    }

    fn exec(&mut self, time: u64, addr: u16, inst: Inst, state: State) -> State {
        if self.on {
            println!("[{:0>6}] {:04X} {}", time, addr, inst.cformat(&HACK));
        }
        state
    }
}
