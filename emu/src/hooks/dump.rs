use arch::reg::Reg;
use arch::Inst;
use hemu::{Error, State};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Hook;

/// Print machine state after the instructions named in a YAML config:
///
/// ```yaml
/// 12: { stack: true, ram: [16, 17] }
/// ```
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    list: List,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct List(HashMap<u16, Config>);

impl List {
    fn parse(name: &str, text: &str) -> Result<Self, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::DumpConfig(name.to_string(), e))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    stack: bool,
    #[serde(default)]
    ram: Vec<u16>,
}

impl Dump {
    pub fn arg(file: Option<String>, all: bool) -> Result<Self, Error> {
        let list = match &file {
            Some(fname) => {
                let text = std::fs::read_to_string(fname)
                    .map_err(|e| Error::FileOpen(fname.clone(), e))?;
                List::parse(fname, &text)?
            }
            None => List::default(),
        };
        Ok(Self { file, all, list })
    }

    fn get(&self, pc: u16) -> Option<&Config> {
        self.list.0.get(&pc)
    }
}

impl Hook for Dump {
    fn init(&mut self, state: State) -> State {
        if self.all {
            println!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
        state
    }

    fn exec(&mut self, _time: u64, addr: u16, _inst: Inst, cpu: State) -> State {
        if let Some(cfg) = self.get(addr) {
            self.print_reg(&cpu);
            if cfg.stack {
                self.print_stack(&cpu);
            }
            self.print_ram(&cpu, &cfg.ram);
        } else if self.all {
            self.print_reg(&cpu);
        }
        cpu
    }
}

impl Dump {
    fn print_reg(&self, cpu: &State) {
        println!(" +-----------+-----------+-----------+-----------+");
        println!(
            " |  pc: {:0>4X} |   a: {:0>4X} |   d: {:0>4X} |  sp: {:0>4X} |",
            cpu.pc,
            cpu.a,
            cpu.d,
            cpu.get(Reg::SP),
        );
        println!(
            " | lcl: {:0>4X} | arg: {:0>4X} | this: {:0>4X}| that: {:0>4X}|",
            cpu.get(Reg::LCL),
            cpu.get(Reg::ARG),
            cpu.get(Reg::THIS),
            cpu.get(Reg::THAT),
        );
        println!(" +-----------+-----------+-----------+-----------+");
    }

    fn print_stack(&self, cpu: &State) {
        let base = arch::reg::STACK_BASE;
        for (offset, val) in cpu.stack().iter().enumerate() {
            println!(
                " | {:0>4X} : {:0>4X} ({:>6})                          |",
                base + offset as u16,
                val,
                *val as i16
            );
        }
        println!(" +-----------------------------------------------+");
    }

    fn print_ram(&self, cpu: &State, addrs: &[u16]) {
        for addr in addrs {
            println!(
                " | {:0>4X} : {:0>4X} ({:>6})                          |",
                addr,
                cpu.get(*addr),
                cpu.get(*addr) as i16
            );
        }
        if !addrs.is_empty() {
            println!(" +-----------------------------------------------+");
        }
    }
}
