use num_enum::IntoPrimitive;
use strum::Display;

/// RAM cells with a fixed role in the stack machine calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoPrimitive)]
#[repr(u16)]
pub enum Reg {
    SP = 0,
    LCL = 1,
    ARG = 2,
    THIS = 3,
    THAT = 4,
    R13 = 13,
    R14 = 14,
    R15 = 15,
}

/// `temp 0` .. `temp 7` live at R5 .. R12.
pub const TEMP_BASE: u16 = 5;
pub const TEMP_SIZE: u16 = 8;

pub const VAR_BASE: u16 = 16;
pub const STACK_BASE: u16 = 256;

pub const SCREEN: u16 = 0x4000;
pub const KBD: u16 = 0x6000;

#[test]
fn test() {
    assert_eq!(Reg::LCL.to_string(), "LCL");
    assert_eq!(u16::from(Reg::THAT), 4);
    assert_eq!(u16::from(Reg::R13), 13);
}
