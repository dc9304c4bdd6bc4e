/// Hack ALU. `ctrl` holds the control bits `zx nx zy ny f no`, most
/// significant first. `x` is D, `y` is A or M.
pub fn alu(ctrl: u8, x: u16, y: u16) -> u16 {
    macro_rules! flag {
        ($n:expr) => {
            ctrl >> (5 - $n) & 1 == 1
        };
    }
    let x = if flag!(0) { 0 } else { x };
    let x = if flag!(1) { !x } else { x };
    let y = if flag!(2) { 0 } else { y };
    let y = if flag!(3) { !y } else { y };
    let out = if flag!(4) { x.wrapping_add(y) } else { x & y };
    if flag!(5) {
        !out
    } else {
        out
    }
}

/// Jump condition `j1 j2 j3` = taken on `< 0`, `== 0`, `> 0`.
pub fn jump(cond: u8, out: u16) -> bool {
    let out = out as i16;
    (cond & 0b100 != 0 && out < 0)
        || (cond & 0b010 != 0 && out == 0)
        || (cond & 0b001 != 0 && out > 0)
}
