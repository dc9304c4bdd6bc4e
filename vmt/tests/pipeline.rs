use arch::reg::Reg;
use arch::HACK;
use hasm::{Line, Program};
use hemu::State;
use hvmt::CodeGen;

const TMAX: u64 = 100_000;

fn build(units: &[(&str, &str)], entry: Option<&str>) -> Program {
    let mut codegen = CodeGen::new();
    if let Some(entry) = entry {
        codegen.bootstrap(entry);
    }
    for (unit, src) in units {
        let lines = Line::read(&format!("{}.vm", unit), src);
        codegen.translate(unit, &lines).unwrap();
    }
    let asm = codegen.finish().join("\n");
    hasm::assemble(&Line::read("out.asm", &asm), &HACK).unwrap()
}

/// Caller frame as it would look mid-program.
fn machine(program: &Program) -> State {
    let mut state = State::new();
    state.load_hack(&program.to_text(), &HACK).unwrap();
    state.set(Reg::SP, 256);
    state.set(Reg::LCL, 300);
    state.set(Reg::ARG, 400);
    state.set(Reg::THIS, 3000);
    state.set(Reg::THAT, 4000);
    state
}

fn run(src: &str) -> State {
    let mut state = machine(&build(&[("Test", src)], None));
    state.run(TMAX);
    assert!(state.is_terminated());
    state
}

fn stack(src: &str) -> Vec<i16> {
    run(src).stack().iter().map(|v| *v as i16).collect()
}

#[test]
fn seven_plus_eight() {
    let state = run("push constant 7\npush constant 8\nadd");
    assert_eq!(state.get(Reg::SP), 257);
    assert_eq!(state.get(256u16), 15);
}

macro_rules! case {
    ($($name:ident: $src:expr => $expect:expr,)*) => {
        $(
            #[test]
            fn $name() {
                assert_eq!(stack($src), $expect);
            }
        )*
    };
}

case! {
    sub_order: "push constant 10\npush constant 3\nsub" => vec![7],
    sub_negative: "push constant 0\npush constant 1\nsub" => vec![-1],
    neg: "push constant 5\nneg" => vec![-5],
    and: "push constant 12\npush constant 10\nand" => vec![8],
    or: "push constant 12\npush constant 10\nor" => vec![14],
    not: "push constant 0\nnot" => vec![-1],
    eq_true: "push constant 5\npush constant 5\neq" => vec![-1],
    eq_false: "push constant 5\npush constant 6\neq" => vec![0],
    lt_true: "push constant 3\npush constant 5\nlt" => vec![-1],
    lt_false: "push constant 5\npush constant 3\nlt" => vec![0],
    lt_equal: "push constant 4\npush constant 4\nlt" => vec![0],
    lt_negative: "push constant 0\npush constant 1\nsub\npush constant 0\nlt" => vec![-1],
    gt_true: "push constant 5\npush constant 3\ngt" => vec![-1],
    gt_false: "push constant 3\npush constant 5\ngt" => vec![0],
    gt_equal: "push constant 4\npush constant 4\ngt" => vec![0],
    many_comparisons: "push constant 1\npush constant 1\neq\npush constant 1\npush constant 2\neq\npush constant 2\npush constant 1\ngt" => vec![-1, 0, -1],
}

const BRANCH: &str = "
if-goto T
push constant 10
goto E
label T
push constant 20
label E
";

case! {
    if_goto_true: &format!("push constant 0\nnot{}", BRANCH) => vec![20],
    if_goto_comparison: &format!("push constant 2\npush constant 2\neq{}", BRANCH) => vec![20],
    if_goto_false: &format!("push constant 0{}", BRANCH) => vec![10],
    // Only the all-ones encoding counts as true.
    if_goto_one_not_taken: &format!("push constant 1{}", BRANCH) => vec![10],
}

#[test]
fn loop_counts_down() {
    let src = "
push constant 0
pop local 0
push constant 4
pop local 1
label LOOP
push local 0
push local 1
add
pop local 0
push local 1
push constant 1
sub
pop local 1
push local 1
push constant 0
gt
if-goto LOOP
push local 0
";
    // 4 + 3 + 2 + 1
    assert_eq!(stack(src), vec![10]);
}

#[test]
fn segments() {
    let src = "
push constant 5000
pop pointer 1
push constant 9
pop that 2
push constant 4
pop temp 6
push constant 21
pop this 1
push constant 33
pop argument 0
push constant 44
pop local 3
";
    let state = run(src);
    assert_eq!(state.get(Reg::THAT), 5000);
    assert_eq!(state.get(5002u16), 9);
    assert_eq!(state.get(11u16), 4);
    assert_eq!(state.get(3001u16), 21);
    assert_eq!(state.get(400u16), 33);
    assert_eq!(state.get(303u16), 44);
    assert_eq!(state.get(Reg::SP), 256);

    let src = "push constant 8\npop temp 0\npush temp 0\npush pointer 0\npush that 0";
    let mut state = machine(&build(&[("Test", src)], None));
    state.set(4000u16, 77);
    state.run(TMAX);
    assert_eq!(state.stack(), [8, 3000, 77]);
}

macro_rules! balance {
    ($($name:ident: $cmd:expr => $delta:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let prelude = "push constant 1\npush constant 2\n";
                let before = run(prelude).get(Reg::SP) as i32;
                let after = run(&format!("{}{}", prelude, $cmd)).get(Reg::SP) as i32;
                assert_eq!(after - before, $delta);
            }
        )*
    };
}

balance! {
    balance_push_constant: "push constant 3" => 1,
    balance_push_local: "push local 0" => 1,
    balance_push_static: "push static 2" => 1,
    balance_push_temp: "push temp 1" => 1,
    balance_pop_argument: "pop argument 1" => -1,
    balance_pop_that: "pop that 0" => -1,
    balance_pop_pointer: "pop pointer 0" => -1,
    balance_pop_static: "pop static 0" => -1,
    balance_add: "add" => -1,
    balance_sub: "sub" => -1,
    balance_and: "and" => -1,
    balance_or: "or" => -1,
    balance_eq: "eq" => -1,
    balance_lt: "lt" => -1,
    balance_gt: "gt" => -1,
    balance_neg: "neg" => 0,
    balance_not: "not" => 0,
}

#[test]
fn call_return_restores_frame() {
    let src = "
push constant 3
push constant 4
call Math.add 2
goto DONE
function Math.add 1
push argument 0
push argument 1
add
pop local 0
push constant 1000
pop pointer 0
push local 0
return
label DONE
";
    let state = run(src);
    assert_eq!(state.get(Reg::SP), 257);
    assert_eq!(state.get(256u16), 7);
    assert_eq!(state.get(Reg::LCL), 300);
    assert_eq!(state.get(Reg::ARG), 400);
    assert_eq!(state.get(Reg::THIS), 3000);
    assert_eq!(state.get(Reg::THAT), 4000);
}

#[test]
fn call_without_arguments() {
    let src = "
call Main.five 0
goto END
function Main.five 0
push constant 5
return
label END
";
    let state = run(src);
    assert_eq!(state.get(Reg::SP), 257);
    assert_eq!(state.get(256u16), 5);
    assert_eq!(state.get(Reg::LCL), 300);
    assert_eq!(state.get(Reg::ARG), 400);
}

#[test]
fn recursion() {
    let src = "
push constant 5
call Sum.sum 1
goto END
function Sum.sum 0
push argument 0
push constant 0
eq
if-goto BASE
push argument 0
push argument 0
push constant 1
sub
call Sum.sum 1
add
return
label BASE
push constant 0
return
label END
";
    assert_eq!(stack(src), vec![15]);
}

#[test]
fn statics_namespaced_per_unit() {
    let a = "push constant 11\npop static 0";
    let b = "push constant 22\npop static 0\npush static 0\npush constant 1\nadd\npop static 1";
    let program = build(&[("A", a), ("B", b)], None);
    assert_eq!(program.symbols.get("A.0"), Some(16));
    assert_eq!(program.symbols.get("B.0"), Some(17));
    assert_eq!(program.symbols.get("B.1"), Some(18));

    let mut state = machine(&program);
    state.run(TMAX);
    assert_eq!(state.get(16u16), 11);
    assert_eq!(state.get(17u16), 22);
    assert_eq!(state.get(18u16), 23);
}

#[test]
fn bootstrap_enters_sys_init() {
    let sys = "
function Sys.init 0
push constant 42
pop static 0
label HALT
goto HALT
";
    let program = build(&[("Sys", sys)], Some("Sys.init"));
    let mut state = State::new();
    state.load_hack(&program.to_text(), &HACK).unwrap();
    assert_eq!(state.run(1000), 1000);

    assert_eq!(state.get(16u16), 42);
    // return address and four saved pointers
    assert_eq!(state.get(Reg::SP), 261);
    assert_eq!(state.get(Reg::ARG), 256);
    assert_eq!(state.get(Reg::LCL), 261);
}

#[test]
fn binary_is_deterministic() {
    let units = [
        ("Main", "function Main.main 2\npush constant 1\npush constant 2\nlt\nif-goto A\ncall Main.main 0\nlabel A\npush static 0\nreturn"),
        ("Util", "function Util.f 0\npush static 3\npush static 1\neq\nreturn"),
    ];
    let first = build(&units, Some("Sys.init")).to_text();
    for _ in 0..8 {
        assert_eq!(build(&units, Some("Sys.init")).to_text(), first);
    }
}
