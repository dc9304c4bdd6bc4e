mod hooks;

use clap::Parser;

use hemu::State;
use hooks::{dump::Dump, trace::Trace, Hook};

#[derive(Parser, Debug)]
#[clap(name = "Hack Emulator", version = "v1.0.0", about = "Emulator for the Hack CPU")]
struct Args {
    /// Stop after this many instructions
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    /// YAML file mapping instruction addresses to dumps
    #[arg(short, long)]
    dump_cfg: Option<String>,

    /// Dump registers after every instruction
    #[arg(short = 'a', long)]
    dump_all: bool,

    /// Print every executed instruction
    #[arg(short = 'v', long)]
    trace: bool,

    #[arg(default_value = "main.hack")]
    input_file: String,
}

fn main() {
    let args = Args::parse();
    println!("Hack Emulator");

    println!("+-----------------------------------------------+");
    println!("| {:<45} |", args.input_file);
    println!("+-----------------------------------------------+");

    if let Err(err) = run(args) {
        err.print();
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), hemu::Error> {
    // ------------------------------------------------------------------------
    // Initialize state machine model
    let mut state = {
        let mut cpu = State::new();
        cpu.load_rom_file(&args.input_file)?;
        cpu
    };

    // ------------------------------------------------------------------------
    // Initialize hooks
    println!("[INIT] {} words", state.rom().len());
    let mut hooks: Vec<Box<dyn Hook>> = vec![
        Box::new(Trace::new(args.trace)),
        Box::new(Dump::arg(args.dump_cfg, args.dump_all)?),
    ];
    state = hooks.iter_mut().fold(state, |state, hook| hook.init(state));

    // ------------------------------------------------------------------------
    // Main loop
    let mut steps = 0;
    for time in 0..args.tmax.unwrap_or(u64::MAX) {
        // Execute instruction
        let Some((addr, inst)) = state.exec() else {
            break;
        };
        steps = time + 1;
        // Execute side effects
        state = hooks
            .iter_mut()
            .fold(state, |state, hook| hook.exec(time, addr, inst, state));
    }

    // Exit
    println!("=================================================");
    if state.is_terminated() {
        println!("halted after {} steps", steps);
    } else {
        println!("stopped after {} steps at pc {:04X}", steps, state.pc);
    }
    Ok(())
}
