use std::path::Path;

use arch::HACK;
use color_print::cprintln;
use hasm::Line;
use hvmt::source::{default_output, generated_name, sources};
use hvmt::{CodeGen, Error};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// `.vm` files or directories of them, linked into one program
    #[clap(required = true)]
    input: Vec<String>,

    /// Output file [default: `<input>.asm`, or `<input>.hack` with --assemble]
    #[clap(short, long)]
    output: Option<String>,

    /// Emit the bootstrap prologue (SP = 256, call the entry function)
    #[clap(short, long)]
    bootstrap: bool,

    /// Entry function called by the bootstrap prologue
    #[clap(long, default_value = "Sys.init")]
    entry: String,

    /// Assemble the result and write `.hack` instead of `.asm`
    #[clap(short, long)]
    assemble: bool,
}

fn main() {
    use clap::Parser;

    let args = Args::parse();
    println!("Hack VM Translator");

    if let Err(err) = run(&args) {
        err.print();
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    println!("1. Read Files");
    let mut units = vec![];
    for input in &args.input {
        for path in sources(Path::new(input))? {
            let name = path.display().to_string();
            println!("  < {}", name);
            let text = std::fs::read_to_string(&path)
                .map_err(|e| Error::FileRead(name.clone(), e))?;
            let unit = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            units.push((unit, Line::read(&name, &text)));
        }
    }

    println!("2. Translate");
    let mut codegen = CodeGen::new();
    if args.bootstrap {
        println!("  - bootstrap: call {}", args.entry);
        codegen.bootstrap(&args.entry);
    }
    for (unit, lines) in &units {
        if let Err(err) = codegen.translate(unit, lines) {
            err.print_diag();
            std::process::exit(1);
        }
    }
    let asm = codegen.finish();

    let output = args.output.clone().unwrap_or_else(|| {
        let ext = if args.assemble { "hack" } else { "asm" };
        default_output(Path::new(&args.input[0]), ext)
    });

    let text = if args.assemble {
        println!("3. Assemble");
        let generated = generated_name(&output);
        let lines: Vec<Line> = asm
            .iter()
            .enumerate()
            .map(|(idx, raw)| Line::new(&generated, idx, raw))
            .collect();
        match hasm::assemble(&lines, &HACK) {
            Ok(program) => {
                println!("  - {} words", program.words.len());
                program.to_text()
            }
            Err(errors) => {
                for error in &errors {
                    error.print_diag();
                }
                cprintln!(
                    "<red,bold>error</>: {} line(s) failed, no output written",
                    errors.len()
                );
                std::process::exit(1);
            }
        }
    } else {
        let mut text = asm.join("\n");
        text.push('\n');
        text
    };

    println!("{}. Write Output", if args.assemble { 4 } else { 3 });
    println!("  > {}", output);
    std::fs::write(&output, text).map_err(|e| Error::FileWrite(output.clone(), e))?;
    Ok(())
}
