use arch::{Isa, HACK};
use clap::ValueEnum;
use color_print::cprintln;
use hasm::{Error, Line};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// One bit string per word
    Text,
    /// Little-endian binary words
    Bin,
}

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files, assembled as one program
    #[clap(default_value = "main.asm")]
    input: Vec<String>,

    /// Output file [default: first input with `.hack` or `.bin` extension]
    #[clap(short, long)]
    output: Option<String>,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Instruction-format descriptor (YAML) [default: built-in Hack]
    #[clap(long)]
    isa: Option<String>,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;

    let args = Args::parse();
    println!("Hack Assembler");

    if let Err(err) = run(&args) {
        err.print();
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    use std::io::BufRead;

    let isa = match &args.isa {
        Some(path) => Isa::load(path)?,
        None => HACK.clone(),
    };

    println!("1. Read Files");
    let mut lines = vec![];
    for path in &args.input {
        println!("  < {}", path);
        let file =
            std::fs::File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        for (idx, raw) in std::io::BufReader::new(file).lines().enumerate() {
            let raw = raw.map_err(Error::FileRead)?;
            lines.push(Line::new(path, idx, &raw));
        }
    }

    println!("2. Resolve Symbols & Encode [{}]", isa.name);
    let program = match hasm::assemble(&lines, &isa) {
        Ok(program) => program,
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
    };
    println!("  - {} words", program.words.len());

    let output = args.output.clone().unwrap_or_else(|| {
        let stem = args.input[0]
            .strip_suffix(".asm")
            .unwrap_or(&args.input[0]);
        match args.format {
            Format::Text => format!("{}.hack", stem),
            Format::Bin => format!("{}.bin", stem),
        }
    });

    println!("3. Write Binary");
    println!("  > {}", output);
    let bytes = match args.format {
        Format::Text => program.to_text().into_bytes(),
        Format::Bin => program.to_bytes(isa.word_size),
    };
    std::fs::write(&output, bytes).map_err(|e| Error::FileWrite(output.clone(), e))?;

    if args.dump {
        hasm::util::print_dump(&lines, &program);
    }
    Ok(())
}
