use color_print::cformat;

use crate::parser::{Line, Stmt};
use crate::symbols::Kind;
use crate::Program;

pub fn print_dump(lines: &[Line], program: &Program) {
    let mut pc = 0;
    for line in lines {
        // Print file header for first line
        if line.idx == 0 {
            println!(
                "{}+------[{}]{}",
                "-".repeat(24),
                line.file,
                "-".repeat(45usize.saturating_sub(line.file.len()))
            );
        }

        let comment = line
            .comment()
            .map(|s| cformat!("<dim>//{}</>", s))
            .unwrap_or_default();

        let body = match Stmt::parse(line.code()) {
            Ok(Some(Stmt::Code(code))) => {
                let bin = program
                    .words
                    .get(pc)
                    .map(|w| w.to_string())
                    .unwrap_or_else(|| cformat!("<r,s>!!!!!!!!!!!!!!!!</>"));
                let body = format!(
                    "[{:04X}] {} | {:>4}:   {} {}",
                    pc,
                    bin,
                    line.no(),
                    code.cformat(),
                    comment
                );
                pc += 1;
                body
            }
            Ok(Some(Stmt::Label(label))) => {
                let addr = program.symbols.get(&label).unwrap_or_default();
                let label = cformat!("<g>({})</> = {:04X}", label, addr);
                format!("{:24}| {:>4}: {} {}", "", line.no(), label, comment)
            }
            Ok(None) | Err(_) => format!("{:24}| {:>4}: {}", "", line.no(), comment),
        };
        println!("{}", body);
    }
    println!("{}+{}", "-".repeat(24), "-".repeat(55));

    for (name, kind, addr) in program.symbols.iter() {
        let name = match kind {
            Kind::Predefined => continue,
            Kind::Label => cformat!("<g>{}</>", name),
            Kind::Variable => cformat!("<c>{}</>", name),
        };
        println!("  {:04X} {}", addr, name);
    }
}
