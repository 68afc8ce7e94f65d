use anyhow::{Context, Result};
use benchfile_parser::error::format_error;
use benchfile_parser::{parse, Program};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Input .bench file to read
    #[arg(default_value = "test.bench")]
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn dump(args: DumpArgs) -> Result<()> {
    let filename = args.input.display().to_string();
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Unable to open file {}", filename))?;

    let program = match parse(&source) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}", format_error(&source, &filename, &err));
            eprintln!("{} {} does not parse", "✗".red(), filename);
            std::process::exit(1);
        }
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&program)?),
        "text" => print_program(&program),
        other => return Err(anyhow::anyhow!("Invalid format: {}. Use: text or json", other)),
    }

    Ok(())
}

/// Print a program in the annotated fixed-width layout, one command
/// per line, with unset globals called out as such
fn print_program(program: &Program) {
    match program.structure {
        Some(kind) => println!("struct... {}", kind),
        None => println!("struct... (unset)"),
    }

    let implementations: Vec<String> = program
        .implementations
        .iter()
        .map(|flag| flag.to_string())
        .collect();
    println!("implem... {}", implementations.join(" "));

    match program.element_type {
        Some(element_type) => println!("type..... {}", element_type),
        None => println!("type..... (unset)"),
    }
    if let Some(key_type) = program.key_type {
        println!("key...... {}", key_type);
    }

    println!("init :");
    for command in &program.init_commands {
        println!("\t{}", command);
    }
    println!("bench :");
    for command in &program.bench_commands {
        println!("\t{}", command);
    }
}
