use anyhow::{Context, Result};
use benchfile_parser::error::format_error;
use benchfile_parser::parse;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Input .bench file to validate
    #[arg(default_value = "test.bench")]
    pub input: PathBuf,
}

pub fn check(args: CheckArgs) -> Result<()> {
    let filename = args.input.display().to_string();
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Unable to open file {}", filename))?;

    match parse(&source) {
        Ok(program) => {
            println!(
                "{} {} ({} init commands, {} bench commands)",
                "✓".green(),
                filename,
                program.init_commands.len(),
                program.bench_commands.len()
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", format_error(&source, &filename, &err));
            eprintln!("{} {} does not parse", "✗".red(), filename);
            std::process::exit(1);
        }
    }
}
