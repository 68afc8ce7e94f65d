mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, dump, CheckArgs, DumpArgs};

/// Benchfile CLI - read and inspect benchmark description files
#[derive(Parser, Debug)]
#[command(name = "benchfile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a benchmark description file
    Check(CheckArgs),

    /// Parse a file and print the program it declares
    Dump(DumpArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    let result = match cli.command {
        Command::Check(args) => check(args),
        Command::Dump(args) => dump(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
