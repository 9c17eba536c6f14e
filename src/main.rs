use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use yaml_converter::{convert, init_tracing, Args, Config, Error};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e.white());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let config = Config::try_from(args)?;
    let done = convert(&config)?;
    if !config.quiet {
        let verb = if done.replaced { "Replaced" } else { "Converted" };
        eprintln!(
            "{} {:<30}  {}  {}",
            verb.green().bold(),
            done.input.dimmed(),
            "->".white().bold(),
            done.output.display().dimmed()
        );
    }
    Ok(())
}
