use std::path::PathBuf;

use clap::Parser;

use crate::{output::output_path, Error};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// YAML file to convert, written to ./temp/<inputfile>.json
    #[clap(long)]
    pub inputfile: Option<String>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Do not report the converted file on success
    #[clap(short, long)]
    pub quiet: bool,
}

/// Validated settings for a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: String,
    pub output: PathBuf,
    pub verbosity: u8,
    pub quiet: bool,
}

impl Config {
    pub fn new(input: impl Into<String>) -> Self {
        let input = input.into();
        let output = output_path(&input);
        Config {
            input,
            output,
            verbosity: 0,
            quiet: false,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = Error;

    fn try_from(args: Args) -> Result<Self, Error> {
        let input = args
            .inputfile
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingArgument("inputfile"))?;
        Ok(Config {
            verbosity: args.verbose,
            quiet: args.quiet,
            ..Config::new(input)
        })
    }
}
