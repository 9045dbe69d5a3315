//! Enigma command line simulator.
//!
//! Reads a machine description, then converts the messages of the input
//! stream, writing each one in groups of five symbols.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use enigma::{driver, MachineConfig};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "enigma", version)]
#[command(about = "Encrypt and decrypt messages with a simulated rotor cipher machine")]
struct Args {
    /// Machine description (alphabet, slots, pawls, rotor catalog)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Messages to convert; standard input when omitted
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Destination for converted messages; standard output when omitted
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let description = fs::read_to_string(&args.config)
        .with_context(|| format!("could not open {}", args.config.display()))?;
    let machine = MachineConfig::parse(&description)
        .with_context(|| format!("invalid configuration {}", args.config.display()))?
        .into_machine()?;
    info!(config = %args.config.display(), "machine configured");

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    driver::process(machine, input, output)?;
    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("enigma=debug")
        } else {
            EnvFilter::new("enigma=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
