//! pccgen - RouterOS PCC load-balance script generator
//!
//! Prompts for WAN links (or reads them from a file) and writes a RouterOS
//! script that can be imported on the router.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pccgen::{run, FileSource, LinkSource, PromptSource};
use pccgen_common::{FileSink, ScriptSink, StdoutSink, DEFAULT_OUTPUT_FILE};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output script path, `-` for stdout
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: String,

    /// Read links from a YAML or JSON file instead of prompting
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let to_stdout = cli.output == "-";

    // Prompts move to stderr when stdout carries the script.
    let mut source: Box<dyn LinkSource> = match &cli.input {
        Some(path) => Box::new(FileSource::new(path)),
        None if to_stdout => Box::new(PromptSource::new(io::stdin().lock(), io::stderr())),
        None => Box::new(PromptSource::new(io::stdin().lock(), io::stdout())),
    };
    let mut sink: Box<dyn ScriptSink> = if to_stdout {
        Box::new(StdoutSink)
    } else {
        Box::new(FileSink::new(&cli.output))
    };

    match run(source.as_mut(), sink.as_mut()) {
        Ok(summary) => {
            if !to_stdout {
                println!();
                println!(
                    "Script generated successfully! Check the file '{}'.",
                    summary.target
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_input_error() => {
            error!(error = %e, "Link collection failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Script write failed");
            eprintln!("Error writing the script: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}
