#![deny(missing_docs)]

//! # Routegen CLI
//!
//! Generates the consolidated routes table from the method registry, the path
//! specification and the extras overlay.
//!
//! Run without arguments from the project root; every path has a default and
//! can be overridden by flag, environment variable or `.env` entry.

use clap::Parser;
use routegen_core::AppResult;

mod generate;
mod logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Routes table generator")]
struct Cli {
    #[clap(flatten)]
    generate: generate::GenerateArgs,

    /// Enable debug logging (ignored when RUST_LOG is set).
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> AppResult<()> {
    // `.env` is optional; values already in the environment win.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    generate::execute(&cli.generate)
}
