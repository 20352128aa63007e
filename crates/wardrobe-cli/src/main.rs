mod catalog;
mod check;
mod config;
mod dress;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use config::WardrobeToml;
use output::{Output, Verbosity};

#[derive(Parser, Debug)]
#[command(name = "wardrobe")]
#[command(about = "Find every outfit your closet and your rules allow")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print results and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every valid dressing for an inventory
    Dress(dress::DressArgs),

    /// List the garments and colors of a wardrobe definition
    Catalog(catalog::CatalogArgs),

    /// Load and compile a wardrobe definition, reporting problems
    Check(check::CheckArgs),
}

fn run() -> Result<u8> {
    let cli = Cli::parse();

    logging::init_logger(cli.verbose);

    let mut output = Output::new();
    output.set_verbosity(if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::from_occurrences(cli.verbose)
    });

    // Load wardrobe.toml if present
    let config = WardrobeToml::load_from_cwd()?;

    match cli.command {
        Commands::Dress(args) => dress::execute(args, &mut output, config.as_ref()),
        Commands::Catalog(args) => catalog::execute(args, &mut output),
        Commands::Check(args) => check::execute(args, &output),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            // Print the error chain for debugging
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
