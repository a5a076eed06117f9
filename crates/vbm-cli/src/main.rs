//! vbm: convert and inspect brain model files.

mod commands;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::synapses::Listing;

#[derive(Parser)]
#[command(name = "vbm", version, about = "Convert brain model files between binary and text")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a model file to the opposite representation
    Convert {
        /// Input model file (binary or text, detected from its content)
        input: PathBuf,
        /// Output file (default: converted_binary_<name>.vbm or converted_text_<name>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Format version to write (1 or 2; default: keep the input's)
        #[arg(long = "version", value_name = "N")]
        format_version: Option<u8>,
        /// Reject models with dangling references or duplicate soma ids
        #[arg(long)]
        validate: bool,
        /// Write text without section banners and legends
        #[arg(long)]
        no_banners: bool,
    },
    /// Decode and validate a model file
    Check {
        /// Input model file
        input: PathBuf,
    },
    /// Print record counts for a model file
    Summary {
        /// Input model file
        input: PathBuf,
    },
    /// Print histograms of synapses between two soma types
    Synapses {
        /// Input model file
        input: PathBuf,
        /// Soma type letter on the axonal side
        axonal: char,
        /// Soma type letter on the dendritic side
        dendritic: char,
        /// List somas of this type (one of the two letters above)
        #[arg(long)]
        which: Option<char>,
        /// Smallest synapse count to list
        #[arg(long, default_value_t = 0, requires = "which")]
        min: usize,
        /// Largest synapse count to list
        #[arg(long, default_value_t = usize::MAX, requires = "which")]
        max: usize,
        /// Maximum number of somas to list (0 for no limit)
        #[arg(long, default_value_t = 100, requires = "which")]
        limit: usize,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Convert {
            input,
            output,
            format_version,
            validate,
            no_banners,
        } => {
            let mut options = vbm::ConvertOptions::new();
            options.encode.version = format_version;
            options.validate = validate;
            options.text.banners = !no_banners;
            commands::convert::run(&input, output.as_deref(), &options, &mut stdout).map(|_| ())
        }

        Commands::Check { input } => commands::check::run(&input, &mut stdout).map(|_| ()),

        Commands::Summary { input } => commands::summary::run(&input, &mut stdout),

        Commands::Synapses {
            input,
            axonal,
            dendritic,
            which,
            min,
            max,
            limit,
        } => {
            let listing = which.map(|which| Listing {
                which,
                min,
                max,
                limit,
            });
            commands::synapses::run(&input, axonal, dendritic, listing, &mut stdout)
        }
    }
}
