//! degreecalc CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use degreecalc_core::{Scheme, UgPolicy};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "degreecalc", version, about = "UK degree classification calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a module document and print the classification
    Evaluate {
        /// Path to the JSON module document
        #[arg(long)]
        input: PathBuf,

        /// Degree scheme: ug, im, masters
        #[arg(long)]
        scheme: Option<Scheme>,

        /// Undergraduate policy: before_2023, on_or_after_2023
        #[arg(long)]
        ug_policy: Option<UgPolicy>,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Also write the evaluation as JSON to this file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a module document for duplicates and credit problems
    Validate {
        /// Path to the JSON module document
        #[arg(long)]
        input: PathBuf,

        /// Degree scheme to check against (default: the document's)
        #[arg(long)]
        scheme: Option<Scheme>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a sample module document
    Init {
        /// Scheme of the sample
        #[arg(long, default_value = "ug")]
        scheme: Scheme,

        /// Output file
        #[arg(long, default_value = "degree.json")]
        output: PathBuf,
    },

    /// Print the module document format
    Schema,

    /// Normalize a module document and write it out
    Export {
        /// Path to the JSON module document
        #[arg(long)]
        input: PathBuf,

        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Re-target the document to this scheme
        #[arg(long)]
        scheme: Option<Scheme>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("degreecalc=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            input,
            scheme,
            ug_policy,
            format,
            save,
            config,
        } => commands::evaluate::execute(input, scheme, ug_policy, format, save, config),
        Commands::Validate {
            input,
            scheme,
            config,
        } => commands::validate::execute(input, scheme, config),
        Commands::Init { scheme, output } => commands::init::execute(scheme, output),
        Commands::Schema => commands::schema::execute(),
        Commands::Export {
            input,
            output,
            scheme,
        } => commands::export::execute(input, output, scheme),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
