//! gradetrend CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gradetrend", version, about = "Course grade trend analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute trends and required rates for each course
    Analyze {
        /// Path to .toml course file or directory
        #[arg(long)]
        courses: PathBuf,

        /// Target grade as LABEL=PERCENT (repeatable, replaces configured targets)
        #[arg(long = "target")]
        targets: Vec<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the JSON report to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate course TOML files
    Validate {
        /// Path to course file or directory
        #[arg(long)]
        courses: PathBuf,
    },

    /// Create starter config and example course file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gradetrend=info,gradetrend_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            courses,
            targets,
            format,
            output,
            config,
        } => commands::analyze::execute(courses, targets, format, output, config),
        Commands::Validate { courses } => commands::validate::execute(courses),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
