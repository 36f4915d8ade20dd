//! cxxi CLI tool
//!
//! Generates ABI-facing and wrapper declarations for the native C++
//! classes listed in a library description file.

use clap::{Parser, Subcommand};
use cxxi_cli::commands::{check, generate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cxxi")]
#[command(about = "C++ method binding generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bindings from a library description
    Generate {
        /// Library description (TOML)
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: generate::OutputFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a library description without generating
    Check {
        /// Library description (TOML)
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            format,
            output,
        } => generate::execute(&file, format, output.as_deref()),
        Commands::Check { file } => check::execute(&file),
    }
}
