mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "steelsheet",
    version,
    about = "Normalize supplier steel price-list spreadsheets into one canonical record schema"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract canonical price records from one or more workbooks
    Extract {
        /// Paths to .xls/.xlsx price-list files
        input_files: Vec<PathBuf>,

        /// Manufacturer applied to every record instead of auto-detection
        #[arg(short, long)]
        manufacturer: Option<String>,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write output to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Show detected metadata and matched layout for a workbook without exporting
    Inspect {
        /// Path to .xls/.xlsx price-list file
        input_file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_files,
            manufacturer,
            output,
            out,
        } => commands::extract::run(&input_files, manufacturer.as_deref(), &output, out),
        Commands::Inspect { input_file } => commands::inspect::run(&input_file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
