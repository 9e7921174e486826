//! Yolo Repricing CLI
//!
//! Classifies transactions by their compatibility with the YOLO
//! gas-repricing experiments and reports the aggregate gas impact.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use yolo_repricing::commands::{execute_analyze, validate_args, AnalyzeArgs};
use yolo_repricing::utils::config::{DEFAULT_DATA_DIR, SCHEMA_VERSION};

/// Yolo Repricing - gas-repricing compatibility analysis
#[derive(Parser, Debug)]
#[command(name = "yolo-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze block record files and print the aggregate report
    Analyze {
        /// Directory containing block_* record files
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Disable the lenient step-count rules
        #[arg(long)]
        strict: bool,

        /// Output path for a JSON summary (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a block record file
    Validate {
        /// Path to block JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display input schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            data_dir,
            strict,
            output,
        } => {
            let args = AnalyzeArgs {
                data_dir,
                lenient: !strict,
                output_json: output,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute analysis
            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_block_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a block record file
///
/// **Private** - internal command implementation
fn validate_block_file(file_path: PathBuf) -> Result<()> {
    use anyhow::Context;
    use yolo_repricing::loader::schema::TxRecord;

    println!("Validating block file: {}", file_path.display());

    let bytes = std::fs::read(&file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    let records: Vec<TxRecord> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse {}", file_path.display()))?;

    let main_gas: u64 = records.iter().map(|tx| tx.main().gas_used).sum();
    let yolo_gas: u64 = records.iter().map(|tx| tx.yolo().gas_used).sum();
    let yolo2x_gas: u64 = records.iter().map(|tx| tx.yolo2x().gas_used).sum();
    let main_errors = records.iter().filter(|tx| tx.main().errored).count();

    println!("✓ Valid block file");
    println!("  Transactions: {}", records.len());
    println!("  Main gas: {}", main_gas);
    println!("  Yolo gas: {} / Yolo2x gas: {}", yolo_gas, yolo2x_gas);
    println!("  Mainnet errors: {}", main_errors);

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("Yolo Repricing Block File Schema");
    println!("Current Summary Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Each block_* file is a JSON array of records:");
        println!("  TxNum: number         - Position of tx within its block");
        println!("  TxHash: string        - Transaction hash");
        println!("  MainGasUsed: number   - Gas used under baseline rules");
        println!("  MainSteps: number     - Execution steps under baseline rules");
        println!("  MainError: bool       - Baseline execution failed");
        println!("  YoloGasUsed: number   - Gas used under yolo rules");
        println!("  YoloSteps: number     - Execution steps under yolo rules");
        println!("  YoloError: bool       - Yolo execution failed");
        println!("  Yolo2xGasUsed: number - Gas used under yolo2x rules");
        println!("  Yolo2xSteps: number   - Execution steps under yolo2x rules");
        println!("  Yolo2xError: bool     - Yolo2x execution failed");
        println!();
        println!("Missing fields default to zero values; unknown fields are ignored.");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Yolo Repricing v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Gas-repricing compatibility analysis for recorded transactions.");
}
