//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads block record files from the data directory
//! 2. Classifies every transaction against the rule table
//! 3. Prints Broken diagnostics and the aggregate report
//! 4. Optionally writes a JSON summary artifact

use crate::classifier::{analyze_transactions, AggregateStats};
use crate::loader::load_blocks;
use crate::output::write_summary;
use crate::report::{render_report, AnalysisSummary};
use crate::utils::config::DEFAULT_DATA_DIR;
use anyhow::{Context, Result};
use log::{debug, info};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory containing `block_*` record files
    pub data_dir: PathBuf,

    /// Apply the lenient step-count rules (on by default; `--strict`
    /// turns them off)
    pub lenient: bool,

    /// Optional output path for the JSON summary
    pub output_json: Option<PathBuf>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            lenient: true,
            output_json: None,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Returns the final accumulator so callers (and tests) can inspect the
/// run beyond the printed report.
///
/// # Errors
/// * Loader failures (missing directory, malformed block file)
/// * Diagnostic or summary write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<AggregateStats> {
    let start_time = Instant::now();

    info!("Analyzing block data in: {}", args.data_dir.display());
    if !args.lenient {
        info!("Strict mode: lenient step-count rules disabled");
    }

    // Step 1: Load block files
    info!("Step 1/3: Loading block files...");
    let scan = load_blocks(&args.data_dir).context("Failed to load block files")?;

    debug!(
        "Loaded {} records from {} blocks",
        scan.records.len(),
        scan.num_blocks
    );

    // Step 2: Classify transactions
    info!(
        "Step 2/3: Classifying {} transactions...",
        scan.num_transactions
    );
    let mut stats = AggregateStats::from_scan(&scan);
    analyze_transactions(&scan.records, args.lenient, &mut stats, &mut io::stdout())
        .context("Failed to write diagnostics")?;

    // Step 3: Report
    info!("Step 3/3: Rendering report...");
    print!("{}", render_report(&stats));

    if let Some(path) = &args.output_json {
        let summary =
            AnalysisSummary::from_stats(&stats, &args.data_dir.to_string_lossy(), args.lenient);
        write_summary(&summary, path).context("Failed to write summary JSON")?;

        info!("✓ Summary written to: {}", path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(stats)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
///
/// Existence of the data directory is left to the loader, which reports
/// the failing path; this only rejects arguments that are malformed on
/// their face.
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.data_dir.as_os_str().is_empty() {
        anyhow::bail!("Data directory cannot be empty");
    }

    if args.data_dir.exists() && !args.data_dir.is_dir() {
        anyhow::bail!(
            "Data path is not a directory: {}",
            args.data_dir.display()
        );
    }

    if let Some(path) = &args.output_json {
        if path.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }
    }

    Ok(())
}
