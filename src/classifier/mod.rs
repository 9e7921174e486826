//! Transaction classification and aggregation.
//!
//! This module transforms the loaded record sequence into:
//! - A compatibility verdict per transaction (rule table in `rules`)
//! - Running aggregate counters and gas totals
//! - The largest yolo2x-vs-main gas delta observed

pub mod rules;

pub use rules::{classify, Category, Verdict};

use crate::loader::schema::TxRecord;
use crate::loader::BlockScan;
use log::debug;
use std::io::{self, Write};

/// Largest observed gas delta and the gas pair that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxDeltaSample {
    /// `yolo2x.gas_used - main.gas_used`
    pub delta: i64,

    /// Baseline gas of the transaction that set the maximum
    pub main_gas_used: u64,

    /// Yolo2x gas of that same transaction
    pub yolo2x_gas_used: u64,
}

/// Aggregate counters for one analysis run
///
/// Owned by the run and threaded through classification by exclusive
/// reference; there is no global state.
#[derive(Debug, Default)]
pub struct AggregateStats {
    /// Number of block files scanned
    pub num_blocks: u64,

    /// Number of transactions across all blocks
    pub num_transactions: u64,

    /// Blocks that contained no transactions
    pub empty_blocks: u64,

    /// Transactions unaffected by the repricing
    pub unaffected: u64,

    /// Subset of unaffected: already failing on mainnet
    pub main_error: u64,

    /// Transactions recovered by the yolo2x variant
    pub salvageable: u64,

    /// Transactions incompatible with both variants
    pub broken: u64,

    /// Baseline gas total over all billed transactions
    pub gas_used_main: u64,

    /// Repriced gas total (yolo or yolo2x, whichever was billed)
    pub gas_used_yolo: u64,

    /// Largest delta seen so far; `None` until a billed record arrives
    pub max_delta: Option<MaxDeltaSample>,
}

impl AggregateStats {
    /// Start an accumulator from the loader's block-level counts
    pub fn from_scan(scan: &BlockScan) -> Self {
        Self {
            num_blocks: scan.num_blocks,
            num_transactions: scan.num_transactions,
            empty_blocks: scan.empty_blocks,
            ..Default::default()
        }
    }

    /// Apply one classified record to the running totals
    ///
    /// **Public** - the only mutation path for the accumulator
    pub fn record(&mut self, tx: &TxRecord, verdict: &Verdict) {
        match verdict.category {
            Category::Unaffected => self.unaffected += 1,
            Category::Salvageable => self.salvageable += 1,
            Category::Broken => self.broken += 1,
        }

        if verdict.main_error {
            self.main_error += 1;
        }

        if let Some(variant) = verdict.billed {
            self.gas_used_main += tx.main().gas_used;
            self.gas_used_yolo += tx.run(variant).gas_used;
            self.track_delta(tx);
        }
    }

    // The delta reads yolo2x gas even when the yolo variant was billed.
    // The original analysis did this in every branch; kept as-is and
    // pinned by test rather than silently "fixed".
    fn track_delta(&mut self, tx: &TxRecord) {
        let delta = tx.yolo2x().gas_used as i64 - tx.main().gas_used as i64;

        // Strictly greater, so ties keep the first-seen maximum
        let replace = match self.max_delta {
            None => true,
            Some(current) => delta > current.delta,
        };

        if replace {
            self.max_delta = Some(MaxDeltaSample {
                delta,
                main_gas_used: tx.main().gas_used,
                yolo2x_gas_used: tx.yolo2x().gas_used,
            });
        }
    }
}

/// Classify every record in sequence, updating `stats`
///
/// **Public** - main entry point for analysis
///
/// Broken transactions get one diagnostic line each, written to `diag`
/// as they are encountered (stdout in the CLI, a buffer in tests).
///
/// # Errors
/// Only diagnostic writes can fail; classification itself is total.
pub fn analyze_transactions<W: Write>(
    records: &[TxRecord],
    lenient: bool,
    stats: &mut AggregateStats,
    diag: &mut W,
) -> io::Result<()> {
    for tx in records {
        let verdict = classify(tx, lenient);
        debug!(
            "{}/{} matched rule '{}'",
            tx.block_id, tx.tx_hash, verdict.rule
        );

        if verdict.category == Category::Broken {
            writeln!(diag, "{}", broken_diagnostic(tx))?;
        }

        stats.record(tx, &verdict);
    }

    Ok(())
}

/// Diagnostic line for a transaction incompatible with both variants
fn broken_diagnostic(tx: &TxRecord) -> String {
    format!(
        "broken tx: main-steps: {}, yolo-steps: {}, yolo2x-steps: {}, yolo2x-error: {}, block: {}, txHash: {}",
        tx.main().step_count,
        tx.yolo().step_count,
        tx.yolo2x().step_count,
        tx.yolo2x().errored,
        tx.block_id,
        tx.tx_hash
    )
}
