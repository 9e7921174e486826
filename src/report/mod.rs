//! Report rendering.
//!
//! A pure function of the final accumulator: the fixed-order text report
//! printed to stdout, plus the serializable summary for the optional
//! JSON artifact.

pub mod schema;

pub use schema::{AnalysisSummary, MaxDeltaSummary};

use crate::classifier::AggregateStats;

/// Percent change of repriced gas vs baseline gas
///
/// **Public** - shared by the text report and the JSON summary
///
/// Returns `None` when `gas_used_main` is zero (no transaction was ever
/// billed), so callers never divide by zero. The text report prints
/// `n/a` in that case.
pub fn percent_gas_delta(gas_used_main: u64, gas_used_yolo: u64) -> Option<f64> {
    if gas_used_main == 0 {
        return None;
    }

    let main = gas_used_main as f64;
    let yolo = gas_used_yolo as f64;
    Some((yolo - main) / main * 100.0)
}

/// Render the final text report
///
/// **Public** - the report printed to stdout after analysis
///
/// Line order is fixed: block/transaction counts, category counts, gas
/// totals with the percent delta, then the largest observed delta with
/// the gas pair that produced it.
pub fn render_report(stats: &AggregateStats) -> String {
    let mut out = String::new();

    out.push_str(&format!("Number of blocks: `{}`\n", stats.num_blocks));
    out.push_str(&format!(
        " - number of empty (ignored) blocks: `{}`\n",
        stats.empty_blocks
    ));
    out.push_str(&format!(
        "Number of transactions: `{}`\n",
        stats.num_transactions
    ));
    out.push('\n');

    out.push_str(&format!(
        "Number of unaffected transactions: `{}`\n",
        stats.unaffected
    ));
    out.push_str(&format!(
        "- broken on mainnet already: `{}`\n",
        stats.main_error
    ));
    out.push_str(&format!(
        "Number of salvageable transactions: `{}`\n",
        stats.salvageable
    ));
    out.push_str(&format!(
        "Number of broken transactions: `{}`\n",
        stats.broken
    ));
    out.push('\n');

    out.push_str(&format!(
        "Gas usage for mainnet vs yolo: `{}` vs `{}`\n",
        stats.gas_used_main, stats.gas_used_yolo
    ));
    match percent_gas_delta(stats.gas_used_main, stats.gas_used_yolo) {
        Some(percent) => out.push_str(&format!(
            "The gas usage with yolo rules is `{percent:.2} %`\n"
        )),
        None => out.push_str("The gas usage with yolo rules is `n/a` (no gas recorded)\n"),
    }
    out.push('\n');

    let (delta, base, yolo2x) = match stats.max_delta {
        Some(max) => (max.delta, max.main_gas_used, max.yolo2x_gas_used),
        None => (0, 0, 0),
    };
    out.push_str(&format!(
        "Largest EIP-2929 gas difference {delta} (from `{base}` to `{yolo2x}`).\n"
    ));

    out
}
