//! Summary schema for the optional JSON artifact.
//!
//! This module defines the structure of the summary file written by
//! `analyze --output`. Schema is versioned to allow future evolution.

use crate::classifier::AggregateStats;
use crate::report::percent_gas_delta;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Data directory that was analyzed
    pub data_dir: String,

    /// Whether the lenient step-count rules were active
    pub lenient: bool,

    /// Number of block files scanned
    pub num_blocks: u64,

    /// Blocks that contained no transactions
    pub empty_blocks: u64,

    /// Transactions across all blocks
    pub num_transactions: u64,

    /// Category counts
    pub unaffected: u64,
    pub main_error: u64,
    pub salvageable: u64,
    pub broken: u64,

    /// Gas totals over billed transactions
    pub gas_used_main: u64,
    pub gas_used_yolo: u64,

    /// Percent change of repriced gas vs baseline; absent when no gas
    /// was billed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_gas_delta: Option<f64>,

    /// Largest observed gas delta; absent when no record was billed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gas_delta: Option<MaxDeltaSummary>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

/// The maximum-delta triple as reported
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxDeltaSummary {
    pub delta: i64,
    pub main_gas_used: u64,
    pub yolo2x_gas_used: u64,
}

impl AnalysisSummary {
    /// Build the summary from a run's final accumulator
    pub fn from_stats(stats: &AggregateStats, data_dir: &str, lenient: bool) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            data_dir: data_dir.to_string(),
            lenient,
            num_blocks: stats.num_blocks,
            empty_blocks: stats.empty_blocks,
            num_transactions: stats.num_transactions,
            unaffected: stats.unaffected,
            main_error: stats.main_error,
            salvageable: stats.salvageable,
            broken: stats.broken,
            gas_used_main: stats.gas_used_main,
            gas_used_yolo: stats.gas_used_yolo,
            percent_gas_delta: percent_gas_delta(stats.gas_used_main, stats.gas_used_yolo),
            max_gas_delta: stats.max_delta.map(|m| MaxDeltaSummary {
                delta: m.delta,
                main_gas_used: m.main_gas_used,
                yolo2x_gas_used: m.yolo2x_gas_used,
            }),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}
