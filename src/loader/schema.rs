//! Input schema for per-block transaction records.
//!
//! Each `block_*` file is a JSON array of these records, one per executed
//! transaction, with gas/step/error fields for each of the three rule
//! variants. Missing fields default to zero values.

use serde::{Deserialize, Serialize};

/// One transaction's execution record across all three rule variants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TxRecord {
    /// Position of the transaction within its block
    #[serde(rename = "TxNum")]
    pub tx_num: u64,

    /// Transaction hash (hex digest, treated as opaque)
    #[serde(rename = "TxHash")]
    pub tx_hash: String,

    /// Gas used under the yolo repricing rules
    #[serde(rename = "YoloGasUsed")]
    pub yolo_gas_used: u64,

    /// Execution steps taken under the yolo rules
    #[serde(rename = "YoloSteps")]
    pub yolo_steps: u64,

    /// Whether execution failed under the yolo rules
    #[serde(rename = "YoloError")]
    pub yolo_error: bool,

    /// Gas used under the yolo2x rules
    #[serde(rename = "Yolo2xGasUsed")]
    pub yolo2x_gas_used: u64,

    /// Execution steps taken under the yolo2x rules
    #[serde(rename = "Yolo2xSteps")]
    pub yolo2x_steps: u64,

    /// Whether execution failed under the yolo2x rules
    #[serde(rename = "Yolo2xError")]
    pub yolo2x_error: bool,

    /// Gas used under the baseline mainnet rules
    #[serde(rename = "MainGasUsed")]
    pub main_gas_used: u64,

    /// Execution steps taken under the baseline rules
    #[serde(rename = "MainSteps")]
    pub main_steps: u64,

    /// Whether execution failed under the baseline rules
    #[serde(rename = "MainError")]
    pub main_error: bool,

    /// Name of the source block file, set by the loader (never on the wire)
    #[serde(skip)]
    pub block_id: String,
}

/// The three rule variants a transaction is executed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Main,
    Yolo,
    Yolo2x,
}

/// One variant's execution outcome, extracted from a record
#[derive(Debug, Clone, Copy)]
pub struct VariantRun {
    pub gas_used: u64,
    pub step_count: u64,
    pub errored: bool,
}

impl TxRecord {
    /// Extract the execution outcome for one rule variant
    pub fn run(&self, variant: Variant) -> VariantRun {
        match variant {
            Variant::Main => VariantRun {
                gas_used: self.main_gas_used,
                step_count: self.main_steps,
                errored: self.main_error,
            },
            Variant::Yolo => VariantRun {
                gas_used: self.yolo_gas_used,
                step_count: self.yolo_steps,
                errored: self.yolo_error,
            },
            Variant::Yolo2x => VariantRun {
                gas_used: self.yolo2x_gas_used,
                step_count: self.yolo2x_steps,
                errored: self.yolo2x_error,
            },
        }
    }

    pub fn main(&self) -> VariantRun {
        self.run(Variant::Main)
    }

    pub fn yolo(&self) -> VariantRun {
        self.run(Variant::Yolo)
    }

    pub fn yolo2x(&self) -> VariantRun {
        self.run(Variant::Yolo2x)
    }
}
