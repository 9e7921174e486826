//! Output writers for analysis summaries.

pub mod json;

// Re-export main functions
pub use json::{read_summary, write_summary};
