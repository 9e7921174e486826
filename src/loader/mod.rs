//! Block file loading.
//!
//! This module handles:
//! - Scanning the data directory for `block_*` files
//! - Parsing each file as a JSON array of transaction records
//! - Tagging records with their source block
//! - Counting blocks, empty blocks, and transactions

pub mod schema;

pub use schema::{TxRecord, Variant, VariantRun};

use crate::utils::config::BLOCK_FILE_PREFIX;
use crate::utils::error::LoadError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Result of scanning a data directory: the flat record sequence
/// plus block-level counts
#[derive(Debug, Default)]
pub struct BlockScan {
    /// All transaction records, in directory enumeration order
    pub records: Vec<TxRecord>,

    /// Number of `block_*` entries found
    pub num_blocks: u64,

    /// Number of transaction records across all blocks
    pub num_transactions: u64,

    /// Number of blocks that contained no transactions
    pub empty_blocks: u64,
}

/// Load all block record files from a directory
///
/// **Public** - main entry point for loading
///
/// Entries whose name does not start with `block_` are skipped.
/// Each matching file must parse as a JSON array of records; an empty
/// array is a valid (empty) block. Every record is tagged with the name
/// of the file it came from.
///
/// # Errors
/// * `LoadError::ReadDir` - directory missing or unreadable
/// * `LoadError::ReadFile` - a block file could not be read
/// * `LoadError::Parse` - a block file is not a valid record array
///
/// Any error aborts the whole scan; there are no partial results.
pub fn load_blocks(dir: &Path) -> Result<BlockScan, LoadError> {
    debug!("Scanning {} for {}* files", dir.display(), BLOCK_FILE_PREFIX);

    let entries = fs::read_dir(dir).map_err(|e| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut scan = BlockScan::default();

    for entry in entries {
        let entry = entry.map_err(|e| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(BLOCK_FILE_PREFIX) {
            continue;
        }

        scan.num_blocks += 1;
        let path = entry.path();

        let bytes = fs::read(&path).map_err(|e| LoadError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        let mut block: Vec<TxRecord> =
            serde_json::from_slice(&bytes).map_err(|e| LoadError::Parse {
                path: path.clone(),
                source: e,
            })?;

        debug!("{}: {} transactions", name, block.len());

        scan.num_transactions += block.len() as u64;
        if block.is_empty() {
            scan.empty_blocks += 1;
        }

        for tx in &mut block {
            tx.block_id = name.clone();
        }
        scan.records.append(&mut block);
    }

    info!(
        "Loaded {} transactions from {} blocks ({} empty)",
        scan.num_transactions, scan.num_blocks, scan.empty_blocks
    );

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_tags_records_with_block_id() {
        let dir = tempdir().unwrap();
        write_file(
            dir.path(),
            "block_1",
            r#"[{"TxNum": 0, "TxHash": "0xaa"}, {"TxNum": 1, "TxHash": "0xbb"}]"#,
        );

        let scan = load_blocks(dir.path()).unwrap();

        assert_eq!(scan.num_blocks, 1);
        assert_eq!(scan.num_transactions, 2);
        assert_eq!(scan.empty_blocks, 0);
        assert!(scan.records.iter().all(|tx| tx.block_id == "block_1"));
    }

    #[test]
    fn test_load_skips_non_block_entries() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "block_1", "[]");
        write_file(dir.path(), "README.txt", "not a block");
        write_file(dir.path(), "notes.json", "{}");

        let scan = load_blocks(dir.path()).unwrap();

        assert_eq!(scan.num_blocks, 1);
        assert_eq!(scan.num_transactions, 0);
    }

    #[test]
    fn test_empty_block_is_counted() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "block_1", "[]");
        write_file(dir.path(), "block_2", r#"[{"TxNum": 0}]"#);

        let scan = load_blocks(dir.path()).unwrap();

        assert_eq!(scan.num_blocks, 2);
        assert_eq!(scan.empty_blocks, 1);
        assert_eq!(scan.num_transactions, 1);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        let scan = load_blocks(dir.path()).unwrap();

        assert_eq!(scan.num_blocks, 0);
        assert_eq!(scan.num_transactions, 0);
        assert!(scan.records.is_empty());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = load_blocks(&missing).unwrap_err();
        assert!(matches!(err, LoadError::ReadDir { .. }));
    }

    #[test]
    fn test_malformed_block_is_fatal() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "block_1", "{ not json");

        let err = load_blocks(dir.path()).unwrap_err();
        match err {
            LoadError::Parse { path, .. } => {
                assert!(path.to_string_lossy().ends_with("block_1"));
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }
}
