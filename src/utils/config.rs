//! Configuration and constants for the CLI.

/// Default directory scanned for block record files
pub const DEFAULT_DATA_DIR: &str = "./rawdata";

/// Only directory entries with this file-name prefix are treated as block data
pub const BLOCK_FILE_PREFIX: &str = "block_";

/// Current summary schema version
pub const SCHEMA_VERSION: &str = "1.0.0";
