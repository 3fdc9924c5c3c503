//! Data-directory and file-name resolution.
//!
//! # Responsibility
//! - Decide where the durable list, the export report and the logs live.
//!
//! # Invariants
//! - The `GROCERY_APP_DATA_DIR` environment variable always wins.
//! - File names are fixed; only the directory moves.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GROCERY_APP_DATA_DIR";

/// File name of the durable JSON document.
pub const LIST_FILE_NAME: &str = "grocery_list.json";

/// File name of the exported buy-list report.
pub const EXPORT_FILE_NAME: &str = "export_grocery_list.txt";

/// Directory name for log files, under the data directory.
pub const LOG_DIR_NAME: &str = "logs";

/// Resolves the data directory for this user.
///
/// Order: `GROCERY_APP_DATA_DIR`, then the platform data directory, then
/// the current directory as a last resort.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    match dirs::data_dir() {
        Some(base) => base.join("grocerylist"),
        None => PathBuf::from("."),
    }
}

/// Location of the durable JSON document under `data_dir`.
pub fn list_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LIST_FILE_NAME)
}

/// Location of the exported buy-list report under `data_dir`.
pub fn export_path(data_dir: &Path) -> PathBuf {
    data_dir.join(EXPORT_FILE_NAME)
}

/// Location of the log directory under `data_dir`.
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_DIR_NAME)
}
