//! Plain-text purchase report.
//!
//! # Responsibility
//! - Filter items flagged for purchase and render them as a fixed-format
//!   report with a tax-inclusive total.
//! - Overwrite the report file on each export.
//!
//! # Invariants
//! - The report total uses `round_before_tax = true` and the default tax
//!   rate.
//! - An export with no flagged items writes nothing and leaves any previous
//!   report untouched.

use crate::model::item::Item;
use crate::repo::grocery_repo::{calculate_total_cost, DEFAULT_TAX_RATE};
use log::info;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write report `{}`: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Renders the purchase report for items flagged `buy`.
///
/// Returns `None` when no item is flagged, so callers can tell "nothing to
/// export" apart from an empty write.
pub fn render_buy_list(items: &[Item]) -> Option<String> {
    let buy_list: Vec<&Item> = items.iter().filter(|item| item.buy).collect();
    if buy_list.is_empty() {
        return None;
    }

    let mut report = String::from("\n** Grocery List Export ** \n\n");
    for (line_num, item) in buy_list.iter().enumerate() {
        let _ = writeln!(
            report,
            "Item {} | Name: {} | Store: {} | Cost: {} | Amount: {} | Priority: {} | Buy: {}",
            line_num + 1,
            item.name,
            item.store,
            item.cost,
            item.amount,
            item.priority,
            item.buy
        );
    }

    let total = calculate_total_cost(buy_list.iter().copied(), true, DEFAULT_TAX_RATE);
    let _ = write!(report, "\nThe total cost is ${total:.2}\n");

    Some(report)
}

/// Writes the purchase report to `path`, replacing any previous report.
///
/// Returns the written content, or `Ok(None)` when no item is flagged for
/// purchase (the file is left untouched).
pub fn export_buy_list(items: &[Item], path: &Path) -> ExportResult<Option<String>> {
    let Some(report) = render_buy_list(items) else {
        info!("event=export module=export status=skipped detail=no_items_flagged");
        return Ok(None);
    };

    std::fs::write(path, &report).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "event=export module=export status=ok path={} bytes={}",
        path.display(),
        report.len()
    );
    Ok(Some(report))
}
