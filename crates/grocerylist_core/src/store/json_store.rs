//! File-backed JSON document store.
//!
//! # Responsibility
//! - Read and replace the single durable JSON document on disk.
//! - Preserve unreadable documents instead of overwriting them.
//!
//! # Invariants
//! - Saves replace the whole document via a temp-file rename, so a failed
//!   write never leaves a half-written document behind.
//! - Emits `store_load`/`store_save` logging events with duration and status.

use super::{decode_items, encode_items, ItemStore, StoreError, StoreResult};
use crate::model::item::Item;
use log::{error, info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

const QUARANTINE_SUFFIX: &str = "corrupt";

/// Durable store backed by one JSON file.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store for `path`, ensuring its parent directory exists.
    ///
    /// The document itself is not created here; the repository decides
    /// whether to initialize an empty collection.
    pub fn create(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(Self { path })
    }

    /// Location of the durable document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn quarantine_path(&self) -> PathBuf {
        let file_name = match self.path.file_name() {
            Some(name) => {
                let mut name = name.to_os_string();
                name.push(".");
                name.push(QUARANTINE_SUFFIX);
                name
            }
            None => OsString::from(QUARANTINE_SUFFIX),
        };
        self.path.with_file_name(file_name)
    }
}

impl ItemStore for JsonStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> StoreResult<Vec<Item>> {
        let started_at = Instant::now();

        let raw = std::fs::read_to_string(&self.path).map_err(|source| {
            error!(
                "event=store_load module=store status=error path={} error_code=read_failed error={}",
                self.path.display(),
                source
            );
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        match decode_items(&self.path, &raw) {
            Ok(items) => {
                info!(
                    "event=store_load module=store status=ok path={} items={} duration_ms={}",
                    self.path.display(),
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(items)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error path={} error_code=decode_failed error={}",
                    self.path.display(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&mut self, items: &[Item]) -> StoreResult<()> {
        let started_at = Instant::now();
        let raw = encode_items(items)?;

        // Full-document replace: write a sibling temp file, then rename over
        // the real document so readers never observe a partial write.
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, raw).map_err(|source| {
            error!(
                "event=store_save module=store status=error path={} error_code=write_failed error={}",
                tmp_path.display(),
                source
            );
            StoreError::Io {
                path: tmp_path.clone(),
                source,
            }
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|source| {
            error!(
                "event=store_save module=store status=error path={} error_code=rename_failed error={}",
                self.path.display(),
                source
            );
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        info!(
            "event=store_save module=store status=ok path={} items={} duration_ms={}",
            self.path.display(),
            items.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn quarantine(&mut self) -> StoreResult<Option<PathBuf>> {
        if !self.exists() {
            return Ok(None);
        }

        let preserved = self.quarantine_path();
        std::fs::rename(&self.path, &preserved).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        warn!(
            "event=store_quarantine module=store status=ok path={} preserved={}",
            self.path.display(),
            preserved.display()
        );
        Ok(Some(preserved))
    }
}
