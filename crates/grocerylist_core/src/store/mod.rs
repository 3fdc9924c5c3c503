//! Durable storage for the grocery collection.
//!
//! # Responsibility
//! - Define the storage contract the repository persists through.
//! - Encode/decode the JSON document shared by every backend.
//!
//! # Invariants
//! - A saved document is always a JSON array, `[]` for an empty collection.
//! - Decoding validates every record; invalid persisted state is rejected
//!   instead of masked.
//! - Saving always emits canonical un-prefixed keys, whatever the loaded
//!   document carried.

use crate::model::item::{Item, ItemValidationError};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

mod json_store;

pub use json_store::JsonStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error with enough context to diagnose from a log line.
#[derive(Debug)]
pub enum StoreError {
    /// The document could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not valid JSON for the expected shape.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The document parsed, but a record violates an item contract.
    InvalidRecord {
        path: PathBuf,
        index: usize,
        source: ItemValidationError,
    },
    Serialize {
        source: serde_json::Error,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store I/O failed at `{}`: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "store document `{}` is corrupt: {source}", path.display())
            }
            Self::InvalidRecord {
                path,
                index,
                source,
            } => write!(
                f,
                "record {index} in `{}` is invalid: {source}",
                path.display()
            ),
            Self::Serialize { source } => {
                write!(f, "failed to serialize grocery collection: {source}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::Serialize { source } => Some(source),
        }
    }
}

/// Storage contract for the ordered grocery collection.
///
/// The repository talks to storage only through this trait, so tests can run
/// against [`MemoryStore`] with the exact decode path used for real files.
pub trait ItemStore {
    /// Whether a durable document currently exists.
    fn exists(&self) -> bool;

    /// Loads and validates the full ordered collection.
    fn load(&self) -> StoreResult<Vec<Item>>;

    /// Replaces the durable document with the given ordered collection.
    fn save(&mut self, items: &[Item]) -> StoreResult<()>;

    /// Moves an unreadable document aside so a later save cannot destroy it.
    ///
    /// Returns the location the document was preserved at, or `None` when
    /// there was nothing to preserve.
    fn quarantine(&mut self) -> StoreResult<Option<PathBuf>>;
}

/// In-memory JSON-document store.
///
/// Holds the raw serialized text behind a shared handle, so a test can seed
/// a legacy document, hand one handle to the repository, and inspect what
/// got written through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    doc: Rc<RefCell<Option<String>>>,
    saves: Rc<RefCell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a raw JSON document.
    pub fn with_document(raw: impl Into<String>) -> Self {
        let store = Self::new();
        *store.doc.borrow_mut() = Some(raw.into());
        store
    }

    /// Raw document text, if one exists.
    pub fn document(&self) -> Option<String> {
        self.doc.borrow().clone()
    }

    /// Number of saves performed through this store.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl ItemStore for MemoryStore {
    fn exists(&self) -> bool {
        self.doc.borrow().is_some()
    }

    fn load(&self) -> StoreResult<Vec<Item>> {
        let doc = self.doc.borrow();
        let raw = doc.as_deref().unwrap_or("[]");
        decode_items(Path::new("<memory>"), raw)
    }

    fn save(&mut self, items: &[Item]) -> StoreResult<()> {
        let raw = encode_items(items)?;
        *self.doc.borrow_mut() = Some(raw);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn quarantine(&mut self) -> StoreResult<Option<PathBuf>> {
        self.doc.borrow_mut().take();
        Ok(None)
    }
}

/// Decodes and validates an ordered collection from raw JSON text.
///
/// Record order in the document is preserved. Legacy key prefixes and
/// textual buy flags are normalized by the item's own deserialization.
pub(crate) fn decode_items(path: &Path, raw: &str) -> StoreResult<Vec<Item>> {
    let items: Vec<Item> = serde_json::from_str(raw).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    for (index, item) in items.iter().enumerate() {
        item.validate().map_err(|source| StoreError::InvalidRecord {
            path: path.to_path_buf(),
            index,
            source,
        })?;
    }

    Ok(items)
}

/// Encodes the ordered collection as the canonical JSON document.
pub(crate) fn encode_items(items: &[Item]) -> StoreResult<String> {
    serde_json::to_string_pretty(items).map_err(|source| StoreError::Serialize { source })
}
