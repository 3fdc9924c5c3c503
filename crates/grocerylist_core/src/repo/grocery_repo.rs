//! Grocery repository: CRUD, search and cost aggregation.
//!
//! # Responsibility
//! - Own the ordered item collection for one session, exclusively.
//! - Enforce lookup/search/mutation semantics over validated items.
//! - Persist write-through: every successful mutation reaches the store
//!   before the call returns.
//!
//! # Invariants
//! - Insertion order is the canonical display/export order.
//! - Mutations are all-or-nothing: a validation or persistence failure
//!   leaves both the collection and the durable document unchanged.

use crate::model::item::{Item, ItemId, ItemPatch, ItemValidationError, NewItem};
use crate::search::prefix::{PrefixMatcher, SearchError};
use crate::store::{ItemStore, StoreError};
use log::{error, info, warn};

/// Default sales tax rate applied to totals (8.25%).
pub const DEFAULT_TAX_RATE: f64 = 0.0825;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for grocery collection operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Store(StoreError),
    Search(SearchError),
    NotFound(ItemId),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Search(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Search(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<SearchError> for RepoError {
    fn from(value: SearchError) -> Self {
        Self::Search(value)
    }
}

/// Owner of the in-memory grocery collection and its durable store.
///
/// Construct with [`GroceryRepository::open`]; items are only reachable as
/// read-only views, so no external aliasing can bypass validation.
pub struct GroceryRepository<S: ItemStore> {
    items: Vec<Item>,
    store: S,
}

impl<S: ItemStore> GroceryRepository<S> {
    /// Opens the repository, loading existing state or initializing empty.
    ///
    /// A missing document is created as an empty collection. An unreadable
    /// or invalid document is logged, preserved via quarantine where the
    /// backend supports it, and replaced by an empty collection — load
    /// problems never fail the caller.
    pub fn open(mut store: S) -> RepoResult<Self> {
        if !store.exists() {
            info!("event=repo_open module=repo status=ok detail=new_store");
            store.save(&[])?;
            return Ok(Self {
                items: Vec::new(),
                store,
            });
        }

        match store.load() {
            Ok(items) => {
                info!(
                    "event=repo_open module=repo status=ok items={}",
                    items.len()
                );
                Ok(Self { items, store })
            }
            Err(err) => {
                error!(
                    "event=repo_open module=repo status=error error_code=load_failed error={err} \
                     detail=falling_back_to_empty"
                );
                match store.quarantine() {
                    Ok(Some(preserved)) => info!(
                        "event=repo_open module=repo status=ok detail=document_preserved path={}",
                        preserved.display()
                    ),
                    Ok(None) => {}
                    Err(quarantine_err) => error!(
                        "event=repo_open module=repo status=error error_code=quarantine_failed \
                         error={quarantine_err}"
                    ),
                }
                store.save(&[])?;
                Ok(Self {
                    items: Vec::new(),
                    store,
                })
            }
        }
    }

    /// Read-only view of the collection in canonical order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the item with the given id, scanning in collection order.
    pub fn find_index_by_id(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Index of the first item whose name matches exactly (case-sensitive).
    pub fn find_index_by_name(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    /// Validates, appends and persists a new item; returns its fresh id.
    pub fn add(&mut self, fields: NewItem) -> RepoResult<ItemId> {
        let item = Item::new(fields)?;
        let id = item.id;

        self.items.push(item);
        if let Err(err) = self.persist() {
            self.items.pop();
            return Err(err);
        }

        info!("event=item_add module=repo status=ok id={id}");
        Ok(id)
    }

    /// Applies a tri-state patch to the item with the given id.
    ///
    /// The patch is validated as a whole against a copy, so a failing field
    /// leaves the original item fully intact. An all-unset patch changes no
    /// content but still persists.
    pub fn edit(&mut self, id: ItemId, patch: &ItemPatch) -> RepoResult<()> {
        let index = self.find_index_by_id(id).ok_or(RepoError::NotFound(id))?;

        let updated = self.items[index].apply_patch(patch)?;
        let previous = std::mem::replace(&mut self.items[index], updated);
        if let Err(err) = self.persist() {
            self.items[index] = previous;
            return Err(err);
        }

        info!("event=item_edit module=repo status=ok id={id}");
        Ok(())
    }

    /// Removes the item with the given id, preserving the order of the rest.
    ///
    /// Returns `Ok(false)` when the id is unknown; the collection and the
    /// durable document are left untouched.
    pub fn remove(&mut self, id: ItemId) -> RepoResult<bool> {
        let Some(index) = self.find_index_by_id(id) else {
            warn!("event=item_remove module=repo status=not_found id={id}");
            return Ok(false);
        };

        let removed = self.items.remove(index);
        if let Err(err) = self.persist() {
            self.items.insert(index, removed);
            return Err(err);
        }

        info!("event=item_remove module=repo status=ok id={id}");
        Ok(true)
    }

    /// Items whose name starts with `query`, case-insensitive, in order.
    ///
    /// The query is literal text; an empty query matches every item.
    pub fn search_by_name_prefix(&self, query: &str) -> RepoResult<Vec<&Item>> {
        let matcher = PrefixMatcher::new(query)?;
        Ok(self
            .items
            .iter()
            .filter(|item| matcher.is_match(&item.name))
            .collect())
    }

    /// Serializes the whole collection to the durable store.
    ///
    /// Save failures surface to the caller: the in-memory state is intact
    /// but the durable document was not replaced.
    pub fn persist(&mut self) -> RepoResult<()> {
        self.store.save(&self.items).map_err(RepoError::from)
    }
}

/// Total cost of the given items: sum of `amount * cost` per line.
///
/// With `round_before_tax`, the subtotal is rounded to the nearest integer
/// before tax. A zero `tax_rate` skips the tax step entirely, so the result
/// is the exact pre-tax subtotal.
pub fn calculate_total_cost<'a, I>(items: I, round_before_tax: bool, tax_rate: f64) -> f64
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut total: f64 = items.into_iter().map(Item::line_total).sum();

    if round_before_tax {
        total = total.round();
    }

    if tax_rate != 0.0 {
        total += total * tax_rate;
    }

    total
}
