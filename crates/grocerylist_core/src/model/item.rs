//! Grocery item domain model.
//!
//! # Responsibility
//! - Define the canonical record for one grocery entry.
//! - Validate field-level contracts before any item reaches the collection.
//! - Map the durable JSON record shape, including legacy key/value forms.
//!
//! # Invariants
//! - `id` is assigned once at creation and never mutated afterwards.
//! - `amount > 0`, `cost >= 0` and finite, `priority` within
//!   [`PRIORITY_MIN`, `PRIORITY_MAX`], `name` non-empty.
//! - Serialization always emits canonical un-prefixed keys; legacy
//!   `_`-prefixed keys are accepted on deserialization only.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a grocery item.
///
/// Generated from a random 128-bit UUID, so collisions are negligible and
/// identifiers are never reused after deletion.
pub type ItemId = u128;

/// Inclusive lower bound of the priority scale (1 = highest priority).
pub const PRIORITY_MIN: u8 = 1;
/// Inclusive upper bound of the priority scale.
pub const PRIORITY_MAX: u8 = 5;

/// Item name applied when the caller leaves the field blank.
pub const DEFAULT_NAME: &str = "unnamed item";
/// Store name applied when the caller leaves the field blank.
pub const DEFAULT_STORE: &str = "Kroger";

/// Validation failure for a single item field.
///
/// Every variant names the field and carries the offending value so the
/// message is actionable without a stack trace.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValidationError {
    EmptyName,
    CostNotFinite { cost: f64 },
    NegativeCost { cost: f64 },
    ZeroAmount,
    PriorityOutOfRange { priority: u8 },
}

impl std::fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::CostNotFinite { cost } => {
                write!(f, "cost must be a finite number, got {cost}")
            }
            Self::NegativeCost { cost } => {
                write!(f, "cost must be non-negative, got {cost}")
            }
            Self::ZeroAmount => write!(f, "amount must be a positive integer"),
            Self::PriorityOutOfRange { priority } => write!(
                f,
                "priority must be between {PRIORITY_MIN} and {PRIORITY_MAX}, got {priority}"
            ),
        }
    }
}

impl std::error::Error for ItemValidationError {}

/// Canonical record for one grocery entry.
///
/// Field order matches the durable JSON record shape. All fields are public;
/// mutation goes through [`Item::apply_patch`] so validation cannot be
/// bypassed on the edit path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Item name. Non-empty.
    #[serde(default = "default_name", alias = "_name")]
    pub name: String,
    /// Store name. Empty means "unspecified".
    #[serde(default = "default_store", alias = "_store")]
    pub store: String,
    /// Unit price. Integer-typed JSON input is stored as a float.
    #[serde(default, alias = "_cost")]
    pub cost: f64,
    /// Quantity to buy. Always positive.
    #[serde(default = "default_amount", alias = "_amount")]
    pub amount: u32,
    /// Priority within [`PRIORITY_MIN`, `PRIORITY_MAX`], 1 = highest.
    #[serde(default = "default_priority", alias = "_priority")]
    pub priority: u8,
    /// Whether the item is included in the next purchase export.
    ///
    /// Legacy documents may carry this as a string; see [`parse_legacy_buy`].
    #[serde(
        default = "default_buy",
        alias = "_buy",
        deserialize_with = "deserialize_buy_flag"
    )]
    pub buy: bool,
    /// Stable identifier, set exactly once at creation.
    #[serde(default, alias = "_id")]
    pub id: ItemId,
}

/// Caller-settable fields for creating a new item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub store: String,
    pub cost: f64,
    pub amount: u32,
    pub priority: u8,
    pub buy: bool,
}

impl Default for NewItem {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            store: DEFAULT_STORE.to_string(),
            cost: 0.0,
            amount: 1,
            priority: PRIORITY_MIN,
            buy: true,
        }
    }
}

/// Tri-state edit input: `None` keeps the current value, `Some(v)` sets it.
///
/// `buy` is deliberately `Option<bool>` so "not provided" stays distinct
/// from "explicitly set to false".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub store: Option<String>,
    pub cost: Option<f64>,
    pub amount: Option<u32>,
    pub priority: Option<u8>,
    pub buy: Option<bool>,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            store: DEFAULT_STORE.to_string(),
            cost: 0.0,
            amount: 1,
            priority: PRIORITY_MIN,
            buy: true,
            id: 0,
        }
    }
}

impl Item {
    /// Creates a validated item with a freshly generated identifier.
    pub fn new(fields: NewItem) -> Result<Self, ItemValidationError> {
        Self::with_id(generate_item_id(), fields)
    }

    /// Creates a validated item with a caller-provided identifier.
    ///
    /// Used by load paths where identity already exists on disk.
    pub fn with_id(id: ItemId, fields: NewItem) -> Result<Self, ItemValidationError> {
        let item = Self {
            name: fields.name,
            store: fields.store,
            cost: fields.cost,
            amount: fields.amount,
            priority: fields.priority,
            buy: fields.buy,
            id,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks every field-level contract.
    ///
    /// Type-level contracts (text name/store, integer amount/priority/id,
    /// numeric cost) are already unrepresentable; this covers the value
    /// ranges on top.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.name.is_empty() {
            return Err(ItemValidationError::EmptyName);
        }
        if !self.cost.is_finite() {
            return Err(ItemValidationError::CostNotFinite { cost: self.cost });
        }
        if self.cost < 0.0 {
            return Err(ItemValidationError::NegativeCost { cost: self.cost });
        }
        if self.amount == 0 {
            return Err(ItemValidationError::ZeroAmount);
        }
        if !(PRIORITY_MIN..=PRIORITY_MAX).contains(&self.priority) {
            return Err(ItemValidationError::PriorityOutOfRange {
                priority: self.priority,
            });
        }
        Ok(())
    }

    /// Returns an updated copy with the patch applied, validated as a whole.
    ///
    /// The receiver is never mutated, so a validation failure leaves the
    /// original record intact and no partially-edited state can exist.
    pub fn apply_patch(&self, patch: &ItemPatch) -> Result<Self, ItemValidationError> {
        let mut updated = self.clone();
        if let Some(name) = &patch.name {
            updated.name = name.clone();
        }
        if let Some(store) = &patch.store {
            updated.store = store.clone();
        }
        if let Some(cost) = patch.cost {
            updated.cost = cost;
        }
        if let Some(amount) = patch.amount {
            updated.amount = amount;
        }
        if let Some(priority) = patch.priority {
            updated.priority = priority;
        }
        if let Some(buy) = patch.buy {
            updated.buy = buy;
        }
        updated.validate()?;
        Ok(updated)
    }

    /// Cost of this line: `amount * cost`.
    pub fn line_total(&self) -> f64 {
        f64::from(self.amount) * self.cost
    }
}

/// Generates a fresh random 128-bit item identifier.
pub fn generate_item_id() -> ItemId {
    Uuid::new_v4().as_u128()
}

/// Maps a textual boolean to a real one.
///
/// Case-insensitive: `true/yes/y/1` and `false/no/n/0`. Returns `None` for
/// anything else. Used both for legacy persisted records and by callers
/// mapping raw prompt input before invoking the core.
pub fn parse_legacy_buy(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn deserialize_buy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BuyFlag {
        Flag(bool),
        Text(String),
    }

    match BuyFlag::deserialize(deserializer)? {
        BuyFlag::Flag(value) => Ok(value),
        BuyFlag::Text(text) => parse_legacy_buy(&text).ok_or_else(|| {
            de::Error::custom(format!(
                "invalid buy flag `{text}`; expected true/false/yes/no/y/n/1/0"
            ))
        }),
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_store() -> String {
    DEFAULT_STORE.to_string()
}

fn default_amount() -> u32 {
    1
}

fn default_priority() -> u8 {
    PRIORITY_MIN
}

fn default_buy() -> bool {
    true
}
