use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::models::{CatalogItem, ItemType};

/// A persisted cart row. One row is one physical unit in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRow {
    pub id: String,
    pub item_type: ItemType,
    pub item_id: String,

    #[serde(default)]
    pub markup_pct: f64,
}

/// A raw cart row together with its catalog-resolved details.
///
/// `details` is `None` when the catalog lookup failed or is still pending.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: String,
    pub item_type: ItemType,
    pub item_id: String,
    pub markup_pct: f64,
    pub details: Option<CatalogItem>,
}

impl CartLine {
    pub fn from_row(row: &CartRow, details: Option<CatalogItem>) -> Self {
        Self {
            id: row.id.clone(),
            item_type: row.item_type,
            item_id: row.item_id.clone(),
            markup_pct: row.markup_pct,
            details,
        }
    }

    pub fn key(&self) -> CartLineKey {
        CartLineKey::new(&self.item_id, self.markup_pct)
    }
}

/// Identity of a grouped cart line: `(item_id, markup_pct)`.
///
/// Markup is compared by bit pattern so the key can be hashed; `-0.0` is
/// folded into `0.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineKey {
    pub item_id: String,
    pub markup_pct: f64,
}

impl CartLineKey {
    pub fn new(item_id: &str, markup_pct: f64) -> Self {
        Self {
            item_id: item_id.to_string(),
            markup_pct,
        }
    }

    fn markup_bits(&self) -> u64 {
        if self.markup_pct == 0.0 {
            0.0_f64.to_bits()
        } else {
            self.markup_pct.to_bits()
        }
    }
}

impl PartialEq for CartLineKey {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id && self.markup_bits() == other.markup_bits()
    }
}

impl Eq for CartLineKey {}

impl Hash for CartLineKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item_id.hash(state);
        self.markup_bits().hash(state);
    }
}

/// Per-unit price of a grouped line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LinePrice {
    Resolved { net: f64, gross: f64 },
    /// Catalog data not available; the caller decides what to show.
    Unresolved,
}

impl LinePrice {
    pub fn net(&self) -> Option<f64> {
        match self {
            LinePrice::Resolved { net, .. } => Some(*net),
            LinePrice::Unresolved => None,
        }
    }

    pub fn gross(&self) -> Option<f64> {
        match self {
            LinePrice::Resolved { gross, .. } => Some(*gross),
            LinePrice::Unresolved => None,
        }
    }
}

/// N physical units of the same catalog item at the same markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedCartLine {
    pub key: CartLineKey,
    pub item_type: ItemType,

    /// Display name, when the catalog resolved the item.
    pub name: Option<String>,

    pub quantity: u32,
    pub price: LinePrice,

    /// Identities of the underlying raw rows, in input order.
    pub raw_line_ids: Vec<String>,
}

impl GroupedCartLine {
    pub fn item_id(&self) -> &str {
        &self.key.item_id
    }

    pub fn markup_pct(&self) -> f64 {
        self.key.markup_pct
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub netto_total: f64,
    pub brutto_total: f64,
    pub avg_markup_pct: f64,

    /// Grouped lines left out of the totals because their price is unresolved.
    pub unresolved_lines: usize,
}
