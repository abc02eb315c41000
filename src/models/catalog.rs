use serde::{Deserialize, Serialize};

use crate::models::{IngredientCost, IngredientUsage};

/// Kind of catalog item a cart row points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Meal,
    Packet,
    Service,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Meal => "meal",
            ItemType::Packet => "packet",
            ItemType::Service => "service",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meal with its ingredient usages and an optional explicit net price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price_net_override: Option<f64>,

    #[serde(default)]
    pub ingredient_usages: Vec<IngredientUsage>,
}

impl MealRecord {
    pub fn new(id: &str, ingredient_usages: Vec<IngredientUsage>) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            price_net_override: None,
            ingredient_usages,
        }
    }

    pub fn with_override(mut self, price: f64) -> Self {
        self.price_net_override = Some(price);
        self
    }
}

/// A meal bundled into a packet, `quantity` units per packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketMealUsage {
    pub meal: MealRecord,

    #[serde(default)]
    pub quantity: Option<f64>,
}

impl PacketMealUsage {
    pub fn new(meal: MealRecord, quantity: f64) -> Self {
        Self {
            meal,
            quantity: Some(quantity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketRecord {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price_net_override: Option<f64>,

    #[serde(default)]
    pub meal_usages: Vec<PacketMealUsage>,
}

impl PacketRecord {
    pub fn new(id: &str, meal_usages: Vec<PacketMealUsage>) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            price_net_override: None,
            meal_usages,
        }
    }

    pub fn with_override(mut self, price: f64) -> Self {
        self.price_net_override = Some(price);
        self
    }
}

/// A flat-priced service (staff, delivery, equipment rental).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub price_net: f64,
}

/// A resolved catalog snapshot of anything that can sit in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogItem {
    Meal(MealRecord),
    Packet(PacketRecord),
    Service(ServiceRecord),
}

impl CatalogItem {
    pub fn id(&self) -> &str {
        match self {
            CatalogItem::Meal(m) => &m.id,
            CatalogItem::Packet(p) => &p.id,
            CatalogItem::Service(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        let name = match self {
            CatalogItem::Meal(m) => &m.name,
            CatalogItem::Packet(p) => &p.name,
            CatalogItem::Service(s) => &s.name,
        };
        if name.is_empty() { self.id() } else { name }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            CatalogItem::Meal(_) => ItemType::Meal,
            CatalogItem::Packet(_) => ItemType::Packet,
            CatalogItem::Service(_) => ItemType::Service,
        }
    }

    /// Explicit net price set on the item, if any (services never carry one).
    pub fn price_net_override(&self) -> Option<f64> {
        match self {
            CatalogItem::Meal(m) => m.price_net_override,
            CatalogItem::Packet(p) => p.price_net_override,
            CatalogItem::Service(_) => None,
        }
    }

    /// Whether the collection the price is computed from is non-empty.
    pub fn has_components(&self) -> bool {
        match self {
            CatalogItem::Meal(m) => !m.ingredient_usages.is_empty(),
            CatalogItem::Packet(p) => !p.meal_usages.is_empty(),
            CatalogItem::Service(_) => true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stored catalog shapes (ids instead of embedded records)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientRef {
    pub ingredient_id: String,

    #[serde(default)]
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMeal {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price_net_override: Option<f64>,

    #[serde(default)]
    pub ingredients: Vec<IngredientRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRef {
    pub meal_id: String,

    #[serde(default)]
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPacket {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price_net_override: Option<f64>,

    #[serde(default)]
    pub meals: Vec<MealRef>,
}

/// On-disk catalog as supplied by the catalog collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub ingredients: Vec<IngredientCost>,

    #[serde(default)]
    pub meals: Vec<StoredMeal>,

    #[serde(default)]
    pub packets: Vec<StoredPacket>,

    #[serde(default)]
    pub services: Vec<ServiceRecord>,
}
