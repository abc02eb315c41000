use serde::{Deserialize, Serialize};

/// Price per unit of a raw ingredient.
///
/// `price_net` is optional so that a catalog row with a missing price can still
/// be carried around; such rows contribute nothing to a meal's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientCost {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Unit of measure label, e.g. "kg" or "pcs".
    #[serde(default)]
    pub unit: String,

    #[serde(default)]
    pub price_net: Option<f64>,
}

impl IngredientCost {
    pub fn new(id: &str, unit: &str, price_net: f64) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            unit: unit.to_string(),
            price_net: Some(price_net),
        }
    }
}

/// An ingredient together with the amount one unit of a meal consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientUsage {
    pub ingredient: IngredientCost,

    #[serde(default)]
    pub quantity: Option<f64>,
}

impl IngredientUsage {
    pub fn new(ingredient: IngredientCost, quantity: f64) -> Self {
        Self {
            ingredient,
            quantity: Some(quantity),
        }
    }

    /// Unit price and quantity, or `None` when either is missing or not finite.
    pub fn numeric_fields(&self) -> Option<(f64, f64)> {
        let price = self.ingredient.price_net.filter(|p| p.is_finite())?;
        let quantity = self.quantity.filter(|q| q.is_finite())?;
        Some((price, quantity))
    }
}
