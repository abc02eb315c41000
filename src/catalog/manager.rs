use std::collections::HashMap;

use strsim::jaro_winkler;
use tracing::{debug, warn};

use crate::models::{
    CartLine, CartRow, CatalogFile, CatalogItem, IngredientCost, IngredientUsage, ItemType,
    MealRecord, PacketMealUsage, PacketRecord, ServiceRecord, StoredMeal, StoredPacket,
};
use crate::pricing::{item_net_breakdown, FUZZY_MATCH_THRESHOLD};

/// Resolves catalog ids into fully populated records.
pub struct CatalogManager {
    ingredients: HashMap<String, IngredientCost>,
    meals: HashMap<String, StoredMeal>,
    packets: HashMap<String, StoredPacket>,
    services: HashMap<String, ServiceRecord>,
}

impl CatalogManager {
    /// Index a catalog by id. Later duplicates replace earlier ones.
    pub fn new(catalog: CatalogFile) -> Self {
        Self {
            ingredients: index_by(catalog.ingredients, |i| i.id.clone()),
            meals: index_by(catalog.meals, |m| m.id.clone()),
            packets: index_by(catalog.packets, |p| p.id.clone()),
            services: index_by(catalog.services, |s| s.id.clone()),
        }
    }

    /// Resolved meal with ingredient snapshots embedded.
    ///
    /// A missing ingredient reference becomes a usage without a price, which
    /// pricing skips.
    pub fn meal(&self, id: &str) -> Option<MealRecord> {
        let stored = self.meals.get(id)?;
        let ingredient_usages = stored
            .ingredients
            .iter()
            .map(|r| {
                let ingredient = match self.ingredients.get(&r.ingredient_id) {
                    Some(ingredient) => ingredient.clone(),
                    None => {
                        warn!(meal = %id, ingredient = %r.ingredient_id, "Unknown ingredient reference");
                        IngredientCost {
                            id: r.ingredient_id.clone(),
                            name: r.ingredient_id.clone(),
                            unit: String::new(),
                            price_net: None,
                        }
                    }
                };
                IngredientUsage {
                    ingredient,
                    quantity: r.quantity,
                }
            })
            .collect();

        Some(MealRecord {
            id: stored.id.clone(),
            name: stored.name.clone(),
            price_net_override: stored.price_net_override,
            ingredient_usages,
        })
    }

    /// Resolved packet; meal references that do not resolve are dropped.
    pub fn packet(&self, id: &str) -> Option<PacketRecord> {
        let stored = self.packets.get(id)?;
        let meal_usages = stored
            .meals
            .iter()
            .filter_map(|r| match self.meal(&r.meal_id) {
                Some(meal) => Some(PacketMealUsage {
                    meal,
                    quantity: r.quantity,
                }),
                None => {
                    warn!(packet = %id, meal = %r.meal_id, "Unknown meal reference, dropped");
                    None
                }
            })
            .collect();

        Some(PacketRecord {
            id: stored.id.clone(),
            name: stored.name.clone(),
            price_net_override: stored.price_net_override,
            meal_usages,
        })
    }

    pub fn service(&self, id: &str) -> Option<ServiceRecord> {
        self.services.get(id).cloned()
    }

    pub fn item(&self, item_type: ItemType, id: &str) -> Option<CatalogItem> {
        match item_type {
            ItemType::Meal => self.meal(id).map(CatalogItem::Meal),
            ItemType::Packet => self.packet(id).map(CatalogItem::Packet),
            ItemType::Service => self.service(id).map(CatalogItem::Service),
        }
    }

    /// Look up an item by id in any collection (meals, then packets, then services).
    pub fn item_by_id(&self, id: &str) -> Option<CatalogItem> {
        [ItemType::Meal, ItemType::Packet, ItemType::Service]
            .into_iter()
            .find_map(|t| self.item(t, id))
    }

    /// Every catalog item, meals first, each group sorted by name.
    pub fn all_items(&self) -> Vec<CatalogItem> {
        let mut meals: Vec<CatalogItem> = self
            .meals
            .keys()
            .filter_map(|id| self.meal(id))
            .map(CatalogItem::Meal)
            .collect();
        let mut packets: Vec<CatalogItem> = self
            .packets
            .keys()
            .filter_map(|id| self.packet(id))
            .map(CatalogItem::Packet)
            .collect();
        let mut services: Vec<CatalogItem> = self
            .services
            .values()
            .cloned()
            .map(CatalogItem::Service)
            .collect();

        for group in [&mut meals, &mut packets, &mut services] {
            group.sort_by(|a, b| a.name().cmp(b.name()));
        }

        meals.into_iter().chain(packets).chain(services).collect()
    }

    /// Resolve persisted cart rows against the catalog.
    ///
    /// Failed lookups keep the row with `details: None`. Malformed entries
    /// inside resolved items are reported once per item.
    pub fn resolve_cart(&self, rows: &[CartRow]) -> Vec<CartLine> {
        let mut cache: HashMap<(ItemType, &str), Option<CatalogItem>> = HashMap::new();

        rows.iter()
            .map(|row| {
                let details = cache
                    .entry((row.item_type, row.item_id.as_str()))
                    .or_insert_with(|| {
                        let item = self.item(row.item_type, &row.item_id);
                        match &item {
                            Some(resolved) => {
                                let breakdown = item_net_breakdown(resolved);
                                if breakdown.skipped > 0 {
                                    warn!(
                                        item = %row.item_id,
                                        skipped = breakdown.skipped,
                                        "Skipped malformed entries while pricing"
                                    );
                                }
                            }
                            None => warn!(
                                item_type = %row.item_type,
                                item = %row.item_id,
                                "Cart row does not resolve"
                            ),
                        }
                        item
                    })
                    .clone();
                CartLine::from_row(row, details)
            })
            .collect()
    }

    /// Best matches for a query: exact id or case-insensitive name first,
    /// then fuzzy matches above the similarity threshold, best first.
    pub fn find_by_name(&self, query: &str) -> Vec<CatalogItem> {
        let query = query.trim().to_lowercase();
        let items = self.all_items();

        if let Some(exact) = items
            .iter()
            .find(|i| i.id().to_lowercase() == query || i.name().to_lowercase() == query)
        {
            return vec![exact.clone()];
        }

        let mut candidates: Vec<(CatalogItem, f64)> = items
            .into_iter()
            .map(|i| {
                let score = jaro_winkler(&i.name().to_lowercase(), &query);
                (i, score)
            })
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        debug!(query = %query, matches = candidates.len(), "Fuzzy catalog lookup");

        candidates.into_iter().map(|(i, _)| i).collect()
    }

    /// Number of sellable items (meals, packets and services).
    pub fn len(&self) -> usize {
        self.meals.len() + self.packets.len() + self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn index_by<T, F: Fn(&T) -> String>(items: Vec<T>, key: F) -> HashMap<String, T> {
    let mut map = HashMap::new();
    for item in items {
        map.insert(key(&item), item);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IngredientRef, MealRef};
    use crate::pricing::{meal_net_price, packet_net_price};

    fn sample_catalog() -> CatalogFile {
        CatalogFile {
            ingredients: vec![
                IngredientCost::new("rice", "kg", 2.0),
                IngredientCost::new("chicken", "kg", 8.0),
            ],
            meals: vec![
                StoredMeal {
                    id: "curry".to_string(),
                    name: "Chicken Curry".to_string(),
                    price_net_override: None,
                    ingredients: vec![
                        IngredientRef {
                            ingredient_id: "rice".to_string(),
                            quantity: Some(0.25),
                        },
                        IngredientRef {
                            ingredient_id: "chicken".to_string(),
                            quantity: Some(0.5),
                        },
                    ],
                },
                StoredMeal {
                    id: "bad".to_string(),
                    name: "Broken Meal".to_string(),
                    price_net_override: None,
                    ingredients: vec![IngredientRef {
                        ingredient_id: "unicorn".to_string(),
                        quantity: Some(1.0),
                    }],
                },
            ],
            packets: vec![StoredPacket {
                id: "lunch".to_string(),
                name: "Lunch Box".to_string(),
                price_net_override: None,
                meals: vec![
                    MealRef {
                        meal_id: "curry".to_string(),
                        quantity: Some(2.0),
                    },
                    MealRef {
                        meal_id: "missing".to_string(),
                        quantity: Some(1.0),
                    },
                ],
            }],
            services: vec![ServiceRecord {
                id: "waiter".to_string(),
                name: "Waiter".to_string(),
                price_net: 25.0,
            }],
        }
    }

    #[test]
    fn test_meal_resolution() {
        let manager = CatalogManager::new(sample_catalog());
        let meal = manager.meal("curry").unwrap();
        assert_eq!(meal.ingredient_usages.len(), 2);
        assert!((meal_net_price(&meal) - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_ingredient_is_skipped() {
        let manager = CatalogManager::new(sample_catalog());
        let meal = manager.meal("bad").unwrap();
        assert_eq!(meal.ingredient_usages.len(), 1);
        assert_eq!(meal_net_price(&meal), 0.0);
    }

    #[test]
    fn test_packet_drops_missing_meals() {
        let manager = CatalogManager::new(sample_catalog());
        let packet = manager.packet("lunch").unwrap();
        assert_eq!(packet.meal_usages.len(), 1);
        assert!((packet_net_price(&packet) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_cart_keeps_unresolved_rows() {
        let manager = CatalogManager::new(sample_catalog());
        let rows = vec![
            CartRow {
                id: "r1".to_string(),
                item_type: ItemType::Meal,
                item_id: "curry".to_string(),
                markup_pct: 10.0,
            },
            CartRow {
                id: "r2".to_string(),
                item_type: ItemType::Packet,
                item_id: "nope".to_string(),
                markup_pct: 0.0,
            },
        ];
        let lines = manager.resolve_cart(&rows);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].details.is_some());
        assert!(lines[1].details.is_none());
    }

    #[test]
    fn test_find_by_name_exact_and_fuzzy() {
        let manager = CatalogManager::new(sample_catalog());
        let exact = manager.find_by_name("lunch box");
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].id(), "lunch");

        let fuzzy = manager.find_by_name("chiken cury");
        assert_eq!(fuzzy.first().map(|i| i.id()), Some("curry"));
    }

    #[test]
    fn test_len() {
        let manager = CatalogManager::new(sample_catalog());
        assert_eq!(manager.len(), 4);
        assert!(!manager.is_empty());
    }
}
