use crate::models::{CatalogItem, MealRecord, PacketRecord, ServiceRecord};

/// Where a net price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Override,
    Computed,
}

/// Net price plus the number of malformed entries that were skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetBreakdown {
    pub net: f64,
    pub skipped: usize,
    pub source: PriceSource,
}

impl NetBreakdown {
    fn overridden(net: f64) -> Self {
        Self {
            net,
            skipped: 0,
            source: PriceSource::Override,
        }
    }

    fn computed(net: f64, skipped: usize) -> Self {
        Self {
            net,
            skipped,
            source: PriceSource::Computed,
        }
    }
}

/// The override value if it counts as one: present, finite and non-negative.
///
/// Zero is a valid override.
#[inline]
pub fn effective_override(price_net_override: Option<f64>) -> Option<f64> {
    price_net_override.filter(|v| v.is_finite() && *v >= 0.0)
}

#[inline]
fn clamp_non_negative(value: f64) -> f64 {
    value.max(0.0)
}

/// Net price of a meal with a count of skipped ingredient entries.
pub fn meal_net_breakdown(meal: &MealRecord) -> NetBreakdown {
    if let Some(price) = effective_override(meal.price_net_override) {
        return NetBreakdown::overridden(price);
    }

    let mut net = 0.0;
    let mut skipped = 0;
    for usage in &meal.ingredient_usages {
        match usage.numeric_fields() {
            Some((price, quantity)) => {
                net += clamp_non_negative(price) * clamp_non_negative(quantity);
            }
            None => skipped += 1,
        }
    }

    NetBreakdown::computed(net, skipped)
}

/// Net price of one unit of a meal.
///
/// An effective override wins; otherwise the quantity-weighted ingredient sum.
pub fn meal_net_price(meal: &MealRecord) -> f64 {
    meal_net_breakdown(meal).net
}

/// Net price of a packet with a count of skipped entries, nested meal
/// ingredient entries included.
pub fn packet_net_breakdown(packet: &PacketRecord) -> NetBreakdown {
    if let Some(price) = effective_override(packet.price_net_override) {
        return NetBreakdown::overridden(price);
    }

    let mut net = 0.0;
    let mut skipped = 0;
    for usage in &packet.meal_usages {
        let Some(quantity) = usage.quantity.filter(|q| q.is_finite()) else {
            skipped += 1;
            continue;
        };
        let meal = meal_net_breakdown(&usage.meal);
        skipped += meal.skipped;
        net += meal.net * clamp_non_negative(quantity);
    }

    NetBreakdown::computed(net, skipped)
}

/// Net price of one unit of a packet.
pub fn packet_net_price(packet: &PacketRecord) -> f64 {
    packet_net_breakdown(packet).net
}

/// Net price of a service; a non-finite price counts as malformed.
pub fn service_net_breakdown(service: &ServiceRecord) -> NetBreakdown {
    if service.price_net.is_finite() {
        NetBreakdown::computed(clamp_non_negative(service.price_net), 0)
    } else {
        NetBreakdown::computed(0.0, 1)
    }
}

pub fn item_net_breakdown(item: &CatalogItem) -> NetBreakdown {
    match item {
        CatalogItem::Meal(meal) => meal_net_breakdown(meal),
        CatalogItem::Packet(packet) => packet_net_breakdown(packet),
        CatalogItem::Service(service) => service_net_breakdown(service),
    }
}

/// Net price of one unit of any catalog item.
pub fn item_net_price(item: &CatalogItem) -> f64 {
    item_net_breakdown(item).net
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IngredientCost, IngredientUsage, PacketMealUsage};

    fn usage(id: &str, price: f64, quantity: f64) -> IngredientUsage {
        IngredientUsage::new(IngredientCost::new(id, "kg", price), quantity)
    }

    #[test]
    fn test_meal_sum_of_ingredients() {
        let meal = MealRecord::new(
            "stew",
            vec![usage("beef", 12.0, 0.25), usage("carrot", 2.0, 0.5)],
        );
        assert!((meal_net_price(&meal) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_meal_empty_is_zero() {
        let meal = MealRecord::new("air", vec![]);
        assert_eq!(meal_net_price(&meal), 0.0);
    }

    #[test]
    fn test_meal_override_wins() {
        let meal = MealRecord::new("stew", vec![usage("beef", 12.0, 1.0)]).with_override(7.5);
        let breakdown = meal_net_breakdown(&meal);
        assert_eq!(breakdown.net, 7.5);
        assert_eq!(breakdown.source, PriceSource::Override);
    }

    #[test]
    fn test_meal_zero_override_beats_sum() {
        let meal = MealRecord::new("free", vec![usage("x", 5.0, 2.0)]).with_override(0.0);
        assert_eq!(meal_net_price(&meal), 0.0);
    }

    #[test]
    fn test_meal_negative_override_falls_through() {
        let meal = MealRecord::new("m", vec![usage("x", 5.0, 2.0)]).with_override(-1.0);
        let breakdown = meal_net_breakdown(&meal);
        assert_eq!(breakdown.net, 10.0);
        assert_eq!(breakdown.source, PriceSource::Computed);
    }

    #[test]
    fn test_meal_negative_values_clamped() {
        let meal = MealRecord::new(
            "m",
            vec![usage("a", -3.0, 2.0), usage("b", 4.0, -1.0), usage("c", 1.0, 1.0)],
        );
        assert_eq!(meal_net_price(&meal), 1.0);
    }

    #[test]
    fn test_meal_skips_malformed_entries() {
        let mut missing = usage("a", 3.0, 1.0);
        missing.quantity = None;
        let meal = MealRecord::new("m", vec![missing, usage("b", 2.0, 2.0)]);
        let breakdown = meal_net_breakdown(&meal);
        assert_eq!(breakdown.net, 4.0);
        assert_eq!(breakdown.skipped, 1);
    }

    #[test]
    fn test_packet_composes_meals() {
        let meal = MealRecord::new("m", vec![usage("a", 1.5, 3.0)]); // 4.50
        let packet = PacketRecord::new("p", vec![PacketMealUsage::new(meal, 3.0)]);
        assert!((packet_net_price(&packet) - 13.5).abs() < 1e-9);
    }

    #[test]
    fn test_packet_uses_meal_override() {
        let meal = MealRecord::new("m", vec![usage("a", 100.0, 1.0)]).with_override(2.0);
        let packet = PacketRecord::new("p", vec![PacketMealUsage::new(meal, 4.0)]);
        assert_eq!(packet_net_price(&packet), 8.0);
    }

    #[test]
    fn test_packet_override_wins() {
        let meal = MealRecord::new("m", vec![usage("a", 1.0, 1.0)]);
        let packet =
            PacketRecord::new("p", vec![PacketMealUsage::new(meal, 10.0)]).with_override(0.0);
        assert_eq!(packet_net_price(&packet), 0.0);
    }

    #[test]
    fn test_packet_skips_missing_quantity_and_counts_nested() {
        let mut bad_usage = usage("a", 1.0, 1.0);
        bad_usage.ingredient.price_net = None;
        let nested = MealRecord::new("m1", vec![bad_usage, usage("b", 2.0, 1.0)]);
        let mut no_qty =
            PacketMealUsage::new(MealRecord::new("m2", vec![usage("c", 9.0, 1.0)]), 1.0);
        no_qty.quantity = None;

        let packet = PacketRecord::new("p", vec![PacketMealUsage::new(nested, 2.0), no_qty]);
        let breakdown = packet_net_breakdown(&packet);
        assert_eq!(breakdown.net, 4.0);
        assert_eq!(breakdown.skipped, 2);
    }

    #[test]
    fn test_packet_negative_meal_quantity_contributes_zero() {
        let meal = MealRecord::new("m", vec![usage("a", 2.0, 1.0)]);
        let packet = PacketRecord::new(
            "p",
            vec![
                PacketMealUsage::new(meal.clone(), -3.0),
                PacketMealUsage::new(meal, 1.0),
            ],
        );
        let breakdown = packet_net_breakdown(&packet);
        assert_eq!(breakdown.net, 2.0);
        assert_eq!(breakdown.skipped, 0);
    }

    #[test]
    fn test_packet_nan_meal_quantity_is_skipped() {
        let meal = MealRecord::new("m", vec![usage("a", 2.0, 1.0)]);
        let mut nan_usage = PacketMealUsage::new(meal.clone(), 1.0);
        nan_usage.quantity = Some(f64::NAN);

        let packet = PacketRecord::new("p", vec![nan_usage, PacketMealUsage::new(meal, 2.0)]);
        let breakdown = packet_net_breakdown(&packet);
        assert_eq!(breakdown.net, 4.0);
        assert_eq!(breakdown.skipped, 1);
    }

    #[test]
    fn test_packet_empty_is_zero() {
        assert_eq!(packet_net_price(&PacketRecord::new("p", vec![])), 0.0);
    }

    #[test]
    fn test_service_price_clamped() {
        let service = ServiceRecord {
            id: "s".to_string(),
            name: "Waiter".to_string(),
            price_net: -5.0,
        };
        assert_eq!(item_net_price(&CatalogItem::Service(service)), 0.0);
    }
}
