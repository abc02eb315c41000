mod cart;
mod catalog;
mod ingredient;

pub use cart::{CartLine, CartLineKey, CartRow, CartSummary, GroupedCartLine, LinePrice};
pub use catalog::{
    CatalogFile, CatalogItem, IngredientRef, ItemType, MealRecord, MealRef, PacketMealUsage,
    PacketRecord, ServiceRecord, StoredMeal, StoredPacket,
};
pub use ingredient::{IngredientCost, IngredientUsage};
