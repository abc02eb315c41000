pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod pricing;

pub use error::{CostingError, Result};
pub use models::{CartLine, CartSummary, CatalogItem, GroupedCartLine, MealRecord, PacketRecord};
