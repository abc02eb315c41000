mod cart;
mod manager;
mod persistence;

pub use cart::{CartEdit, CartEditor};
pub use manager::CatalogManager;
pub use persistence::{load_cart, load_catalog, open_catalog, save_cart};
