pub mod constants;
pub mod grouping;
pub mod markup;
pub mod net;
pub mod summary;

pub use constants::*;
pub use grouping::{group_cart_lines, line_price};
pub use markup::{apply_markup, apply_vat, PricingConfig};
pub use net::{
    effective_override, item_net_breakdown, item_net_price, meal_net_breakdown, meal_net_price,
    packet_net_breakdown, packet_net_price, service_net_breakdown, NetBreakdown, PriceSource,
};
pub use summary::summarize;
