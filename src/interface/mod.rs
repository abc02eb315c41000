pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_quote_csv;
pub use prompts::{
    parse_markup, parse_quantity, prompt_cart_line, prompt_catalog_item, prompt_edit_action,
    prompt_markup, prompt_quantity, prompt_yes_no, EditAction,
};
pub use render::{
    display_item_list, display_item_price, display_quote, format_markup, format_price,
    net_price_label, override_label, round_to_cents,
};
