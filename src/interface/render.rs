use crate::models::{CartSummary, CatalogItem, GroupedCartLine, LinePrice};
use crate::pricing::constants::{DISPLAY_DECIMALS, PRICE_PENDING, PRICE_UNAVAILABLE};
use crate::pricing::{effective_override, item_net_price, PricingConfig};

/// Round a price to display precision.
pub fn round_to_cents(value: f64) -> f64 {
    let factor = 10_f64.powi(DISPLAY_DECIMALS as i32);
    (value * factor).round() / factor
}

/// Format a price with two decimals.
pub fn format_price(value: f64) -> String {
    format!("{:.2}", round_to_cents(value))
}

/// Signed markup percentage, e.g. "+12.50%" or "-10.00%".
pub fn format_markup(markup_pct: f64) -> String {
    format!("{:+.2}%", markup_pct)
}

/// "override 12.50" when an override is in effect, otherwise "computed".
pub fn override_label(price_net_override: Option<f64>) -> String {
    match effective_override(price_net_override) {
        Some(price) => format!("override {}", format_price(price)),
        None => "computed".to_string(),
    }
}

/// Net price text for an item; "price unavailable" when there is no override
/// and nothing to compute from.
pub fn net_price_label(item: &CatalogItem) -> String {
    if effective_override(item.price_net_override()).is_none() && !item.has_components() {
        return PRICE_UNAVAILABLE.to_string();
    }
    format_price(item_net_price(item))
}

fn line_price_cells(price: &LinePrice, quantity: u32) -> (String, String, String) {
    match price {
        LinePrice::Resolved { net, gross } => (
            format_price(*net),
            format_price(*gross),
            format_price(gross * f64::from(quantity)),
        ),
        LinePrice::Unresolved => (
            PRICE_PENDING.to_string(),
            PRICE_PENDING.to_string(),
            PRICE_PENDING.to_string(),
        ),
    }
}

/// Display the grouped cart and its summary.
pub fn display_quote(lines: &[GroupedCartLine], summary: &CartSummary) {
    if lines.is_empty() {
        println!("Cart is empty.");
        return;
    }

    println!();
    println!("=== Quote ===");
    println!();

    let max_name_len = lines
        .iter()
        .map(|l| l.name.as_deref().unwrap_or(l.item_id()).len())
        .max()
        .unwrap_or(10);

    for (i, line) in lines.iter().enumerate() {
        let name = line.name.as_deref().unwrap_or(line.item_id());
        let (net, gross, total) = line_price_cells(&line.price, line.quantity);

        println!(
            "{:>3}. {:<width$} [{:<7}] {:>3} x net {:>9} | {:>8} => {:>9} | {:>10}",
            i + 1,
            name,
            line.item_type.as_str(),
            line.quantity,
            net,
            format_markup(line.markup_pct()),
            gross,
            total,
            width = max_name_len
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Net total:   {}", format_price(summary.netto_total));
    println!("Gross total: {}", format_price(summary.brutto_total));
    println!("Avg markup:  {:.2}%", summary.avg_markup_pct);
    if summary.unresolved_lines > 0 {
        println!(
            "{} line(s) {} and not included in totals.",
            summary.unresolved_lines, PRICE_PENDING
        );
    }
    println!();
}

/// Display catalog items with net and VAT-inclusive prices.
pub fn display_item_list(items: &[CatalogItem], config: &PricingConfig) {
    if items.is_empty() {
        println!("Catalog: (none)");
        return;
    }

    println!();
    println!("=== Catalog ({} items, VAT {}%) ===", items.len(), config.vat_rate);
    println!();

    for item in items {
        let net = net_price_label(item);
        let gross = if net == PRICE_UNAVAILABLE {
            PRICE_UNAVAILABLE.to_string()
        } else {
            format_price(config.gross_with_vat(item_net_price(item)))
        };
        println!(
            "  [{}] {} ({}) - net {}, gross {}, {}",
            item.item_type(),
            item.name(),
            item.id(),
            net,
            gross,
            override_label(item.price_net_override())
        );
    }

    println!();
}

/// Display one catalog item in detail.
pub fn display_item_price(item: &CatalogItem, config: &PricingConfig) {
    println!();
    println!("{} ({} {})", item.name(), item.item_type(), item.id());
    println!("  Net:   {}", net_price_label(item));
    if item.has_components() || effective_override(item.price_net_override()).is_some() {
        println!(
            "  Gross: {} (VAT {}%)",
            format_price(config.gross_with_vat(item_net_price(item))),
            config.vat_rate
        );
    }
    println!("  Price: {}", override_label(item.price_net_override()));
    println!();
}
