use std::path::Path;

use crate::error::Result;
use crate::interface::render::format_price;
use crate::models::{CartSummary, GroupedCartLine};
use crate::pricing::constants::PRICE_PENDING;

/// Write the quote to a CSV file: one row per grouped line plus a totals row.
pub fn write_quote_csv(lines: &[GroupedCartLine], summary: &CartSummary, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "position",
        "item_type",
        "item_id",
        "name",
        "quantity",
        "markup_pct",
        "unit_net",
        "unit_gross",
        "line_net",
        "line_gross",
    ])?;

    for (i, line) in lines.iter().enumerate() {
        let quantity = f64::from(line.quantity);
        let cell = |value: Option<f64>| {
            value
                .map(format_price)
                .unwrap_or_else(|| PRICE_PENDING.to_string())
        };

        wtr.write_record([
            (i + 1).to_string(),
            line.item_type.to_string(),
            line.item_id().to_string(),
            line.name.clone().unwrap_or_default(),
            line.quantity.to_string(),
            format!("{:.2}", line.markup_pct()),
            cell(line.price.net()),
            cell(line.price.gross()),
            cell(line.price.net().map(|n| n * quantity)),
            cell(line.price.gross().map(|g| g * quantity)),
        ])?;
    }

    wtr.write_record([
        String::new(),
        "total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.2}", summary.avg_markup_pct),
        String::new(),
        String::new(),
        format_price(summary.netto_total),
        format_price(summary.brutto_total),
    ])?;

    wtr.flush()?;
    Ok(())
}
