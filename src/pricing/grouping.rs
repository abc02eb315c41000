use std::collections::HashMap;

use crate::models::{CartLine, CartLineKey, CatalogItem, GroupedCartLine, LinePrice};
use crate::pricing::markup::apply_markup;
use crate::pricing::net::item_net_price;

/// Per-unit price of a cart line, or `Unresolved` without catalog details.
pub fn line_price(details: Option<&CatalogItem>, markup_pct: f64) -> LinePrice {
    match details {
        Some(item) => {
            let net = item_net_price(item);
            LinePrice::Resolved {
                net,
                gross: apply_markup(net, markup_pct),
            }
        }
        None => LinePrice::Unresolved,
    }
}

/// Collapse raw cart rows into grouped lines keyed by `(item_id, markup_pct)`.
///
/// Groups appear in first-seen order. The price is computed once per group
/// from the first member that carries resolved details.
pub fn group_cart_lines(raw_lines: &[CartLine]) -> Vec<GroupedCartLine> {
    let mut index: HashMap<CartLineKey, usize> = HashMap::new();
    let mut members: Vec<Vec<&CartLine>> = Vec::new();

    for line in raw_lines {
        let key = line.key();
        match index.get(&key) {
            Some(&pos) => members[pos].push(line),
            None => {
                index.insert(key, members.len());
                members.push(vec![line]);
            }
        }
    }

    members.into_iter().map(build_group).collect()
}

fn build_group(lines: Vec<&CartLine>) -> GroupedCartLine {
    let first = lines[0];
    let details = lines.iter().find_map(|l| l.details.as_ref());

    GroupedCartLine {
        key: first.key(),
        item_type: details.map(|d| d.item_type()).unwrap_or(first.item_type),
        name: details.map(|d| d.name().to_string()),
        quantity: lines.len() as u32,
        price: line_price(details, first.markup_pct),
        raw_line_ids: lines.iter().map(|l| l.id.clone()).collect(),
    }
}
