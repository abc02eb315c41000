use crate::models::{CartSummary, GroupedCartLine, LinePrice};
use crate::pricing::markup::apply_markup;

/// Cart-wide totals and net-weighted average markup.
///
/// Each line contributes `net * quantity` to the net total and
/// `apply_markup(net, markup) * quantity` to the gross total. The average
/// markup is weighted by each line's net contribution, not by unit count:
/// `Σ(markup_i * item_net_i) / Σ item_net_i`, or `0` when the net total is `0`
/// or not finite.
///
/// Unresolved lines are left out of the totals and counted in
/// `unresolved_lines`.
pub fn summarize(grouped_lines: &[GroupedCartLine]) -> CartSummary {
    let mut netto_total = 0.0;
    let mut brutto_total = 0.0;
    let mut weighted_markup = 0.0;
    let mut unresolved_lines = 0;

    for line in grouped_lines {
        let LinePrice::Resolved { net, .. } = line.price else {
            unresolved_lines += 1;
            continue;
        };

        let net = net.max(0.0);
        let quantity = f64::from(line.quantity);
        let markup_pct = line.markup_pct();

        let item_net = net * quantity;
        netto_total += item_net;
        brutto_total += apply_markup(net, markup_pct) * quantity;
        weighted_markup += markup_pct * item_net;
    }

    let avg_markup_pct = if netto_total > 0.0 && netto_total.is_finite() {
        weighted_markup / netto_total
    } else {
        0.0
    };

    CartSummary {
        netto_total,
        brutto_total,
        avg_markup_pct,
        unresolved_lines,
    }
}
