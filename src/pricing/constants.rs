/// Default VAT rate (percent) for standalone gross-price displays.
pub const DEFAULT_VAT_RATE: f64 = 19.0;

/// Default markup (percent) for new cart rows.
pub const DEFAULT_MARKUP_PCT: f64 = 0.0;

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

/// Decimal places used when formatting prices. Never applied inside the core.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Shown when there is no override and nothing to compute a price from.
pub const PRICE_UNAVAILABLE: &str = "price unavailable";

/// Shown for grouped lines whose catalog data has not arrived.
pub const PRICE_PENDING: &str = "pending";

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;
