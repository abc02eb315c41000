use crate::pricing::constants::DEFAULT_VAT_RATE;

/// Configurable rates for standalone gross-price displays.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub vat_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            vat_rate: DEFAULT_VAT_RATE,
        }
    }
}

impl PricingConfig {
    /// Net price with this config's VAT applied.
    pub fn gross_with_vat(&self, net: f64) -> f64 {
        apply_vat(net, self.vat_rate)
    }
}

/// Gross price after a percentage markup: `net * (1 + markup_pct / 100)`.
///
/// Negative markups pass through and lower the price. No rounding.
#[inline]
pub fn apply_markup(net: f64, markup_pct: f64) -> f64 {
    net * (1.0 + markup_pct / 100.0)
}

/// Gross price after VAT: `net * (1 + vat_rate / 100)`.
#[inline]
pub fn apply_vat(net: f64, vat_rate: f64) -> f64 {
    net * (1.0 + vat_rate / 100.0)
}
