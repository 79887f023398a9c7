use serde::{Deserialize, Serialize};

use crate::core::{
    CanonicalCurrency, EnrichedPriceRecord, RateTable, RawPriceRecord, resolve_detailed,
};
use crate::error::{PricingError, PricingResult};

/// Reference-currency price of the home region that savings are measured
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Baseline(f64);

impl Baseline {
    pub const DEFAULT_USD: f64 = 19.99;

    pub fn new(value: f64) -> PricingResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(PricingError::InvalidBaseline { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Baseline {
    fn default() -> Self {
        Self(Self::DEFAULT_USD)
    }
}

impl TryFrom<f64> for Baseline {
    type Error = PricingError;

    fn try_from(value: f64) -> PricingResult<Self> {
        Self::new(value)
    }
}

impl From<Baseline> for f64 {
    fn from(baseline: Baseline) -> Self {
        baseline.0
    }
}

/// Converts a local amount into the reference currency.
///
/// USD amounts are returned untouched rather than multiplied by `1.0`.
pub fn to_reference(
    amount: f64,
    currency: CanonicalCurrency,
    rates: &RateTable,
) -> PricingResult<f64> {
    if currency.is_reference() {
        return Ok(amount);
    }
    Ok(amount * rates.rate_for(currency)?)
}

/// Savings against `baseline`, clamped at zero.
#[must_use]
pub fn savings_against(reference_price: f64, baseline: Baseline) -> f64 {
    (baseline.value() - reference_price).max(0.0)
}

/// Resolves the record's currency and attaches its reference price and
/// savings.
///
/// Records without a finite positive price are rejected; callers are expected
/// to filter them out beforehand.
pub fn enrich(
    record: RawPriceRecord,
    rates: &RateTable,
    baseline: Baseline,
) -> PricingResult<EnrichedPriceRecord> {
    let resolution = resolve_detailed(record.currency_token(), &record.region, record.price);
    enrich_as(record, resolution.currency, rates, baseline)
}

/// Same as [`enrich`] with the currency already resolved.
pub fn enrich_as(
    record: RawPriceRecord,
    currency: CanonicalCurrency,
    rates: &RateTable,
    baseline: Baseline,
) -> PricingResult<EnrichedPriceRecord> {
    if !record.has_usable_price() {
        return Err(PricingError::InvalidData(format!(
            "price for region {} must be finite and > 0",
            record.region
        )));
    }

    let reference_price = to_reference(record.price, currency, rates)?;
    let savings = savings_against(reference_price, baseline);
    Ok(EnrichedPriceRecord::from_parts(
        record,
        currency,
        reference_price,
        savings,
    ))
}
