use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CanonicalCurrency, Storefront};
use crate::error::{PricingError, PricingResult};

const STEAM_RATES: [(CanonicalCurrency, f64); 12] = [
    (CanonicalCurrency::Usd, 1.00),
    (CanonicalCurrency::Ars, 0.0011),
    (CanonicalCurrency::Try, 0.030),
    (CanonicalCurrency::Rub, 0.011),
    (CanonicalCurrency::Brl, 0.18),
    (CanonicalCurrency::Inr, 0.012),
    (CanonicalCurrency::Cny, 0.14),
    (CanonicalCurrency::Eur, 1.09),
    (CanonicalCurrency::Gbp, 1.27),
    (CanonicalCurrency::Jpy, 0.0067),
    (CanonicalCurrency::Krw, 0.00076),
    (CanonicalCurrency::Mxn, 0.055),
];

const ESHOP_RATES: [(CanonicalCurrency, f64); 9] = [
    (CanonicalCurrency::Usd, 1.00),
    (CanonicalCurrency::Cad, 0.72),
    (CanonicalCurrency::Mxn, 0.0534),
    (CanonicalCurrency::Brl, 0.185),
    (CanonicalCurrency::Eur, 1.18),
    (CanonicalCurrency::Gbp, 1.35),
    (CanonicalCurrency::Jpy, 0.00677),
    (CanonicalCurrency::Krw, 0.000707),
    (CanonicalCurrency::Aud, 0.65),
];

/// Static USD multipliers per currency.
///
/// Invariants:
/// - USD is present with a rate of exactly `1.0`
/// - every rate is finite and `> 0`
/// - at most one entry per currency
///
/// `IndexMap` keeps insertion order so serialized tables stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<CanonicalCurrency, f64>",
    into = "IndexMap<CanonicalCurrency, f64>"
)]
pub struct RateTable {
    rates: IndexMap<CanonicalCurrency, f64>,
}

impl RateTable {
    /// Builds a validated table. USD is added at `1.0` when missing.
    pub fn new(
        entries: impl IntoIterator<Item = (CanonicalCurrency, f64)>,
    ) -> PricingResult<Self> {
        let mut rates = IndexMap::new();
        rates.insert(CanonicalCurrency::Usd, 1.0);
        let mut saw_usd = false;

        for (currency, rate) in entries {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(PricingError::InvalidRate { currency, rate });
            }
            if currency.is_reference() {
                if rate != 1.0 {
                    return Err(PricingError::InvalidRate { currency, rate });
                }
                if saw_usd {
                    return Err(duplicate_entry(currency));
                }
                saw_usd = true;
                continue;
            }
            if rates.insert(currency, rate).is_some() {
                return Err(duplicate_entry(currency));
            }
        }

        Ok(Self { rates })
    }

    /// Snapshot rates used for the Steam price table.
    #[must_use]
    pub fn steam_snapshot() -> Self {
        Self::from_trusted(&STEAM_RATES)
    }

    /// Snapshot rates used for the Nintendo eShop price table.
    #[must_use]
    pub fn eshop_snapshot() -> Self {
        Self::from_trusted(&ESHOP_RATES)
    }

    #[must_use]
    pub fn for_storefront(storefront: Storefront) -> Self {
        match storefront {
            Storefront::Steam => Self::steam_snapshot(),
            Storefront::Eshop => Self::eshop_snapshot(),
        }
    }

    fn from_trusted(entries: &[(CanonicalCurrency, f64)]) -> Self {
        Self {
            rates: entries.iter().copied().collect(),
        }
    }

    /// Returns the USD multiplier for `currency`.
    pub fn rate_for(&self, currency: CanonicalCurrency) -> PricingResult<f64> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or(PricingError::UnknownCurrency { currency })
    }

    #[must_use]
    pub fn contains(&self, currency: CanonicalCurrency) -> bool {
        self.rates.contains_key(&currency)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalCurrency, f64)> + '_ {
        self.rates.iter().map(|(currency, rate)| (*currency, *rate))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::steam_snapshot()
    }
}

impl TryFrom<IndexMap<CanonicalCurrency, f64>> for RateTable {
    type Error = PricingError;

    fn try_from(rates: IndexMap<CanonicalCurrency, f64>) -> PricingResult<Self> {
        Self::new(rates)
    }
}

impl From<RateTable> for IndexMap<CanonicalCurrency, f64> {
    fn from(table: RateTable) -> Self {
        table.rates
    }
}

fn duplicate_entry(currency: CanonicalCurrency) -> PricingError {
    PricingError::InvalidData(format!("duplicate exchange rate entry for {currency}"))
}
