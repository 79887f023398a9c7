use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// `¥` prices strictly above this magnitude resolve to JPY outside Japan.
pub const YEN_MAGNITUDE_THRESHOLD: f64 = 1000.0;

/// Closed set of currencies the engine recognizes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CanonicalCurrency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cny,
    Krw,
    Inr,
    Brl,
    Ars,
    Try,
    Rub,
    Mxn,
    Cad,
    Aud,
    Hkd,
}

impl CanonicalCurrency {
    /// Currency every price is normalized to.
    pub const REFERENCE: Self = Self::Usd;

    pub const ALL: [Self; 15] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Jpy,
        Self::Cny,
        Self::Krw,
        Self::Inr,
        Self::Brl,
        Self::Ars,
        Self::Try,
        Self::Rub,
        Self::Mxn,
        Self::Cad,
        Self::Aud,
        Self::Hkd,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Cny => "CNY",
            Self::Krw => "KRW",
            Self::Inr => "INR",
            Self::Brl => "BRL",
            Self::Ars => "ARS",
            Self::Try => "TRY",
            Self::Rub => "RUB",
            Self::Mxn => "MXN",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Hkd => "HKD",
        }
    }

    #[must_use]
    pub fn is_reference(self) -> bool {
        self == Self::REFERENCE
    }
}

impl fmt::Display for CanonicalCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CanonicalCurrency {
    type Err = PricingError;

    fn from_str(s: &str) -> PricingResult<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PricingError::InvalidData(format!("unknown currency code: {trimmed}")))
    }
}

/// How a currency token was turned into a [`CanonicalCurrency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionSource {
    /// Unambiguous symbol, or the default reading of an ambiguous one.
    Symbol,
    /// Token was an ISO 4217 code.
    IsoCode,
    /// Ambiguous symbol decided by the record's region code.
    RegionLookup,
    /// `¥` decided by price magnitude.
    Magnitude,
    /// Empty token; prices without a token are implicitly USD.
    ImplicitDefault,
    /// Unrecognized token mapped to USD.
    UnrecognizedFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyResolution {
    pub currency: CanonicalCurrency,
    pub source: ResolutionSource,
}

impl CurrencyResolution {
    #[must_use]
    pub fn new(currency: CanonicalCurrency, source: ResolutionSource) -> Self {
        Self { currency, source }
    }

    /// Returns `true` when the token was not recognized and USD was assumed.
    #[must_use]
    pub fn is_fallback(self) -> bool {
        self.source == ResolutionSource::UnrecognizedFallback
    }
}

/// Resolves a raw currency token to its canonical currency.
///
/// Never fails: empty and unrecognized tokens resolve to USD. Use
/// [`resolve_detailed`] to tell those cases apart from a real USD price.
#[must_use]
pub fn resolve(token: &str, region_code: &str, raw_price: f64) -> CanonicalCurrency {
    resolve_detailed(token, region_code, raw_price).currency
}

#[must_use]
pub fn resolve_detailed(token: &str, region_code: &str, raw_price: f64) -> CurrencyResolution {
    let token = token.trim();
    let region_code = region_code.trim();

    if token.is_empty() {
        return CurrencyResolution::new(CanonicalCurrency::Usd, ResolutionSource::ImplicitDefault);
    }

    match token {
        "¥" | "￥" => resolve_yen_symbol(region_code, raw_price),
        "$" => resolve_dollar_symbol(region_code),
        _ => {
            if let Some(currency) = symbol_currency(token) {
                CurrencyResolution::new(currency, ResolutionSource::Symbol)
            } else if let Ok(currency) = token.parse::<CanonicalCurrency>() {
                CurrencyResolution::new(currency, ResolutionSource::IsoCode)
            } else {
                CurrencyResolution::new(
                    CanonicalCurrency::Usd,
                    ResolutionSource::UnrecognizedFallback,
                )
            }
        }
    }
}

// JPY prices are large integers while CNY prices are small decimals; the
// magnitude check stands in for the missing region.
fn resolve_yen_symbol(region_code: &str, raw_price: f64) -> CurrencyResolution {
    if region_code.eq_ignore_ascii_case("JP") {
        CurrencyResolution::new(CanonicalCurrency::Jpy, ResolutionSource::RegionLookup)
    } else if raw_price > YEN_MAGNITUDE_THRESHOLD {
        CurrencyResolution::new(CanonicalCurrency::Jpy, ResolutionSource::Magnitude)
    } else {
        CurrencyResolution::new(CanonicalCurrency::Cny, ResolutionSource::Symbol)
    }
}

fn resolve_dollar_symbol(region_code: &str) -> CurrencyResolution {
    match dollar_region_currency(region_code) {
        Some(currency) => CurrencyResolution::new(currency, ResolutionSource::RegionLookup),
        None => CurrencyResolution::new(CanonicalCurrency::Usd, ResolutionSource::Symbol),
    }
}

/// Currency a bare `$` denotes in the given region, if the region is known.
#[must_use]
pub fn dollar_region_currency(region_code: &str) -> Option<CanonicalCurrency> {
    match region_code.to_ascii_uppercase().as_str() {
        "US" => Some(CanonicalCurrency::Usd),
        "CA" => Some(CanonicalCurrency::Cad),
        "MX" => Some(CanonicalCurrency::Mxn),
        "AU" => Some(CanonicalCurrency::Aud),
        "AR" => Some(CanonicalCurrency::Ars),
        "HK" => Some(CanonicalCurrency::Hkd),
        _ => None,
    }
}

fn symbol_currency(token: &str) -> Option<CanonicalCurrency> {
    let currency = match token {
        "US$" => CanonicalCurrency::Usd,
        "€" => CanonicalCurrency::Eur,
        "£" => CanonicalCurrency::Gbp,
        "₩" => CanonicalCurrency::Krw,
        "₹" => CanonicalCurrency::Inr,
        "R$" => CanonicalCurrency::Brl,
        "ARS$" => CanonicalCurrency::Ars,
        "₺" => CanonicalCurrency::Try,
        "₽" => CanonicalCurrency::Rub,
        "MX$" => CanonicalCurrency::Mxn,
        "CAD$" | "CA$" | "C$" => CanonicalCurrency::Cad,
        "AUD$" | "A$" => CanonicalCurrency::Aud,
        "HK$" => CanonicalCurrency::Hkd,
        _ => return None,
    };
    Some(currency)
}
