use thiserror::Error;

use crate::core::CanonicalCurrency;

pub type PricingResult<T> = Result<T, PricingError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("no exchange rate configured for currency {currency}")]
    UnknownCurrency { currency: CanonicalCurrency },

    #[error("operation requires at least one price record")]
    EmptyInput,

    #[error("invalid baseline price: {value}")]
    InvalidBaseline { value: f64 },

    #[error("invalid exchange rate for {currency}: {rate}")]
    InvalidRate {
        currency: CanonicalCurrency,
        rate: f64,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
