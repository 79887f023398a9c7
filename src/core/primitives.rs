use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero at `places` decimal places.
///
/// Values outside the decimal range fall back to plain `f64` rounding.
#[must_use]
pub fn round_to_places(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or_else(|| {
            let factor = 10f64.powi(places as i32);
            (value * factor).round() / factor
        })
}

/// Formats `value` with exactly `places` fractional digits.
#[must_use]
pub fn format_fixed(value: f64, places: u32) -> String {
    match Decimal::from_f64(value) {
        Some(d) => {
            let mut rounded =
                d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(places);
            rounded.to_string()
        }
        None => format!("{value:.prec$}", prec = places as usize),
    }
}

/// Formats a local-currency amount the way storefront tables print it:
/// amounts of 1000 and above get comma thousands separators and at most three
/// fractional digits, smaller amounts print unchanged.
#[must_use]
pub fn format_local_amount(value: f64) -> String {
    if value.is_nan() || value < 1000.0 {
        return value.to_string();
    }
    let Some(d) = Decimal::from_f64(value) else {
        return value.to_string();
    };
    let text = d
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let digits = integer.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*digit));
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
