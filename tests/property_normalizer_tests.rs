use proptest::prelude::*;
use regional_pricing::core::{
    Baseline, CanonicalCurrency, RateTable, RawPriceRecord, enrich, resolve,
};

const REGIONS: [&str; 10] = ["US", "AR", "MX", "TR", "BR", "CN", "JP", "IN", "KR", "RU"];
const TOKENS: [&str; 12] = [
    "$", "¥", "€", "£", "₺", "₽", "R$", "₹", "₩", "USD", "", "zł",
];

proptest! {
    #[test]
    fn enriched_prices_and_savings_are_never_negative(
        region in prop::sample::select(REGIONS.to_vec()),
        token in prop::sample::select(TOKENS.to_vec()),
        price in 0.01f64..1_000_000.0,
        baseline in 0.5f64..200.0
    ) {
        let baseline = Baseline::new(baseline).expect("valid baseline");
        let record = enrich(
            RawPriceRecord::new(region, token, price, ""),
            &RateTable::steam_snapshot(),
            baseline,
        )
        .expect("every generated currency has a steam rate");

        prop_assert!(record.reference_price() >= 0.0);
        prop_assert!(record.savings() >= 0.0);
        prop_assert_eq!(
            record.savings(),
            (baseline.value() - record.reference_price()).max(0.0)
        );
        prop_assert_eq!(record.currency(), resolve(token, region, price));
        prop_assert_eq!(record.raw_price(), price);
    }

    #[test]
    fn usd_amounts_pass_through_unchanged(price in 0.01f64..1_000_000.0) {
        let record = enrich(
            RawPriceRecord::new("US", "USD", price, ""),
            &RateTable::eshop_snapshot(),
            Baseline::default(),
        )
        .expect("usd always has a rate");

        prop_assert_eq!(record.currency(), CanonicalCurrency::Usd);
        prop_assert_eq!(record.reference_price(), price);
    }

    #[test]
    fn yen_symbol_is_jpy_in_japan_or_above_threshold(
        region in prop::sample::select(REGIONS.to_vec()),
        price in 0.01f64..100_000.0
    ) {
        let currency = resolve("¥", region, price);
        let expected = if region == "JP" || price > 1000.0 {
            CanonicalCurrency::Jpy
        } else {
            CanonicalCurrency::Cny
        };
        prop_assert_eq!(currency, expected);
    }
}
