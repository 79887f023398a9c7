use approx::assert_abs_diff_eq;
use regional_pricing::PricingError;
use regional_pricing::core::{
    Baseline, CanonicalCurrency, RateTable, RawPriceRecord, enrich, enrich_as, savings_against,
    to_reference,
};

#[test]
fn argentina_above_baseline_records_zero_savings() {
    let rates = RateTable::steam_snapshot();
    let record = RawPriceRecord::new("AR", "$", 18999.0, "https://store.example/ar");

    let enriched = enrich(record, &rates, Baseline::default()).expect("enrich");
    assert_eq!(enriched.currency(), CanonicalCurrency::Ars);
    assert_abs_diff_eq!(enriched.reference_price(), 20.8989, epsilon = 1e-9);
    assert_eq!(enriched.savings(), 0.0);
}

#[test]
fn turkey_below_baseline_records_savings() {
    let rates = RateTable::steam_snapshot();
    let record = RawPriceRecord::new("TR", "₺", 399.99, "https://store.example/tr");

    let enriched = enrich(record, &rates, Baseline::default()).expect("enrich");
    assert_eq!(enriched.currency(), CanonicalCurrency::Try);
    assert_abs_diff_eq!(enriched.reference_price(), 11.9997, epsilon = 1e-9);
    assert_abs_diff_eq!(enriched.savings(), 7.9903, epsilon = 1e-9);
}

#[test]
fn usd_prices_skip_conversion() {
    let rates = RateTable::steam_snapshot();
    let record = RawPriceRecord::new("US", "$", 19.99, "https://store.example/us");

    let enriched = enrich(record, &rates, Baseline::default()).expect("enrich");
    assert_eq!(enriched.reference_price(), 19.99);
    assert_eq!(enriched.savings(), 0.0);
    assert_eq!(
        to_reference(12.345, CanonicalCurrency::Usd, &rates),
        Ok(12.345)
    );
}

#[test]
fn enrichment_keeps_raw_fields() {
    let rates = RateTable::eshop_snapshot();
    let record = RawPriceRecord::new("JP", "¥", 2300.0, "https://store.example/jp")
        .with_region_name("日本")
        .with_flag("🇯🇵");

    let enriched = enrich(record.clone(), &rates, Baseline::default()).expect("enrich");
    assert_eq!(enriched.raw(), &record);
    assert_eq!(enriched.region(), "JP");
    assert_eq!(enriched.currency_token(), "¥");
    assert_eq!(enriched.region_name(), Some("日本"));
    assert_eq!(enriched.flag(), Some("🇯🇵"));
    assert_abs_diff_eq!(enriched.reference_price(), 15.571, epsilon = 1e-9);
    assert_eq!(enriched.into_raw(), record);
}

#[test]
fn currency_without_rate_is_unknown_currency() {
    let rates = RateTable::eshop_snapshot();
    let record = RawPriceRecord::new("HK", "HK$", 148.0, "https://store.example/hk");

    let err = enrich(record, &rates, Baseline::default()).expect_err("no HKD rate");
    assert_eq!(
        err,
        PricingError::UnknownCurrency {
            currency: CanonicalCurrency::Hkd
        }
    );
}

#[test]
fn unusable_prices_are_rejected() {
    let rates = RateTable::steam_snapshot();
    for price in [0.0, -4.0, f64::NAN] {
        let record = RawPriceRecord::new("US", "$", price, "");
        let err = enrich_as(record, CanonicalCurrency::Usd, &rates, Baseline::default())
            .expect_err("unusable price");
        assert!(matches!(err, PricingError::InvalidData(_)));
    }
}

#[test]
fn savings_never_go_negative() {
    let baseline = Baseline::new(10.0).expect("baseline");
    assert_eq!(savings_against(12.5, baseline), 0.0);
    assert_eq!(savings_against(10.0, baseline), 0.0);
    assert_abs_diff_eq!(savings_against(7.5, baseline), 2.5, epsilon = 1e-12);
}

#[test]
fn baseline_must_be_positive_and_finite() {
    assert!(Baseline::new(0.0).is_err());
    assert!(Baseline::new(-19.99).is_err());
    assert!(Baseline::new(f64::INFINITY).is_err());
    assert_eq!(Baseline::default().value(), 19.99);
    assert!(serde_json::from_str::<Baseline>("-1.0").is_err());
    assert_eq!(
        serde_json::from_str::<Baseline>("29.99")
            .ok()
            .map(Baseline::value),
        Some(29.99)
    );
}

#[test]
fn custom_baseline_changes_savings() {
    let rates = RateTable::steam_snapshot();
    let baseline = Baseline::new(29.99).expect("baseline");
    let record = RawPriceRecord::new("US", "$", 19.99, "");

    let enriched = enrich(record, &rates, baseline).expect("enrich");
    assert_abs_diff_eq!(enriched.savings(), 10.0, epsilon = 1e-9);
}
