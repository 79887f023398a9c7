use chrono::{TimeZone, Utc};
use regional_pricing::api::{PriceSheet, parse_timestamp};
use regional_pricing::core::Storefront;
use regional_pricing::{PricingEngine, PricingEngineConfig};

const BARE_SHEET: &str = r#"[
  { "region": "US", "currency": "$", "steam": { "price": 19.99, "url": "https://store.example/us" } },
  { "region": "CN", "currency": "¥", "steam": { "price": 68, "url": "https://store.example/cn" } },
  { "region": "RU", "currency": "₽", "steam": { "price": null, "url": "https://store.example/ru" } },
  { "region": "IN", "currency": "₹", "steam": { "price": 0, "url": "https://store.example/in" } },
  { "region": "KR", "currency": "₩" }
]"#;

const WRAPPED_SHEET: &str = r#"{
  "lastUpdated": "2025-09-05T08:30:00Z",
  "dataVersion": "2.0",
  "gameStatus": "released",
  "releaseDate": "2025-09-04",
  "note": "launch prices",
  "regions": [
    {
      "region": "JP",
      "regionName": "日本",
      "currency": "¥",
      "flag": "🇯🇵",
      "eshop": { "price": 2300, "onSale": false, "salePrice": null, "url": "https://store.example/jp" },
      "metadata": { "dataSource": "official" }
    },
    { "region": "MX", "currency": "MX$", "eshop": { "price": 227.99 } }
  ]
}"#;

#[test]
fn bare_array_sheet_parses_without_metadata() {
    let sheet = PriceSheet::from_json_str(BARE_SHEET).expect("parse bare sheet");
    assert!(sheet.metadata().is_none());
    assert_eq!(sheet.records().len(), 5);
}

#[test]
fn records_without_usable_storefront_price_are_dropped() {
    let sheet = PriceSheet::from_json_str(BARE_SHEET).expect("parse bare sheet");

    let (raw, dropped) = sheet.raw_records(Storefront::Steam);
    let regions: Vec<&str> = raw.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(regions, vec!["US", "CN"]);
    assert_eq!(dropped, 3);
    assert_eq!(raw[1].currency.as_deref(), Some("¥"));
    assert_eq!(raw[1].price, 68.0);
    assert_eq!(raw[1].url, "https://store.example/cn");

    let (eshop, dropped) = sheet.raw_records(Storefront::Eshop);
    assert!(eshop.is_empty());
    assert_eq!(dropped, 5);
}

#[test]
fn wrapped_sheet_exposes_metadata_and_regions() {
    let sheet = PriceSheet::from_json_str(WRAPPED_SHEET).expect("parse wrapped sheet");
    let metadata = sheet.metadata().expect("metadata");
    assert_eq!(
        metadata.last_updated,
        Some(Utc.with_ymd_and_hms(2025, 9, 5, 8, 30, 0).unwrap())
    );
    assert_eq!(metadata.data_version.as_deref(), Some("2.0"));
    assert_eq!(metadata.game_status.as_deref(), Some("released"));
    assert_eq!(metadata.release_date.as_deref(), Some("2025-09-04"));
    assert_eq!(metadata.note.as_deref(), Some("launch prices"));

    let (raw, dropped) = sheet.raw_records(Storefront::Eshop);
    assert_eq!(dropped, 0);
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0].region_name.as_deref(), Some("日本"));
    assert_eq!(raw[0].flag.as_deref(), Some("🇯🇵"));
    assert_eq!(raw[1].url, "");
}

#[test]
fn malformed_json_is_invalid_data() {
    for input in ["{ \"regions\": 5 }", "{ \"note\": \"x\" }", "42", "not json"] {
        let err = PriceSheet::from_json_str(input).expect_err("bad sheet");
        assert!(
            err.to_string()
                .starts_with("invalid data: failed to parse price sheet json"),
            "input {input}"
        );
    }
}

const PARTLY_BROKEN_SHEET: &str = r#"[
  { "region": "US", "currency": "$", "steam": { "price": 19.99, "url": "https://store.example/us" } },
  { "region": "TR", "currency": "₺", "steam": { "price": "TBA" } },
  { "currency": "¥", "steam": { "price": 68 } },
  { "region": "BR", "currency": 986, "steam": { "price": 59.99 } },
  7
]"#;

#[test]
fn malformed_entries_are_skipped_and_counted() {
    let sheet = PriceSheet::from_json_str(PARTLY_BROKEN_SHEET).expect("sheet still loads");
    assert_eq!(sheet.rejected_entries(), 3);
    assert_eq!(sheet.records().len(), 2);
    assert_eq!(sheet.records()[1].region, "TR");
    assert_eq!(
        sheet.records()[1]
            .storefront_price(Storefront::Steam)
            .and_then(|entry| entry.price),
        None
    );

    let (raw, dropped) = sheet.raw_records(Storefront::Steam);
    let regions: Vec<&str> = raw.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(regions, vec!["US"]);
    assert_eq!(dropped, 4);
}

#[test]
fn malformed_entries_land_in_engine_diagnostics() {
    let engine = PricingEngine::from_json_str(PricingEngineConfig::default(), PARTLY_BROKEN_SHEET)
        .expect("engine");
    let diagnostics = engine.diagnostics();
    assert_eq!(diagnostics.total, 5);
    assert_eq!(diagnostics.missing_price, 4);
    assert_eq!(diagnostics.enriched, 1);
    assert_eq!(engine.best_deal().expect("best deal").region, "US");
}

#[test]
fn date_only_or_unreadable_last_updated_keeps_the_sheet() {
    let date_only = PriceSheet::from_json_str(
        r#"{ "lastUpdated": "2025-09-05", "regions": [ { "region": "US", "currency": "$", "eshop": { "price": 19.99 } } ] }"#,
    )
    .expect("date-only timestamp");
    assert_eq!(
        date_only.metadata().and_then(|m| m.last_updated),
        Some(Utc.with_ymd_and_hms(2025, 9, 5, 0, 0, 0).unwrap())
    );
    assert_eq!(date_only.raw_records(Storefront::Eshop).0.len(), 1);

    for value in ["\"soon\"", "1725525000", "null"] {
        let input = format!(
            r#"{{ "lastUpdated": {value}, "regions": [ {{ "region": "US", "currency": "$", "eshop": {{ "price": 19.99 }} }} ] }}"#
        );
        let sheet = PriceSheet::from_json_str(&input).expect("sheet loads");
        assert_eq!(sheet.metadata().and_then(|m| m.last_updated), None, "value {value}");
        assert_eq!(sheet.raw_records(Storefront::Eshop).0.len(), 1);
    }
}

#[test]
fn timestamps_parse_rfc3339_and_bare_dates() {
    assert_eq!(
        parse_timestamp("2025-09-05T10:30:00+02:00"),
        Some(Utc.with_ymd_and_hms(2025, 9, 5, 8, 30, 0).unwrap())
    );
    assert_eq!(
        parse_timestamp(" 2025-09-04 "),
        Some(Utc.with_ymd_and_hms(2025, 9, 4, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_timestamp("September"), None);
}

#[test]
fn storefront_price_field_matches_sheet_keys() {
    for storefront in [Storefront::Steam, Storefront::Eshop] {
        let key = serde_json::to_string(&storefront).expect("serialize storefront");
        assert_eq!(key, format!("\"{}\"", storefront.price_field()));
    }
}
