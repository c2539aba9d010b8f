// src/tests/payload_json_tests.rs

use super::utils::{fixed_clock, sale};
use crate::domain::{EnrichedSale, MarketStats, VehicleIdentity, VehiclePayload};
use crate::market::assemble_snapshot;
use crate::output::write_snapshot;
use serde_json::{json, Value};

fn payload() -> VehiclePayload {
    let sold = sale("bring_a_trailer", "2024-01-01", 100_000.0, "USD", "http://x/1")
        .with_auction_house("Bring a Trailer");
    let unconverted = sale("classic_com", "2023-02-02", 90_000.0, "CHF", "http://y/2");

    VehiclePayload {
        identity: VehicleIdentity {
            display_name: "Ferrari 308 GTS".to_string(),
            year: 1979,
            make: "Ferrari".to_string(),
            model: "308".to_string(),
            variant: Some("GTS".to_string()),
        },
        stats: MarketStats {
            avg_price_1y_usd: 100_000.0,
            sample_size_1y: 1,
            last_sale_price_usd: Some(100_000.0),
            last_sale_date: Some("2024-01-01".to_string()),
        },
        sales_5y: vec![
            EnrichedSale::new(&sold, Some(100_000.0)),
            EnrichedSale::new(&unconverted, None),
        ],
    }
}

#[test]
fn vehicle_payload_matches_the_wire_format() {
    let value = serde_json::to_value(payload()).unwrap();

    assert_eq!(
        value,
        json!({
            "vehicle_name": "Ferrari 308 GTS",
            "vehicle_year": 1979,
            "stats": {
                "avg_price_1y_usd": 100000.0,
                "sample_size_1y": 1,
                "last_sale_price_usd": 100000.0,
                "last_sale_date": "2024-01-01"
            },
            "sales_5y": [
                {
                    "sale_date": "2024-01-01",
                    "price": 100000.0,
                    "currency": "USD",
                    "price_usd": 100000.0,
                    "source": "bring_a_trailer",
                    "auction_house": "Bring a Trailer",
                    "location": null,
                    "url": "http://x/1"
                },
                {
                    "sale_date": "2023-02-02",
                    "price": 90000.0,
                    "currency": "CHF",
                    "price_usd": null,
                    "source": "classic_com",
                    "auction_house": null,
                    "location": null,
                    "url": "http://y/2"
                }
            ]
        })
    );
}

#[test]
fn empty_stats_serialize_as_zero_and_nulls() {
    let value = serde_json::to_value(MarketStats::empty()).unwrap();

    assert_eq!(
        value,
        json!({
            "avg_price_1y_usd": 0.0,
            "sample_size_1y": 0,
            "last_sale_price_usd": null,
            "last_sale_date": null
        })
    );
}

#[test]
fn sale_fields_keep_published_order() {
    let text = serde_json::to_string(&payload().sales_5y[0]).unwrap();
    let keys = [
        "sale_date",
        "price",
        "currency",
        "price_usd",
        "source",
        "auction_house",
        "location",
        "url",
    ];

    let positions: Vec<_> = keys
        .iter()
        .map(|k| text.find(&format!("\"{k}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn snapshot_carries_timestamp_and_count() {
    let snapshot = assemble_snapshot(vec![payload(), payload()], fixed_clock().captured_at()).unwrap();
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["generated_at"], "2024-06-01T12:00:00.000000Z");
    assert_eq!(value["vehicle_count"], 2);
    assert_eq!(value["vehicles"].as_array().unwrap().len(), 2);
    assert_eq!(value["vehicles"][1]["vehicle_name"], "Ferrari 308 GTS");
}

#[test]
fn snapshot_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = assemble_snapshot(vec![payload()], fixed_clock().captured_at()).unwrap();

    let path = write_snapshot(dir.path(), &snapshot).unwrap();
    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

    assert_eq!(on_disk, serde_json::to_value(&snapshot).unwrap());
}
