#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use famifarm_api::config::ServerConfig;
use famifarm_api::router::build_app_router;
use famifarm_api::state::AppState;
use famifarm_core::event::{Event, EventPayload, EventType, HarvestBasket, PackingBasket};
use famifarm_core::facility::Facility;
use famifarm_core::locale::Locale;
use famifarm_core::product::{LocalizedValue, PackageSize, Product, ProductionLine};
use famifarm_core::reporting::store::InMemoryEventStore;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_locale: Locale::En,
        db_max_connections: 1,
    }
}

/// Build the full application router over the given store, with the same
/// middleware stack production uses.
pub fn build_test_app(store: InMemoryEventStore) -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_with_header(
    app: Router,
    uri: &str,
    name: &str,
    value: &str,
) -> Response<Body> {
    let request = Request::get(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const RUCOLA: i64 = 1;
pub const BASIL: i64 = 2;
pub const LETTUCE: i64 = 10;

fn product(id: i64, en: &str, fi: &str, raw: bool) -> Product {
    Product {
        id,
        facility: Facility::Juva,
        name: vec![LocalizedValue::new("en", en), LocalizedValue::new("fi", fi)],
        is_raw_material: raw,
        is_end_product: !raw,
        is_active: true,
    }
}

fn event(id: i64, product_id: i64, day: u32, minutes: i64, payload: EventPayload) -> Event {
    let start = Utc.with_ymd_and_hms(2024, 6, day, 8, 0, 0).unwrap();
    Event {
        id,
        facility: Facility::Juva,
        product_id,
        start_time: start,
        end_time: Some(start + Duration::minutes(minutes)),
        creator_id: Uuid::nil(),
        payload,
    }
}

fn harvest(id: i64, product_id: i64, day: u32, baskets: usize) -> Event {
    event(
        id,
        product_id,
        day,
        60,
        EventPayload::Harvest {
            production_line_id: 1,
            harvest_type: "BOXING".into(),
            gutter_count: 20,
            gutter_hole_count: Some(24),
            sowing_date: Some(Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap()),
            cutting_height: Some(10),
            baskets: vec![HarvestBasket { weight_kg: 10.0 }; baskets],
        },
    )
}

/// A small Juva data set: two harvests, one wastage, one packing and a
/// sowing, plus a Joroinen harvest that Juva reports must ignore.
pub fn sample_store() -> InMemoryEventStore {
    let mut joroinen_harvest = harvest(90, RUCOLA, 5, 50);
    joroinen_harvest.facility = Facility::Joroinen;

    InMemoryEventStore::new()
        .with_product(product(RUCOLA, "Rucola", "Rucola", false))
        .with_product(product(BASIL, "Basil", "Basilika", false))
        .with_product(product(LETTUCE, "Lettuce", "Salaatti", true))
        .with_line(ProductionLine {
            id: 1,
            facility: Facility::Juva,
            line_number: "A-1".into(),
            default_gutter_hole_count: Some(24),
        })
        .with_event(harvest(1, RUCOLA, 3, 4))
        .with_event(harvest(2, BASIL, 4, 2))
        .with_event(joroinen_harvest)
        .with_event(event(
            3,
            RUCOLA,
            4,
            15,
            EventPayload::Wastage {
                production_line_id: Some(1),
                phase: EventType::Harvest,
                reason: "Mould".into(),
                amount: 1,
                additional_information: Some("Back corner".into()),
            },
        ))
        .with_event(event(
            4,
            RUCOLA,
            5,
            120,
            EventPayload::Packing {
                package_size: PackageSize {
                    id: 1,
                    name: "100 g".into(),
                    size: 100,
                },
                packed_count: 3,
                baskets: vec![PackingBasket {
                    product_id: LETTUCE,
                    count: 2,
                }],
            },
        ))
        .with_event(event(
            5,
            BASIL,
            2,
            30,
            EventPayload::Sowing {
                production_line_id: None,
                amount: 64,
                pot_type: Some("PAPER".into()),
            },
        ))
}
