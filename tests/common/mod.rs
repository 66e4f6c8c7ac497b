//! Shared fixtures for the buylist integration tests.
//!
//! Provides small set/price documents as raw JSON (so key order is exactly
//! what a reader of the document sees), a `wiremock` stand-in for the
//! MTGJSON CDN, and `spawn_app()` which serves the router on an ephemeral
//! port.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use ckbuylist::models::{PricesDocument, SetDocument};
use ckbuylist::server::{router, AppState};
use ckbuylist::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// MH3 with three cards: two priced, one with retail prices only. The
/// second name needs CSV quoting (comma, quotes and a line break).
pub const SET_MH3: &str = r#"{
  "meta": {"date": "2024-06-03", "version": "5.2.2+20240603"},
  "data": {
    "code": "MH3",
    "name": "Modern Horizons 3",
    "cards": [
      {"uuid": "uuid-001", "name": "Flare of Denial", "number": "62",
       "identifiers": {"scryfallId": "sf-001", "cardKingdomId": "301"}},
      {"uuid": "uuid-002", "name": "Fire, Ice \"Split\"\nAftermath", "number": "290"},
      {"uuid": "uuid-003", "name": "Retail Only", "number": "7",
       "identifiers": {}}
    ]
  }
}"#;

pub const SET_EMPTY: &str = r#"{"data": {"code": "EMP", "cards": []}}"#;

/// Finish keys are deliberately not alphabetical.
pub const PRICES_TODAY: &str = r#"{
  "meta": {"date": "2024-06-03"},
  "data": {
    "uuid-001": {
      "paper": {
        "cardkingdom": {
          "buylist": {
            "normal": {"2024-06-01": 10.0, "2024-06-03": 12.5, "2024-06-02": 11.0},
            "foil": {"2024-06-03": 20.25}
          },
          "retail": {"normal": {"2024-06-03": 19.99}},
          "currency": "USD"
        },
        "tcgplayer": {"retail": {"normal": {"2024-06-03": 17.0}}, "currency": "USD"}
      },
      "mtgo": {"cardhoarder": {"retail": {"normal": {"2024-06-03": 4.1}}, "currency": "USD"}}
    },
    "uuid-002": {
      "paper": {
        "cardkingdom": {
          "buylist": {
            "Foil": {"2024-06-02": 0.4, "2024-06-03": 0.5},
            "etched": {}
          },
          "currency": "USD"
        }
      }
    },
    "uuid-003": {
      "paper": {"cardkingdom": {"retail": {"normal": {"2024-06-03": 0.25}}, "currency": "USD"}}
    },
    "uuid-999": {
      "paper": {"cardkingdom": {"buylist": {"normal": {"2024-06-03": 99.0}}, "currency": "USD"}}
    }
  }
}"#;

pub const META: &str = r#"{"meta": {"date": "2024-06-03", "version": "5.2.2+20240603"},
  "data": {"date": "2024-06-03", "version": "5.2.2+20240603"}}"#;

pub fn set_doc(raw: &str) -> SetDocument {
    serde_json::from_str(raw).unwrap()
}

pub fn prices_doc(raw: &str) -> PricesDocument {
    serde_json::from_str(raw).unwrap()
}

/// Config pointing at `cdn_base` with a short timeout.
pub fn test_config(cdn_base: &str) -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        cdn_base: cdn_base.to_string(),
        timeout: Duration::from_secs(2),
        ..Config::default()
    }
}

/// Mock CDN serving MH3, an empty set, the price snapshot and Meta.json.
/// Any other path answers 404.
pub async fn mock_cdn() -> MockServer {
    let server = MockServer::start().await;
    mount_json(&server, "/MH3.json", SET_MH3).await;
    mount_json(&server, "/EMP.json", SET_EMPTY).await;
    mount_json(&server, "/AllPricesToday.json", PRICES_TODAY).await;
    mount_json(&server, "/Meta.json", META).await;
    server
}

/// Mock CDN where the price snapshot answers 500.
pub async fn mock_cdn_without_prices() -> MockServer {
    let server = MockServer::start().await;
    mount_json(&server, "/MH3.json", SET_MH3).await;
    Mock::given(method("GET"))
        .and(path("/AllPricesToday.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;
    server
}

pub async fn mount_json(server: &MockServer, at: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/json"))
        .mount(server)
        .await;
}

/// Serve the app on an ephemeral port and return its base URL.
pub async fn spawn_app(config: Config) -> String {
    let state = Arc::new(AppState::new(config).unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

/// Parse a CSV body into records with the `csv` reader.
pub fn parse_csv(body: &str) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(body.as_bytes())
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}
