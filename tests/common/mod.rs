#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::{routing::get, Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use pacasmayo_routing::config::environment::EnvironmentConfig;
use pacasmayo_routing::create_app;
use pacasmayo_routing::database::{MemoryStore, Record, Table, TableStore};
use pacasmayo_routing::state::AppState;

/// Puerto reservado donde nunca escucha nadie
pub const UNREACHABLE: &str = "http://127.0.0.1:9/unreachable";

pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{}", addr)
}

/// Geocodificador que siempre responde con las mismas coordenadas
pub async fn geocoder_at(lat: f64, lng: f64) -> String {
    let router = Router::new().route(
        "/geocode",
        get(move || async move {
            Json(json!({
                "results": [{"geometry": {"location": {"lat": lat, "lng": lng}}}],
                "status": "OK"
            }))
        }),
    );
    format!("{}/geocode", spawn_stub(router).await)
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("fixture must be an object")
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new(store: MemoryStore, geocoding_url: &str, webhook_url: &str) -> Self {
        let store = Arc::new(store);
        let config = EnvironmentConfig {
            google_maps_api_key: "maps-key".to_string(),
            google_geocoding_url: geocoding_url.to_string(),
            n8n_webhook_url: webhook_url.to_string(),
            geocoding_timeout: Duration::from_secs(5),
            webhook_timeout: Duration::from_secs(5),
            ..EnvironmentConfig::default()
        };
        let state = AppState::new(config, store.clone() as Arc<dyn TableStore>, Client::new());
        Self {
            router: create_app(state),
            store,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, _, bytes) = self.send(request).await;
        (status, String::from_utf8(bytes).unwrap())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, bytes.to_vec())
    }

    pub async fn rows(&self, table: Table) -> Vec<Record> {
        self.store.get(table).await.unwrap()
    }
}
