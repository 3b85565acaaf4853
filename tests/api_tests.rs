mod common;

use axum::http::StatusCode;
use axum::{routing::post, Router};
use serde_json::json;

use common::{geocoder_at, record, spawn_stub, TestApp, UNREACHABLE};
use pacasmayo_routing::database::{MemoryStore, Table, TableStore};

fn open_deliveries() -> MemoryStore {
    MemoryStore::with_rows([
        (
            Table::Deliveries,
            vec![
                record(json!({
                    "id": 1, "tracking_number": "TRK1700000001", "customer_name": "Juan Perez",
                    "customer_address": "Jr. Dos de Mayo 135", "status": "pending",
                    "customer_coordinates": {"lat": -7.40, "lng": -79.57}
                })),
                record(json!({
                    "id": 2, "tracking_number": "TRK1700000002", "customer_name": "Rosa Diaz",
                    "customer_address": "Av. Leoncio Prado 420", "status": "in_progress",
                    "customer_coordinates": {"lat": -7.398, "lng": -79.568}
                })),
                record(json!({
                    "id": 3, "tracking_number": "TRK1700000003", "customer_name": "Luis Rojas",
                    "customer_address": "Calle Junín 88", "status": "delivered"
                })),
            ],
        ),
        (
            Table::Depots,
            vec![record(json!({
                "id": 10, "name": "Principal", "address": "Malecón Grau 100",
                "coordinates": {"lat": -7.401, "lng": -79.571}, "is_default": true
            }))],
        ),
    ])
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new(MemoryStore::new(), UNREACHABLE, UNREACHABLE);
    let (status, content_type, body) = app.get("/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_dashboard_without_data() {
    let app = TestApp::new(MemoryStore::new(), UNREACHABLE, UNREACHABLE);
    let (status, _, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("No hay datos aún para mostrar estadísticas."));
}

#[tokio::test]
async fn test_create_delivery_geocodes_and_stores_pending() {
    let geocoder = geocoder_at(-7.40, -79.57).await;
    let app = TestApp::new(MemoryStore::new(), &geocoder, UNREACHABLE);

    let (status, html) = app
        .post_form(
            "/deliveries",
            "customer_name=Juan+Perez&customer_address=Jr.+Dos+de+Mayo+135&package_weight=2.5",
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Entrega creada con coordenadas reales."));

    let rows = app.rows(Table::Deliveries).await;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["status"], "pending");
    assert_eq!(row["customer_name"], "Juan Perez");
    assert_eq!(row["customer_coordinates"], json!({"lat": -7.40, "lng": -79.57}));
    assert_eq!(row["customer_phone"], serde_json::Value::Null);

    let tracking = row["tracking_number"].as_str().unwrap();
    assert!(regex::Regex::new(r"^TRK\d+$").unwrap().is_match(tracking));
}

#[tokio::test]
async fn test_create_delivery_requires_name_and_address() {
    let geocoder = geocoder_at(-7.40, -79.57).await;
    let app = TestApp::new(MemoryStore::new(), &geocoder, UNREACHABLE);

    let (status, html) = app
        .post_form("/deliveries", "customer_name=&customer_address=Jr.+Lima+1")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Completa todos los campos obligatorios."));
    assert!(app.rows(Table::Deliveries).await.is_empty());
}

#[tokio::test]
async fn test_create_delivery_without_geocoding_result() {
    let router = Router::new().route(
        "/geocode",
        axum::routing::get(|| async { axum::Json(json!({"results": [], "status": "ZERO_RESULTS"})) }),
    );
    let geocoder = format!("{}/geocode", spawn_stub(router).await);
    let app = TestApp::new(MemoryStore::new(), &geocoder, UNREACHABLE);

    let (_, html) = app
        .post_form("/deliveries", "customer_name=Ana&customer_address=Calle+Falsa+123")
        .await;
    assert!(html.contains("No se pudo obtener coordenadas. Verifica la dirección."));
    assert!(app.rows(Table::Deliveries).await.is_empty());
}

#[tokio::test]
async fn test_status_filter_and_quick_update() {
    let app = TestApp::new(open_deliveries(), UNREACHABLE, UNREACHABLE);

    let (_, _, body) = app.get("/deliveries?status=delivered").await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("TRK1700000003"));
    assert!(!html.contains("TRK1700000001"));

    let (_, html) = app
        .post_form("/deliveries/status", "tracking_number=TRK1700000001&status=delivered")
        .await;
    assert!(html.contains("Estado cambiado a"));
    let rows = app.rows(Table::Deliveries).await;
    let first = rows.iter().find(|r| r["id"] == 1).unwrap();
    assert_eq!(first["status"], "delivered");
}

#[tokio::test]
async fn test_optimize_requires_two_deliveries() {
    let app = TestApp::new(open_deliveries(), UNREACHABLE, UNREACHABLE);

    let (status, html) = app.post_form("/optimize", "deliveries=1&depot=Principal").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Selecciona al menos dos entregas para optimizar una ruta."));
}

#[tokio::test]
async fn test_optimize_without_open_deliveries() {
    let app = TestApp::new(MemoryStore::new(), UNREACHABLE, UNREACHABLE);
    let (_, _, body) = app.get("/optimize").await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("No hay entregas pendientes para optimizar."));
}

#[tokio::test]
async fn test_optimize_webhook_error_is_shown_verbatim() {
    let webhook = Router::new().route(
        "/webhook",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "internal error") }),
    );
    let webhook = format!("{}/webhook", spawn_stub(webhook).await);
    let app = TestApp::new(open_deliveries(), UNREACHABLE, &webhook);

    let (status, html) = app
        .post_form("/optimize", "deliveries=1&deliveries=2&depot=Principal")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error al optimizar ruta"));
    assert!(html.contains("internal error"));
    assert!(app.rows(Table::OptimizedRoutes).await.is_empty());
}

#[tokio::test]
async fn test_optimize_success_draws_route() {
    let webhook = Router::new().route(
        "/webhook",
        post(|axum::Json(body): axum::Json<serde_json::Value>| async move {
            assert_eq!(body["deliveries"], json!([1, 2]));
            assert_eq!(body["depot"], json!({"lat": -7.401, "lng": -79.571}));
            axum::Json(json!({
                "total_distance_km": 12.346,
                "estimated_duration_minutes": 45,
                "optimized_sequence": {
                    "encodedPolyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
                    "ordered_waypoints": [
                        {"lat": -7.40, "lng": -79.57, "label": "Juan Perez"},
                        {"lat": -7.398, "lng": -79.568}
                    ]
                }
            }))
        }),
    );
    let webhook = format!("{}/webhook", spawn_stub(webhook).await);
    let app = TestApp::new(open_deliveries(), UNREACHABLE, &webhook);

    let (_, html) = app
        .post_form("/optimize", "deliveries=1&deliveries=2&depot=Principal")
        .await;
    assert!(html.contains("Ruta optimizada correctamente."));
    assert!(html.contains("Usando almacén: Principal"));
    assert!(html.contains("12.35"));
    assert!(html.contains("1. Juan Perez"));
    assert!(html.contains("2. Entrega"));
    assert!(app.rows(Table::OptimizedRoutes).await.is_empty());
}

#[tokio::test]
async fn test_optimize_unreachable_webhook() {
    let app = TestApp::new(open_deliveries(), UNREACHABLE, UNREACHABLE);
    let (status, html) = app
        .post_form("/optimize", "deliveries=1&deliveries=2")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error al conectar con n8n"));
}

#[tokio::test]
async fn test_sequential_default_depots_keep_one_default() {
    let geocoder = geocoder_at(-7.401, -79.571).await;
    let app = TestApp::new(MemoryStore::new(), &geocoder, UNREACHABLE);

    let (_, html) = app
        .post_form("/depots", "name=Principal&address=Malec%C3%B3n+Grau+100&is_default=on")
        .await;
    assert!(html.contains("Almacén registrado correctamente."));
    app.post_form("/depots", "name=Secundario&address=Jr.+Lima+1&is_default=on")
        .await;

    let rows = app.rows(Table::Depots).await;
    assert_eq!(rows.len(), 2);
    let defaults: Vec<_> = rows.iter().filter(|r| r["is_default"] == true).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["name"], "Secundario");
}

#[tokio::test]
async fn test_default_switch_for_missing_depot_keeps_current_default() {
    let store = open_deliveries();
    store
        .insert(
            Table::Depots,
            record(json!({
                "id": 11, "name": "Secundario", "address": "Jr. Lima 1",
                "coordinates": {"lat": -7.399, "lng": -79.569}, "is_default": false
            })),
        )
        .await
        .unwrap();
    let app = TestApp::new(store, UNREACHABLE, UNREACHABLE);

    let (status, _) = app
        .post_form("/depots/default", "depot_id=999&is_default=on")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let rows = app.rows(Table::Depots).await;
    let principal = rows.iter().find(|r| r["id"] == 10).unwrap();
    assert_eq!(principal["is_default"], true);

    let (status, html) = app
        .post_form("/depots/default", "depot_id=11&is_default=on")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Almacén actualizado."));
    let rows = app.rows(Table::Depots).await;
    let defaults: Vec<_> = rows.iter().filter(|r| r["is_default"] == true).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["id"], 11);

    let (status, _) = app.post_form("/depots/default", "depot_id=999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_update_accepts_any_tracking_format() {
    let store = MemoryStore::with_rows([(
        Table::Deliveries,
        vec![record(json!({
            "id": 7, "tracking_number": "PKG-77", "customer_name": "Ana Vega",
            "customer_address": "Jr. Ayacucho 12", "status": "pending"
        }))],
    )]);
    let app = TestApp::new(store, UNREACHABLE, UNREACHABLE);

    let (status, html) = app
        .post_form("/deliveries/status", "tracking_number=PKG-77&status=in_progress")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Estado cambiado a"));
    assert_eq!(app.rows(Table::Deliveries).await[0]["status"], "in_progress");
}

#[tokio::test]
async fn test_dashboard_counts_every_vehicle_row() {
    let store = MemoryStore::with_rows([
        (
            Table::Deliveries,
            vec![record(json!({
                "id": 1, "tracking_number": "TRK1", "customer_name": "Juan Perez",
                "customer_address": "Jr. Dos de Mayo 135", "status": "pending"
            }))],
        ),
        (
            Table::Vehicles,
            vec![
                record(json!({
                    "id": 1, "license_plate": "ABC-123", "vehicle_type": "Motocicleta",
                    "capacity_kg": 150, "status": "available"
                })),
                record(json!({
                    "id": 2, "license_plate": "XYZ-999", "vehicle_type": "Trimóvil",
                    "status": "retired"
                })),
            ],
        ),
    ]);
    let app = TestApp::new(store, UNREACHABLE, UNREACHABLE);

    let (status, _, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("🚛 Vehículos<strong>2</strong>"));
}

#[tokio::test]
async fn test_vehicle_lifecycle_and_pdf() {
    let app = TestApp::new(MemoryStore::new(), UNREACHABLE, UNREACHABLE);

    let (_, _, body) = app.get("/vehicles/report.pdf").await;
    assert!(String::from_utf8(body).unwrap().contains("No hay vehículos registrados."));

    let (_, html) = app
        .post_form(
            "/vehicles",
            "license_plate=abc-123&vehicle_type=Motocicleta&capacity_kg=150",
        )
        .await;
    assert!(html.contains("registrado correctamente."));
    let rows = app.rows(Table::Vehicles).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "available");

    let (status, content_type, body) = app.get("/vehicles/report.pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/pdf"));
    assert!(body.starts_with(b"%PDF"));

    let id = rows[0]["id"].to_string();
    let (_, html) = app
        .post_form("/vehicles/delete", &format!("vehicle_id={}", id))
        .await;
    assert!(html.contains("eliminado del registro."));
    assert!(app.rows(Table::Vehicles).await.is_empty());
}

#[tokio::test]
async fn test_vehicle_without_plate() {
    let app = TestApp::new(MemoryStore::new(), UNREACHABLE, UNREACHABLE);
    let (_, html) = app
        .post_form("/vehicles", "license_plate=++&vehicle_type=Motocicleta&capacity_kg=150")
        .await;
    assert!(html.contains("Debes ingresar una placa válida."));
    assert!(app.rows(Table::Vehicles).await.is_empty());
}

#[tokio::test]
async fn test_routes_report_pdf() {
    let store = MemoryStore::with_rows([(
        Table::OptimizedRoutes,
        vec![record(json!({
            "id": 1, "route_name": "Ruta Norte", "total_distance_km": 8.5,
            "estimated_duration_minutes": 30
        }))],
    )]);
    let app = TestApp::new(store, UNREACHABLE, UNREACHABLE);

    let (_, _, body) = app.get("/reports").await;
    assert!(String::from_utf8(body).unwrap().contains("Ruta Norte"));

    let (status, content_type, body) = app.get("/reports/routes.pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/pdf"));
    assert!(body.starts_with(b"%PDF"));
}
