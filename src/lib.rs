//! Sistema Optimizador de Rutas - Pacasmayo
//!
//! Dashboard web de logística: entregas, vehículos, almacenes, optimización
//! de rutas vía webhook de n8n y reportes PDF. Toda la persistencia vive en
//! una base de datos alojada detrás de `TableStore`.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod templates_structs;
pub mod utils;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer_for;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer_for(&state.config.cors_origins);

    Router::new()
        .merge(routes::dashboard_routes::create_dashboard_router())
        .nest("/deliveries", routes::delivery_routes::create_delivery_router())
        .nest("/optimize", routes::optimization_routes::create_optimization_router())
        .nest("/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/depots", routes::depot_routes::create_depot_router())
        .nest("/reports", routes::report_routes::create_report_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
