use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde_json::json;

use crate::controllers::DashboardController;
use crate::state::AppState;
use crate::templates_structs::render;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(show_dashboard))
        .route("/test", get(test_endpoint))
}

async fn show_dashboard(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let controller = DashboardController::new(&state);
    render(&controller.show().await?)
}

/// Endpoint de prueba simple
async fn test_endpoint(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡Sistema Optimizador de Rutas - Pacasmayo funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "store": state.config.store_backend.to_string(),
        "environment": state.config.environment,
    }))
}
