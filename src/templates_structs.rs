//! Vistas HTML (askama)
//!
//! Cada sección del dashboard tiene su struct de plantilla; todas llevan un
//! `PageContext` con la navegación común. Las plantillas viven en
//! `templates/`.

use askama::Template;
use axum::response::Html;
use serde::Serialize;

use crate::dto::Notice;
use crate::models::{Delivery, DeliveryStatus, Depot, OptimizedRoute, RouteSummary, Vehicle, VehicleStatus, VehicleType};
use crate::services::dashboard_service::DashboardMetrics;
use crate::utils::errors::AppResult;

pub const APP_TITLE: &str = "🚚 Sistema Optimizador de Rutas - Pacasmayo";

/// Secciones del menú lateral: (ruta, etiqueta)
pub const SECTIONS: [(&str, &str); 6] = [
    ("/", "Dashboard"),
    ("/deliveries", "Gestión de Entregas"),
    ("/optimize", "Optimización de Rutas"),
    ("/vehicles", "Gestión de Vehículos"),
    ("/depots", "Gestión de Almacenes"),
    ("/reports", "Reportes"),
];

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Contexto común de todas las páginas.
/// Las plantillas lo usan como `ctx.title`, `ctx.nav`, etc.
pub struct PageContext {
    pub title: &'static str,
    pub nav: Vec<NavLink>,
    pub notices: Vec<Notice>,
}

impl PageContext {
    pub fn build(current_path: &str, notices: Vec<Notice>) -> Self {
        let nav = SECTIONS
            .iter()
            .map(|&(href, label)| NavLink {
                href,
                label,
                active: href == current_path,
            })
            .collect();
        Self {
            title: APP_TITLE,
            nav,
            notices,
        }
    }
}

/// Opción de un `<select>`
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Datos JSON embebidos en un `<script>` (sin cerrar la etiqueta)
pub fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}

pub fn render<T: Template>(tmpl: &T) -> AppResult<Html<String>> {
    Ok(Html(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub metrics: DashboardMetrics,
    pub map_json: String,
}

#[derive(Template)]
#[template(path = "deliveries.html")]
pub struct DeliveriesTemplate {
    pub ctx: PageContext,
    pub deliveries: Vec<Delivery>,
    pub has_deliveries: bool,
    pub status_options: Vec<SelectOption>,
    pub search: String,
    pub transitions: Vec<DeliveryStatus>,
    pub today: String,
}

/// Resultado de una optimización para pintar métricas y mapa
pub struct OptimizationView {
    pub total_distance_km: String,
    pub estimated_duration_minutes: String,
    pub map_json: Option<String>,
}

#[derive(Template)]
#[template(path = "optimize.html")]
pub struct OptimizeTemplate {
    pub ctx: PageContext,
    pub candidates: Vec<SelectOption>,
    pub depots: Vec<SelectOption>,
    pub show_form: bool,
    pub outcome: Option<OptimizationView>,
}

#[derive(Template)]
#[template(path = "vehicles.html")]
pub struct VehiclesTemplate {
    pub ctx: PageContext,
    pub vehicles: Vec<Vehicle>,
    pub vehicle_types: Vec<VehicleType>,
    pub statuses: Vec<VehicleStatus>,
}

#[derive(Template)]
#[template(path = "depots.html")]
pub struct DepotsTemplate {
    pub ctx: PageContext,
    pub depots: Vec<Depot>,
}

#[derive(Template)]
#[template(path = "reports.html")]
pub struct ReportsTemplate {
    pub ctx: PageContext,
    pub routes: Vec<OptimizedRoute>,
    pub summary: RouteSummary,
}
