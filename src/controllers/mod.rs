//! Controllers
//!
//! Lógica de cada sección del dashboard: leen las tablas, aplican los
//! filtros en memoria, ejecutan las acciones de formulario y devuelven la
//! plantilla lista para renderizar.

pub mod dashboard_controller;
pub mod delivery_controller;
pub mod depot_controller;
pub mod optimization_controller;
pub mod report_controller;
pub mod vehicle_controller;

pub use dashboard_controller::DashboardController;
pub use delivery_controller::DeliveryController;
pub use depot_controller::DepotController;
pub use optimization_controller::OptimizationController;
pub use report_controller::ReportController;
pub use vehicle_controller::VehicleController;

use crate::models::RowId;
use crate::utils::errors::{bad_request_error, AppResult};

/// Id elegido en un `<select>` de acciones; vacío es un formulario roto
pub(crate) fn selected_id(raw: &str) -> AppResult<RowId> {
    if raw.trim().is_empty() {
        return Err(bad_request_error("No se seleccionó ningún registro"));
    }
    Ok(RowId::parse(raw))
}
