use serde_json::json;

use crate::dto::Notice;
use crate::models::coordinates::PACASMAYO_CENTER;
use crate::repositories::{DeliveryRepository, DriverRepository, RouteRepository, VehicleRepository};
use crate::services::dashboard_service::build_dashboard;
use crate::state::AppState;
use crate::templates_structs::{script_json, DashboardTemplate, PageContext};
use crate::utils::errors::AppResult;

pub struct DashboardController {
    deliveries: DeliveryRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
    routes: RouteRepository,
}

impl DashboardController {
    pub fn new(state: &AppState) -> Self {
        Self {
            deliveries: DeliveryRepository::new(state.store.clone()),
            vehicles: VehicleRepository::new(state.store.clone()),
            drivers: DriverRepository::new(state.store.clone()),
            routes: RouteRepository::new(state.store.clone()),
        }
    }

    pub async fn show(&self) -> AppResult<DashboardTemplate> {
        let deliveries = self.deliveries.list().await?;
        let vehicle_count = self.vehicles.count().await?;
        let driver_count = self.drivers.count().await?;
        let routes = self.routes.list().await?;

        let metrics = build_dashboard(&deliveries, &routes, vehicle_count, driver_count);
        log::debug!(
            "📊 Dashboard: {} entregas, {} rutas, {} vehículos, {} conductores",
            metrics.totals.total,
            routes.len(),
            metrics.vehicle_count,
            metrics.driver_count
        );

        let map_json = script_json(&json!({
            "center": PACASMAYO_CENTER,
            "points": metrics.map_points,
        }));

        Ok(DashboardTemplate {
            ctx: PageContext::build("/", Vec::<Notice>::new()),
            metrics,
            map_json,
        })
    }
}
