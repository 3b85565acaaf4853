use validator::Validate;

use crate::controllers::selected_id;
use crate::dto::vehicle_dto::{CreateVehicleForm, DeleteVehicleForm, UpdateVehicleStatusForm};
use crate::dto::Notice;
use crate::models::vehicle::normalize_license_plate;
use crate::models::{RowId, Vehicle, VehicleStatus, VehicleType};
use crate::repositories::VehicleRepository;
use crate::services::report_service::{render_pdf, vehicles_report};
use crate::state::AppState;
use crate::templates_structs::{PageContext, VehiclesTemplate};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::has_field_error;

pub struct VehicleController {
    repository: VehicleRepository,
}

/// Matrícula del vehículo seleccionado, para los avisos
fn plate_of(vehicles: &[Vehicle], id: &RowId) -> String {
    vehicles
        .iter()
        .find(|v| v.id.as_ref() == Some(id))
        .map(|v| v.license_plate.clone())
        .unwrap_or_else(|| id.to_string())
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: VehicleRepository::new(state.store.clone()),
        }
    }

    pub async fn page(&self, notices: Vec<Notice>) -> AppResult<VehiclesTemplate> {
        Ok(VehiclesTemplate {
            ctx: PageContext::build("/vehicles", notices),
            vehicles: self.repository.list().await?,
            vehicle_types: VehicleType::ALL.to_vec(),
            statuses: VehicleStatus::ALL.to_vec(),
        })
    }

    pub async fn create(&self, form: CreateVehicleForm) -> AppResult<Notice> {
        if let Err(errors) = form.validate() {
            log::warn!("⚠️ Formulario de vehículo inválido: {}", errors);
            if has_field_error(&errors, &["license_plate"]) {
                return Ok(Notice::warning("⚠️ Debes ingresar una placa válida."));
            }
            return Ok(Notice::warning("⚠️ Completa todos los campos obligatorios."));
        }

        let plate = normalize_license_plate(&form.license_plate);
        self.repository
            .create(plate.clone(), form.vehicle_type, form.capacity_kg)
            .await?;
        log::info!("🚛 Vehículo registrado: {}", plate);
        Ok(Notice::success(format!("✅ Vehículo {} registrado correctamente.", plate)))
    }

    pub async fn update_status(&self, form: UpdateVehicleStatusForm) -> AppResult<Notice> {
        let id = selected_id(&form.vehicle_id)?;
        let vehicles = self.repository.list().await?;
        let plate = plate_of(&vehicles, &id);
        if self.repository.update_status(&id, form.status).await? == 0 {
            return Err(not_found_error("Vehicle", &form.vehicle_id));
        }
        Ok(Notice::success(format!(
            "🔄 Estado de {} actualizado a '{}'.",
            plate, form.status
        )))
    }

    pub async fn delete(&self, form: DeleteVehicleForm) -> AppResult<Notice> {
        let id = selected_id(&form.vehicle_id)?;
        let vehicles = self.repository.list().await?;
        let plate = plate_of(&vehicles, &id);
        if self.repository.delete(&id).await? == 0 {
            return Err(not_found_error("Vehicle", &form.vehicle_id));
        }
        log::info!("🗑️ Vehículo eliminado: {}", plate);
        Ok(Notice::warning(format!("🚫 Vehículo {} eliminado del registro.", plate)))
    }

    /// PDF de vehículos; `None` si no hay ninguno registrado
    pub async fn report_pdf(&self) -> AppResult<Option<Vec<u8>>> {
        let vehicles = self.repository.list().await?;
        if vehicles.is_empty() {
            return Ok(None);
        }
        let pages = vehicles_report(&vehicles);
        Ok(Some(render_pdf("Reporte de Vehículos - Pacasmayo", &pages)?))
    }
}
