use serde::Deserialize;
use validator::Validate;

use crate::models::{VehicleStatus, VehicleType};
use crate::utils::validation::validate_not_empty;

// Formulario "Registrar nuevo vehículo"
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleForm {
    #[validate(custom = "validate_not_empty")]
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub capacity_kg: f64,
}

// Actualizar el estado de un vehículo
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusForm {
    pub vehicle_id: String,
    pub status: VehicleStatus,
}

// Eliminar un vehículo
#[derive(Debug, Deserialize)]
pub struct DeleteVehicleForm {
    pub vehicle_id: String,
}
