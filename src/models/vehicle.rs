//! Modelo de Vehicle
//! 
//! Este módulo contiene el struct Vehicle y sus enums de tipo y estado.
//! Mapea a la tabla vehicles de la base de datos alojada.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RowId;

/// Tipo de vehículo - los cuatro valores que ofrece el formulario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "Camión Pequeño")]
    SmallTruck,
    #[serde(rename = "Camión Mediano")]
    MediumTruck,
    #[serde(rename = "Camión Grande")]
    LargeTruck,
    #[serde(rename = "Motocicleta")]
    Motorcycle,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::SmallTruck,
        VehicleType::MediumTruck,
        VehicleType::LargeTruck,
        VehicleType::Motorcycle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::SmallTruck => "Camión Pequeño",
            VehicleType::MediumTruck => "Camión Mediano",
            VehicleType::LargeTruck => "Camión Grande",
            VehicleType::Motorcycle => "Motocicleta",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estado del vehículo - mapea a la columna status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Available,
        VehicleStatus::InUse,
        VehicleStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InUse => "in_use",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub capacity_kg: f64,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Matrícula tal como se guarda: sin espacios alrededor y en mayúsculas
pub fn normalize_license_plate(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_uses_display_names() {
        let json = serde_json::to_string(&VehicleType::SmallTruck).unwrap();
        assert_eq!(json, "\"Camión Pequeño\"");
        let parsed: VehicleType = serde_json::from_str("\"Motocicleta\"").unwrap();
        assert_eq!(parsed, VehicleType::Motorcycle);
    }

    #[test]
    fn test_status_defaults_to_available() {
        let row = serde_json::json!({
            "id": 3,
            "license_plate": "ABC-123",
            "vehicle_type": "Camión Grande",
            "capacity_kg": 1500.0
        });
        let v: Vehicle = serde_json::from_value(row).unwrap();
        assert_eq!(v.status, VehicleStatus::Available);
        assert_eq!(v.vehicle_type, VehicleType::LargeTruck);
    }

    #[test]
    fn test_normalize_license_plate() {
        assert_eq!(normalize_license_plate("  t1a-234 "), "T1A-234");
    }
}
