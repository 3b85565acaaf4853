//! Modelo de Delivery
//!
//! Este módulo contiene el struct Delivery, su estado y los filtros que la
//! vista de entregas aplica después de leer toda la tabla `deliveries`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Coordinates, RowId};

/// Prefijo de los números de tracking generados por el formulario
pub const TRACKING_PREFIX: &str = "TRK";

/// Estado de la entrega - mapea a la columna status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    InProgress,
    Delivered,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 3] = [
        DeliveryStatus::Pending,
        DeliveryStatus::InProgress,
        DeliveryStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::InProgress => "in_progress",
            DeliveryStatus::Delivered => "delivered",
        }
    }

    /// Etiqueta que muestran los botones de acciones rápidas
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pendiente",
            DeliveryStatus::InProgress => "En Progreso",
            DeliveryStatus::Delivered => "Entregada",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "📋",
            DeliveryStatus::InProgress => "🚚",
            DeliveryStatus::Delivered => "✅",
        }
    }

    /// Solo las entregas sin completar pueden entrar en una optimización
    pub fn is_open(&self) -> bool {
        matches!(self, DeliveryStatus::Pending | DeliveryStatus::InProgress)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(DeliveryStatus::Pending),
            "in_progress" => Ok(DeliveryStatus::InProgress),
            "delivered" => Ok(DeliveryStatus::Delivered),
            other => Err(format!("Estado de entrega desconocido: {}", other)),
        }
    }
}

/// Delivery principal - mapea a la tabla deliveries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub tracking_number: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub customer_address: String,
    #[serde(default)]
    pub customer_coordinates: Option<Coordinates>,
    #[serde(default)]
    pub package_description: Option<String>,
    #[serde(default)]
    pub package_weight: Option<f64>,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub estimated_delivery_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Delivery {
    /// Etiqueta usada en el selector de la vista de optimización
    pub fn selector_label(&self) -> String {
        format!("{} - {}", self.tracking_number, self.customer_name)
    }
}

/// Número de tracking derivado del instante de creación (segundos Unix)
pub fn tracking_number_at(now: DateTime<Utc>) -> String {
    format!("{}{}", TRACKING_PREFIX, now.timestamp())
}

/// Conservar solo las entregas con el estado indicado
pub fn filter_by_status(deliveries: Vec<Delivery>, status: DeliveryStatus) -> Vec<Delivery> {
    deliveries.into_iter().filter(|d| d.status == status).collect()
}

/// Búsqueda por subcadena, sin distinguir mayúsculas, en cliente o tracking
pub fn search_deliveries(deliveries: Vec<Delivery>, query: &str) -> Vec<Delivery> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return deliveries;
    }
    deliveries
        .into_iter()
        .filter(|d| {
            d.customer_name.to_lowercase().contains(&needle)
                || d.tracking_number.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Estados presentes en los datos, ordenados alfabéticamente para el selector
pub fn distinct_statuses(deliveries: &[Delivery]) -> Vec<DeliveryStatus> {
    let mut statuses: Vec<DeliveryStatus> = deliveries.iter().map(|d| d.status).collect();
    statuses.sort_by_key(|s| s.as_str());
    statuses.dedup();
    statuses
}

/// Filtros de la lista de entregas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryFilters {
    pub status: Option<DeliveryStatus>,
    pub search: Option<String>,
}

impl DeliveryFilters {
    pub fn apply(&self, deliveries: Vec<Delivery>) -> Vec<Delivery> {
        let mut rows = deliveries;
        if let Some(status) = self.status {
            rows = filter_by_status(rows, status);
        }
        if let Some(search) = self.search.as_deref() {
            rows = search_deliveries(rows, search);
        }
        rows
    }
}
