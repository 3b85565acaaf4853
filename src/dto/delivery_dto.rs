use serde::Deserialize;
use validator::Validate;

use crate::models::delivery::DeliveryFilters;
use crate::models::DeliveryStatus;
use crate::utils::validation::validate_not_empty;

// Formulario "Nueva entrega"
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeliveryForm {
    #[validate(custom = "validate_not_empty")]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[validate(custom = "validate_not_empty")]
    pub customer_address: String,
    #[serde(default)]
    pub package_description: String,
    #[validate(range(min = 0.1))]
    #[serde(default = "default_package_weight")]
    pub package_weight: f64,
    #[serde(default)]
    pub estimated_delivery_time: String,
}

fn default_package_weight() -> f64 {
    1.0
}

// Acción rápida de cambio de estado
#[derive(Debug, Deserialize)]
pub struct DeliveryStatusForm {
    pub tracking_number: String,
    pub status: DeliveryStatus,
}

// Query string de la lista (filtro por estado y búsqueda)
#[derive(Debug, Default, Deserialize)]
pub struct DeliveryListQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl DeliveryListQuery {
    /// "Todos" o un valor vacío significan sin filtro de estado
    pub fn filters(&self) -> DeliveryFilters {
        let status = self
            .status
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "Todos")
            .and_then(|s| s.parse().ok());
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        DeliveryFilters { status, search }
    }
}
