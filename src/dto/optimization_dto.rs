use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, OptimizedSequence, RowId};

// Payload enviado al webhook de optimización
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationRequest {
    pub deliveries: Vec<RowId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depot: Option<Coordinates>,
}

// Respuesta del webhook (HTTP 200)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptimizationResult {
    #[serde(default)]
    pub total_distance_km: f64,
    #[serde(default)]
    pub estimated_duration_minutes: f64,
    #[serde(default)]
    pub optimized_sequence: Option<OptimizedSequence>,
}

impl OptimizationResult {
    /// Polilínea codificada, si el workflow la devolvió
    pub fn encoded_polyline(&self) -> Option<&str> {
        self.optimized_sequence
            .as_ref()
            .and_then(|s| s.encoded_polyline.as_deref())
            .filter(|p| !p.is_empty())
    }
}

/// Formulario de la vista de optimización.
///
/// Llega como pares clave/valor porque `deliveries` se repite una vez por
/// entrega seleccionada.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizeForm {
    pub deliveries: Vec<String>,
    pub depot: Option<String>,
}

impl OptimizeForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "deliveries" => form.deliveries.push(value),
                "depot" if !value.is_empty() => form.depot = Some(value),
                _ => {}
            }
        }
        form
    }
}
