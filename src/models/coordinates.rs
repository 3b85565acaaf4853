//! Par de coordenadas geográficas
//!
//! Mismo formato `{lat, lng}` que usan la base de datos, el geocodificador
//! y el webhook de optimización.

use serde::{Deserialize, Serialize};

/// Centro de Pacasmayo, usado para centrar los mapas del dashboard
pub const PACASMAYO_CENTER: Coordinates = Coordinates {
    lat: -7.4002,
    lng: -79.5717,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Punto medio aritmético de una serie de coordenadas
    pub fn centroid(points: &[Coordinates]) -> Option<Coordinates> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
        let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;
        Some(Coordinates { lat, lng })
    }
}
