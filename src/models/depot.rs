//! Modelo de Depot (almacén)
//!
//! Un almacén es el origen y destino de cada ruta optimizada. Como máximo
//! uno lleva `is_default`; la base de datos lo garantiza con un índice único
//! parcial y el intercambio se hace con una sola operación del store.

use serde::{Deserialize, Serialize};

use super::{Coordinates, RowId};

/// Columna que marca el almacén predeterminado
pub const DEFAULT_FLAG: &str = "is_default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Almacén preseleccionado: el predeterminado o, si no hay, el primero
pub fn preferred_depot(depots: &[Depot]) -> Option<&Depot> {
    depots.iter().find(|d| d.is_default).or_else(|| depots.first())
}
